use dioxus::prelude::*;
use services::GuaranteeError;
use signcode_core::model::{REFUND_WINDOW_DAYS, RefundReason};
use tracing::warn;

use crate::context::{AppContext, UiState};
use crate::views::contact::SUPPORT_EMAIL;
use crate::views::{InlineError, SubmitState, ViewError};
use crate::vm::{GuaranteeForm, REFUNDABLE_PLANS, plan_option_label};

#[component]
pub fn GuaranteeView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let guarantees = ctx.guarantees();
    let mut form = use_signal(|| GuaranteeForm::for_session(&state.user.peek().session));
    let mut submit = use_signal(|| SubmitState::Idle);

    let on_submit = move |_: MouseEvent| {
        let guarantees = guarantees.clone();
        let draft = match form.read().to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                submit.set(SubmitState::Invalid(message));
                return;
            }
        };
        spawn(async move {
            submit.set(SubmitState::Submitting);
            match guarantees.submit(draft).await {
                Ok(_) => submit.set(SubmitState::Done),
                Err(GuaranteeError::Invalid(err)) => {
                    submit.set(SubmitState::Invalid(err.to_string()));
                }
                Err(err) => {
                    warn!("guarantee request failed: {err}");
                    submit.set(SubmitState::Failed(ViewError::from(&err)));
                }
            }
        });
    };

    let header = rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{REFUND_WINDOW_DAYS}-Day Money Back Guarantee" }
            p { class: "view-subtitle",
                "Not happy with your subscription? Ask for a full refund within {REFUND_WINDOW_DAYS} days."
            }
        }
        ul { class: "guarantee-promises",
            li { strong { "{REFUND_WINDOW_DAYS} Days" } " Full refund period" }
            li { strong { "No Questions" } " Simple process" }
            li { strong { "Quick Processing" } " 2-3 business days" }
        }
    };

    if submit() == SubmitState::Done {
        return rsx! {
            div { class: "page guarantee-page",
                {header}
                div { class: "form-success", role: "status",
                    h3 { "Request Submitted Successfully!" }
                    p {
                        "We've received your money-back guarantee request. Our team will review it "
                        "and get back to you within 2-3 business days."
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            form.set(GuaranteeForm::for_session(&state.user.peek().session));
                            submit.set(SubmitState::Idle);
                        },
                        "Submit another request"
                    }
                }
            }
        };
    }

    let values = form();
    let busy = submit().is_submitting();
    let error = submit().error_message();

    rsx! {
        div { class: "page guarantee-page",
            {header}
            div { class: "form-grid",
                label { r#for: "guarantee-name", "Full name" }
                input {
                    id: "guarantee-name",
                    autocomplete: "name",
                    value: "{values.name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
                label { r#for: "guarantee-email", "Email" }
                input {
                    id: "guarantee-email",
                    r#type: "email",
                    autocomplete: "email",
                    value: "{values.email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
                label { r#for: "guarantee-plan", "Subscription" }
                select {
                    id: "guarantee-plan",
                    value: "{values.subscription_type}",
                    onchange: move |evt| form.write().subscription_type = evt.value(),
                    option { value: "", "Select your plan" }
                    for tier in REFUNDABLE_PLANS {
                        option {
                            value: "{tier}",
                            selected: values.subscription_type == tier.as_str(),
                            "{plan_option_label(tier)}"
                        }
                    }
                }
                label { r#for: "guarantee-reason", "Reason for refund" }
                select {
                    id: "guarantee-reason",
                    value: "{values.reason}",
                    onchange: move |evt| form.write().reason = evt.value(),
                    option { value: "", "Select a reason" }
                    for reason in RefundReason::ALL {
                        option {
                            value: "{reason}",
                            selected: values.reason == reason.as_str(),
                            "{reason.label()}"
                        }
                    }
                }
                label { r#for: "guarantee-info", "Additional information (optional)" }
                textarea {
                    id: "guarantee-info",
                    rows: "4",
                    value: "{values.additional_info}",
                    oninput: move |evt| form.write().additional_info = evt.value(),
                }
            }
            if let Some(message) = error {
                InlineError {
                    message,
                    on_dismiss: move |()| submit.set(SubmitState::Idle),
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: busy,
                onclick: on_submit,
                if busy { "Submitting..." } else { "Submit refund request" }
            }
            p { class: "guarantee-help",
                "Questions? Email "
                a { href: "mailto:{SUPPORT_EMAIL}", "{SUPPORT_EMAIL}" }
            }
        }
    }
}
