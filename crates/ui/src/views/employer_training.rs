use dioxus::prelude::*;
use services::TrainingError;
use signcode_core::model::{CompanySize, TrainingTopic};
use tracing::warn;

use crate::context::AppContext;
use crate::views::{InlineError, SubmitState, ViewError};
use crate::vm::TrainingForm;

#[component]
pub fn EmployerTrainingView() -> Element {
    let ctx = use_context::<AppContext>();
    let training = ctx.training();
    let mut form = use_signal(TrainingForm::default);
    let mut submit = use_signal(|| SubmitState::Idle);

    let on_submit = move |_: MouseEvent| {
        let training = training.clone();
        let draft = match form.read().to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                submit.set(SubmitState::Invalid(message));
                return;
            }
        };
        spawn(async move {
            submit.set(SubmitState::Submitting);
            match training.submit(draft).await {
                Ok(_) => {
                    form.set(TrainingForm::default());
                    submit.set(SubmitState::Done);
                }
                Err(TrainingError::Invalid(err)) => {
                    submit.set(SubmitState::Invalid(err.to_string()));
                }
                Err(err) => {
                    warn!("training request failed: {err}");
                    submit.set(SubmitState::Failed(ViewError::from(&err)));
                }
            }
        });
    };

    let values = form();
    let sizes = CompanySize::ALL.iter().map(|&size| {
        rsx! {
            option { value: "{size}", selected: values.company_size == size.as_str(), "{size.label()}" }
        }
    });
    let topics = TrainingTopic::ALL.iter().map(|&topic| {
        let mut form = form;
        let id = format!("training-topic-{}", topic_slug(topic));
        rsx! {
            div { class: "training-topic",
                input {
                    id: "{id}",
                    r#type: "checkbox",
                    checked: values.is_selected(topic),
                    onchange: move |_| form.write().toggle_topic(topic),
                }
                label { r#for: "{id}", "{topic.label()}" }
            }
        }
    });
    let busy = submit().is_submitting();
    let error = submit().error_message();

    rsx! {
        div { class: "page training-page",
            header { class: "view-header",
                h2 { class: "view-title", "Deaf awareness training for your team" }
                p { class: "view-subtitle",
                    "Tell us about your organisation and the areas you want covered."
                }
            }
            if submit() == SubmitState::Done {
                p { class: "form-success", role: "status",
                    "Thank you. Your training request has been submitted. We will contact you within 24 hours."
                }
            }
            div { class: "form-grid",
                label { r#for: "training-company", "Company name" }
                input {
                    id: "training-company",
                    autocomplete: "organization",
                    value: "{values.company_name}",
                    oninput: move |evt| form.write().company_name = evt.value(),
                }
                label { r#for: "training-contact", "Your name" }
                input {
                    id: "training-contact",
                    autocomplete: "name",
                    value: "{values.contact_name}",
                    oninput: move |evt| form.write().contact_name = evt.value(),
                }
                label { r#for: "training-email", "Work email" }
                input {
                    id: "training-email",
                    r#type: "email",
                    autocomplete: "email",
                    value: "{values.email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
                label { r#for: "training-phone", "Phone (optional)" }
                input {
                    id: "training-phone",
                    r#type: "tel",
                    autocomplete: "tel",
                    value: "{values.phone}",
                    oninput: move |evt| form.write().phone = evt.value(),
                }
                label { r#for: "training-size", "Company size" }
                select {
                    id: "training-size",
                    value: "{values.company_size}",
                    onchange: move |evt| form.write().company_size = evt.value(),
                    option { value: "", "Select company size" }
                    {sizes}
                }
            }
            fieldset { class: "training-topics",
                legend { "Training areas of interest" }
                {topics}
            }
            div { class: "form-grid",
                label { r#for: "training-message", "Anything else we should know? (optional)" }
                textarea {
                    id: "training-message",
                    rows: "4",
                    value: "{values.message}",
                    oninput: move |evt| form.write().message = evt.value(),
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
                if busy { "Sending..." } else { "Request training" }
            }
        }
    }
}

fn topic_slug(topic: TrainingTopic) -> &'static str {
    match topic {
        TrainingTopic::DisabilityAwareness => "awareness",
        TrainingTopic::ReasonableAccommodations => "accommodations",
        TrainingTopic::AccessibleRecruitment => "recruitment",
        TrainingTopic::CommunicationTechnology => "communication",
        TrainingTopic::JobPlacementSupport => "placement",
        TrainingTopic::CustomProgram => "custom",
    }
}
