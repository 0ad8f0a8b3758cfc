use dioxus::prelude::*;
use dioxus_router::Link;
use services::Checkout;
use signcode_core::model::{REFUND_WINDOW_DAYS, Scholarship, SubscriptionTier};
use tracing::warn;

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::{InlineError, ViewError};
use crate::vm::{PlanAction, map_plan_cards};

#[derive(Clone, Debug, PartialEq, Eq)]
enum CheckoutState {
    Idle,
    Starting,
    AwaitingPayment(Checkout),
    Confirming(Checkout),
    Upgraded(SubscriptionTier),
    Failed(ViewError),
}

#[component]
pub fn SubscribeView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let mut user = state.user;
    let subscriptions = ctx.subscriptions();
    let mut checkout = use_signal(|| CheckoutState::Idle);

    let current = user();
    let cards = map_plan_cards(&subscriptions.plans(), &current.session);

    let plan_cards = cards.into_iter().map(|card| {
        let subscriptions = subscriptions.clone();
        let tier = card.tier;
        let mut checkout = checkout;
        let busy = matches!(checkout(), CheckoutState::Starting | CheckoutState::Confirming(_));
        let action = match card.action {
            PlanAction::Current => rsx! { p { class: "plan-status", "Your current plan" } },
            PlanAction::Included => rsx! { p { class: "plan-status", "Included in your plan" } },
            PlanAction::SignInFirst => rsx! { p { class: "plan-status", "Sign in to subscribe" } },
            PlanAction::ContactSales => rsx! {
                Link { class: "btn btn-secondary", to: Route::Contact {}, "Contact sales" }
            },
            PlanAction::Upgrade => rsx! {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| {
                        let subscriptions = subscriptions.clone();
                        spawn(async move {
                            checkout.set(CheckoutState::Starting);
                            let session = user.peek().session.clone();
                            match subscriptions.start_checkout(&session, tier).await {
                                Ok(created) => checkout.set(CheckoutState::AwaitingPayment(created)),
                                Err(err) => {
                                    warn!("checkout failed to start: {err}");
                                    checkout.set(CheckoutState::Failed(ViewError::from(&err)));
                                }
                            }
                        });
                    },
                    "Subscribe to {card.name}"
                }
            },
        };
        rsx! {
            li { key: "{tier}", class: "plan-card",
                h3 { "{card.name}" }
                p { class: "plan-price", "{card.price_label}" }
                p { class: "plan-summary", "{card.summary}" }
                ul { class: "plan-features",
                    for feature in card.features.iter() {
                        li { "{feature}" }
                    }
                }
                {action}
            }
        }
    });

    let confirm = {
        let subscriptions = subscriptions.clone();
        move |_: MouseEvent| {
            let subscriptions = subscriptions.clone();
            let CheckoutState::AwaitingPayment(pending) = checkout() else {
                return;
            };
            spawn(async move {
                checkout.set(CheckoutState::Confirming(pending.clone()));
                let current = user.peek().clone();
                let Some(token) = current.token.clone() else {
                    checkout.set(CheckoutState::Failed(ViewError::SignInRequired));
                    return;
                };
                match subscriptions
                    .confirm_checkout(&current.session, &token, &pending.payment_id)
                    .await
                {
                    Ok(upgraded) => {
                        let tier = upgraded.tier();
                        user.write().session = upgraded;
                        checkout.set(CheckoutState::Upgraded(tier));
                    }
                    Err(err) => {
                        warn!("checkout not confirmed: {err}");
                        checkout.set(CheckoutState::Failed(ViewError::from(&err)));
                    }
                }
            });
        }
    };

    let status = match checkout() {
        CheckoutState::Idle => rsx! {},
        CheckoutState::Starting => rsx! { p { "Preparing checkout..." } },
        CheckoutState::AwaitingPayment(pending) => rsx! {
            div { class: "checkout-panel",
                p { "Complete your payment in the secure checkout, then confirm here." }
                a {
                    class: "btn btn-secondary",
                    href: "{pending.checkout_url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Open checkout"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: confirm,
                    "I have paid"
                }
            }
        },
        CheckoutState::Confirming(_) => rsx! { p { "Confirming payment..." } },
        CheckoutState::Upgraded(tier) => rsx! {
            p { class: "checkout-success", role: "status",
                "You are now on {tier.label()}. Premium courses are unlocked."
            }
        },
        CheckoutState::Failed(err) => rsx! {
            InlineError {
                message: err.message().to_owned(),
                on_dismiss: move |()| checkout.set(CheckoutState::Idle),
            }
        },
    };

    rsx! {
        div { class: "page subscribe-page",
            header { class: "view-header",
                h2 { class: "view-title", "Plans" }
                p { class: "view-subtitle", "Start free. Upgrade when you are ready for more." }
            }
            ul { class: "plan-grid", {plan_cards} }
            {status}
            p { class: "plan-guarantee",
                "Every paid plan comes with a {REFUND_WINDOW_DAYS}-day money-back guarantee. "
                Link { to: Route::Guarantee {}, "Request a refund" }
            }
            ScholarshipPanel { scholarship: Scholarship::power_learn_project() }
        }
    }
}

#[component]
fn ScholarshipPanel(scholarship: Scholarship) -> Element {
    rsx! {
        section { class: "scholarship", aria_labelledby: "scholarship-title",
            h3 { id: "scholarship-title", "{scholarship.title}" }
            p { "{scholarship.description}" }
            div { class: "scholarship-columns",
                div {
                    h4 { "What you get" }
                    ul {
                        for benefit in scholarship.benefits {
                            li { "{benefit}" }
                        }
                    }
                }
                div {
                    h4 { "Who can apply" }
                    ul {
                        for rule in scholarship.eligibility {
                            li { "{rule}" }
                        }
                    }
                }
            }
            p { class: "scholarship-slots", "{scholarship.availability}" }
            a {
                class: "btn btn-primary",
                href: "{scholarship.partner_url}",
                target: "_blank",
                rel: "noopener noreferrer",
                "Apply with {scholarship.partner}"
            }
        }
    }
}
