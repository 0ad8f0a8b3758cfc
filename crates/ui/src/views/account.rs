use dioxus::prelude::*;
use tracing::warn;

use crate::context::{AppContext, UiState, UserSession};
use crate::views::{InlineError, SubmitState, ViewError};

#[component]
pub fn AccountPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let mut user = state.user;
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submit = use_signal(|| SubmitState::Idle);

    let current = user();
    let busy = submit().is_submitting();
    let error = submit().error_message();
    let status = match current.session.email() {
        Some(address) => format!("Signed in as {address} ({})", current.session.tier().label()),
        None => format!("Signed in ({})", current.session.tier().label()),
    };

    let auth = ctx.auth();
    let sign_in = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            submit.set(SubmitState::Submitting);
            match auth.sign_in(&email(), &password()).await {
                Ok(signed_in) => {
                    user.set(UserSession::from(signed_in));
                    password.set(String::new());
                    submit.set(SubmitState::Done);
                }
                Err(err) => {
                    warn!("sign in failed: {err}");
                    submit.set(SubmitState::Failed(ViewError::from(&err)));
                }
            }
        });
    };

    let auth = ctx.auth();
    let sign_out = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            if let Some(token) = user.peek().token.clone() {
                auth.sign_out(&token).await;
            }
            user.set(UserSession::anonymous());
            submit.set(SubmitState::Idle);
        });
    };

    rsx! {
        section { class: "account-panel", aria_label: "Account",
            if current.session.is_anonymous() {
                label { r#for: "sign-in-email", "Email" }
                input {
                    id: "sign-in-email",
                    r#type: "email",
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "sign-in-password", "Password" }
                input {
                    id: "sign-in-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: sign_in,
                    if busy { "Signing in..." } else { "Sign in" }
                }
                if let Some(message) = error {
                    InlineError {
                        message,
                        on_dismiss: move |()| submit.set(SubmitState::Idle),
                    }
                }
            } else {
                p { class: "account-status", "{status}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: sign_out,
                    "Sign out"
                }
            }
        }
    }
}
