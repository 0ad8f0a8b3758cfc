use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::UiState;
use crate::routes::Route;
use crate::views::LiveRegion;

#[component]
pub fn App() -> Element {
    let state = UiState::provide();
    let (classes, style) = {
        let presentation = state.presentation.read();
        (
            format!("app-root {}", presentation.class_list()),
            presentation.root_style(),
        )
    };

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title.
        document::Title { "Sign-to-Code" }

        // Accessibility settings land on this container as classes and CSS variables.
        div { class: "{classes}", style: "{style}",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal", role: "alert",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
            LiveRegion {}
        }
    }
}
