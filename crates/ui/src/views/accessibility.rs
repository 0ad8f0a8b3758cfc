use std::time::Duration;

use dioxus::prelude::*;
use signcode_core::accessibility::{
    AccessibilitySettings, Announcement, Toggle, apply_change,
};

use crate::context::UiState;

/// How long a live-region message stays before it is cleared.
const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(4);

#[component]
pub fn AccessibilityPanel() -> Element {
    let state = use_context::<UiState>();
    let mut settings = state.settings;
    let current = settings();
    let font_percent = current.font_scale().percent();

    let switches = Toggle::ALL.iter().map(|&toggle| {
        let mut settings = settings;
        let on = current.get(toggle);
        rsx! {
            li { class: "a11y-option",
                button {
                    class: "a11y-switch",
                    r#type: "button",
                    role: "switch",
                    aria_checked: "{on}",
                    onclick: move |_| {
                        let announcement = settings.write().toggle(toggle);
                        commit(state, announcement);
                    },
                    span { class: "a11y-switch-label", "{toggle.label()}" }
                    span { class: "a11y-switch-state", if on { "On" } else { "Off" } }
                }
            }
        }
    });

    rsx! {
        section { class: "a11y-panel", aria_labelledby: "a11y-panel-title",
            h2 { id: "a11y-panel-title", "Accessibility" }
            ul { class: "a11y-options", {switches} }
            div { class: "a11y-font-scale", role: "group", aria_label: "Text size",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    aria_label: "Decrease text size",
                    onclick: move |_| {
                        let announcement = settings.write().decrease_font_scale();
                        commit(state, announcement);
                    },
                    "A-"
                }
                span { class: "a11y-font-scale-value", aria_live: "off", "{font_percent}%" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    aria_label: "Increase text size",
                    onclick: move |_| {
                        let announcement = settings.write().increase_font_scale();
                        commit(state, announcement);
                    },
                    "A+"
                }
            }
            button {
                class: "btn btn-ghost a11y-reset",
                r#type: "button",
                disabled: current == AccessibilitySettings::default(),
                onclick: move |_| {
                    let announcement = settings.write().reset();
                    commit(state, Some(announcement));
                },
                "Reset to defaults"
            }
        }
    }
}

/// Push the latest settings through the effects boundary.
fn commit(state: UiState, announcement: Option<Announcement>) {
    let settings = *state.settings.peek();
    let mut effects = state.effects();
    apply_change(&mut effects, &settings, announcement.as_ref());

    if announcement.is_some() {
        let mut slot = state.announcement;
        let generation = slot.peek().generation();
        spawn(async move {
            tokio::time::sleep(ANNOUNCEMENT_TTL).await;
            if slot.peek().is_showing(generation) {
                slot.write().expire(generation);
            }
        });
    }
}

/// Polite live region for transient announcements.
#[component]
pub fn LiveRegion() -> Element {
    let state = use_context::<UiState>();
    let message = state
        .announcement
        .read()
        .current()
        .map(|a| a.message().to_owned())
        .unwrap_or_default();

    rsx! {
        div {
            class: "sr-only",
            role: "status",
            aria_live: "polite",
            aria_atomic: "true",
            "{message}"
        }
    }
}
