use dioxus::prelude::*;
use dioxus_router::Link;
use services::CourseAccessError;
use signcode_core::LessonPlayer;
use signcode_core::model::{CourseSlug, SubscriptionTier};
use tracing::warn;

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PlayerVm, map_player};

/// Outcome of opening a course for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
enum CourseGate {
    Open,
    NotFound,
    Paywall {
        title: String,
        summary: String,
        required: SubscriptionTier,
    },
}

#[component]
pub fn CourseView(slug: String) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let user = state.user;
    let catalog = ctx.catalog();
    let mut player = use_signal(LessonPlayer::new);

    let resource = use_resource(use_reactive((&slug,), move |(slug,)| {
        let catalog = catalog.clone();
        let session = user.read().session.clone();
        async move {
            let Ok(slug) = CourseSlug::new(slug) else {
                player.write().unload();
                return Ok(CourseGate::NotFound);
            };
            match catalog.open_course(&slug, &session).await {
                Ok(opened) => {
                    player.set(opened);
                    Ok(CourseGate::Open)
                }
                Err(CourseAccessError::NotFound { .. }) => {
                    player.write().unload();
                    Ok(CourseGate::NotFound)
                }
                Err(CourseAccessError::Denied { required, .. }) => {
                    player.write().unload();
                    let course = catalog
                        .find_course(&slug)
                        .await
                        .map_err(|err| ViewError::from(&err))?;
                    Ok(course.map_or(CourseGate::NotFound, |course| CourseGate::Paywall {
                        title: course.title().to_owned(),
                        summary: course.summary().to_owned(),
                        required,
                    }))
                }
                Err(err) => {
                    warn!("course {slug} failed to open: {err}");
                    Err(ViewError::from(&err))
                }
            }
        }
    }));

    let body = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    let mut resource = resource;
                    resource.restart();
                },
                "Retry"
            }
        },
        ViewState::Ready(CourseGate::NotFound) => rsx! {
            div { class: "empty-state",
                h2 { "Course not found" }
                p { "We could not find that course. It may have moved or been retired." }
                Link { to: Route::Courses {}, "Browse all courses" }
            }
        },
        ViewState::Ready(CourseGate::Paywall { title, summary, required }) => rsx! {
            div { class: "paywall",
                h2 { "{title}" }
                p { "{summary}" }
                p { class: "paywall-message",
                    "This course is part of {required.label()}. Upgrade to unlock every lesson."
                }
                Link { class: "btn btn-primary", to: Route::Subscribe {}, "See plans" }
            }
        },
        ViewState::Ready(CourseGate::Open) => match map_player(&player.read()) {
            Some(vm) => rsx! { PlayerPanel { vm, player } },
            None => rsx! { p { "Loading..." } },
        },
    };

    rsx! {
        div { class: "page course-page",
            {body}
        }
    }
}

#[component]
fn PlayerPanel(vm: PlayerVm, player: Signal<LessonPlayer>) -> Element {
    let mut player = player;
    let lesson_buttons = vm.lessons.iter().map(|item| {
        let index = item.index;
        let mut player = player;
        let marker = if item.is_completed { "✓" } else { "" };
        rsx! {
            li { key: "{index}",
                button {
                    class: if item.is_current { "lesson-item lesson-item--current" } else { "lesson-item" },
                    r#type: "button",
                    aria_current: if item.is_current { "step" } else { "false" },
                    onclick: move |_| player.write().select(index),
                    span { class: "lesson-item-title", "{item.title}" }
                    span { class: "lesson-item-duration", "{item.duration}" }
                    span { class: "lesson-item-done", aria_hidden: "true", "{marker}" }
                    if item.is_completed {
                        span { class: "sr-only", "(completed)" }
                    }
                }
            }
        }
    });

    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{vm.course_title}" }
            p { class: "view-subtitle", "{vm.position_label}" }
        }
        div { class: "player-layout",
            section { class: "player", aria_label: "Lesson player",
                h3 { class: "player-lesson-title", "{vm.lesson_title}" }
                if !vm.media.is_empty() {
                    video {
                        class: "player-video",
                        src: "{vm.media}",
                        muted: vm.is_muted,
                        controls: true,
                        "data-state": "{vm.state_label}",
                    }
                }
                p { class: "player-state", "{vm.state_label}" }
                div { class: "player-controls", role: "toolbar", aria_label: "Playback",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: !vm.has_previous,
                        onclick: move |_| player.write().previous(),
                        "Previous"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| player.write().toggle_playback(),
                        "{vm.play_label}"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: !vm.has_next,
                        onclick: move |_| player.write().next(),
                        "Next"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        aria_pressed: "{vm.is_muted}",
                        onclick: move |_| player.write().toggle_mute(),
                        if vm.is_muted { "Unmute" } else { "Mute" }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        aria_pressed: "{vm.transcript.is_some()}",
                        onclick: move |_| player.write().toggle_transcript(),
                        "Transcript"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: vm.current_completed,
                        onclick: move |_| {
                            player.write().mark_complete();
                        },
                        if vm.current_completed { "Completed" } else { "Mark complete" }
                    }
                }
                if let Some(transcript) = vm.transcript.as_ref() {
                    div { class: "player-transcript",
                        h4 { "Transcript" }
                        p { "{transcript}" }
                    }
                }
            }
            aside { class: "lesson-list", aria_label: "Lessons",
                div {
                    class: "progress",
                    role: "progressbar",
                    aria_valuemin: "0",
                    aria_valuemax: "100",
                    aria_valuenow: "{vm.progress_percent}",
                    div { class: "progress-fill", style: "width: {vm.progress_percent}%;" }
                }
                p { class: "progress-label", "{vm.progress_label}" }
                ol { {lesson_buttons} }
            }
        }
    }
}
