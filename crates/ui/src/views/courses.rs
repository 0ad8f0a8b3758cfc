use dioxus::prelude::*;
use dioxus_router::Link;
use signcode_core::{AccessFilter, CourseFilter};

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ACCESS_FILTERS, map_course_cards};

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let catalog = ctx.catalog();
    let policy = ctx.policy();
    let mut search = use_signal(String::new);
    let mut access = use_signal(AccessFilter::default);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let filter = CourseFilter {
            query: search(),
            access: access(),
        };
        async move {
            catalog
                .list_courses(&filter)
                .await
                .map_err(|err| ViewError::from(&err))
        }
    });

    let session = state.user.read().session.clone();
    let filter_buttons = ACCESS_FILTERS.iter().map(|&filter| {
        let selected = access() == filter;
        rsx! {
            button {
                class: if selected { "chip chip--selected" } else { "chip" },
                r#type: "button",
                aria_pressed: "{selected}",
                onclick: move |_| access.set(filter),
                "{filter.label()}"
            }
        }
    });

    rsx! {
        div { class: "page courses-page",
            header { class: "view-header",
                h2 { class: "view-title", "Courses" }
                p { class: "view-subtitle", "Every lesson has signed video, captions and a transcript." }
            }
            div { class: "courses-filters",
                label { class: "sr-only", r#for: "course-search", "Search courses" }
                input {
                    id: "course-search",
                    r#type: "search",
                    placeholder: "Search courses",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                div { class: "chip-group", role: "group", aria_label: "Access", {filter_buttons} }
            }
            match view_state_from_resource(&resource) {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
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
                ViewState::Ready(courses) => {
                    let cards = map_course_cards(&courses, &session, policy);
                    if cards.is_empty() {
                        rsx! { p { class: "empty-state", "No courses match that search." } }
                    } else {
                        rsx! {
                            ul { class: "course-grid",
                                for card in cards {
                                    li { key: "{card.slug}", class: "course-card",
                                        div { class: "course-card-header",
                                            h3 { "{card.title}" }
                                            span { class: "badge", "{card.badge}" }
                                        }
                                        p { "{card.summary}" }
                                        p { class: "course-card-meta",
                                            "{card.lesson_label}"
                                            if card.locked {
                                                span { class: "course-card-lock", " · Requires Premium" }
                                            }
                                        }
                                        Link {
                                            to: Route::Course { slug: card.slug.clone() },
                                            if card.locked { "View course" } else { "Start course" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
