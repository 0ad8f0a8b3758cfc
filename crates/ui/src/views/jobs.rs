use dioxus::prelude::*;
use signcode_core::model::{Accommodation, JobKind, JobQuery};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{accommodation_from_select, kind_from_select, map_job_cards, results_label};

#[component]
pub fn JobsView() -> Element {
    let ctx = use_context::<AppContext>();
    let jobs = ctx.jobs();
    let mut query = use_signal(JobQuery::default);

    let jobs_for_resource = jobs.clone();
    let resource = use_resource(move || {
        let jobs = jobs_for_resource.clone();
        let query = query();
        async move {
            jobs.search(&query)
                .await
                .map(|found| map_job_cards(&found))
                .map_err(|err| ViewError::from(&err))
        }
    });

    let current = query();
    let external = jobs
        .external_search_url(&current.text)
        .map(|url| url.to_string())
        .ok();

    rsx! {
        div { class: "page jobs-page",
            header { class: "view-header",
                h2 { class: "view-title", "Jobs" }
                p { class: "view-subtitle", "Roles from employers who commit to deaf-friendly workplaces." }
            }
            div { class: "jobs-filters",
                label { r#for: "job-search", "Search" }
                input {
                    id: "job-search",
                    r#type: "search",
                    placeholder: "Title, company or location",
                    value: "{current.text}",
                    oninput: move |evt| query.write().text = evt.value(),
                }
                label { r#for: "job-kind", "Type" }
                select {
                    id: "job-kind",
                    onchange: move |evt| query.write().kind = kind_from_select(&evt.value()),
                    option { value: "", selected: current.kind.is_none(), "Any" }
                    for kind in JobKind::ALL {
                        option {
                            value: "{kind.label()}",
                            selected: current.kind == Some(kind),
                            "{kind.label()}"
                        }
                    }
                }
                label { r#for: "job-accommodation", "Accommodation" }
                select {
                    id: "job-accommodation",
                    onchange: move |evt| {
                        query.write().accommodation = accommodation_from_select(&evt.value());
                    },
                    option { value: "", selected: current.accommodation.is_none(), "Any" }
                    for item in Accommodation::ALL {
                        option {
                            value: "{item.label()}",
                            selected: current.accommodation == Some(item),
                            "{item.label()}"
                        }
                    }
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: current.remote_only,
                        onchange: move |evt| query.write().remote_only = evt.checked(),
                    }
                    "Remote only"
                }
            }
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(cards) => rsx! {
                    p { class: "jobs-count", role: "status", "{results_label(cards.len())}" }
                    ul { class: "job-list",
                        for card in cards {
                            li { key: "{card.id}", class: "job-card",
                                h3 { "{card.title}" }
                                p { class: "job-meta",
                                    "{card.company} · {card.location} · {card.kind_label}"
                                    if card.remote {
                                        " · Remote"
                                    }
                                }
                                ul { class: "job-accommodations", aria_label: "Accommodations",
                                    for label in card.accommodations.iter() {
                                        li { class: "badge", "{label}" }
                                    }
                                }
                                a {
                                    class: "btn btn-secondary",
                                    href: "{card.apply_url}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    "Apply"
                                }
                            }
                        }
                    }
                },
            }
            if let Some(url) = external {
                p { class: "jobs-external",
                    "Want more? "
                    a { href: "{url}", target: "_blank", rel: "noopener noreferrer",
                        "Search the wider job board"
                    }
                }
            }
        }
    }
}
