use dioxus::prelude::*;
use dioxus_router::Link;
use signcode_core::CourseFilter;

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let catalog = ctx.catalog();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            catalog
                .list_courses(&CourseFilter::default())
                .await
                .map(|courses| courses.len())
                .map_err(|err| ViewError::from(&err))
        }
    });

    let greeting = match state.user.read().session.email() {
        Some(email) => format!("Welcome back, {email}."),
        None => "Welcome.".to_owned(),
    };

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Learn to code in sign language" }
                p { class: "view-subtitle", "{greeting}" }
            }
            p {
                "Video lessons with British Sign Language, captions and transcripts, "
                "plus tools to help you into work."
            }
            match view_state_from_resource(&resource) {
                ViewState::Ready(count) => rsx! {
                    p { class: "home-course-count", "{count} courses available" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {},
            }
            ul { class: "home-links",
                li { Link { to: Route::Courses {}, "Browse courses" } }
                li { Link { to: Route::CvBuilder {}, "Build your CV" } }
                li { Link { to: Route::Jobs {}, "Find accessible jobs" } }
                li { Link { to: Route::EmployerTraining {}, "Deaf awareness training for employers" } }
            }
        }
    }
}
