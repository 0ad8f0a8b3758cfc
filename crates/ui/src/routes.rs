use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    AboutView, AccessibilityPanel, AccountPanel, ContactView, CourseView, CoursesView,
    CvBuilderView, EmployerTrainingView, GuaranteeView, HomeView, JobsView, NotFoundView,
    SubscribeView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/courses", CoursesView)] Courses {},
        #[route("/course/:slug", CourseView)] Course { slug: String },
        #[route("/cv-builder", CvBuilderView)] CvBuilder {},
        #[route("/jobs", JobsView)] Jobs {},
        #[route("/subscribe", SubscribeView)] Subscribe {},
        #[route("/employer-training", EmployerTrainingView)] EmployerTraining {},
        #[route("/guarantee", GuaranteeView)] Guarantee {},
        #[route("/contact", ContactView)] Contact {},
        #[route("/about", AboutView)] About {},
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        a { class: "skip-link", href: "#main-content", "Skip to main content" }
        div { class: "app",
            Sidebar {}
            main { class: "content", id: "main-content", tabindex: "-1",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar", aria_label: "Main",
            h1 { "Sign-to-Code" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Courses {}, "Courses" } }
                li { Link { to: Route::CvBuilder {}, "CV builder" } }
                li { Link { to: Route::Jobs {}, "Jobs" } }
                li { Link { to: Route::Subscribe {}, "Subscribe" } }
                li { Link { to: Route::EmployerTraining {}, "For employers" } }
                li { Link { to: Route::About {}, "About" } }
                li { Link { to: Route::Contact {}, "Contact" } }
            }
            AccountPanel {}
            AccessibilityPanel {}
        }
    }
}
