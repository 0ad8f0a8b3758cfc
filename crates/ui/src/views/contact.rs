use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

pub const SUPPORT_EMAIL: &str = "info@sign2code.com";
pub const BOOKING_URL: &str = "https://calendly.com/gideonthuku14/30min";

/// Contact sales and support. Enterprise plans are arranged from here.
#[component]
pub fn ContactView() -> Element {
    rsx! {
        div { class: "page contact-page",
            header { class: "view-header",
                h2 { class: "view-title", "Contact Us" }
                p { class: "view-subtitle",
                    "Talk to us about Enterprise plans for your organisation, or anything else."
                }
            }
            ul { class: "contact-options",
                li { class: "contact-card",
                    h3 { "Email Support" }
                    p { "{SUPPORT_EMAIL}. We respond within 24 hours." }
                    a { class: "btn btn-primary", href: "mailto:{SUPPORT_EMAIL}", "Send Email" }
                }
                li { class: "contact-card",
                    h3 { "Schedule a Meeting" }
                    p { "Book a 30-minute consultation with our team." }
                    a {
                        class: "btn btn-secondary",
                        href: "{BOOKING_URL}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "Book Appointment"
                    }
                }
            }
            section { class: "contact-team", aria_labelledby: "contact-team-title",
                h3 { id: "contact-team-title", "Who you will hear from" }
                p { "Founded by Rosemary Emeli (Nigeria) and Gideon Thuku (Kenya)." }
                p { "Organisation: Africa Ability Trust." }
            }
            p {
                "Training a whole team? See "
                Link { to: Route::EmployerTraining {}, "training for employers" }
                "."
            }
        }
    }
}
