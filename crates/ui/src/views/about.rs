use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::views::contact::SUPPORT_EMAIL;

struct TeamMember {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
    email: &'static str,
}

const TEAM: &[TeamMember] = &[
    TeamMember {
        name: "Gideon Thuku",
        role: "Chief Technology Officer (CTO)",
        bio: "Gideon leads technology and product development. He makes sure the platform \
              delivers Deaf-first learning through sign-language avatars, captions and transcripts.",
        email: "gideon@sign2code.org",
    },
    TeamMember {
        name: "Rosemary Emeli",
        role: "Chief Executive Officer (CEO)",
        bio: "Rosemary sets the strategy and vision. She champions inclusive education and \
              user-centred design, guiding the platform to help Deaf learners into digital work.",
        email: "rosemary@sign2code.org",
    },
];

#[component]
pub fn AboutView() -> Element {
    rsx! {
        div { class: "page about-page",
            header { class: "view-header",
                h2 { class: "view-title", "About Sign-to-Code" }
                p { class: "view-subtitle",
                    "Empowering Deaf and Hard-of-Hearing youth with accessible digital education and career opportunities."
                }
            }
            section { aria_labelledby: "about-team-title",
                h3 { id: "about-team-title", "Our Team" }
                ul { class: "about-team",
                    for member in TEAM {
                        li { key: "{member.email}", class: "about-member",
                            h4 { "{member.name}" }
                            p { class: "about-role", "{member.role}" }
                            p { "{member.bio}" }
                            a { href: "mailto:{member.email}", "{member.email}" }
                        }
                    }
                }
            }
            section { aria_labelledby: "about-story-title",
                h3 { id: "about-story-title", "Our Story" }
                p {
                    "Sign-to-Code started with one question: how can Deaf and Hard-of-Hearing "
                    "youth gain equal access to the digital future?"
                }
                p {
                    "The platform is Deaf-first: sign-language video, captions, transcripts and a "
                    "simple interface. Skills alone are not enough, so it also has a CV builder "
                    "and an accessible job directory."
                }
            }
            section { class: "about-cta", aria_labelledby: "about-cta-title",
                h3 { id: "about-cta-title", "Join Our Mission" }
                Link { class: "btn btn-primary", to: Route::Courses {}, "Start Learning" }
                a { class: "btn btn-secondary", href: "mailto:{SUPPORT_EMAIL}", "Get In Touch" }
            }
        }
    }
}
