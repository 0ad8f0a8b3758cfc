use std::sync::Arc;

use signcode_core::access::has_access_with;
use signcode_core::model::{Course, Session};
use signcode_core::{AccessFilter, AccessPolicy};

pub const ACCESS_FILTERS: [AccessFilter; 3] =
    [AccessFilter::All, AccessFilter::Free, AccessFilter::Premium];

/// UI-ready representation of a course in the catalog grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub lesson_label: String,
    pub badge: &'static str,
    pub locked: bool,
}

#[must_use]
pub fn map_course_cards(
    courses: &[Arc<Course>],
    session: &Session,
    policy: AccessPolicy,
) -> Vec<CourseCardVm> {
    courses
        .iter()
        .map(|course| CourseCardVm {
            slug: course.slug().as_str().to_owned(),
            title: course.title().to_owned(),
            summary: course.summary().to_owned(),
            lesson_label: lesson_label(course.lesson_count()),
            badge: if course.is_premium() { "Premium" } else { "Free" },
            locked: !has_access_with(policy, course, session),
        })
        .collect()
}

fn lesson_label(count: usize) -> String {
    match count {
        1 => "1 lesson".to_owned(),
        n => format!("{n} lessons"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcode_core::Catalog;
    use signcode_core::model::{SubscriptionTier, UserId};

    #[test]
    fn premium_cards_lock_for_free_sessions() {
        let catalog = Catalog::builtin().unwrap();
        let cards = map_course_cards(
            catalog.courses(),
            &Session::anonymous(),
            AccessPolicy::Ranked,
        );
        let python = cards.iter().find(|c| c.slug == "advanced-python").unwrap();
        assert_eq!(python.badge, "Premium");
        assert!(python.locked);

        let literacy = cards
            .iter()
            .find(|c| c.slug == "digital-literacy-101")
            .unwrap();
        assert_eq!(literacy.badge, "Free");
        assert_eq!(literacy.lesson_label, "3 lessons");
        assert!(!literacy.locked);
    }

    #[test]
    fn enterprise_unlock_depends_on_policy() {
        let catalog = Catalog::builtin().unwrap();
        let session = Session::signed_in(UserId::random(), None, SubscriptionTier::Enterprise);
        let ranked = map_course_cards(catalog.courses(), &session, AccessPolicy::Ranked);
        assert!(ranked.iter().all(|c| !c.locked));

        let exact = map_course_cards(catalog.courses(), &session, AccessPolicy::ExactPremium);
        assert!(exact.iter().any(|c| c.locked));
    }

    #[test]
    fn lesson_label_is_singular_for_one() {
        assert_eq!(lesson_label(1), "1 lesson");
        assert_eq!(lesson_label(0), "0 lessons");
    }
}
