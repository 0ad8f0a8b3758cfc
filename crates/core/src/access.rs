//! Tier-based gating of premium courses.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::{Course, CourseSlug, Session, SubscriptionTier};
use crate::player::LessonPlayer;

/// How subscription tiers unlock premium content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Any tier at or above `premium` unlocks premium courses.
    #[default]
    Ranked,
    /// Only the `premium` tier itself unlocks premium courses.
    ExactPremium,
}

impl AccessPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ranked => "ranked",
            Self::ExactPremium => "exact",
        }
    }

    #[must_use]
    pub fn unlocks_premium(self, tier: SubscriptionTier) -> bool {
        match self {
            Self::Ranked => tier >= SubscriptionTier::Premium,
            Self::ExactPremium => tier == SubscriptionTier::Premium,
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown access policy: {0}")]
pub struct ParsePolicyError(String);

impl FromStr for AccessPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ranked" => Ok(Self::Ranked),
            "exact" | "exact-premium" => Ok(Self::ExactPremium),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}

/// Why a course could not be opened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("no course named {slug}")]
    NotFound { slug: CourseSlug },

    #[error("course {slug} requires a {required} subscription")]
    Denied {
        slug: CourseSlug,
        required: SubscriptionTier,
    },
}

/// Returns whether `session` may play `course` under the default policy.
#[must_use]
pub fn has_access(course: &Course, session: &Session) -> bool {
    has_access_with(AccessPolicy::default(), course, session)
}

#[must_use]
pub fn has_access_with(policy: AccessPolicy, course: &Course, session: &Session) -> bool {
    !course.is_premium() || policy.unlocks_premium(session.tier())
}

/// Access checks bound to one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    session: Session,
    policy: AccessPolicy,
}

impl AccessGuard {
    #[must_use]
    pub fn new(session: Session, policy: AccessPolicy) -> Self {
        Self { session, policy }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    #[must_use]
    pub fn allows(&self, course: &Course) -> bool {
        has_access_with(self.policy, course, &self.session)
    }

    /// Look up a course and check access.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::NotFound` for an unknown slug and
    /// `AccessError::Denied` when the session's tier is insufficient.
    pub fn resolve(&self, catalog: &Catalog, slug: &CourseSlug) -> Result<Arc<Course>, AccessError> {
        let course = catalog
            .find(slug)
            .ok_or_else(|| AccessError::NotFound { slug: slug.clone() })?;
        self.check(&course)?;
        Ok(course)
    }

    /// # Errors
    ///
    /// Returns `AccessError::Denied` when the session's tier is insufficient.
    pub fn check(&self, course: &Course) -> Result<(), AccessError> {
        if self.allows(course) {
            Ok(())
        } else {
            Err(AccessError::Denied {
                slug: course.slug().clone(),
                required: SubscriptionTier::Premium,
            })
        }
    }

    /// Create a player loaded with `course` if the session may play it.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Denied` without creating a player when access is
    /// refused.
    pub fn open_player(&self, course: Arc<Course>) -> Result<LessonPlayer, AccessError> {
        self.check(&course)?;
        let mut player = LessonPlayer::new();
        player.load_course(course);
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use crate::player::PlaybackState;

    fn slug(raw: &str) -> CourseSlug {
        CourseSlug::new(raw).unwrap()
    }

    fn session(tier: SubscriptionTier) -> Session {
        Session::signed_in(UserId::random(), None, tier)
    }

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn free_courses_open_for_everyone() {
        let catalog = catalog();
        let sessions = [
            Session::anonymous(),
            session(SubscriptionTier::Free),
            session(SubscriptionTier::Premium),
            session(SubscriptionTier::Enterprise),
        ];
        for course in catalog.courses().iter().filter(|c| !c.is_premium()) {
            for s in &sessions {
                assert!(has_access(course, s));
                assert!(has_access_with(AccessPolicy::ExactPremium, course, s));
            }
        }
    }

    #[test]
    fn premium_course_requires_premium_tier() {
        let course = catalog().find(&slug("advanced-python")).unwrap();
        assert!(!has_access(&course, &Session::anonymous()));
        assert!(!has_access(&course, &session(SubscriptionTier::Free)));
        assert!(has_access(&course, &session(SubscriptionTier::Premium)));
    }

    #[test]
    fn enterprise_depends_on_policy() {
        let course = catalog().find(&slug("advanced-python")).unwrap();
        let enterprise = session(SubscriptionTier::Enterprise);
        assert!(has_access_with(AccessPolicy::Ranked, &course, &enterprise));
        assert!(!has_access_with(AccessPolicy::ExactPremium, &course, &enterprise));
    }

    #[test]
    fn resolve_distinguishes_not_found_from_denied() {
        let catalog = catalog();
        let guard = AccessGuard::new(Session::anonymous(), AccessPolicy::Ranked);

        let missing = guard.resolve(&catalog, &slug("no-such-course")).unwrap_err();
        assert_eq!(
            missing,
            AccessError::NotFound {
                slug: slug("no-such-course")
            }
        );

        let denied = guard.resolve(&catalog, &slug("advanced-python")).unwrap_err();
        assert_eq!(
            denied,
            AccessError::Denied {
                slug: slug("advanced-python"),
                required: SubscriptionTier::Premium,
            }
        );

        let open = guard.resolve(&catalog, &slug("digital-literacy-101")).unwrap();
        assert_eq!(open.title(), "Digital Literacy 101");
    }

    #[test]
    fn anonymous_learner_never_gets_a_premium_player() {
        let course = catalog().find(&slug("advanced-python")).unwrap();
        let guard = AccessGuard::new(Session::anonymous(), AccessPolicy::Ranked);
        assert!(guard.open_player(course).is_err());
    }

    #[test]
    fn open_player_starts_ready() {
        let course = catalog().find(&slug("advanced-python")).unwrap();
        let guard = AccessGuard::new(session(SubscriptionTier::Premium), AccessPolicy::Ranked);
        let player = guard.open_player(course).unwrap();
        assert_eq!(player.state(), PlaybackState::Ready);
        assert_eq!(player.index(), 0);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("ranked".parse::<AccessPolicy>().unwrap(), AccessPolicy::Ranked);
        assert_eq!(" EXACT ".parse::<AccessPolicy>().unwrap(), AccessPolicy::ExactPremium);
        assert!("loose".parse::<AccessPolicy>().is_err());
    }
}
