use serde::{Deserialize, Serialize};

use crate::model::{SubscriptionTier, UserId};

/// The learner session as seen by access checks and navigation.
///
/// A session without a user is anonymous and is always on the free tier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    user_id: Option<UserId>,
    email: Option<String>,
    tier: SubscriptionTier,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user_id: UserId, email: Option<String>, tier: SubscriptionTier) -> Self {
        let email = email
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty());
        Self {
            user_id: Some(user_id),
            email,
            tier,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Returns a copy of this session on a different tier.
    ///
    /// Anonymous sessions stay on the free tier.
    #[must_use]
    pub fn with_tier(&self, tier: SubscriptionTier) -> Self {
        if self.is_anonymous() {
            return Self::anonymous();
        }
        Self {
            tier,
            ..self.clone()
        }
    }
}
