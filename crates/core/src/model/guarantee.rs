use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::SubscriptionTier;
use crate::model::contact::{is_plausible_email, normalize_optional};

/// Days after purchase in which a refund can be requested.
pub const REFUND_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuaranteeRequestError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("choose the plan you subscribed to")]
    MissingPlan,

    #[error("the {0} plan has nothing to refund")]
    UnpaidPlan(SubscriptionTier),

    #[error("choose a reason for the refund")]
    MissingReason,
}

/// Why a subscriber is asking for their money back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundReason {
    NotSatisfied,
    TechnicalIssues,
    AccessibilityConcerns,
    CourseContent,
    FinancialHardship,
    Other,
}

impl RefundReason {
    pub const ALL: [RefundReason; 6] = [
        Self::NotSatisfied,
        Self::TechnicalIssues,
        Self::AccessibilityConcerns,
        Self::CourseContent,
        Self::FinancialHardship,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotSatisfied => "not_satisfied",
            Self::TechnicalIssues => "technical_issues",
            Self::AccessibilityConcerns => "accessibility_concerns",
            Self::CourseContent => "course_content",
            Self::FinancialHardship => "financial_hardship",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotSatisfied => "Not satisfied with the platform",
            Self::TechnicalIssues => "Technical issues",
            Self::AccessibilityConcerns => "Accessibility concerns",
            Self::CourseContent => "Course content not as expected",
            Self::FinancialHardship => "Financial hardship",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|reason| reason.as_str() == value)
    }
}

impl fmt::Display for RefundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Money-back guarantee request as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuaranteeRequestDraft {
    pub name: String,
    pub email: String,
    pub subscription_type: Option<SubscriptionTier>,
    pub reason: Option<RefundReason>,
    pub additional_info: Option<String>,
}

impl GuaranteeRequestDraft {
    /// # Errors
    ///
    /// Returns `GuaranteeRequestError` for a blank name, a malformed email,
    /// a missing or free plan, or a missing reason.
    pub fn validate(
        self,
        created_at: DateTime<Utc>,
    ) -> Result<GuaranteeRequest, GuaranteeRequestError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(GuaranteeRequestError::EmptyName);
        }
        let email = self.email.trim().to_owned();
        if !is_plausible_email(&email) {
            return Err(GuaranteeRequestError::InvalidEmail);
        }
        let subscription_type = self
            .subscription_type
            .ok_or(GuaranteeRequestError::MissingPlan)?;
        if !subscription_type.is_paid() {
            return Err(GuaranteeRequestError::UnpaidPlan(subscription_type));
        }
        let reason = self.reason.ok_or(GuaranteeRequestError::MissingReason)?;

        Ok(GuaranteeRequest {
            name,
            email,
            subscription_type,
            reason,
            additional_info: normalize_optional(self.additional_info),
            created_at,
        })
    }
}

/// A validated refund request, serialized as a `guarantee_requests` row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuaranteeRequest {
    name: String,
    email: String,
    subscription_type: SubscriptionTier,
    reason: RefundReason,
    additional_info: Option<String>,
    created_at: DateTime<Utc>,
}

impl GuaranteeRequest {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn subscription_type(&self) -> SubscriptionTier {
        self.subscription_type
    }

    #[must_use]
    pub fn reason(&self) -> RefundReason {
        self.reason
    }

    #[must_use]
    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
