use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::contact::{is_plausible_email, normalize_optional};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrainingRequestError {
    #[error("company name cannot be empty")]
    EmptyCompany,

    #[error("contact name cannot be empty")]
    EmptyContactName,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("choose a company size")]
    MissingCompanySize,

    #[error("choose at least one training area")]
    NoTrainingInterest,
}

/// Headcount bands offered by the enquiry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "11-50")]
    UpTo50,
    #[serde(rename = "51-200")]
    UpTo200,
    #[serde(rename = "201-500")]
    UpTo500,
    #[serde(rename = "501-1000")]
    UpTo1000,
    #[serde(rename = "1000+")]
    Over1000,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        Self::UpTo10,
        Self::UpTo50,
        Self::UpTo200,
        Self::UpTo500,
        Self::UpTo1000,
        Self::Over1000,
    ];

    /// Stored value, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpTo10 => "1-10",
            Self::UpTo50 => "11-50",
            Self::UpTo200 => "51-200",
            Self::UpTo500 => "201-500",
            Self::UpTo1000 => "501-1000",
            Self::Over1000 => "1000+",
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        format!("{} employees", self.as_str())
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|size| size.as_str() == value)
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training areas an employer can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrainingTopic {
    #[serde(rename = "Disability Awareness & Inclusion")]
    DisabilityAwareness,
    #[serde(rename = "Reasonable Accommodations")]
    ReasonableAccommodations,
    #[serde(rename = "Accessible Recruitment")]
    AccessibleRecruitment,
    #[serde(rename = "Communication & Technology")]
    CommunicationTechnology,
    #[serde(rename = "Job Placement Support")]
    JobPlacementSupport,
    #[serde(rename = "Custom Training Program")]
    CustomProgram,
}

impl TrainingTopic {
    pub const ALL: [TrainingTopic; 6] = [
        Self::DisabilityAwareness,
        Self::ReasonableAccommodations,
        Self::AccessibleRecruitment,
        Self::CommunicationTechnology,
        Self::JobPlacementSupport,
        Self::CustomProgram,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DisabilityAwareness => "Disability Awareness & Inclusion",
            Self::ReasonableAccommodations => "Reasonable Accommodations",
            Self::AccessibleRecruitment => "Accessible Recruitment",
            Self::CommunicationTechnology => "Communication & Technology",
            Self::JobPlacementSupport => "Job Placement Support",
            Self::CustomProgram => "Custom Training Program",
        }
    }

    #[must_use]
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.label() == value)
    }
}

impl fmt::Display for TrainingTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw employer training enquiry as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingRequestDraft {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_size: Option<CompanySize>,
    pub training_interest: Vec<TrainingTopic>,
    pub message: Option<String>,
}

impl TrainingRequestDraft {
    /// Validate the draft and stamp it with the submission time.
    ///
    /// # Errors
    ///
    /// Returns `TrainingRequestError` for blank names, a malformed email, a
    /// missing company size, or an empty set of training areas.
    pub fn validate(
        self,
        created_at: DateTime<Utc>,
    ) -> Result<TrainingRequest, TrainingRequestError> {
        let company_name = self.company_name.trim().to_owned();
        if company_name.is_empty() {
            return Err(TrainingRequestError::EmptyCompany);
        }
        let contact_name = self.contact_name.trim().to_owned();
        if contact_name.is_empty() {
            return Err(TrainingRequestError::EmptyContactName);
        }
        let email = self.email.trim().to_owned();
        if !is_plausible_email(&email) {
            return Err(TrainingRequestError::InvalidEmail);
        }
        let company_size = self
            .company_size
            .ok_or(TrainingRequestError::MissingCompanySize)?;

        let mut training_interest = Vec::with_capacity(self.training_interest.len());
        for topic in self.training_interest {
            if !training_interest.contains(&topic) {
                training_interest.push(topic);
            }
        }
        if training_interest.is_empty() {
            return Err(TrainingRequestError::NoTrainingInterest);
        }

        Ok(TrainingRequest {
            company_name,
            contact_name,
            email,
            phone: normalize_optional(self.phone),
            company_size,
            training_interest,
            message: normalize_optional(self.message),
            created_at,
        })
    }
}

/// A validated enquiry. Field names are the `employer_training_requests`
/// columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainingRequest {
    company_name: String,
    contact_name: String,
    email: String,
    phone: Option<String>,
    company_size: CompanySize,
    training_interest: Vec<TrainingTopic>,
    message: Option<String>,
    created_at: DateTime<Utc>,
}

impl TrainingRequest {
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    #[must_use]
    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn company_size(&self) -> CompanySize {
        self.company_size
    }

    #[must_use]
    pub fn training_interest(&self) -> &[TrainingTopic] {
        &self.training_interest
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
