//! Shared error types for the services crate.

use thiserror::Error;

use signcode_core::access::{AccessError, ParsePolicyError};
use signcode_core::model::{
    CourseSlug, CvError, GuaranteeRequestError, SubscriptionTier, TrainingRequestError,
};
use signcode_core::CatalogError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the backend-as-a-service client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("session has expired, please sign in again")]
    SessionExpired,
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("backend returned an unexpected response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `SubscriptionService` and payment providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaymentError {
    #[error("sign in to subscribe")]
    NotSignedIn,
    #[error("the {0} plan cannot be bought online")]
    NotPurchasable(SubscriptionTier),
    #[error("you already have the {0} plan")]
    AlreadySubscribed(SubscriptionTier),
    #[error("payment could not be verified")]
    NotVerified,
    #[error("payment provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted when opening a course for playback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseAccessError {
    #[error("no course named {slug}")]
    NotFound { slug: CourseSlug },
    #[error("course {slug} requires a {required} subscription")]
    Denied {
        slug: CourseSlug,
        required: SubscriptionTier,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AccessError> for CourseAccessError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { slug } => Self::NotFound { slug },
            AccessError::Denied { slug, required } => Self::Denied { slug, required },
            _ => unreachable!("AccessError variant not handled: {err:?}"),
        }
    }
}

/// Errors emitted by `CatalogService` outside of course access.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TrainingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainingError {
    #[error(transparent)]
    Invalid(#[from] TrainingRequestError),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by `GuaranteeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GuaranteeError {
    #[error(transparent)]
    Invalid(#[from] GuaranteeRequestError),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by `CvService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CvServiceError {
    #[error(transparent)]
    Invalid(#[from] CvError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading configuration from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Policy(#[from] ParsePolicyError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
