#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod backend;
pub mod catalog_service;
pub mod config;
pub mod cv_service;
pub mod error;
pub mod guarantee_service;
pub mod jobs;
pub mod payment;
pub mod subscription_service;
pub mod training_service;

pub use signcode_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use backend::{AuthToken, Backend, InMemoryBackend, RestBackend, SignedIn};
pub use catalog_service::CatalogService;
pub use config::{AppConfig, BackendConfig};
pub use cv_service::CvService;
pub use error::{
    AppServicesError, BackendError, CatalogServiceError, ConfigError, CourseAccessError,
    CvServiceError, GuaranteeError, PaymentError, TrainingError,
};
pub use guarantee_service::GuaranteeService;
pub use jobs::{JobBoard, JobsService, StaticJobBoard};
pub use payment::{Checkout, MockPaymentProvider, PaymentDetails, PaymentId, PaymentProvider};
pub use subscription_service::SubscriptionService;
pub use training_service::TrainingService;
