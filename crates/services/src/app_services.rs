use std::sync::Arc;

use signcode_core::model::SubscriptionTier;
use signcode_core::{AccessPolicy, Catalog};
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::backend::{Backend, InMemoryBackend, RestBackend};
use crate::catalog_service::CatalogService;
use crate::config::AppConfig;
use crate::cv_service::CvService;
use crate::error::{AppServicesError, BackendError, CatalogServiceError};
use crate::guarantee_service::GuaranteeService;
use crate::jobs::{JobsService, StaticJobBoard};
use crate::payment::{MockPaymentProvider, PaymentProvider};
use crate::subscription_service::SubscriptionService;
use crate::training_service::TrainingService;

/// Accounts available when no hosted backend is configured.
pub const DEMO_ACCOUNTS: &[(&str, &str, SubscriptionTier)] = &[
    ("learner@example.org", "learner", SubscriptionTier::Free),
    ("premium@example.org", "premium", SubscriptionTier::Premium),
];

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    policy: AccessPolicy,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    subscriptions: Arc<SubscriptionService>,
    training: Arc<TrainingService>,
    guarantees: Arc<GuaranteeService>,
    jobs: Arc<JobsService>,
    cvs: Arc<CvService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, seeding the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: &AppConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, config).await
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if seeding fails.
    pub async fn in_memory(clock: Clock, config: &AppConfig) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, config).await
    }

    async fn from_storage(
        storage: Storage,
        clock: Clock,
        config: &AppConfig,
    ) -> Result<Self, AppServicesError> {
        let backend = build_backend(config)?;
        let payments: Arc<dyn PaymentProvider> =
            Arc::new(MockPaymentProvider::new(config.checkout_base.clone()));

        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&storage.courses),
            config.policy,
        ));
        let builtin = Catalog::builtin().map_err(CatalogServiceError::from)?;
        let seeded = catalog.seed(&builtin).await?;
        info!(courses = seeded, policy = %config.policy, "catalog ready");

        Ok(Self {
            policy: config.policy,
            auth: Arc::new(AuthService::new(Arc::clone(&backend))),
            catalog,
            subscriptions: Arc::new(SubscriptionService::new(Arc::clone(&backend), payments)),
            training: Arc::new(TrainingService::new(clock, Arc::clone(&backend))),
            guarantees: Arc::new(GuaranteeService::new(clock, backend)),
            jobs: Arc::new(JobsService::new(Arc::new(StaticJobBoard::builtin()?))),
            cvs: Arc::new(CvService::new(clock, Arc::clone(&storage.cvs))),
        })
    }

    #[must_use]
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn subscriptions(&self) -> Arc<SubscriptionService> {
        Arc::clone(&self.subscriptions)
    }

    #[must_use]
    pub fn training(&self) -> Arc<TrainingService> {
        Arc::clone(&self.training)
    }

    #[must_use]
    pub fn guarantees(&self) -> Arc<GuaranteeService> {
        Arc::clone(&self.guarantees)
    }

    #[must_use]
    pub fn jobs(&self) -> Arc<JobsService> {
        Arc::clone(&self.jobs)
    }

    #[must_use]
    pub fn cvs(&self) -> Arc<CvService> {
        Arc::clone(&self.cvs)
    }
}

fn build_backend(config: &AppConfig) -> Result<Arc<dyn Backend>, BackendError> {
    if let Some(backend) = &config.backend {
        info!(url = %backend.base_url, "using hosted backend");
        return Ok(Arc::new(RestBackend::new(backend.clone())));
    }

    info!("no backend configured, using offline demo accounts");
    let memory = InMemoryBackend::new();
    for (email, password, tier) in DEMO_ACCOUNTS {
        memory.add_account(email, password, *tier)?;
    }
    Ok(Arc::new(memory))
}
