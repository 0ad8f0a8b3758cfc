use std::sync::Arc;

use dioxus::prelude::*;
use services::{
    AuthService, AuthToken, CatalogService, CvService, GuaranteeService, JobsService, SignedIn,
    SubscriptionService, TrainingService,
};
use signcode_core::AccessPolicy;
use signcode_core::accessibility::{
    AccessibilitySettings, Announcement, AnnouncementSlot, EffectsApplier, Presentation,
};
use signcode_core::model::Session;

pub trait UiApp: Send + Sync {
    fn policy(&self) -> AccessPolicy;

    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn subscriptions(&self) -> Arc<SubscriptionService>;
    fn training(&self) -> Arc<TrainingService>;
    fn guarantees(&self) -> Arc<GuaranteeService>;
    fn jobs(&self) -> Arc<JobsService>;
    fn cvs(&self) -> Arc<CvService>;
}

#[derive(Clone)]
pub struct AppContext {
    policy: AccessPolicy,

    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    subscriptions: Arc<SubscriptionService>,
    training: Arc<TrainingService>,
    guarantees: Arc<GuaranteeService>,
    jobs: Arc<JobsService>,
    cvs: Arc<CvService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            policy: app.policy(),
            auth: app.auth(),
            catalog: app.catalog(),
            subscriptions: app.subscriptions(),
            training: app.training(),
            guarantees: app.guarantees(),
            jobs: app.jobs(),
            cvs: app.cvs(),
        }
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

//
// ─── UI STATE ──────────────────────────────────────────────────────────────────
//

/// The signed-in user (or the anonymous session) and its bearer token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSession {
    pub session: Session,
    pub token: Option<AuthToken>,
}

impl UserSession {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl From<SignedIn> for UserSession {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            session: signed_in.session,
            token: Some(signed_in.token),
        }
    }
}

/// Reactive state shared by every view.
///
/// The session lives here rather than in a global so that each window (and
/// each test harness) owns its own.
#[derive(Clone, Copy, PartialEq)]
pub struct UiState {
    pub user: Signal<UserSession>,
    pub settings: Signal<AccessibilitySettings>,
    pub presentation: Signal<Presentation>,
    pub announcement: Signal<AnnouncementSlot>,
}

impl UiState {
    /// Create the state signals and provide them to the component tree.
    pub fn provide() -> Self {
        Self::provide_with(UserSession::anonymous())
    }

    pub fn provide_with(user: UserSession) -> Self {
        use_context_provider(|| {
            let settings = AccessibilitySettings::default();
            Self {
                user: Signal::new(user),
                settings: Signal::new(settings),
                presentation: Signal::new(Presentation::from_settings(&settings)),
                announcement: Signal::new(AnnouncementSlot::default()),
            }
        })
    }

    #[must_use]
    pub fn effects(&self) -> SignalEffects {
        SignalEffects {
            presentation: self.presentation,
            announcement: self.announcement,
        }
    }
}

/// Applies accessibility changes by writing to the root signals.
pub struct SignalEffects {
    presentation: Signal<Presentation>,
    announcement: Signal<AnnouncementSlot>,
}

impl EffectsApplier for SignalEffects {
    fn apply(&mut self, presentation: &Presentation) {
        if *self.presentation.peek() != *presentation {
            self.presentation.set(presentation.clone());
        }
    }

    fn announce(&mut self, announcement: &Announcement) {
        self.announcement.write().post(announcement.clone());
    }
}
