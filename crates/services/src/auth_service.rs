use std::sync::Arc;

use signcode_core::model::Session;
use tracing::{info, warn};

use crate::backend::{AuthToken, Backend, SignedIn};
use crate::error::BackendError;

/// Produces the `Session` value the rest of the app is handed.
#[derive(Clone)]
pub struct AuthService {
    backend: Arc<dyn Backend>,
}

impl AuthService {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidCredentials` for blank or wrong
    /// credentials, and other `BackendError`s if the backend fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(BackendError::InvalidCredentials);
        }
        let signed_in = self.backend.sign_in(email, password).await?;
        info!(tier = %signed_in.session.tier(), "signed in");
        Ok(signed_in)
    }

    /// Re-read the session for `token`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::SessionExpired` if the token is no longer valid.
    pub async fn refresh(&self, token: &AuthToken) -> Result<Session, BackendError> {
        self.backend.get_session(token).await
    }

    /// Sign out. The result is the anonymous session even if the backend call
    /// fails; the token is simply dropped locally in that case.
    pub async fn sign_out(&self, token: &AuthToken) -> Session {
        match self.backend.sign_out(token).await {
            Ok(()) => info!("signed out"),
            Err(err) => warn!("sign out failed, dropping session locally: {err}"),
        }
        Session::anonymous()
    }

    /// The session for an optional stored token, falling back to anonymous.
    pub async fn current_or_anonymous(&self, token: Option<&AuthToken>) -> Session {
        let Some(token) = token else {
            return Session::anonymous();
        };
        match self.refresh(token).await {
            Ok(session) => session,
            Err(err) => {
                warn!("could not restore session: {err}");
                Session::anonymous()
            }
        }
    }
}
