//! Client side of the hosted auth and records backend.
//!
//! `RestBackend` speaks the REST shape of a Supabase-style project
//! (`/auth/v1/*` for accounts, `/rest/v1/{table}` for rows). `InMemoryBackend`
//! keeps accounts and inserted rows in memory for offline use and tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signcode_core::model::{Session, SubscriptionTier, UserId};
use url::Url;

use crate::config::BackendConfig;
use crate::error::BackendError;

/// Bearer token for a signed-in user. Never printed in full.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub session: Session,
    pub token: AuthToken,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a session and token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidCredentials` for a wrong email or password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError>;

    /// Re-read the session behind `token`, picking up tier changes.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::SessionExpired` if the token is no longer valid.
    async fn get_session(&self, token: &AuthToken) -> Result<Session, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the backend cannot be reached.
    async fn sign_out(&self, token: &AuthToken) -> Result<(), BackendError>;

    /// Record a new subscription tier for `user`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the update is rejected.
    async fn update_tier(
        &self,
        token: &AuthToken,
        user: UserId,
        tier: SubscriptionTier,
    ) -> Result<(), BackendError>;

    /// Insert a JSON row into `table`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the insert is rejected.
    async fn insert_record(&self, table: &str, record: Value) -> Result<(), BackendError>;
}

pub(crate) fn random_token(prefix: &str, len: usize) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}

//
// ─── REST ──────────────────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    config: BackendConfig,
}

impl RestBackend {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.config.api_key)
    }

    fn authed(&self, request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        self.with_key(request).bearer_auth(token.as_str())
    }

    async fn fetch_tier(
        &self,
        token: &AuthToken,
        user: UserId,
    ) -> Result<SubscriptionTier, BackendError> {
        let url = self.endpoint("rest/v1/users")?;
        let response = self
            .authed(self.client.get(url), token)
            .query(&[
                ("id", format!("eq.{user}")),
                ("select", "subscription_tier".to_owned()),
            ])
            .send()
            .await?;
        check_status(Call::Other, response.status())?;

        let rows: Vec<TierRow> = response.json().await?;
        match rows.into_iter().next() {
            Some(row) => row
                .subscription_tier
                .parse()
                .map_err(|e: signcode_core::model::ParseTierError| {
                    BackendError::InvalidResponse(e.to_string())
                }),
            None => Ok(SubscriptionTier::Free),
        }
    }

    async fn session_for(
        &self,
        token: &AuthToken,
        user: AuthUser,
    ) -> Result<Session, BackendError> {
        let user_id: UserId = user
            .id
            .parse()
            .map_err(|_| BackendError::InvalidResponse(format!("user id {}", user.id)))?;
        let tier = self.fetch_tier(token, user_id).await?;
        Ok(Session::signed_in(user_id, user.email, tier))
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError> {
        let url = self.endpoint("auth/v1/token")?;
        let response = self
            .with_key(self.client.post(url))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        check_status(Call::SignIn, response.status())?;

        let body: TokenResponse = response.json().await?;
        let token = AuthToken::new(body.access_token);
        let session = self.session_for(&token, body.user).await?;
        Ok(SignedIn { session, token })
    }

    async fn get_session(&self, token: &AuthToken) -> Result<Session, BackendError> {
        let url = self.endpoint("auth/v1/user")?;
        let response = self.authed(self.client.get(url), token).send().await?;

        check_status(Call::ReadSession, response.status())?;

        let user: AuthUser = response.json().await?;
        self.session_for(token, user).await
    }

    async fn sign_out(&self, token: &AuthToken) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/logout")?;
        let response = self.authed(self.client.post(url), token).send().await?;
        check_status(Call::Other, response.status())?;
        Ok(())
    }

    async fn update_tier(
        &self,
        token: &AuthToken,
        user: UserId,
        tier: SubscriptionTier,
    ) -> Result<(), BackendError> {
        let url = self.endpoint("rest/v1/users")?;
        let response = self
            .authed(self.client.patch(url), token)
            .query(&[("id", format!("eq.{user}"))])
            .header("Prefer", "return=minimal")
            .json(&TierUpdate {
                subscription_tier: tier,
            })
            .send()
            .await?;
        check_status(Call::Other, response.status())?;
        Ok(())
    }

    async fn insert_record(&self, table: &str, record: Value) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("rest/v1/{table}"))?;
        let response = self
            .with_key(self.client.post(url))
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;
        check_status(Call::Other, response.status())?;
        Ok(())
    }
}

/// Which request a response belongs to, for reading its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    SignIn,
    ReadSession,
    Other,
}

/// Map a non-success status to the error callers act on.
fn check_status(call: Call, status: StatusCode) -> Result<(), BackendError> {
    if status.is_success() {
        return Ok(());
    }
    Err(match (call, status) {
        (Call::SignIn, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => {
            BackendError::InvalidCredentials
        }
        (Call::ReadSession, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            BackendError::SessionExpired
        }
        _ => BackendError::HttpStatus(status),
    })
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TierRow {
    subscription_tier: String,
}

#[derive(Debug, Serialize)]
struct TierUpdate {
    subscription_tier: SubscriptionTier,
}

//
// ─── IN MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    email: String,
    password: String,
    tier: SubscriptionTier,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<AuthToken, String>,
    records: Vec<(String, Value)>,
    offline: bool,
}

/// Accounts and inserted rows held in memory.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and return its id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidResponse` if the state lock is poisoned.
    pub fn add_account(
        &self,
        email: &str,
        password: &str,
        tier: SubscriptionTier,
    ) -> Result<UserId, BackendError> {
        let user_id = UserId::random();
        let mut state = self.lock()?;
        state.accounts.insert(
            email.trim().to_lowercase(),
            Account {
                user_id,
                email: email.trim().to_owned(),
                password: password.to_owned(),
                tier,
            },
        );
        Ok(user_id)
    }

    /// Rows inserted through `insert_record`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidResponse` if the state lock is poisoned.
    pub fn records(&self, table: &str) -> Result<Vec<Value>, BackendError> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, row)| row.clone())
            .collect())
    }

    /// Simulate the backend being unreachable.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidResponse` if the state lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> Result<(), BackendError> {
        self.lock()?.offline = offline;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, BackendError> {
        self.state
            .lock()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn online(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, BackendError> {
        let state = self.lock()?;
        if state.offline {
            return Err(BackendError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(state)
    }
}

fn account_for<'a>(
    state: &'a MemoryState,
    token: &AuthToken,
) -> Result<&'a Account, BackendError> {
    state
        .tokens
        .get(token)
        .and_then(|key| state.accounts.get(key))
        .ok_or(BackendError::SessionExpired)
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError> {
        let mut state = self.online()?;
        let key = email.trim().to_lowercase();
        let account = state
            .accounts
            .get(&key)
            .filter(|account| account.password == password)
            .cloned()
            .ok_or(BackendError::InvalidCredentials)?;

        let token = AuthToken::new(random_token("mem_", 24));
        state.tokens.insert(token.clone(), key);
        Ok(SignedIn {
            session: Session::signed_in(account.user_id, Some(account.email), account.tier),
            token,
        })
    }

    async fn get_session(&self, token: &AuthToken) -> Result<Session, BackendError> {
        let state = self.online()?;
        let account = account_for(&state, token)?;
        Ok(Session::signed_in(
            account.user_id,
            Some(account.email.clone()),
            account.tier,
        ))
    }

    async fn sign_out(&self, token: &AuthToken) -> Result<(), BackendError> {
        let mut state = self.online()?;
        state.tokens.remove(token);
        Ok(())
    }

    async fn update_tier(
        &self,
        token: &AuthToken,
        user: UserId,
        tier: SubscriptionTier,
    ) -> Result<(), BackendError> {
        let mut state = self.online()?;
        let key = state
            .tokens
            .get(token)
            .cloned()
            .ok_or(BackendError::SessionExpired)?;
        let account = state
            .accounts
            .get_mut(&key)
            .filter(|account| account.user_id == user)
            .ok_or(BackendError::HttpStatus(StatusCode::FORBIDDEN))?;
        account.tier = tier;
        Ok(())
    }

    async fn insert_record(&self, table: &str, record: Value) -> Result<(), BackendError> {
        let mut state = self.online()?;
        state.records.push((table.to_owned(), record));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_checks_password_and_ignores_email_case() {
        let backend = InMemoryBackend::new();
        let user = backend
            .add_account("Learner@Example.org", "hunter2", SubscriptionTier::Premium)
            .unwrap();

        let err = backend
            .sign_in("learner@example.org", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::InvalidCredentials));

        let signed_in = backend
            .sign_in(" learner@EXAMPLE.org ", "hunter2")
            .await
            .unwrap();
        assert_eq!(signed_in.session.user_id(), Some(user));
        assert_eq!(signed_in.session.tier(), SubscriptionTier::Premium);
    }

    #[tokio::test]
    async fn tokens_stop_working_after_sign_out() {
        let backend = InMemoryBackend::new();
        backend
            .add_account("a@example.org", "pw", SubscriptionTier::Free)
            .unwrap();
        let signed_in = backend.sign_in("a@example.org", "pw").await.unwrap();
        assert!(backend.get_session(&signed_in.token).await.is_ok());

        backend.sign_out(&signed_in.token).await.unwrap();
        let err = backend.get_session(&signed_in.token).await.unwrap_err();
        assert!(matches!(err, BackendError::SessionExpired));
    }

    #[tokio::test]
    async fn update_tier_is_visible_on_refresh() {
        let backend = InMemoryBackend::new();
        let user = backend
            .add_account("a@example.org", "pw", SubscriptionTier::Free)
            .unwrap();
        let signed_in = backend.sign_in("a@example.org", "pw").await.unwrap();

        backend
            .update_tier(&signed_in.token, user, SubscriptionTier::Premium)
            .await
            .unwrap();
        let refreshed = backend.get_session(&signed_in.token).await.unwrap();
        assert_eq!(refreshed.tier(), SubscriptionTier::Premium);

        let other = UserId::random();
        assert!(
            backend
                .update_tier(&signed_in.token, other, SubscriptionTier::Enterprise)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn offline_backend_rejects_calls() {
        let backend = InMemoryBackend::new();
        backend.set_offline(true).unwrap();
        let err = backend
            .insert_record("anything", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(backend.records("anything").unwrap().is_empty());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "AuthToken(..)");
    }

    #[test]
    fn rest_statuses_map_to_backend_errors() {
        assert!(check_status(Call::SignIn, StatusCode::OK).is_ok());
        assert!(check_status(Call::Other, StatusCode::CREATED).is_ok());
        assert!(check_status(Call::Other, StatusCode::NO_CONTENT).is_ok());

        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED] {
            assert!(matches!(
                check_status(Call::SignIn, status),
                Err(BackendError::InvalidCredentials)
            ));
        }
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert!(matches!(
                check_status(Call::ReadSession, status),
                Err(BackendError::SessionExpired)
            ));
        }

        let passthrough = [
            (Call::SignIn, StatusCode::FORBIDDEN),
            (Call::SignIn, StatusCode::INTERNAL_SERVER_ERROR),
            (Call::ReadSession, StatusCode::BAD_REQUEST),
            (Call::Other, StatusCode::UNAUTHORIZED),
            (Call::Other, StatusCode::BAD_REQUEST),
        ];
        for (call, status) in passthrough {
            assert!(
                matches!(check_status(call, status), Err(BackendError::HttpStatus(s)) if s == status),
                "{call:?} {status}"
            );
        }
    }

    #[test]
    fn rest_endpoints_join_base_url() {
        let backend = RestBackend::new(BackendConfig {
            base_url: Url::parse("https://project.example.co/").unwrap(),
            api_key: "key".into(),
        });
        assert_eq!(
            backend.endpoint("rest/v1/employer_training_requests").unwrap().as_str(),
            "https://project.example.co/rest/v1/employer_training_requests"
        );
    }
}
