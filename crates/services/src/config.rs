use std::env;

use signcode_core::AccessPolicy;
use url::Url;

use crate::error::ConfigError;

pub const DB_URL_VAR: &str = "SIGNCODE_DB_URL";
pub const ACCESS_POLICY_VAR: &str = "SIGNCODE_ACCESS_POLICY";
pub const BACKEND_URL_VAR: &str = "SIGNCODE_BACKEND_URL";
pub const BACKEND_KEY_VAR: &str = "SIGNCODE_BACKEND_KEY";
pub const CHECKOUT_URL_VAR: &str = "SIGNCODE_CHECKOUT_URL";

pub const DEFAULT_CHECKOUT_URL: &str = "https://sandbox.intasend.com/checkout";

/// Connection details for the hosted auth and records backend.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl BackendConfig {
    /// Read the backend settings from the process environment.
    ///
    /// Returns `Ok(None)` when no backend URL is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL does not parse.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL does not parse.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let Some(raw) = non_blank(lookup(BACKEND_URL_VAR)) else {
            return Ok(None);
        };
        let base_url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
            var: BACKEND_URL_VAR,
            source,
        })?;
        let api_key = non_blank(lookup(BACKEND_KEY_VAR)).unwrap_or_default();
        Ok(Some(Self { base_url, api_key }))
    }
}

/// Environment-level settings; command line flags override these in the binary.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_url: Option<String>,
    pub policy: AccessPolicy,
    pub backend: Option<BackendConfig>,
    pub checkout_base: Url,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or the access policy is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or the access policy is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_url = non_blank(lookup(DB_URL_VAR));
        let policy = match non_blank(lookup(ACCESS_POLICY_VAR)) {
            Some(raw) => raw.parse::<AccessPolicy>()?,
            None => AccessPolicy::default(),
        };
        let backend = BackendConfig::from_lookup(&lookup)?;
        let checkout_raw =
            non_blank(lookup(CHECKOUT_URL_VAR)).unwrap_or_else(|| DEFAULT_CHECKOUT_URL.into());
        let checkout_base = Url::parse(&checkout_raw).map_err(|source| ConfigError::InvalidUrl {
            var: CHECKOUT_URL_VAR,
            source,
        })?;

        Ok(Self {
            db_url,
            policy,
            backend,
            checkout_base,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.db_url.is_none());
        assert_eq!(config.policy, AccessPolicy::Ranked);
        assert!(config.backend.is_none());
        assert_eq!(config.checkout_base.as_str(), DEFAULT_CHECKOUT_URL);
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_URL_VAR, "sqlite://tmp/app.sqlite3"),
            (ACCESS_POLICY_VAR, "exact"),
            (BACKEND_URL_VAR, "https://project.example.co"),
            (BACKEND_KEY_VAR, " anon-key "),
            (CHECKOUT_URL_VAR, "https://pay.example.com/checkout"),
        ]))
        .unwrap();
        assert_eq!(config.db_url.as_deref(), Some("sqlite://tmp/app.sqlite3"));
        assert_eq!(config.policy, AccessPolicy::ExactPremium);
        let backend = config.backend.unwrap();
        assert_eq!(backend.base_url.host_str(), Some("project.example.co"));
        assert_eq!(backend.api_key, "anon-key");
        assert_eq!(config.checkout_base.path(), "/checkout");
    }

    #[test]
    fn blank_backend_url_means_offline() {
        let backend = BackendConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "  ")])).unwrap();
        assert!(backend.is_none());
    }

    #[test]
    fn rejects_malformed_values() {
        let err = AppConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "not a url")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                var: BACKEND_URL_VAR,
                ..
            }
        ));

        let err = AppConfig::from_lookup(lookup(&[(ACCESS_POLICY_VAR, "loose")])).unwrap_err();
        assert!(matches!(err, ConfigError::Policy(_)));
    }
}
