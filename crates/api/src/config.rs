//! Process configuration, read once at startup.

use thiserror::Error;

use storefront_infra::STRIPE_API_BASE;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEV_TOKEN_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

/// Server settings resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub token_secret: String,
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    /// Unset means payment intents fail.
    pub payment_secret_key: Option<String>,
    pub payment_api_base: String,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let token_secret = var("ACCESS_TOKEN_SECRET").unwrap_or_else(|| {
            tracing::warn!("ACCESS_TOKEN_SECRET not set; using insecure dev default");
            DEV_TOKEN_SECRET.to_string()
        });

        Ok(Self {
            port,
            token_secret,
            database_url: var("DATABASE_URL"),
            payment_secret_key: var("STRIPE_SECRET_KEY"),
            payment_api_base: var("STRIPE_API_BASE").unwrap_or_else(|| STRIPE_API_BASE.to_string()),
        })
    }
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database", &self.database_url.is_some())
            .field("payments", &self.payment_secret_key.is_some())
            .field("payment_api_base", &self.payment_api_base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();

        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.token_secret, DEV_TOKEN_SECRET);
        assert!(cfg.database_url.is_none());
        assert!(cfg.payment_secret_key.is_none());
        assert_eq!(cfg.payment_api_base, STRIPE_API_BASE);
    }

    #[test]
    fn values_are_read_through_lookup() {
        let cfg = config(&[
            ("PORT", "8081"),
            ("ACCESS_TOKEN_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("STRIPE_SECRET_KEY", "sk_test_1"),
            ("STRIPE_API_BASE", "http://127.0.0.1:9999"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.token_secret, "s3cret");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(cfg.payment_secret_key.as_deref(), Some("sk_test_1"));
        assert_eq!(cfg.payment_api_base, "http://127.0.0.1:9999");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg = config(&[("DATABASE_URL", ""), ("ACCESS_TOKEN_SECRET", "  ")]).unwrap();
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.token_secret, DEV_TOKEN_SECRET);
    }

    #[test]
    fn bad_port_is_rejected() {
        assert_eq!(
            config(&[("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
        assert!(config(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let cfg = config(&[("ACCESS_TOKEN_SECRET", "s3cret"), ("STRIPE_SECRET_KEY", "sk_live_x")]).unwrap();
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("s3cret"));
        assert!(!shown.contains("sk_live_x"));
    }
}
