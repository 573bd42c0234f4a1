//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | STORE_URL | (required) | Order store endpoint, `host:port` |
//! | STORE_KEY | (required) | Store access key |
//! | STORE_USER | root | Store signin user |
//! | STORE_NS | listoya | Store namespace |
//! | STORE_DB | board | Store database |
//! | HTTP_PORT | 3000 | HTTP service port |
//! | CUSTOMER_REFRESH_SECS | 30 | Customer Display poll interval |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | tracing level |
//! | LOG_DIR | (unset) | daily-rolling log file directory |
//!
//! `STORE_URL` and `STORE_KEY` have no defaults on purpose: a board that
//! cannot reach its store must fail at startup, not come up empty.
//!
//! # Example
//!
//! ```ignore
//! STORE_URL=localhost:8000 STORE_KEY=secret cargo run
//! ```

use crate::core::error::ServerError;
use crate::store::StoreConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Order store endpoint (`host:port`, WebSocket RPC)
    pub store_url: String,
    /// Store signin user
    pub store_user: String,
    /// Store access key
    pub store_key: String,
    /// Store namespace
    pub store_ns: String,
    /// Store database
    pub store_db: String,
    /// Customer Display poll interval in seconds
    pub customer_refresh_secs: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional log file directory
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when a required store setting is missing or blank.
    pub fn from_env() -> Result<Self, ServerError> {
        let store_url = require_env("STORE_URL")?;
        let store_key = require_env("STORE_KEY")?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_url,
            store_user: std::env::var("STORE_USER").unwrap_or_else(|_| "root".into()),
            store_key,
            store_ns: std::env::var("STORE_NS").unwrap_or_else(|_| "listoya".into()),
            store_db: std::env::var("STORE_DB").unwrap_or_else(|_| "board".into()),
            customer_refresh_secs: std::env::var("CUSTOMER_REFRESH_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        })
    }

    /// Build a config without touching the environment.
    ///
    /// Used by tests together with an injected store.
    pub fn with_overrides(store_url: impl Into<String>, store_key: impl Into<String>) -> Self {
        Self {
            http_port: 0,
            store_url: store_url.into(),
            store_user: "root".into(),
            store_key: store_key.into(),
            store_ns: "listoya".into(),
            store_db: "board".into(),
            customer_refresh_secs: 30,
            environment: "development".into(),
            log_dir: None,
        }
    }

    /// Connection settings for [`crate::store::SurrealStore`]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.store_url.clone(),
            user: self.store_user.clone(),
            key: self.store_key.clone(),
            namespace: self.store_ns.clone(),
            database: self.store_db.clone(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn require_env(name: &str) -> Result<String, ServerError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ServerError::Config(format!("{name} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_fill_defaults() {
        let config = Config::with_overrides("localhost:8000", "secret");
        assert_eq!(config.customer_refresh_secs, 30);
        assert_eq!(config.store_ns, "listoya");
        assert!(config.is_development());

        let store = config.store_config();
        assert_eq!(store.url, "localhost:8000");
        assert_eq!(store.key, "secret");
    }
}
