//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `COURTSIDE_API_URL` - Base URL of the data API
//!
//! ## Optional
//! - `COURTSIDE_TOKEN_FILE` - Path where the session token is persisted
//!   between runs; in-memory only when unset

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::client::ApiClient;
use crate::session::Session;
use crate::sync::SyncedStore;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard-side configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the data API
    pub api_url: Url,
    /// Where to persist the session token, if anywhere
    pub token_file: Option<PathBuf>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw_url = std::env::var("COURTSIDE_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("COURTSIDE_API_URL".to_string()))?;
        let api_url = raw_url
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("COURTSIDE_API_URL".to_string(), e.to_string()))?;

        let token_file = std::env::var("COURTSIDE_TOKEN_FILE").ok().map(PathBuf::from);

        Ok(Self { api_url, token_file })
    }

    /// Build the remote-synced store this configuration describes.
    #[must_use]
    pub fn build_store(&self) -> SyncedStore {
        let session = self.token_file.clone().map_or_else(
            Session::in_memory,
            Session::with_file,
        );
        SyncedStore::new(ApiClient::new(self.api_url.clone(), session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_store_uses_in_memory_session_without_token_file() {
        let config = AdminConfig {
            api_url: "http://127.0.0.1:8788".parse().unwrap(),
            token_file: None,
        };
        let store = config.build_store();
        assert!(!store.client().session().is_authenticated());
    }
}
