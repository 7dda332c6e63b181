//! Client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{AppError, Result};

/// Default base URL of the gateway fronting the auth, user and product services.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";

/// Global request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_STORAGE_PATH: &str = ".portal/storage.json";

#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Base URL every API path is resolved against
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Credential store file used by the CLI
    pub storage_path: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl PortalConfig {
    /// Configuration pointing at `base_url` with every other value defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("PORTAL_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("PORTAL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| AppError::Config("PORTAL_TIMEOUT_SECS must be a valid number".to_string()))?;

        let storage_path = env::var("PORTAL_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));

        let config = Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            storage_path,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "PORTAL_API_BASE_URL must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        let secs = self.timeout.as_secs();
        if secs == 0 || secs > 300 {
            return Err(AppError::Config(
                "PORTAL_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        Ok(())
    }
}
