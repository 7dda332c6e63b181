//! # Common Error Types
//!
//! Consolidated error handling for the portal client.
//!
//! ## Error Categories
//!
//! - [`ApiError`]: failures surfaced by the HTTP layer, already normalized by
//!   the response interceptor
//! - [`NavigationError`]: router failures (redirect loops)
//! - [`AppError`]: crate-wide error wrapping the above plus configuration,
//!   storage and output failures
//!
//! ## Usage Pattern
//!
//! ```rust
//! use portal::core::error::{ApiError, AppError};
//!
//! let err: AppError = ApiError::Status { status: 404, message: "Product not found".to_string() }.into();
//! assert_eq!(err.to_string(), "API error: HTTP 404: Product not found");
//! ```

use thiserror::Error;

/// Normalized failure of a single API call.
///
/// Every typed helper returns this. A 401 is its own variant so callers can
/// tell an expired session apart from other HTTP failures; the credential has
/// already been cleared by the time a caller sees it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401. Storage was cleared and an
    /// [`crate::app::events::SessionEvent::Unauthorized`] was published.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection refused, DNS failure, timeout...
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx answer whose body did not match the expected type.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built (bad base URL or path).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::InvalidRequest(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Router failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// Guards kept redirecting past the hop limit.
    #[error("redirect loop while navigating to {path} ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Invalid or missing configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential store could not be opened or decoded.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A result could not be rendered for output.
    #[error("Output error: {0}")]
    Output(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
