//! # Service Traits
//!
//! Traits for dependency injection, enabling the guard to be tested without a
//! network.

use async_trait::async_trait;
use shared::VerifyResponse;

use crate::core::error::ApiError;
use crate::services::api::auth::CacheBusting;

/// Token verification plus the client's default `Authorization` slot.
///
/// Implemented by [`crate::services::api::ApiClient`].
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify `token` remotely (`GET /auth/verify`). `Ok` means a 2xx
    /// answer; the identity is `None` when the body did not carry one.
    async fn verify(&self, token: &str, cache: CacheBusting) -> Result<Option<VerifyResponse>, ApiError>;

    /// Set the default `Authorization` header applied to later requests.
    fn set_default_authorization(&self, token: &str);

    /// Remove the default `Authorization` header.
    fn clear_default_authorization(&self);
}
