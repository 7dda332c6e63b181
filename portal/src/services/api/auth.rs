//! # Authentication Endpoints
//!
//! Login, current user and token verification.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, PRAGMA};
use reqwest::Method;
use shared::{bearer, CurrentUser, LoginForm, TokenResponse, VerifyResponse};

use super::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::service::AuthService;

/// Cache-busting headers sent with a verification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBusting {
    /// No extra headers
    None,
    /// `Cache-Control: no-cache`
    NoCache,
    /// `Cache-Control: no-cache` and `Pragma: no-cache`
    NoCacheWithPragma,
}

/// Exchange credentials for a token (`POST /auth/token`, form-encoded).
#[tracing::instrument(skip(client, password))]
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
    tracing::info!("Attempting login");
    let form = LoginForm {
        username: username.to_string(),
        password: password.to_string(),
    };

    let request = client.request(Method::POST, "/auth/token")?.form(&form);
    let result = client.send(request).await;
    match &result {
        Ok(_) => tracing::info!("Login successful"),
        Err(e) => tracing::warn!(error = %e, "Login failed"),
    }
    result
}

/// Fetch the profile of the authenticated user (`GET /auth/users/me/`).
#[tracing::instrument(skip(client))]
pub async fn get_current_user(client: &ApiClient) -> Result<CurrentUser, ApiError> {
    let request = client.request(Method::GET, "/auth/users/me/")?;
    client.send(request).await
}

/// Verify `token` (`GET /auth/verify`).
///
/// Any 2xx answer counts as verified. The identity is returned when the body
/// carries one; an empty or differently shaped body yields `Ok(None)`.
///
/// The token is set explicitly on the call; the request interceptor then
/// applies the stored token, which is the same value whenever the caller read
/// `token` from the store.
#[tracing::instrument(skip(client, token))]
pub async fn verify_token(
    client: &ApiClient,
    token: &str,
    cache: CacheBusting,
) -> Result<Option<VerifyResponse>, ApiError> {
    let mut request = client
        .request(Method::GET, "/auth/verify")?
        .header(AUTHORIZATION, bearer(token));

    match cache {
        CacheBusting::None => {}
        CacheBusting::NoCache => {
            request = request.header(CACHE_CONTROL, "no-cache");
        }
        CacheBusting::NoCacheWithPragma => {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }
    }

    let body = client.send_raw(request).await?;
    match serde_json::from_slice(&body) {
        Ok(identity) => Ok(Some(identity)),
        Err(e) => {
            tracing::debug!(error = %e, "Verification body carries no identity");
            Ok(None)
        }
    }
}

#[async_trait]
impl AuthService for ApiClient {
    async fn verify(&self, token: &str, cache: CacheBusting) -> Result<Option<VerifyResponse>, ApiError> {
        verify_token(self, token, cache).await
    }

    fn set_default_authorization(&self, token: &str) {
        self.set_default_authorization_value(Some(bearer(token)));
    }

    fn clear_default_authorization(&self) {
        self.set_default_authorization_value(None);
    }
}
