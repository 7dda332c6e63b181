//! # Session
//!
//! Creates and destroys the persisted credential.
//!
//! Login stores the token first so the profile request that follows goes out
//! with the new bearer; if that request fails the half-created session is
//! cleared again.

use shared::CurrentUser;

use crate::core::error::ApiError;
use crate::core::service::AuthService;
use crate::services::api::{auth, ApiClient};
use crate::storage::StorageKey;

/// Log in and persist `token` + `user`.
#[tracing::instrument(skip(client, password))]
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<CurrentUser, ApiError> {
    let token = auth::login(client, username, password).await?;
    let store = client.store();
    store.set(StorageKey::Token, token.access_token.clone());

    let user = match auth::get_current_user(client).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load profile after login, clearing session");
            store.clear();
            client.clear_default_authorization();
            return Err(e);
        }
    };

    store.set(StorageKey::User, serde_json::to_string(&user)?);
    client.set_default_authorization(&token.access_token);

    tracing::info!(username = %user.username, role = ?user.role, "Session created");
    Ok(user)
}

/// Drop the session: clears `token` + `user` and the default header.
pub fn logout(client: &ApiClient) {
    client.store().clear();
    client.clear_default_authorization();
    tracing::info!("Session cleared");
}

/// Cached profile of the logged-in user, if any.
///
/// A profile that no longer decodes is treated as absent.
pub fn current_user(client: &ApiClient) -> Option<CurrentUser> {
    let raw = client.store().get(StorageKey::User)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "Cached profile is not valid JSON");
            None
        }
    }
}
