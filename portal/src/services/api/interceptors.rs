//! # Interceptors
//!
//! The two stages every request passes through.
//!
//! - **Request**: attach `Authorization: Bearer <token>` from the credential
//!   store, or strip any `Authorization` header when the store is empty. This
//!   runs last, so it wins over per-call and default headers.
//! - **Response**: unwrap the JSON body on 2xx. On 401, clear the store and
//!   the default header and publish [`SessionEvent::Unauthorized`], then
//!   surface the error to the caller as well.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{bearer, ErrorResponse};

use super::client::ApiClient;
use crate::app::events::SessionEvent;
use crate::core::error::ApiError;
use crate::storage::CredentialStore;

/// Apply the client-wide default `Authorization` header unless the call set
/// its own.
pub(crate) fn apply_default_authorization(request: &mut Request, default: Option<&str>) {
    let Some(default) = default else {
        return;
    };
    if request.headers().contains_key(AUTHORIZATION) {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(default) {
        request.headers_mut().insert(AUTHORIZATION, value);
    }
}

/// Request interceptor: the stored credential decides the `Authorization`
/// header.
pub(crate) fn apply_credentials(request: &mut Request, store: &dyn CredentialStore) {
    let Some(token) = store.token() else {
        request.headers_mut().remove(AUTHORIZATION);
        return;
    };

    match HeaderValue::from_str(&bearer(&token)) {
        Ok(mut value) => {
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Err(_) => {
            tracing::warn!("Stored token is not a valid header value, sending request without it");
            request.headers_mut().remove(AUTHORIZATION);
        }
    }
}

/// Response interceptor: the raw body of a 2xx answer, or the normalized
/// failure.
pub(crate) async fn handle_response(
    client: &ApiClient,
    path: &str,
    result: Result<Response, reqwest::Error>,
) -> Result<Vec<u8>, ApiError> {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Request failed before a response arrived");
            return Err(ApiError::Transport(e));
        }
    };

    let status = response.status();
    if status.is_success() {
        let body = response.bytes().await?;
        return Ok(body.to_vec());
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);

    if status == StatusCode::UNAUTHORIZED {
        client.store.clear();
        client.set_default_authorization_value(None);
        tracing::warn!(path = %path, message = %message, "Unauthorized response, credential cleared");

        let event = SessionEvent::Unauthorized { path: path.to_string() };
        if client.events.try_send(event).is_err() {
            tracing::debug!(path = %path, "No session listener for unauthorized event");
        }
        return Err(ApiError::Unauthorized { message });
    }

    tracing::warn!(path = %path, status = status.as_u16(), message = %message, "Request rejected");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    // An empty 2xx body decodes like JSON `null`, so `()` and `Option<T>` work.
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    Ok(serde_json::from_slice(body)?)
}

/// Human-readable message for a failed response: the FastAPI `detail`, the
/// raw body, or the status reason, in that order.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
        return error.detail;
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
