//! # API Client
//!
//! The single configured HTTP client every helper goes through.
//!
//! ## Request Pipeline
//!
//! ```text
//! helper ──► RequestBuilder ──► default headers ──► request interceptor ──► send
//!                                                   (bearer from store)       │
//!  body ◄── response interceptor ◄────────────────────────────────────────────┘
//!           (unwrap body, 401 → clear + SessionEvent)
//! ```

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::interceptors;
use crate::app::events::SessionEvent;
use crate::config::PortalConfig;
use crate::core::error::ApiError;
use crate::storage::CredentialStore;

/// HTTP client for the auth, user and product services.
///
/// Holds the credential store it reads bearer tokens from and the sender it
/// publishes [`SessionEvent`]s on. Cheap to share behind an `Arc`.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
    pub(crate) store: Arc<dyn CredentialStore>,
    default_authorization: RwLock<Option<String>>,
    pub(crate) events: Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a client from `config`.
    ///
    /// Every request gets the configured timeout (10 seconds by default) and
    /// `Content-Type: application/json` unless the helper overrides it.
    pub fn new(
        config: &PortalConfig,
        store: Arc<dyn CredentialStore>,
        events: Sender<SessionEvent>,
    ) -> Result<Self, ApiError> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL {}: {}", base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        tracing::debug!(base_url = %base_url, timeout_secs = config.timeout.as_secs(), "API client created");

        Ok(Self {
            client,
            base_url,
            store,
            default_authorization: RwLock::new(None),
            events,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Current default `Authorization` header value, if any.
    pub fn default_authorization(&self) -> Option<String> {
        self.default_authorization.read().clone()
    }

    pub(crate) fn set_default_authorization_value(&self, value: Option<String>) {
        *self.default_authorization.write() = value;
    }

    /// Resolve an absolute API path (`/users/1`) against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("invalid path {}: {}", path, e)))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.request(method, self.url(path)?))
    }

    /// Run a request through both interceptor stages and decode the body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_raw(builder).await?;
        interceptors::decode_body(&body)
    }

    /// Like [`ApiClient::send`], but hands back the undecoded 2xx body.
    pub(crate) async fn send_raw(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let mut request = builder.build()?;
        interceptors::apply_default_authorization(&mut request, self.default_authorization().as_deref());
        interceptors::apply_credentials(&mut request, self.store.as_ref());

        let method = request.method().clone();
        let path = request.url().path().to_string();
        let start = std::time::Instant::now();

        let result = self.client.execute(request).await;
        tracing::debug!(
            method = %method,
            path = %path,
            duration_ms = start.elapsed().as_millis(),
            "Request finished"
        );

        interceptors::handle_response(self, &path, result).await
    }
}
