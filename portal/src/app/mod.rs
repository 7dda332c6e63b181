//! # Application Wiring
//!
//! [`App`] assembles the credential store, the API client, the auth guard and
//! the router, and connects the session event channel between them.
//!
//! ```text
//!            ┌───────────────────────────────┐
//!            │  Arc<dyn CredentialStore>     │
//!            └───────┬───────────────┬───────┘
//!                    │               │
//!          ┌─────────▼─────┐   ┌─────▼──────────┐
//!          │  ApiClient    │◄──┤  AuthGuard     │  verify / default header
//!          └───────┬───────┘   └─────▲──────────┘
//!                  │                 │ check()
//!   SessionEvent   │           ┌─────┴──────────┐
//!   (async_channel)└──────────►│  Router        │  hard redirect on 401
//!                              └────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - **[`routes`]**: route table and path resolution
//! - **[`guard`]**: navigation guard and its decisions
//! - **[`router`]**: current location, redirects, superseded navigations
//! - **[`events`]**: session events from the HTTP layer

pub mod events;
pub mod guard;
pub mod router;
pub mod routes;

use std::sync::Arc;

use async_channel::Receiver;

use crate::config::PortalConfig;
use crate::core::error::Result;
use crate::services::api::ApiClient;
use crate::storage::CredentialStore;
use guard::AuthGuard;
use router::Router;
use routes::RouteTable;

pub use events::SessionEvent;
pub use guard::{GuardDecision, NavigationGuard, NavigationRequest, NavigationTicket};
pub use router::NavigationOutcome;
pub use routes::{Page, RouteDescriptor, RouteMatch, HOME_PATH, LOGIN_PATH};

/// Fully wired client: one store, one API client, one router.
pub struct App {
    pub api: Arc<ApiClient>,
    pub router: Arc<Router>,
    events: Receiver<SessionEvent>,
}

impl App {
    pub fn new(config: &PortalConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let (events_tx, events_rx) = events::channel();
        let api = Arc::new(ApiClient::new(config, store.clone(), events_tx)?);
        let guard = Arc::new(AuthGuard::new(api.clone(), store));
        let router = Arc::new(Router::new(RouteTable::default(), guard));

        Ok(Self {
            api,
            router,
            events: events_rx,
        })
    }

    /// Session events not yet applied to the router.
    pub fn events(&self) -> &Receiver<SessionEvent> {
        &self.events
    }

    /// Apply queued session events synchronously (one-shot callers such as
    /// the CLI).
    pub fn process_pending_events(&self) -> usize {
        self.router.drain_events(&self.events)
    }

    /// Spawn the router's subscriber loop on the current tokio runtime.
    pub fn spawn_event_loop(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.router.clone().run_event_loop(self.events.clone()))
    }
}
