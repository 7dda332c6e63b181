//! # Router
//!
//! Owns the current location and runs the guard before committing any
//! navigation.
//!
//! Each call to [`Router::navigate`] takes a fresh [`NavigationTicket`]. A
//! guard that finishes after a newer navigation started aborts, and the call
//! reports [`NavigationOutcome::Superseded`]. When the newest ticket belongs to
//! a hard redirect instead (typically the 401 raised by this navigation's own
//! verification), the call reports the location the hard redirect committed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_channel::Receiver;
use parking_lot::RwLock;

use crate::app::events::SessionEvent;
use crate::app::guard::{GuardDecision, NavigationGuard, NavigationRequest, NavigationTicket};
use crate::app::routes::{RouteMatch, RouteTable, LOGIN_PATH};
use crate::core::error::NavigationError;

/// Redirect hops followed before a navigation is declared a loop.
pub const MAX_REDIRECTS: usize = 10;

/// Result of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The router now shows this location (after following redirects)
    Completed(RouteMatch),
    /// A newer navigation took over; this one committed nothing
    Superseded,
}

impl NavigationOutcome {
    /// Final path, if the navigation completed.
    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Completed(route) => Some(&route.path),
            NavigationOutcome::Superseded => None,
        }
    }
}

pub struct Router {
    table: RouteTable,
    guard: Arc<dyn NavigationGuard>,
    current: RwLock<Option<RouteMatch>>,
    generation: Arc<AtomicU64>,
    // Ticket id issued by the latest hard redirect
    hard_redirect_generation: AtomicU64,
}

impl Router {
    pub fn new(table: RouteTable, guard: Arc<dyn NavigationGuard>) -> Self {
        Self {
            table,
            guard,
            current: RwLock::new(None),
            generation: Arc::new(AtomicU64::new(0)),
            hard_redirect_generation: AtomicU64::new(0),
        }
    }

    /// Committed location, `None` before the first navigation.
    pub fn current(&self) -> Option<RouteMatch> {
        self.current.read().clone()
    }

    fn issue_ticket(&self) -> NavigationTicket {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        NavigationTicket::new(id, self.generation.clone())
    }

    /// Outcome for a navigation whose ticket went stale. Reads the location
    /// through the caller's lock guard.
    fn settle_stale(&self, current: &Option<RouteMatch>) -> NavigationOutcome {
        let latest = self.generation.load(Ordering::SeqCst);
        if self.hard_redirect_generation.load(Ordering::SeqCst) == latest {
            if let Some(route) = current {
                tracing::debug!(path = %route.path, "Navigation overtaken by hard redirect");
                return NavigationOutcome::Completed(route.clone());
            }
        }
        NavigationOutcome::Superseded
    }

    /// Navigate to `path`, running the guard for the target and for every
    /// redirect it asks for.
    #[tracing::instrument(skip(self))]
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        let ticket = self.issue_ticket();
        let from = self.current();
        let mut target = self.table.resolve(path);

        for _ in 0..=MAX_REDIRECTS {
            let request = NavigationRequest {
                to: &target,
                from: from.as_ref(),
                ticket: ticket.clone(),
            };

            let decision = self.guard.check(&request).await;
            match decision {
                GuardDecision::Proceed => {
                    let mut current = self.current.write();
                    if !ticket.is_current() {
                        return Ok(self.settle_stale(&current));
                    }
                    *current = Some(target.clone());
                    tracing::info!(path = %target.path, page = ?target.page(), "Navigation completed");
                    return Ok(NavigationOutcome::Completed(target));
                }
                GuardDecision::RedirectTo(next) => {
                    tracing::debug!(from = %target.path, to = %next, "Guard redirected");
                    target = self.table.resolve(&next);
                }
                GuardDecision::Abort => {
                    tracing::debug!(path = %target.path, "Navigation aborted");
                    let current = self.current.read();
                    return Ok(self.settle_stale(&current));
                }
            }
        }

        tracing::error!(path = %path, hops = MAX_REDIRECTS, "Redirect loop detected");
        Err(NavigationError::RedirectLoop {
            path: path.to_string(),
            hops: MAX_REDIRECTS,
        })
    }

    /// Full-page navigation: commits `path` without running the guard and
    /// invalidates every navigation in flight.
    pub fn hard_redirect(&self, path: &str) -> RouteMatch {
        let target = self.table.resolve(path);
        let mut current = self.current.write();
        let ticket = self.issue_ticket();
        self.hard_redirect_generation.store(ticket.id(), Ordering::SeqCst);
        *current = Some(target.clone());
        tracing::info!(path = %target.path, "Hard redirect");
        target
    }

    /// React to a session event published by the HTTP layer.
    pub fn handle_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Unauthorized { path } => {
                tracing::warn!(request_path = %path, "Session rejected by server, returning to login");
                self.hard_redirect(LOGIN_PATH);
            }
        }
    }

    /// Apply every event already queued on `events` without waiting.
    pub fn drain_events(&self, events: &Receiver<SessionEvent>) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Subscriber loop: applies events until every sender is dropped.
    pub async fn run_event_loop(self: Arc<Self>, events: Receiver<SessionEvent>) {
        while let Ok(event) = events.recv().await {
            self.handle_event(event);
        }
        tracing::debug!("Session event channel closed");
    }
}
