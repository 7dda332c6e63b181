//! # Session Events
//!
//! Events published by the HTTP layer for the router to act on.
//!
//! The response interceptor never navigates by itself: it publishes
//! [`SessionEvent::Unauthorized`] and the router subscriber performs the hard
//! redirect (see [`crate::app::router::Router::run_event_loop`]).

use async_channel::{Receiver, Sender};

/// Session-level notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A request to `path` was answered 401; the credential has been cleared
    Unauthorized { path: String },
}

/// Create the unbounded channel shared by the API client (sender) and the
/// router (receiver).
pub fn channel() -> (Sender<SessionEvent>, Receiver<SessionEvent>) {
    async_channel::unbounded()
}
