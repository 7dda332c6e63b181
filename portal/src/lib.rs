//! # Portal - Library Root
//!
//! Client-side routing and HTTP access for the auth, user and product
//! services: a route table whose guard validates the stored credential
//! remotely before every protected navigation, and an HTTP client that injects
//! bearer tokens and normalizes failures.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              portal (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - Router, auth guard, session events       │
//! │  services   - ApiClient + auth/users/products helpers  │
//! │  storage    - Credential store (memory, JSON file)     │
//! │  core       - Error types, service traits              │
//! │  config     - Environment configuration                │
//! │  debug      - tracing subscriber setup                 │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP (reqwest, 10s timeout)
//!          ▼
//! ┌────────────────────────────────────────────────────────┐
//! │  Gateway → auth-service / user-service / product-service│
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portal::app::App;
//! use portal::config::PortalConfig;
//! use portal::services::api::users;
//! use portal::storage::MemoryStore;
//!
//! # async fn run() -> portal::Result<()> {
//! let app = App::new(&PortalConfig::from_env()?, Arc::new(MemoryStore::new()))?;
//! let _events = app.spawn_event_loop();
//!
//! let outcome = app.router.navigate("/users").await?;
//! if outcome.path() == Some("/users") {
//!     let users = users::get_users(&app.api).await?;
//!     println!("{} users", users.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p portal
//! ```
//!
//! Integration tests in `tests/` run the client against an in-process axum
//! backend that records every request it receives.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod storage;

// Re-export commonly used types for convenience
pub use app::App;
pub use core::{ApiError, AppError, NavigationError, Result};
