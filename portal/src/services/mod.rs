//! # Services
//!
//! - **[`api`]**: HTTP client and typed helpers
//! - **[`session`]**: login / logout on top of the client and credential store

pub mod api;
pub mod session;
