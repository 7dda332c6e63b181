//! # Backend API Client Module
//!
//! HTTP client for the auth, user and product services.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports and documentation
//! ├── client.rs        - ApiClient struct and the request pipeline
//! ├── interceptors.rs  - Bearer injection and response normalization
//! ├── auth.rs          - Login, current user, token verification
//! ├── users.rs         - User endpoints
//! └── products.rs      - Product endpoints
//! ```
//!
//! Helpers only build method, path and payload; everything else happens in
//! the client and its interceptors.

pub mod auth;
pub mod client;
mod interceptors;
pub mod products;
pub mod users;

pub use auth::CacheBusting;
pub use client::ApiClient;
