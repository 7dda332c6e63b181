//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged between the portal client and the backend
//! services via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login form, token, current user and verification payloads
//! - [`users`] - User records served by the user service
//! - [`products`] - Product records served by the product service
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Errors**: The services answer failures with `{"detail": "..."}` ([`auth::ErrorResponse`])
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /auth/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! username=johndoe&password=secret
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "token_type": "bearer"
//! }
//! ```

pub mod auth;
pub mod products;
pub mod users;

pub use auth::*;
pub use products::*;
pub use users::*;
