//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the portal client and the auth,
//! user and product services. All DTOs use JSON serialization via `serde`,
//! except the login form which is sent form-urlencoded.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, token, current-user and verification DTOs
//!   - **[`dto::users`]**: User records and creation payloads
//!   - **[`dto::products`]**: Product records and creation payloads
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::bearer`]**: Build an `Authorization` header value
//!   - **[`utils::parse_bearer`]**: Extract the token from a header value
//!
//! ## Usage in the Client
//!
//! ```rust,ignore
//! use shared::dto::users::User;
//! use shared::utils::bearer;
//!
//! # async fn run() -> Result<(), reqwest::Error> {
//! let users: Vec<User> = reqwest::Client::new()
//!     .get("http://127.0.0.1:8080/users")
//!     .header("Authorization", bearer("abc"))
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
