//! # Shared Utility Functions
//!
//! Helpers for the bearer scheme used by every authenticated call.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{bearer, parse_bearer};
//!
//! let header = bearer("abc");
//! assert_eq!(header, "Bearer abc");
//! assert_eq!(parse_bearer(&header), Some("abc"));
//! ```

/// Scheme prefix of an `Authorization` header carrying a bearer token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Build the `Authorization` header value for `token`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::bearer;
///
/// assert_eq!(bearer("abc"), "Bearer abc");
/// ```
pub fn bearer(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for other schemes
/// and for an empty token.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let header = header.trim();
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
