//! # Core Abstractions
//!
//! Core traits and error types shared by the router and the HTTP layer.
//!
//! - **[`error`]**: Error types (`ApiError`, `NavigationError`, `AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`AuthService`)
//!
//! ## Dependency Injection
//!
//! The route guard only needs token verification and the default header slot,
//! so it depends on [`AuthService`] rather than on the concrete client:
//!
//! ```rust,ignore
//! use portal::core::service::AuthService;
//!
//! // In production: the real client
//! let auth: Arc<dyn AuthService> = Arc::new(ApiClient::new(&config, store, events)?);
//!
//! // In tests: a mock that records verification calls
//! let auth: Arc<dyn AuthService> = Arc::new(MockAuth::accepting());
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, AppError, NavigationError, Result};
pub use service::AuthService;
