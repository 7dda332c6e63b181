//! # Debug System
//!
//! Logging setup for the portal binary.
//!
//! - **[`config`]**: log settings from environment variables
//! - **[`logger`]**: `tracing` subscriber initialization
//!
//! Library code only emits `tracing` events; embedders install their own
//! subscriber.

pub mod config;
pub mod logger;
