//! # ensure-core
//!
//! Core types and errors shared across the ensure-crate workspace.
//!
//! This crate provides:
//! - `LookupRequest`, the validated name/version pair a poll is about
//! - `LookupOutcome` and `PollResult`, the per-attempt and terminal verdicts
//! - `EnsureError` for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: request and outcome types
//! - `error`: error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{EnsureError, EnsureResult};
pub use types::{LookupOutcome, LookupRequest, PollResult};
