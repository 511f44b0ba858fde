//! Registry client and visibility poller for ensure-crate
//!
//! This crate provides the single-shot registry lookup and the bounded poll
//! loop that drives it until the registry confirms a published version.

pub mod api;
pub mod client;
pub mod poll;

// Re-export main types
pub use api::{interpret_payload, VersionRecord, VersionResponse};
pub use client::{ClientConfig, LookupClient, RegistryClient, DEFAULT_REGISTRY_URL};
pub use poll::{PollConfig, PollController, Sleeper, TokioSleeper};

use ensure_core::error::EnsureError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, EnsureError>;
