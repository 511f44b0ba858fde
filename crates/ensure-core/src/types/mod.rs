//! Core data types for a registry visibility check.
//!
//! - `LookupRequest`: the crate name and version being waited for
//! - `LookupOutcome`: what a single registry lookup observed
//! - `PollResult`: the terminal verdict of a whole poll

pub mod outcome;
pub mod request;

// Re-export all public types
pub use outcome::{LookupOutcome, PollResult, EXIT_CONFIRMED, EXIT_EXHAUSTED, EXIT_FAILURE};
pub use request::LookupRequest;
