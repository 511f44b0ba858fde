//! Lookup and poll outcome types.

use std::fmt;

/// Exit code for a confirmed crate
pub const EXIT_CONFIRMED: u8 = 0;
/// Exit code for a mismatch or any failure before polling starts
pub const EXIT_FAILURE: u8 = 1;
/// Exit code when the attempt budget ran out
pub const EXIT_EXHAUSTED: u8 = 2;

/// What a single registry lookup observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The registry returned a version record naming this crate
    Found(String),
    /// The registry answered without a usable version record
    NotFound,
    /// The request itself could not be completed
    TransportFailure(String),
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupOutcome::Found(name) => write!(f, "found crate `{}`", name),
            LookupOutcome::NotFound => write!(f, "not available"),
            LookupOutcome::TransportFailure(detail) => write!(f, "lookup failed: {}", detail),
        }
    }
}

/// Terminal verdict of a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    /// The registry serves the requested name at the requested version
    Confirmed { attempts: u32 },
    /// Every attempt in the budget came back empty
    Exhausted { attempts: u32 },
    /// The registry resolved the lookup to a different crate
    Mismatch {
        expected: String,
        found: String,
        attempts: u32,
    },
}

impl PollResult {
    /// Number of lookups performed before this verdict
    pub fn attempts(&self) -> u32 {
        match self {
            PollResult::Confirmed { attempts }
            | PollResult::Exhausted { attempts }
            | PollResult::Mismatch { attempts, .. } => *attempts,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, PollResult::Confirmed { .. })
    }

    /// Process exit code for this verdict
    pub fn exit_code(&self) -> u8 {
        match self {
            PollResult::Confirmed { .. } => EXIT_CONFIRMED,
            PollResult::Exhausted { .. } => EXIT_EXHAUSTED,
            PollResult::Mismatch { .. } => EXIT_FAILURE,
        }
    }
}

impl fmt::Display for PollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollResult::Confirmed { attempts } => {
                write!(f, "confirmed after {} attempt(s)", attempts)
            },
            PollResult::Exhausted { attempts } => {
                write!(f, "not available after {} attempt(s)", attempts)
            },
            PollResult::Mismatch { expected, found, .. } => {
                write!(f, "registry resolved `{}` to crate `{}`", expected, found)
            },
        }
    }
}
