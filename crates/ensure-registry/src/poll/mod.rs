//! Bounded poll loop that waits for a published version to become visible
//!
//! The controller issues one lookup per attempt, sleeps a fixed interval
//! between attempts, and stops at the first terminal outcome:
//!
//! - the registry names the requested crate: `Confirmed`
//! - the registry names a different crate: `Mismatch`, never retried
//! - the attempt budget runs out: `Exhausted`

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use ensure_core::error::{EnsureError, EnsureResult};
use ensure_core::{LookupOutcome, LookupRequest, PollResult};

use crate::client::LookupClient;

/// Default attempt budget
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Default wait between attempts
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// Retry schedule for a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of lookups; a value of 0 still makes one attempt
    pub max_attempts: u32,
    /// Fixed delay between consecutive attempts
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl PollConfig {
    /// Create a schedule, rejecting an empty attempt budget
    pub fn new(max_attempts: u32, interval: Duration) -> EnsureResult<Self> {
        if max_attempts == 0 {
            return Err(EnsureError::ConfigValidation {
                field: "max_attempts".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }
        Ok(Self {
            max_attempts,
            interval,
        })
    }

    fn budget(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Suspends the poll between attempts
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Drives a lookup client to a terminal `PollResult`
#[derive(Debug)]
pub struct PollController<C, S = TokioSleeper> {
    client: C,
    sleeper: S,
    config: PollConfig,
}

impl<C: LookupClient> PollController<C> {
    /// Create a controller that sleeps on the tokio timer
    pub fn new(client: C, config: PollConfig) -> Self {
        Self::with_sleeper(client, TokioSleeper, config)
    }
}

impl<C: LookupClient, S: Sleeper> PollController<C, S> {
    /// Create a controller with a custom sleeper
    pub fn with_sleeper(client: C, sleeper: S, config: PollConfig) -> Self {
        Self {
            client,
            sleeper,
            config,
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Poll until the registry confirms the request, contradicts it, or the
    /// budget runs out. Each call starts from a fresh attempt counter.
    pub async fn run(&self, request: &LookupRequest) -> PollResult {
        let budget = self.config.budget();

        for attempt in 1..=budget {
            if attempt > 1 {
                self.sleeper.sleep(self.config.interval).await;
            }

            match self.client.lookup(request).await {
                LookupOutcome::Found(name) if name == request.package_name() => {
                    info!("[{}/{}] {}: OK", attempt, budget, request);
                    return PollResult::Confirmed { attempts: attempt };
                },
                LookupOutcome::Found(name) => {
                    warn!(
                        "[{}/{}] Registry resolved {} to crate `{}`",
                        attempt, budget, request, name
                    );
                    return PollResult::Mismatch {
                        expected: request.package_name().to_string(),
                        found: name,
                        attempts: attempt,
                    };
                },
                outcome => {
                    info!("[{}/{}] {}: {}", attempt, budget, request, outcome);
                },
            }
        }

        PollResult::Exhausted { attempts: budget }
    }
}
