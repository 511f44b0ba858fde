//! Command implementations.
//!
//! The binary has a single job, so there is one command module; the shared
//! context keeps it testable from a temporary directory.

use std::path::PathBuf;

use ensure_core::error::{EnsureError, EnsureResult};

pub mod check;


use crate::output::OutputHandler;

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> EnsureResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| EnsureError::io("Failed to get current directory".to_string(), e))?;

        let output = OutputHandler::new();

        Ok(Self { cwd, output })
    }
}
