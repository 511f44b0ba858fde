//! # ensure-crate
//!
//! Release-pipeline gate that waits until a freshly published crate version
//! is visible on the registry.
//!
//! This is the main entry point. It parses arguments, sets up logging and
//! panic reporting, runs the check, and maps the verdict to an exit code:
//! `0` confirmed, `2` exhausted, `1` mismatch or setup error.

use std::process::ExitCode;

use clap::Parser;
use ensure_core::error::{EnsureError, EnsureResult};
use ensure_core::types::EXIT_FAILURE;
use ensure_core::PollResult;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::check::CheckArgs;
use commands::CommandContext;
use output::errors::ErrorFormatter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nbuilt: ",
    env!("BUILD_DATE"),
    "\nrustc: ",
    env!("RUSTC_VERSION")
);

/// Wait for a published crate version to become visible on the registry
#[derive(Parser, Debug)]
#[command(name = "ensure-crate", version, long_version = LONG_VERSION)]
pub struct Cli {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and the final verdict
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_error_code(&err));
        },
    };

    setup_logging(cli.verbose, cli.quiet);
    setup_panic_handler();

    debug!("Starting ensure-crate v{}", env!("CARGO_PKG_VERSION"));

    run_cli(cli)
}

/// Exit code for a rejected command line; `--help` and `--version` succeed
fn parse_error_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_FAILURE
    } else {
        0
    }
}

fn run_cli(cli: Cli) -> ExitCode {
    match run(cli) {
        Ok(result) => ExitCode::from(result.exit_code()),
        Err(err) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::from(EXIT_FAILURE)
        },
    }
}

fn run(cli: Cli) -> EnsureResult<PollResult> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| EnsureError::io("Failed to create async runtime".to_string(), e))?;

    let ctx = CommandContext::new()?;
    rt.block_on(commands::check::execute(&cli.check, &ctx))
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ensure_crate={},ensure_registry={},ensure_config={}",
            level, level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("ensure-crate encountered an unexpected error: {}", panic_info);
        eprintln!("ensure-crate crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
