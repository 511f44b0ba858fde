//! Wait for a published crate version to become visible on the registry.

use std::time::Duration;

use camino::Utf8Path;
use clap::Args;
use tracing::{debug, info};

use ensure_config::ManifestLocator;
use ensure_core::error::{EnsureError, EnsureResult};
use ensure_core::{LookupRequest, PollResult};
use ensure_registry::poll::DEFAULT_MAX_ATTEMPTS;
use ensure_registry::{ClientConfig, PollConfig, PollController, RegistryClient, DEFAULT_REGISTRY_URL};

use super::CommandContext;

/// Arguments of the visibility check
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Published version to wait for [default: version in Cargo.toml]
    #[arg(value_name = "VERSION")]
    pub crate_version: Option<String>,

    /// Crate name [default: package name in Cargo.toml]
    #[arg(short, long, env = "ENSURE_CRATE_PACKAGE")]
    pub package: Option<String>,

    /// Path to the crate's Cargo.toml
    #[arg(long, value_name = "PATH", env = "ENSURE_CRATE_MANIFEST")]
    pub manifest_path: Option<String>,

    /// Registry version endpoint; requests go to URL/NAME/VERSION
    #[arg(long, value_name = "URL", env = "ENSURE_CRATE_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Maximum number of lookups before giving up
    #[arg(long, env = "ENSURE_CRATE_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Delay between lookups in milliseconds
    #[arg(long, env = "ENSURE_CRATE_INTERVAL_MS", default_value_t = 2000)]
    pub interval_ms: u64,

    /// Timeout of a single lookup in seconds
    #[arg(long, env = "ENSURE_CRATE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl CheckArgs {
    /// Retry schedule from the arguments
    pub fn poll_config(&self) -> EnsureResult<PollConfig> {
        PollConfig::new(self.max_attempts, Duration::from_millis(self.interval_ms))
    }

    /// HTTP settings from the arguments
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.registry_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }
}

/// Run the check and report the verdict.
///
/// Everything that can be wrong with the input is rejected here, before the
/// first lookup is sent.
pub async fn execute(args: &CheckArgs, ctx: &CommandContext) -> EnsureResult<PollResult> {
    let request = resolve_request(args, ctx).await?;
    let config = args.poll_config()?;
    let client = RegistryClient::with_config(args.client_config())?;

    ctx.output.info(&format!("Checking crate {}", request));
    debug!(
        "Polling {} up to {} times every {:?}",
        client.version_url(&request),
        config.max_attempts,
        config.interval
    );

    let result = PollController::new(client, config).run(&request).await;
    report(&request, &result, ctx);

    Ok(result)
}

/// Work out the crate name and version from the arguments, falling back to
/// the manifest for whichever one was not given.
pub async fn resolve_request(args: &CheckArgs, ctx: &CommandContext) -> EnsureResult<LookupRequest> {
    if let (Some(name), Some(version)) = (&args.package, &args.crate_version) {
        return LookupRequest::new(name.as_str(), version.as_str());
    }

    let locator = ManifestLocator::from_std(&ctx.cwd)?;
    let (manifest, path) = locator.load(manifest_path(args)).await?;
    info!("Reading package metadata from {}", path);

    let name = match &args.package {
        Some(name) => name.clone(),
        None => manifest
            .package_name()
            .map(str::to_string)
            .ok_or_else(|| EnsureError::ManifestField {
                path: path.to_string(),
                field: "a package name".to_string(),
            })?,
    };

    let version = match (&args.crate_version, manifest.literal_version()) {
        (Some(version), _) => version.clone(),
        (None, Some(version)) => version.to_string(),
        (None, None) => {
            if manifest.inherits_version() {
                ctx.output.warn(&format!(
                    "{} inherits its version from the workspace; pass VERSION explicitly",
                    path
                ));
            }
            return Err(EnsureError::missing("version"));
        },
    };

    LookupRequest::new(name, version)
}

fn manifest_path(args: &CheckArgs) -> Option<&Utf8Path> {
    args.manifest_path.as_deref().map(Utf8Path::new)
}

fn report(request: &LookupRequest, result: &PollResult, ctx: &CommandContext) {
    match result {
        PollResult::Confirmed { attempts } => ctx.output.success(&format!(
            "{} is available on the registry (attempt {})",
            request, attempts
        )),
        PollResult::Exhausted { attempts } => ctx.output.error(&format!(
            "{} is still not available after {} attempts",
            request, attempts
        )),
        PollResult::Mismatch { .. } => ctx.output.error(&format!("{}: {}", request, result)),
    }
}
