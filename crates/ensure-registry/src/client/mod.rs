//! Single-shot registry lookup over HTTP

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::debug;
use url::Url;

use ensure_core::error::EnsureError;
use ensure_core::{LookupOutcome, LookupRequest};

use crate::api::interpret_payload;
use crate::RegistryResult;

/// crates.io version lookup endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://crates.io/api/v1/crates";

/// Performs one registry lookup per call.
///
/// Implementations must not retry, sleep, or report progress; the poll
/// controller owns all of that.
pub trait LookupClient {
    fn lookup(&self, request: &LookupRequest) -> impl Future<Output = LookupOutcome> + Send;
}

/// HTTP settings for the registry client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; requests go to `{base_url}/{name}/{version}`
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// User agent, required by crates.io
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("ensure-crate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed lookup client
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client
    client: Client,
    /// Base registry URL, without a trailing slash
    base_url: String,
}

impl RegistryClient {
    /// Create a client for crates.io
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom settings
    pub fn with_config(config: ClientConfig) -> RegistryResult<Self> {
        let base_url = validate_base_url(&config.base_url)?;

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| EnsureError::network("Failed to create HTTP client".to_string(), e))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the version record for a request
    pub fn version_url(&self, request: &LookupRequest) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            request.package_name(),
            request.version()
        )
    }
}

impl LookupClient for RegistryClient {
    async fn lookup(&self, request: &LookupRequest) -> LookupOutcome {
        let url = self.version_url(request);

        let response = match self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return LookupOutcome::TransportFailure(format!("request failed: {}", e)),
        };

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        // A 404 body is the registry's error envelope and never a record.
        if status == StatusCode::NOT_FOUND {
            return LookupOutcome::NotFound;
        }
        if !status.is_success() {
            return LookupOutcome::TransportFailure(format!("registry returned status {}", status));
        }

        match response.bytes().await {
            Ok(body) => interpret_payload(&body),
            Err(e) => LookupOutcome::TransportFailure(format!("failed to read response body: {}", e)),
        }
    }
}

fn validate_base_url(raw: &str) -> RegistryResult<String> {
    let url = Url::parse(raw).map_err(|e| EnsureError::ConfigValidation {
        field: "registry_url".to_string(),
        reason: format!("'{}' is not a valid URL: {}", raw, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(EnsureError::ConfigValidation {
            field: "registry_url".to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests;
