//! crates.io API response types

use serde::{Deserialize, Serialize};

use ensure_core::LookupOutcome;

/// Response body of `GET /api/v1/crates/{name}/{version}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionResponse {
    /// Resolved version record, absent for error bodies
    pub version: Option<VersionRecord>,
}

/// A single published version as the registry reports it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionRecord {
    /// Canonical crate name
    #[serde(rename = "crate")]
    pub krate: Option<String>,
    /// Version number
    pub num: Option<String>,
    /// Whether the version has been yanked
    pub yanked: Option<bool>,
    /// Download path relative to the registry host
    pub dl_path: Option<String>,
    /// SHA-256 of the `.crate` file
    pub checksum: Option<String>,
}

/// Classify a registry response body.
///
/// Anything that does not decode into a version record carrying a crate name
/// is `NotFound`, including HTML error pages and empty bodies.
pub fn interpret_payload(body: &[u8]) -> LookupOutcome {
    match serde_json::from_slice::<VersionResponse>(body) {
        Ok(VersionResponse {
            version: Some(VersionRecord {
                krate: Some(name), ..
            }),
        }) => LookupOutcome::Found(name),
        _ => LookupOutcome::NotFound,
    }
}
