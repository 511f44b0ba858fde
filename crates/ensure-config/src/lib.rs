//! Cargo manifest handling for ensure-crate
//!
//! This crate locates a crate's `Cargo.toml` and extracts the package name
//! and version the registry poll should wait for.

pub mod locate;
pub mod manifest;

// Re-export main types
pub use locate::{ManifestLocator, MANIFEST_FILE_NAME};
pub use manifest::{CargoManifest, ManifestVersion, PackageSection};

use ensure_core::error::EnsureError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, EnsureError>;
