//! Manifest discovery

use camino::{Utf8Path, Utf8PathBuf};

use ensure_core::error::EnsureError;

use crate::manifest::{load_from_file, CargoManifest};
use crate::ConfigResult;

/// File name of a Cargo manifest
pub const MANIFEST_FILE_NAME: &str = "Cargo.toml";

/// Finds and loads the manifest of the crate being released
pub struct ManifestLocator {
    /// Current working directory
    cwd: Utf8PathBuf,
}

impl ManifestLocator {
    /// Create a locator rooted at a working directory
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Create a locator from a non-UTF-8-checked path
    pub fn from_std(cwd: &std::path::Path) -> ConfigResult<Self> {
        let cwd = Utf8PathBuf::try_from(cwd.to_path_buf()).map_err(|e| EnsureError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory is not valid UTF-8: {}", e),
        })?;
        Ok(Self::new(cwd))
    }

    /// Resolve the manifest path.
    ///
    /// An explicit path is taken as given (relative to the working directory);
    /// otherwise the nearest `Cargo.toml` at or above the working directory wins.
    pub fn resolve_manifest_path(&self, explicit: Option<&Utf8Path>) -> ConfigResult<Utf8PathBuf> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }

        let mut current = self.cwd.as_path();
        loop {
            let candidate = current.join(MANIFEST_FILE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(EnsureError::ConfigValidation {
            field: "manifest_path".to_string(),
            reason: format!("No {} found in {} or any parent directory", MANIFEST_FILE_NAME, self.cwd),
        })
    }

    /// Resolve and load the manifest
    pub async fn load(&self, explicit: Option<&Utf8Path>) -> ConfigResult<(CargoManifest, Utf8PathBuf)> {
        let path = self.resolve_manifest_path(explicit)?;
        let manifest = load_from_file(&path).await?;
        Ok((manifest, path))
    }
}
