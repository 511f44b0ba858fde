//! Cargo.toml parsing

use camino::Utf8Path;
use serde::Deserialize;

use ensure_core::error::EnsureError;

use crate::ConfigResult;

/// The parts of a Cargo manifest the release gate cares about
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CargoManifest {
    /// Package section; absent in virtual workspace manifests
    pub package: Option<PackageSection>,
}

/// `[package]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageSection {
    /// Crate name
    pub name: Option<String>,

    /// Crate version, literal or inherited from the workspace
    pub version: Option<ManifestVersion>,
}

/// Version field (literal string or `{ workspace = true }`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ManifestVersion {
    /// `version = "1.2.3"`
    Literal(String),

    /// `version.workspace = true`
    Inherited {
        /// Workspace inheritance flag
        workspace: bool,
    },
}

impl CargoManifest {
    /// Crate name, if the manifest declares a non-empty one
    pub fn package_name(&self) -> Option<&str> {
        self.package
            .as_ref()
            .and_then(|package| package.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    /// Crate version, if the manifest spells it out literally
    pub fn literal_version(&self) -> Option<&str> {
        match self.package.as_ref()?.version.as_ref()? {
            ManifestVersion::Literal(version) if !version.trim().is_empty() => Some(version.as_str()),
            _ => None,
        }
    }

    /// Whether the version is inherited from the workspace root
    pub fn inherits_version(&self) -> bool {
        matches!(
            self.package.as_ref().and_then(|package| package.version.as_ref()),
            Some(ManifestVersion::Inherited { workspace: true })
        )
    }
}

/// Parse manifest content
pub fn parse_manifest(content: &str) -> ConfigResult<CargoManifest> {
    toml::from_str(content).map_err(|e| EnsureError::ManifestParse {
        path: "Cargo.toml".to_string(),
        message: e.to_string(),
    })
}

/// Load and parse a manifest from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<CargoManifest> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| EnsureError::io(format!("Failed to read {}", path), e))?;

    parse_manifest(&content).map_err(|e| match e {
        EnsureError::ManifestParse { message, .. } => EnsureError::ManifestParse {
            path: path.to_string(),
            message,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_manifest() {
        let manifest = parse_manifest(
            r#"
[package]
name = "foo"
version = "1.2.3"
edition = "2021"

[dependencies]
serde = "1"
"#,
        )
        .unwrap();

        assert_eq!(manifest.package_name(), Some("foo"));
        assert_eq!(manifest.literal_version(), Some("1.2.3"));
        assert!(!manifest.inherits_version());
    }

    #[test]
    fn test_parse_inherited_version() {
        let manifest = parse_manifest(
            r#"
[package]
name = "foo"
version.workspace = true
"#,
        )
        .unwrap();

        assert_eq!(manifest.package_name(), Some("foo"));
        assert_eq!(manifest.literal_version(), None);
        assert!(manifest.inherits_version());
    }

    #[test]
    fn test_virtual_manifest_has_no_name() {
        let manifest = parse_manifest(
            r#"
[workspace]
members = ["crates/*"]
"#,
        )
        .unwrap();

        assert_eq!(manifest.package_name(), None);
        assert_eq!(manifest.literal_version(), None);
    }

    #[test]
    fn test_blank_name_is_treated_as_missing() {
        let manifest = parse_manifest("[package]\nname = \"  \"\n").unwrap();
        assert_eq!(manifest.package_name(), None);
    }

    #[test]
    fn test_syntax_error() {
        let result = parse_manifest("[package\nname = \"foo\"");
        assert!(matches!(result, Err(EnsureError::ManifestParse { .. })));
    }

    #[tokio::test]
    async fn test_load_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("Cargo.toml");
        std::fs::write(&path, "package = 3").unwrap();

        match load_from_file(&path).await {
            Err(EnsureError::ManifestParse { path: reported, .. }) => {
                assert_eq!(reported, path.to_string());
            },
            other => panic!("Expected ManifestParse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("Cargo.toml");

        let result = load_from_file(&path).await;
        assert!(matches!(result, Err(EnsureError::Io { .. })));
    }
}
