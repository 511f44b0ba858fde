//! Lookup request type.
//!
//! A request is validated once at construction and is immutable afterwards,
//! so a poll can never start for a blank name or an unparsable version.

use std::fmt;

use crate::error::{EnsureError, EnsureResult};

/// Longest crate name crates.io accepts
pub const MAX_NAME_LENGTH: usize = 64;

/// The crate name and version a poll waits for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    package_name: String,
    version: String,
}

impl LookupRequest {
    /// Create a request, failing fast on missing or malformed input
    pub fn new(package_name: impl Into<String>, version: impl Into<String>) -> EnsureResult<Self> {
        let package_name = package_name.into().trim().to_string();
        let version = version.into().trim().to_string();

        if package_name.is_empty() {
            return Err(EnsureError::missing("package name"));
        }
        if version.is_empty() {
            return Err(EnsureError::missing("version"));
        }

        if let Some(reason) = name_violation(&package_name) {
            return Err(EnsureError::invalid("package name", package_name, reason));
        }
        if let Err(e) = semver::Version::parse(&version) {
            return Err(EnsureError::invalid("version", version, e.to_string()));
        }

        Ok(Self {
            package_name,
            version,
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package_name, self.version)
    }
}

fn name_violation(name: &str) -> Option<String> {
    if name.len() > MAX_NAME_LENGTH {
        return Some(format!("must be at most {} characters", MAX_NAME_LENGTH));
    }

    match name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => {},
        Some(_) => return Some("must start with an ASCII letter".to_string()),
        None => return Some("must not be empty".to_string()),
    }

    name.chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        .map(|c| format!("contains invalid character '{}'", c))
}
