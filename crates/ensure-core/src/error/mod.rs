//! Error types and result aliases for ensure-crate operations.
//!
//! Covers every setup failure that can stop a poll before its first attempt.
//! Per-attempt lookup failures are not errors; they are classified into
//! `LookupOutcome` values and never leave the poll loop.

use thiserror::Error;

/// Unified error type for all ensure-crate operations
#[derive(Error, Debug)]
pub enum EnsureError {
    // Input errors
    #[error("Missing {field}")]
    MissingInput { field: String },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    // Manifest errors
    #[error("Failed to parse {path}: {message}")]
    ManifestParse { path: String, message: String },

    #[error("Manifest {path} does not declare {field}")]
    ManifestField { path: String, field: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Registry errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for ensure-crate operations
pub type EnsureResult<T> = Result<T, EnsureError>;

impl EnsureError {
    /// Create a missing-input error for the named field
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    /// Create an invalid-input error
    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            EnsureError::MissingInput { field } if field == "version" => {
                Some("Pass the published version as the first argument, e.g. `ensure-crate 1.2.3`")
            },
            EnsureError::MissingInput { .. } | EnsureError::ManifestField { .. } => {
                Some("Run from the crate directory, use --manifest-path, or pass --package explicitly")
            },
            EnsureError::InvalidInput { .. } => {
                Some("Crate names are ASCII alphanumerics, '-' or '_'; versions must be semver")
            },
            EnsureError::ManifestParse { .. } => Some("Check that the manifest is valid TOML"),
            EnsureError::Network { .. } => Some("Check the registry URL and your TLS setup"),
            EnsureError::Io { .. } => Some("Check that the path exists and is readable"),
            EnsureError::ConfigValidation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_version_has_specific_suggestion() {
        let err = EnsureError::missing("version");
        assert_eq!(err.to_string(), "Missing version");
        assert!(err.suggestion().unwrap().contains("first argument"));
    }

    #[test]
    fn test_missing_name_points_at_manifest() {
        let err = EnsureError::missing("package name");
        assert!(err.suggestion().unwrap().contains("--package"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = EnsureError::io("Failed to read Cargo.toml".to_string(), source);
        assert_eq!(err.to_string(), "IO error: Failed to read Cargo.toml");
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }
}
