use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for roibridge operations.
#[derive(Debug, Error)]
pub enum RoiBridgeError {
    #[error("Invalid coordinate context: {0}")]
    InvalidContext(String),

    #[error("Malformed {kind} geometry: {reason}")]
    MalformedGeometry { kind: String, reason: String },

    #[error("Unsupported toolkit shape kind '{kind}'")]
    UnsupportedShapeKind { kind: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse region JSON from {path}: {source}")]
    RegionJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write region JSON to {path}: {source}")]
    RegionJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No resource found with name '{name}'")]
    NotFound { name: String },

    #[error("Failed to (de)serialize resource '{name}': {source}")]
    ResourceJson {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown model kind '{0}'")]
    UnknownKind(String),

    #[error("Invalid model JSON: {0}")]
    ModelJson(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl RoiBridgeError {
    pub(crate) fn malformed(kind: impl ToString, reason: impl Into<String>) -> Self {
        RoiBridgeError::MalformedGeometry {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}
