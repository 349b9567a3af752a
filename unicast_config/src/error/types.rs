//! Primary error enum for content computation and synchronisation flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while computing or writing managed content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UnicastError {
    /// A setting the computation cannot proceed without was not supplied.
    #[error("Required setting '{setting}' missing")]
    Configuration {
        /// Name of the missing setting.
        setting: String,
    },

    /// A compact key failed strict validation.
    #[error("Malformed key '{key}': {reason}")]
    MalformedKey {
        /// Key as written in the override mapping.
        key: String,
        /// Human-readable explanation of the defect.
        reason: String,
    },

    /// A value cannot be represented by the configuration tree.
    #[error("Unsupported value at '{path}': expected {expected}, found {found}")]
    UnsupportedValue {
        /// Dotted location of the offending value.
        path: String,
        /// Shape the tree accepts at that location.
        expected: &'static str,
        /// Shape that was supplied instead.
        found: &'static str,
    },

    /// Error reading or writing a file.
    #[error("File error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: std::path::PathBuf,
        /// Underlying I/O or parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while extracting declarations from a catalog provider.
    #[error("Failed to gather catalog: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// A declared setting was present but invalid.
    #[error("Validation failed for '{key}': {message}")]
    Validation {
        /// Setting that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },

    /// Multiple errors occurred in a single computation.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
