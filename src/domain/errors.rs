//! Domain error types
//!
//! This module defines the error hierarchy for Voyant Export.
//! All errors are domain-specific and don't expose third-party types.

use crate::core::retry::RetryExhausted;
use thiserror::Error;

/// Main Voyant Export error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VoyantError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A job-level prerequisite is missing (no selection, no collection)
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Malformed record data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Metadata document generation errors
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Source catalog errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Bag skeleton or payload layout errors
    #[error("Bag error: {0}")]
    Bag(String),

    /// Archive creation errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// A retried operation failed on every attempt
    #[error("Gave up after {attempts} attempt(s): {source}")]
    RetryExhausted {
        attempts: u32,
        source: Box<VoyantError>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Metadata generation errors
///
/// Raised only for structurally invalid records. Absent optional fields are
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The record has no usable identifier
    #[error("record identifier is missing")]
    MissingIdentifier,

    /// A creator has no family name
    #[error("creator at position {index} has no family name")]
    MissingFamilyName { index: usize },

    /// Any other structural problem
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl VoyantError {
    /// Whether the error aborted a whole job rather than a single record
    pub fn is_precondition(&self) -> bool {
        matches!(self, VoyantError::Precondition(_))
    }

    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VoyantError::Catalog(_)
                | VoyantError::Bag(_)
                | VoyantError::Archive(_)
                | VoyantError::Io(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VoyantError {
    fn from(err: std::io::Error) -> Self {
        VoyantError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VoyantError {
    fn from(err: serde_json::Error) -> Self {
        VoyantError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VoyantError {
    fn from(err: toml::de::Error) -> Self {
        VoyantError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<walkdir::Error> for VoyantError {
    fn from(err: walkdir::Error) -> Self {
        VoyantError::Archive(format!("Failed to walk bag directory: {err}"))
    }
}

impl From<zip::result::ZipError> for VoyantError {
    fn from(err: zip::result::ZipError) -> Self {
        VoyantError::Archive(err.to_string())
    }
}

impl From<RetryExhausted<VoyantError>> for VoyantError {
    fn from(err: RetryExhausted<VoyantError>) -> Self {
        VoyantError::RetryExhausted {
            attempts: err.attempts,
            source: Box::new(err.last_error),
        }
    }
}
