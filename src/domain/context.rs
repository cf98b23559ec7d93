//! Error context extension trait
//!
//! Works like `anyhow::Context` but keeps `Result<T, VoyantError>`, and keeps
//! the variant of the wrapped error so callers can still tell a precondition
//! failure from an I/O failure after context was added.
//!
//! # Examples
//!
//! ```rust
//! use voyant_export::domain::Result;
//! use voyant_export::domain::context::ResultExt;
//!
//! fn read_library(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read library file {}", path))
//! }
//! ```

use crate::domain::errors::VoyantError;
use crate::domain::result::Result;

/// Adds context to errors convertible into [`VoyantError`]
pub trait ResultExt<T> {
    /// Prefixes the error message with `context`
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display;

    /// Like [`ResultExt::context`], but only builds the message on error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<VoyantError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display,
    {
        self.map_err(|e| e.into().prefixed(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().prefixed(f()))
    }
}

impl VoyantError {
    /// Same error kind with `context` prepended to the message
    ///
    /// Metadata errors are turned into validation errors, which can carry
    /// the extended message.
    pub fn prefixed(self, context: impl std::fmt::Display) -> Self {
        let context = context.to_string();
        let wrap = |message: String| format!("{context}: {message}");
        match self {
            VoyantError::Configuration(m) => VoyantError::Configuration(wrap(m)),
            VoyantError::Precondition(m) => VoyantError::Precondition(wrap(m)),
            VoyantError::Validation(m) => VoyantError::Validation(wrap(m)),
            VoyantError::Catalog(m) => VoyantError::Catalog(wrap(m)),
            VoyantError::Bag(m) => VoyantError::Bag(wrap(m)),
            VoyantError::Archive(m) => VoyantError::Archive(wrap(m)),
            VoyantError::Serialization(m) => VoyantError::Serialization(wrap(m)),
            VoyantError::Io(m) => VoyantError::Io(wrap(m)),
            VoyantError::Metadata(e) => VoyantError::Validation(wrap(e.to_string())),
            VoyantError::RetryExhausted { attempts, source } => VoyantError::RetryExhausted {
                attempts,
                source: Box::new(source.prefixed(context.as_str())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::MetadataError;

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(VoyantError::Precondition("no collection".to_string()));
        let err = result.context("Export aborted").unwrap_err();

        assert!(err.is_precondition());
        assert_eq!(
            err.to_string(),
            "Precondition failed: Export aborted: no collection"
        );
    }

    #[test]
    fn test_context_on_io_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.context("Failed to read library.json").unwrap_err();

        assert!(matches!(err, VoyantError::Io(ref m) if m.starts_with("Failed to read library.json")));
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let called = std::cell::Cell::new(false);
        let result: Result<i32> = Ok(42);

        let value = result
            .with_context(|| {
                called.set(true);
                "never built"
            })
            .unwrap();

        assert_eq!(value, 42);
        assert!(!called.get());
    }

    #[test]
    fn test_metadata_error_becomes_validation() {
        let result: std::result::Result<(), MetadataError> = Err(MetadataError::MissingIdentifier);
        let err = result.context("Record 3").unwrap_err();

        assert!(matches!(err, VoyantError::Validation(_)));
        assert!(err.to_string().contains("record identifier is missing"));
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<()> = Err(VoyantError::Bag("disk full".to_string()));
        let err = result
            .context("Writing DC.xml")
            .context("Record K1")
            .unwrap_err();

        assert_eq!(err.to_string(), "Bag error: Record K1: Writing DC.xml: disk full");
    }
}
