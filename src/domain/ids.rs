//! Domain identifier types
//!
//! Newtype wrappers for catalog identifiers. A [`RecordId`] doubles as the
//! name of the record's payload directory, so it also knows whether it is
//! safe to use as a single path component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record identifier newtype wrapper
///
/// Stable, opaque identifier handed out by the source catalog.
///
/// # Examples
///
/// ```
/// use voyant_export::domain::ids::RecordId;
///
/// let id = RecordId::new("ABC123");
/// assert_eq!(id.as_str(), "ABC123");
/// assert!(id.is_path_safe());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId
    ///
    /// No validation happens here; the catalog boundary hands over whatever it
    /// has and metadata generation rejects blank identifiers.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the record ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// True when the identifier has no visible characters
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Whether the identifier can be used verbatim as one directory name
    pub fn is_path_safe(&self) -> bool {
        !self.is_blank()
            && self.0 != "."
            && self.0 != ".."
            && !self
                .0
                .chars()
                .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Attachment identifier newtype wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentKey(String);

impl AttachmentKey {
    /// Creates a new AttachmentKey
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_roundtrip() {
        let id = RecordId::new("7XK2MFQ9");
        assert_eq!(id.as_str(), "7XK2MFQ9");
        assert_eq!(id.to_string(), "7XK2MFQ9");
        assert_eq!(id.clone().into_inner(), "7XK2MFQ9");
    }

    #[test]
    fn test_record_id_blank() {
        assert!(RecordId::new("").is_blank());
        assert!(RecordId::new("   ").is_blank());
        assert!(!RecordId::new("42").is_blank());
    }

    #[test]
    fn test_record_id_path_safety() {
        assert!(RecordId::new("ABC123").is_path_safe());
        assert!(RecordId::new("1234").is_path_safe());
        assert!(!RecordId::new("").is_path_safe());
        assert!(!RecordId::new("..").is_path_safe());
        assert!(!RecordId::new(".").is_path_safe());
        assert!(!RecordId::new("a/b").is_path_safe());
        assert!(!RecordId::new("..\\evil").is_path_safe());
        assert!(!RecordId::new("tab\there").is_path_safe());
    }

    #[test]
    fn test_record_id_serde_transparent() {
        let id: RecordId = serde_json::from_str("\"K1\"").unwrap();
        assert_eq!(id, RecordId::new("K1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"K1\"");
    }

    #[test]
    fn test_attachment_key_display() {
        let key = AttachmentKey::new("ATT1");
        assert_eq!(key.to_string(), "ATT1");
        assert_eq!(key.as_str(), "ATT1");
    }
}
