//! Metadata document generation
//!
//! Two documents are produced for every exported record:
//!
//! - [`generate_rich`] builds a MODS v3 document (written as `MODS.bin`)
//! - [`generate_simple`] builds an OAI Dublin Core document (written as `DC.xml`)
//!
//! Both functions are pure: the same record always yields byte-identical
//! output, and the only failure mode is a structurally invalid record.
//! All record text is escaped by the serializer ([`escape`]).
//!
//! # Example
//!
//! ```rust
//! use voyant_export::core::metadata::{generate_rich, generate_simple};
//! use voyant_export::domain::Record;
//!
//! let record = Record::builder("ABC123").title("Test <b>Book</b>").build();
//!
//! let mods = generate_rich(&record).unwrap().to_xml();
//! let dc = generate_simple(&record).unwrap().to_xml();
//!
//! assert!(mods.contains("Test &lt;b&gt;Book&lt;/b&gt;"));
//! assert!(dc.contains("<dc:type>Text</dc:type>"));
//! ```

pub mod document;
pub mod dublin_core;
pub mod escape;
pub mod mods;

pub use document::{Element, MetadataDocument, Node, Schema};
pub use dublin_core::{generate_simple, DcType};
pub use escape::{escape, unescape};
pub use mods::generate_rich;

use crate::domain::{MetadataError, Record};

/// Both metadata documents for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    pub mods: MetadataDocument,
    pub dublin_core: MetadataDocument,
}

/// Generates the rich and the simple document for a record
pub fn generate_all(record: &Record) -> Result<RecordMetadata, MetadataError> {
    Ok(RecordMetadata {
        mods: generate_rich(record)?,
        dublin_core: generate_simple(record)?,
    })
}

/// Every creator must carry a family name
pub(crate) fn validate_creators(record: &Record) -> Result<(), MetadataError> {
    match record
        .creators
        .iter()
        .position(|creator| !creator.has_family_name())
    {
        Some(index) => Err(MetadataError::MissingFamilyName { index }),
        None => Ok(()),
    }
}

/// Trimmed value of an optional field, `None` when absent or blank
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
