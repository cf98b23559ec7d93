//! Domain models and types for Voyant Export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`RecordId`], [`AttachmentKey`])
//! - **Domain models** ([`Record`], [`Creator`], [`Attachment`], [`Collection`])
//! - **Error types** ([`VoyantError`], [`MetadataError`])
//! - **Result type alias** ([`Result`])
//! - **Error context** ([`context::ResultExt`])
//!
//! # Builder Pattern
//!
//! Records are assembled with a builder that keeps creators and tags in the
//! order they are added:
//!
//! ```rust
//! use voyant_export::domain::{Creator, Record};
//!
//! let record = Record::builder("ABC123")
//!     .title("Anne of Green Gables")
//!     .creator(Creator::new(Some("Lucy Maud"), "Montgomery", "author"))
//!     .date("1908")
//!     .item_type("book")
//!     .tag("fiction")
//!     .build();
//!
//! assert_eq!(record.creators.len(), 1);
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{MetadataError, VoyantError};
pub use ids::{AttachmentKey, RecordId};
pub use record::{Attachment, Collection, Creator, Record, RecordBuilder};
pub use result::Result;
