//! Bibliographic record domain model
//!
//! Records arrive from the source catalog and are read-only to the export
//! pipeline. Every optional field is an `Option`; absence is normal.

use super::ids::{AttachmentKey, RecordId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named contributor to a record
///
/// # Examples
///
/// ```
/// use voyant_export::domain::record::Creator;
///
/// let creator = Creator::new(Some("Lucy Maud"), "Montgomery", "author");
/// assert_eq!(creator.full_name(), "Lucy Maud Montgomery");
///
/// let org = Creator::new(None::<String>, "Parks Canada", "editor");
/// assert_eq!(org.full_name(), "Parks Canada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    /// Given name(s), absent for single-field creators
    pub given_name: Option<String>,

    /// Family name, required
    pub family_name: String,

    /// Role such as "author", "editor" or "translator"; may be empty
    pub role: String,
}

impl Creator {
    /// Creates a new creator
    pub fn new(
        given_name: Option<impl Into<String>>,
        family_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            given_name: given_name.map(Into::into),
            family_name: family_name.into(),
            role: role.into(),
        }
    }

    /// Display name: given name and family name separated by a space, or the
    /// family name alone
    pub fn full_name(&self) -> String {
        match self.given_name.as_deref().map(str::trim) {
            Some(given) if !given.is_empty() => format!("{} {}", given, self.family_name),
            _ => self.family_name.clone(),
        }
    }

    /// Whether the creator carries the required family name
    pub fn has_family_name(&self) -> bool {
        !self.family_name.trim().is_empty()
    }
}

/// One bibliographic entry from the source catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier, also the payload directory name
    pub id: RecordId,

    /// Title, possibly empty
    pub title: String,

    /// Creators in source order
    pub creators: Vec<Creator>,

    pub date: Option<String>,
    pub abstract_text: Option<String>,
    pub item_type: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub rights: Option<String>,

    /// Tags in source order, duplicates preserved
    pub tags: Vec<String>,
}

impl Record {
    /// Creates a new builder for constructing a Record
    pub fn builder(id: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(id)
    }
}

/// Builder for constructing Record instances
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Creates a builder for the record with the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            record: Record {
                id: RecordId::new(id),
                title: String::new(),
                creators: Vec::new(),
                date: None,
                abstract_text: None,
                item_type: None,
                publisher: None,
                language: None,
                rights: None,
                tags: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    /// Appends a creator, keeping insertion order
    pub fn creator(mut self, creator: Creator) -> Self {
        self.record.creators.push(creator);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.record.date = Some(date.into());
        self
    }

    pub fn abstract_text(mut self, text: impl Into<String>) -> Self {
        self.record.abstract_text = Some(text.into());
        self
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.record.item_type = Some(item_type.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.record.publisher = Some(publisher.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.record.language = Some(language.into());
        self
    }

    pub fn rights(mut self, rights: impl Into<String>) -> Self {
        self.record.rights = Some(rights.into());
        self
    }

    /// Appends a tag, keeping insertion order
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.record.tags.push(tag.into());
        self
    }

    /// Builds the Record
    pub fn build(self) -> Record {
        self.record
    }
}

/// A file attached to a record in the source catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Catalog key of the attachment
    pub key: AttachmentKey,

    /// MIME type reported by the catalog
    pub content_type: Option<String>,
}

/// The user's active selection: a named, ordered list of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    pub records: Vec<Record>,
}

impl Collection {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Suggested archive file name derived from the collection name
    pub fn suggested_file_name(&self) -> PathBuf {
        let stem: String = self
            .name
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = stem.trim();
        if stem.is_empty() {
            PathBuf::from("voyant-export.zip")
        } else {
            PathBuf::from(format!("{stem}.zip"))
        }
    }
}
