//! Catalog backed by a JSON library export

use crate::adapters::traits::SourceCatalog;
use crate::domain::context::ResultExt;
use crate::domain::{
    Attachment, AttachmentKey, Collection, Creator, Record, RecordId, Result, VoyantError,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const PDF_CONTENT_TYPE: &str = "application/pdf";
const DEFAULT_CREATOR_ROLE: &str = "author";

#[derive(Debug, Deserialize)]
struct RawLibrary {
    #[serde(default)]
    collections: Vec<RawCollection>,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    name: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default, alias = "libraryKey")]
    key: Option<String>,
    item_type: Option<String>,
    title: Option<String>,
    #[serde(default)]
    creators: Vec<RawCreator>,
    date: Option<String>,
    abstract_note: Option<String>,
    publisher: Option<String>,
    language: Option<String>,
    rights: Option<String>,
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(default)]
    attachments: Vec<RawAttachment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCreator {
    first_name: Option<String>,
    last_name: Option<String>,
    name: Option<String>,
    creator_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTag {
    Plain(String),
    Object { tag: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttachment {
    key: String,
    content_type: Option<String>,
    path: Option<String>,
}

/// Blank strings are absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<RawCreator> for Creator {
    fn from(raw: RawCreator) -> Self {
        let family_name = present(raw.last_name)
            .or_else(|| present(raw.name))
            .unwrap_or_default();
        let role = present(raw.creator_type).unwrap_or_else(|| DEFAULT_CREATOR_ROLE.to_string());
        Creator::new(present(raw.first_name), family_name, role)
    }
}

impl From<RawTag> for String {
    fn from(tag: RawTag) -> Self {
        match tag {
            RawTag::Plain(tag) | RawTag::Object { tag } => tag,
        }
    }
}

/// Source catalog read from a JSON library export
///
/// Records are looked up by id. When a collection holds two records with
/// the same id, attachments of the first one win.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    collections: Vec<Collection>,
    selected: Option<String>,
    attachments: HashMap<RecordId, Vec<Attachment>>,
    paths: HashMap<AttachmentKey, Option<PathBuf>>,
}

impl JsonCatalog {
    /// Loads a library file
    ///
    /// Relative attachment paths resolve against the file's directory.
    /// `selected` names the collection to export.
    pub async fn from_file(path: impl AsRef<Path>, selected: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read library file {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&json, base_dir, selected)
            .with_context(|| format!("Invalid library file {}", path.display()))
    }

    /// Parses a library export held in memory
    pub fn from_json_str(json: &str, base_dir: &Path, selected: Option<&str>) -> Result<Self> {
        let raw: RawLibrary = serde_json::from_str(json)
            .map_err(|e| VoyantError::Catalog(format!("Malformed library JSON: {e}")))?;

        let mut collections = Vec::with_capacity(raw.collections.len());
        let mut attachments: HashMap<RecordId, Vec<Attachment>> = HashMap::new();
        let mut paths = HashMap::new();

        for raw_collection in raw.collections {
            let mut records = Vec::with_capacity(raw_collection.items.len());

            for item in raw_collection.items {
                let id = RecordId::new(item.key.unwrap_or_default().trim());

                let mut record_attachments = Vec::with_capacity(item.attachments.len());
                for raw_attachment in item.attachments {
                    let key = AttachmentKey::new(raw_attachment.key);
                    let path = present(raw_attachment.path).map(|p| base_dir.join(p));
                    paths.entry(key.clone()).or_insert(path);
                    record_attachments.push(Attachment {
                        key,
                        content_type: present(raw_attachment.content_type),
                    });
                }
                attachments.entry(id.clone()).or_insert(record_attachments);

                records.push(Record {
                    id,
                    title: item.title.unwrap_or_default().trim().to_string(),
                    creators: item.creators.into_iter().map(Creator::from).collect(),
                    date: present(item.date),
                    abstract_text: present(item.abstract_note),
                    item_type: present(item.item_type),
                    publisher: present(item.publisher),
                    language: present(item.language),
                    rights: present(item.rights),
                    tags: item
                        .tags
                        .into_iter()
                        .map(String::from)
                        .filter(|t| !t.trim().is_empty())
                        .collect(),
                });
            }

            collections.push(Collection::new(raw_collection.name, records));
        }

        tracing::debug!(
            collections = collections.len(),
            attachments = paths.len(),
            "Library loaded"
        );

        Ok(Self {
            collections,
            selected: selected.map(str::to_string),
            attachments,
            paths,
        })
    }

    /// Names of all collections, in file order
    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }

    fn select(&self) -> Result<&Collection> {
        match self.selected.as_deref() {
            Some(name) => self
                .collections
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| {
                    VoyantError::Precondition(format!("Collection '{name}' not found in library"))
                }),
            None => match self.collections.as_slice() {
                [only] => Ok(only),
                [] => Err(VoyantError::Precondition(
                    "Library contains no collections".to_string(),
                )),
                _ => Err(VoyantError::Precondition(format!(
                    "No collection selected; choose one of: {}",
                    self.collection_names().join(", ")
                ))),
            },
        }
    }
}

#[async_trait]
impl SourceCatalog for JsonCatalog {
    async fn active_collection(&self) -> Result<Collection> {
        self.select().cloned()
    }

    async fn best_attachment(&self, record: &Record) -> Result<Option<Attachment>> {
        let Some(candidates) = self.attachments.get(&record.id) else {
            return Ok(None);
        };

        let is_pdf = |a: &&Attachment| {
            a.content_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        };
        let has_path = |a: &&Attachment| matches!(self.paths.get(&a.key), Some(Some(_)));

        let best = candidates
            .iter()
            .find(is_pdf)
            .or_else(|| candidates.iter().find(has_path))
            .or_else(|| candidates.first());

        Ok(best.cloned())
    }

    async fn attachment_path(&self, attachment: &Attachment) -> Result<Option<PathBuf>> {
        Ok(self.paths.get(&attachment.key).cloned().flatten())
    }
}
