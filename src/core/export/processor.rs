//! Per-record processing
//!
//! Each record ends in exactly one of three states. Missing content is an
//! expected outcome and only skips the record; anything that goes wrong
//! while writing fails that record alone. Errors never escape
//! [`ItemProcessor::process`].

use crate::adapters::SourceCatalog;
use crate::core::bag::{CONTENT_FILE, DC_FILE, MODS_FILE};
use crate::core::metadata::generate_all;
use crate::core::retry::RetryPolicy;
use crate::domain::{Record, RecordId, Result, VoyantError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Why a record was left out of the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The catalog has no attachment for the record
    NoAttachment,
    /// The attachment is not stored locally
    NoLocalPath,
    /// The attachment path is missing, not a file, or cannot be opened
    Unreadable { path: PathBuf, reason: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoAttachment => write!(f, "no attachment"),
            SkipReason::NoLocalPath => write!(f, "attachment has no local file"),
            SkipReason::Unreadable { path, reason } => {
                write!(f, "attachment {} is unreadable: {}", path.display(), reason)
            }
        }
    }
}

/// Terminal state of one record
#[derive(Debug)]
pub enum ItemOutcome {
    Saved,
    Skipped(SkipReason),
    Failed(VoyantError),
}

impl ItemOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ItemOutcome::Saved)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ItemOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ItemOutcome::Failed(_))
    }
}

/// Outcome of one record, tagged with its id
#[derive(Debug)]
pub struct ItemReport {
    pub record_id: RecordId,
    pub outcome: ItemOutcome,
}

/// Exports one record into the bag payload
///
/// Steps, in order:
/// 1. Look up the best attachment and its local path
/// 2. Check the file can be read
/// 3. Generate both metadata documents
/// 4. Create `data/<id>/`, write `MODS.bin` and `DC.xml`, copy the
///    attachment to `CWRC.bin`
///
/// Step 4 runs under the retry policy as a whole. Each attempt fills a
/// fresh directory under the work root and renames it to `data/<id>/` once
/// complete, so the payload only ever holds complete records. The work root
/// must sit outside the bag, on the same filesystem.
pub struct ItemProcessor {
    catalog: Arc<dyn SourceCatalog>,
    payload_root: PathBuf,
    work_root: PathBuf,
    retry: RetryPolicy,
}

impl ItemProcessor {
    pub fn new(
        catalog: Arc<dyn SourceCatalog>,
        payload_root: impl Into<PathBuf>,
        work_root: impl Into<PathBuf>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            catalog,
            payload_root: payload_root.into(),
            work_root: work_root.into(),
            retry,
        }
    }

    pub fn payload_root(&self) -> &Path {
        &self.payload_root
    }

    /// Processes one record; never fails
    pub async fn process(&self, record: &Record) -> ItemReport {
        let outcome = match self.try_process(record).await {
            Ok(outcome) => outcome,
            Err(error) => ItemOutcome::Failed(error),
        };

        match &outcome {
            ItemOutcome::Saved => {
                crate::log_item_outcome!(record.id, "saved");
            }
            ItemOutcome::Skipped(reason) => {
                crate::log_item_outcome!(record.id, "skipped", reason);
            }
            ItemOutcome::Failed(error) => {
                crate::log_item_outcome!(record.id, "failed", error);
            }
        }

        ItemReport {
            record_id: record.id.clone(),
            outcome,
        }
    }

    async fn try_process(&self, record: &Record) -> Result<ItemOutcome> {
        let Some(attachment) = self.catalog.best_attachment(record).await? else {
            return Ok(ItemOutcome::Skipped(SkipReason::NoAttachment));
        };

        let Some(source) = self.catalog.attachment_path(&attachment).await? else {
            return Ok(ItemOutcome::Skipped(SkipReason::NoLocalPath));
        };

        if let Err(reason) = check_readable(&source).await {
            return Ok(ItemOutcome::Skipped(SkipReason::Unreadable {
                path: source,
                reason,
            }));
        }

        if !record.id.is_path_safe() {
            return Err(VoyantError::Validation(format!(
                "record id {:?} cannot be used as a directory name",
                record.id.as_str()
            )));
        }

        let metadata = generate_all(record)?;
        let mods = metadata.mods.to_bytes();
        let dublin_core = metadata.dublin_core.to_bytes();

        let record_dir = self.payload_root.join(record.id.as_str());
        let files = RecordFiles {
            dir: &record_dir,
            work_root: &self.work_root,
            mods: &mods,
            dublin_core: &dublin_core,
            source: &source,
        };

        let operation = format!("write record {}", record.id);
        match self
            .retry
            .run_if(&operation, move || files.write(), VoyantError::is_retryable)
            .await
        {
            Ok(()) => Ok(ItemOutcome::Saved),
            Err(exhausted) if !exhausted.last_error.is_retryable() => Err(exhausted.last_error),
            Err(exhausted) => Err(exhausted.into()),
        }
    }
}

/// Fails with a reason when `path` is not a readable regular file
async fn check_readable(path: &Path) -> std::result::Result<(), String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| e.to_string())?;
    if !metadata.is_file() {
        return Err("not a regular file".to_string());
    }
    tokio::fs::File::open(path)
        .await
        .map(drop)
        .map_err(|e| e.to_string())
}

#[derive(Clone, Copy)]
struct RecordFiles<'a> {
    dir: &'a Path,
    work_root: &'a Path,
    mods: &'a [u8],
    dublin_core: &'a [u8],
    source: &'a Path,
}

impl RecordFiles<'_> {
    /// One write attempt
    async fn write(self) -> Result<()> {
        if tokio::fs::try_exists(self.dir).await? {
            return Err(self.duplicate());
        }

        let partial = tempfile::Builder::new()
            .prefix(".record-")
            .tempdir_in(self.work_root)
            .map_err(|e| {
                VoyantError::Bag(format!(
                    "Failed to create work directory in {}: {}",
                    self.work_root.display(),
                    e
                ))
            })?;

        if let Err(error) = self.write_contents(partial.path()).await {
            let path = partial.path().to_path_buf();
            if let Err(e) = partial.close() {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove incomplete record directory"
                );
            }
            return Err(error);
        }

        // On success the guard points at a path that no longer exists
        tokio::fs::rename(partial.path(), self.dir)
            .await
            .map_err(|e| {
                if self.dir.exists() {
                    self.duplicate()
                } else {
                    VoyantError::Bag(format!(
                        "Failed to move record into {}: {}",
                        self.dir.display(),
                        e
                    ))
                }
            })
    }

    fn duplicate(&self) -> VoyantError {
        VoyantError::Validation(format!(
            "duplicate record id: {} already exists",
            self.dir.display()
        ))
    }

    async fn write_contents(&self, dir: &Path) -> Result<()> {
        write_file(&dir.join(MODS_FILE), self.mods).await?;
        write_file(&dir.join(DC_FILE), self.dublin_core).await?;

        let target = dir.join(CONTENT_FILE);
        tokio::fs::copy(self.source, &target).await.map_err(|e| {
            VoyantError::Io(format!(
                "Failed to copy {} to {}: {}",
                self.source.display(),
                target.display(),
                e
            ))
        })?;
        Ok(())
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| VoyantError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
