//! Export coordinator - main orchestrator for the export process
//!
//! This module runs one export job end to end: resolve the collection, ask
//! for a destination, assemble the bag in a staging directory, process every
//! record, archive the bag and report.

use crate::adapters::{Archiver, DestinationChooser, SourceCatalog, TempStorage};
use crate::config::ExportConfig;
use crate::core::bag::{BagAssembler, BagLayout};
use crate::core::export::processor::{ItemProcessor, ItemReport};
use crate::core::export::summary::ExportSummary;
use crate::core::retry::RetryPolicy;
use crate::domain::{Collection, Result, VoyantError};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Bag directory inside the staging directory
const BAG_DIR: &str = "bag";

/// Per-record scratch space, kept out of the bag
const WORK_DIR: &str = "work";

/// Tuning knobs of the coordinator
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Records processed at once; at least 1
    pub concurrency: usize,

    /// Policy for per-record writes and for the archive step
    pub retry: RetryPolicy,
}

impl ExportSettings {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            retry: RetryPolicy::from_config(&config.retry),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

/// State of one export invocation; dropped when the job ends
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub id: Uuid,
    pub collection: String,
    pub output_path: PathBuf,
    pub temp_root: PathBuf,
    pub started_at: DateTime<Utc>,
}

/// How an export invocation ended without a fatal error
#[derive(Debug)]
pub enum ExportOutcome {
    /// The archive was written
    Completed(ExportSummary),

    /// The collection holds no records; nothing was written
    EmptyCollection { collection: String },

    /// The user declined to choose a destination; nothing was written
    Cancelled { collection: String },
}

/// Export coordinator
///
/// All outside access goes through the injected collaborators.
pub struct ExportCoordinator {
    catalog: Arc<dyn SourceCatalog>,
    destination: Arc<dyn DestinationChooser>,
    storage: Arc<dyn TempStorage>,
    archiver: Arc<dyn Archiver>,
    settings: ExportSettings,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(
        catalog: Arc<dyn SourceCatalog>,
        destination: Arc<dyn DestinationChooser>,
        storage: Arc<dyn TempStorage>,
        archiver: Arc<dyn Archiver>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            catalog,
            destination,
            storage,
            archiver,
            settings,
        }
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Resolves the active collection
    /// 2. Stops early if the collection is empty
    /// 3. Asks for the destination, stopping if the user cancels
    /// 4. Allocates a staging directory and assembles the bag skeleton
    /// 5. Processes every record; record failures are tallied, not raised
    /// 6. Archives the bag to the destination, with retry
    /// 7. Cleans up the staging directory and returns the summary
    ///
    /// # Errors
    ///
    /// Returns an error when the collection cannot be resolved, the staging
    /// directory or bag skeleton cannot be created, or archiving fails on
    /// every attempt. No archive is left at the destination in that case.
    pub async fn execute_export(&self) -> Result<ExportOutcome> {
        let collection = self.catalog.active_collection().await?;

        if collection.is_empty() {
            tracing::info!(collection = %collection.name, "Collection is empty, nothing to export");
            return Ok(ExportOutcome::EmptyCollection {
                collection: collection.name,
            });
        }

        let Some(output_path) = self
            .destination
            .choose(&collection.suggested_file_name())
            .await?
        else {
            return Ok(ExportOutcome::Cancelled {
                collection: collection.name,
            });
        };

        let staging = self.storage.allocate().await?;
        let job = ExportJob {
            id: Uuid::new_v4(),
            collection: collection.name.clone(),
            output_path,
            temp_root: staging.path().to_path_buf(),
            started_at: Utc::now(),
        };

        let span = tracing::info_span!("export_job", job_id = %job.id);
        let result = self.run_job(&job, &collection).instrument(span).await;

        staging.cleanup();
        result.map(ExportOutcome::Completed)
    }

    async fn run_job(&self, job: &ExportJob, collection: &Collection) -> Result<ExportSummary> {
        let start_time = Instant::now();
        crate::log_export_start!(job.id, job.collection, collection.len());

        let bag_root = job.temp_root.join(BAG_DIR);
        let work_root = job.temp_root.join(WORK_DIR);
        for dir in [&bag_root, &work_root] {
            tokio::fs::create_dir(dir).await.map_err(|e| {
                VoyantError::Bag(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        let layout = BagAssembler::new().assemble(&bag_root).await?;

        let mut summary =
            ExportSummary::new(job.id, &job.collection, &job.output_path, job.started_at);
        for report in self.process_records(&layout, &work_root, collection).await {
            summary.record(report);
        }

        self.archive(layout.root(), &job.output_path).await?;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Runs every record through the processor, reports in record order
    async fn process_records(
        &self,
        layout: &BagLayout,
        work_root: &Path,
        collection: &Collection,
    ) -> Vec<ItemReport> {
        let processor = ItemProcessor::new(
            Arc::clone(&self.catalog),
            layout.payload(),
            work_root,
            self.settings.retry.clone(),
        );
        let processor = &processor;

        stream::iter(collection.records.iter())
            .map(|record| processor.process(record))
            .buffered(self.settings.concurrency.max(1))
            .collect::<Vec<_>>()
            .await
    }

    async fn archive(&self, bag_root: &Path, destination: &Path) -> Result<()> {
        let archiver = &self.archiver;
        self.settings
            .retry
            .run("archive bag", move || archiver.archive(bag_root, destination))
            .await?;

        tracing::info!(output = %destination.display(), "Archive written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedDestination, StagingDir, SystemTempStorage, ZipArchiver};
    use crate::domain::{Attachment, AttachmentKey, Creator, Record, VoyantError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    struct FakeCatalog {
        collection: Option<Collection>,
        attachment: PathBuf,
    }

    #[async_trait]
    impl SourceCatalog for FakeCatalog {
        async fn active_collection(&self) -> Result<Collection> {
            self.collection
                .clone()
                .ok_or_else(|| VoyantError::Precondition("nothing selected".to_string()))
        }

        async fn best_attachment(&self, record: &Record) -> Result<Option<Attachment>> {
            Ok(Some(Attachment {
                key: AttachmentKey::new(record.id.as_str()),
                content_type: None,
            }))
        }

        async fn attachment_path(&self, _attachment: &Attachment) -> Result<Option<PathBuf>> {
            Ok(Some(self.attachment.clone()))
        }
    }

    struct Cancelling;

    #[async_trait]
    impl DestinationChooser for Cancelling {
        async fn choose(&self, _suggested_name: &Path) -> Result<Option<PathBuf>> {
            Ok(None)
        }
    }

    struct CountingStorage {
        base: PathBuf,
        calls: AtomicU32,
    }

    #[async_trait]
    impl TempStorage for CountingStorage {
        async fn allocate(&self) -> Result<StagingDir> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SystemTempStorage::in_dir(&self.base).allocate().await
        }
    }

    struct FailingArchiver;

    #[async_trait]
    impl Archiver for FailingArchiver {
        async fn archive(&self, _source: &Path, _destination: &Path) -> Result<()> {
            Err(VoyantError::Archive("disk full".to_string()))
        }
    }

    struct Env {
        dir: TempDir,
        attachment: PathBuf,
        storage: Arc<CountingStorage>,
    }

    fn env() -> Env {
        let dir = TempDir::new().unwrap();
        let attachment = dir.path().join("paper.pdf");
        std::fs::write(&attachment, b"pdf").unwrap();
        let staging_base = dir.path().join("staging");
        std::fs::create_dir(&staging_base).unwrap();
        Env {
            storage: Arc::new(CountingStorage {
                base: staging_base,
                calls: AtomicU32::new(0),
            }),
            dir,
            attachment,
        }
    }

    fn collection(ids: &[&str]) -> Collection {
        let records = ids
            .iter()
            .map(|id| {
                Record::builder(*id)
                    .title(format!("Title {id}"))
                    .creator(Creator::new(None::<String>, "Author", "author"))
                    .build()
            })
            .collect();
        Collection::new("Novels", records)
    }

    fn settings() -> ExportSettings {
        ExportSettings {
            concurrency: 2,
            retry: RetryPolicy::new(2, Duration::from_millis(1), 1.0),
        }
    }

    fn coordinator(
        env: &Env,
        collection: Option<Collection>,
        destination: Arc<dyn DestinationChooser>,
        archiver: Arc<dyn Archiver>,
    ) -> ExportCoordinator {
        ExportCoordinator::new(
            Arc::new(FakeCatalog {
                collection,
                attachment: env.attachment.clone(),
            }),
            destination,
            env.storage.clone(),
            archiver,
            settings(),
        )
    }

    #[tokio::test]
    async fn test_export_completes() {
        let env = env();
        let output = env.dir.path().join("novels.zip");
        let coordinator = coordinator(
            &env,
            Some(collection(&["A", "B", "C"])),
            Arc::new(FixedDestination::new(&output)),
            Arc::new(ZipArchiver::new()),
        );

        let outcome = coordinator.execute_export().await.unwrap();

        let summary = match outcome {
            ExportOutcome::Completed(summary) => summary,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(summary.saved, 3);
        assert_eq!(summary.collection, "Novels");
        assert!(output.is_file());

        let staging = env.dir.path().join("staging");
        assert_eq!(std::fs::read_dir(staging).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_no_selection_is_precondition_error() {
        let env = env();
        let coordinator = coordinator(
            &env,
            None,
            Arc::new(FixedDestination::new(env.dir.path().join("x.zip"))),
            Arc::new(ZipArchiver::new()),
        );

        let err = coordinator.execute_export().await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(env.storage.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_collection_stops_early() {
        let env = env();
        let coordinator = coordinator(
            &env,
            Some(collection(&[])),
            Arc::new(FixedDestination::new(env.dir.path().join("x.zip"))),
            Arc::new(ZipArchiver::new()),
        );

        let outcome = coordinator.execute_export().await.unwrap();
        assert!(matches!(outcome, ExportOutcome::EmptyCollection { .. }));
        assert_eq!(env.storage.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_writes_nothing() {
        let env = env();
        let coordinator = coordinator(
            &env,
            Some(collection(&["A"])),
            Arc::new(Cancelling),
            Arc::new(ZipArchiver::new()),
        );

        let outcome = coordinator.execute_export().await.unwrap();
        assert!(matches!(outcome, ExportOutcome::Cancelled { .. }));
        assert_eq!(env.storage.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_archive_failure_is_fatal_and_cleans_up() {
        let env = env();
        let output = env.dir.path().join("novels.zip");
        let coordinator = coordinator(
            &env,
            Some(collection(&["A"])),
            Arc::new(FixedDestination::new(&output)),
            Arc::new(FailingArchiver),
        );

        let err = coordinator.execute_export().await.unwrap_err();

        assert!(matches!(err, VoyantError::RetryExhausted { attempts: 2, .. }));
        assert!(!output.exists());
        let staging = env.dir.path().join("staging");
        assert_eq!(std::fs::read_dir(staging).unwrap().count(), 0);
    }
}
