//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::export::processor::{ItemOutcome, ItemReport, SkipReason};
use crate::domain::{RecordId, VoyantError};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Summary of one completed export job
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Job identifier, also carried by every log line of the job
    pub job_id: Uuid,

    /// Name of the exported collection
    pub collection: String,

    /// Where the archive was written
    pub output_path: PathBuf,

    /// When the job started
    pub started_at: DateTime<Utc>,

    /// Number of records in the collection
    pub total_records: usize,

    /// Records written to the payload
    pub saved: usize,

    /// Records left out because they had no usable attachment
    pub skipped: usize,

    /// Records that failed
    pub failed: usize,

    /// Duration of the export
    pub duration: Duration,

    /// Why each skipped record was left out, in record order
    pub skips: Vec<(RecordId, SkipReason)>,

    /// Per-record failures, in record order
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create an empty summary for a job
    pub fn new(
        job_id: Uuid,
        collection: impl Into<String>,
        output_path: impl Into<PathBuf>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            job_id,
            collection: collection.into(),
            output_path: output_path.into(),
            started_at,
            total_records: 0,
            saved: 0,
            skipped: 0,
            failed: 0,
            duration: Duration::from_secs(0),
            skips: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Tally one record outcome
    pub fn record(&mut self, report: ItemReport) {
        self.total_records += 1;
        match report.outcome {
            ItemOutcome::Saved => self.saved += 1,
            ItemOutcome::Skipped(reason) => {
                self.skipped += 1;
                self.skips.push((report.record_id, reason));
            }
            ItemOutcome::Failed(error) => {
                self.failed += 1;
                self.errors.push(
                    ExportError::from_voyant_error(&error).with_context(report.record_id.as_str()),
                );
            }
        }
    }

    /// Check if every record was either saved or skipped
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Saved records as a percentage of the records that had content
    pub fn success_rate(&self) -> f64 {
        let attempted = self.saved + self.failed;
        if attempted == 0 {
            return 100.0;
        }
        (self.saved as f64 / attempted as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_export_complete!(self.saved, self.skipped, self.failed, self.duration);
        tracing::info!(
            job_id = %self.job_id,
            collection = %self.collection,
            output = %self.output_path.display(),
            total_records = self.total_records,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with failed records"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    record_id = error.context.as_deref().unwrap_or(""),
                    message = %error.message,
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Malformed record data
    Validation,
    /// Catalog lookup error
    Catalog,
    /// File system error, possibly after retries
    Storage,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Record identifier the error belongs to
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Classify a pipeline error
    pub fn from_voyant_error(error: &VoyantError) -> Self {
        let error_type = match error {
            VoyantError::Validation(_) | VoyantError::Metadata(_) => ExportErrorType::Validation,
            VoyantError::Catalog(_) => ExportErrorType::Catalog,
            VoyantError::Bag(_)
            | VoyantError::Io(_)
            | VoyantError::Archive(_)
            | VoyantError::RetryExhausted { .. } => ExportErrorType::Storage,
            _ => ExportErrorType::Unknown,
        };
        Self::new(error_type, error.to_string())
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetadataError;

    fn summary() -> ExportSummary {
        ExportSummary::new(Uuid::new_v4(), "Novels", "/out/novels.zip", Utc::now())
    }

    fn report(id: &str, outcome: ItemOutcome) -> ItemReport {
        ItemReport {
            record_id: RecordId::new(id),
            outcome,
        }
    }

    #[test]
    fn test_record_tallies_outcomes() {
        let mut summary = summary();
        summary.record(report("A", ItemOutcome::Saved));
        summary.record(report("B", ItemOutcome::Skipped(SkipReason::NoLocalPath)));
        summary.record(report(
            "C",
            ItemOutcome::Failed(MetadataError::MissingFamilyName { index: 0 }.into()),
        ));

        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.skips[0].0.as_str(), "B");

        let error = &summary.errors[0];
        assert_eq!(error.error_type, ExportErrorType::Validation);
        assert_eq!(error.context.as_deref(), Some("C"));
    }

    #[test]
    fn test_success_rate_ignores_skips() {
        let mut summary = summary();
        assert_eq!(summary.success_rate(), 100.0);

        summary.record(report("A", ItemOutcome::Saved));
        summary.record(report("B", ItemOutcome::Skipped(SkipReason::NoAttachment)));
        assert_eq!(summary.success_rate(), 100.0);

        summary.record(report(
            "C",
            ItemOutcome::Failed(VoyantError::Io("denied".to_string())),
        ));
        assert_eq!(summary.success_rate(), 50.0);
    }

    #[test]
    fn test_error_classification() {
        let storage = ExportError::from_voyant_error(&VoyantError::RetryExhausted {
            attempts: 3,
            source: Box::new(VoyantError::Io("disk full".to_string())),
        });
        assert_eq!(storage.error_type, ExportErrorType::Storage);

        let catalog = ExportError::from_voyant_error(&VoyantError::Catalog("gone".to_string()));
        assert_eq!(catalog.error_type, ExportErrorType::Catalog);
    }

    #[test]
    fn test_with_duration() {
        let summary = summary().with_duration(Duration::from_secs(3));
        assert_eq!(summary.duration, Duration::from_secs(3));
    }
}
