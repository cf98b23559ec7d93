//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Console output on stderr
//! - JSON log files with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use voyant_export::config::LoggingConfig;
//! use voyant_export::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config)?;
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! # Ok::<(), voyant_export::domain::VoyantError>(())
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export job
///
/// # Example
///
/// ```no_run
/// use voyant_export::log_export_start;
///
/// let job_id = uuid::Uuid::new_v4();
/// log_export_start!(job_id, "Novels", 12);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($job_id:expr, $collection:expr, $records:expr) => {
        tracing::info!(
            job_id = %$job_id,
            collection = %$collection,
            records = $records,
            "Starting export"
        )
    };
}

/// Log the completion of an export job
///
/// # Example
///
/// ```no_run
/// use voyant_export::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(10, 1, 1, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($saved:expr, $skipped:expr, $failed:expr, $duration:expr) => {
        tracing::info!(
            saved = $saved,
            skipped = $skipped,
            failed = $failed,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        )
    };
}

/// Log the outcome of one record
///
/// # Example
///
/// ```no_run
/// use voyant_export::log_item_outcome;
///
/// log_item_outcome!("ABC123", "skipped", "no attachment");
/// ```
#[macro_export]
macro_rules! log_item_outcome {
    ($record_id:expr, "saved") => {
        tracing::debug!(record_id = %$record_id, outcome = "saved", "Record exported")
    };
    ($record_id:expr, "skipped", $reason:expr) => {
        tracing::info!(
            record_id = %$record_id,
            outcome = "skipped",
            reason = %$reason,
            "Record skipped"
        )
    };
    ($record_id:expr, "failed", $error:expr) => {
        tracing::warn!(
            record_id = %$record_id,
            outcome = "failed",
            error = %$error,
            "Record failed"
        )
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use voyant_export::log_retry_attempt;
///
/// log_retry_attempt!("write record ABC123", 1, 3, 1000u64, "disk full");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($operation:expr, $attempt:expr, $max_attempts:expr, $delay_ms:expr, $error:expr) => {
        tracing::warn!(
            operation = $operation,
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            error = %$error,
            "Retrying operation"
        )
    };
}
