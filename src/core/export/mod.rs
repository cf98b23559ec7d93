//! Export orchestration and per-record processing
//!
//! This module provides the core export logic for Voyant Export:
//! - [`processor`] - One record into one payload directory
//! - [`coordinator`] - The whole job, from collection to archive
//! - [`summary`] - Tallies and reporting

pub mod coordinator;
pub mod processor;
pub mod summary;

pub use coordinator::{ExportCoordinator, ExportJob, ExportOutcome, ExportSettings};
pub use processor::{ItemOutcome, ItemProcessor, ItemReport, SkipReason};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
