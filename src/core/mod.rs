//! Core business logic for Voyant Export.
//!
//! # Modules
//!
//! - [`metadata`] - MODS and Dublin Core document generation
//! - [`retry`] - Bounded retry with exponential backoff
//! - [`bag`] - BagIt skeleton assembly
//! - [`export`] - Per-record processing and job orchestration
//!
//! # Export Workflow
//!
//! 1. **Select**: Resolve the active collection from the catalog
//! 2. **Destination**: Ask where the archive goes
//! 3. **Assemble**: Write `bagit.txt` and `data/` into a staging directory
//! 4. **Process**: For each record, write `MODS.bin`, `DC.xml` and `CWRC.bin`
//! 5. **Archive**: Zip the bag to the destination
//! 6. **Report**: Return saved, skipped and failed counts
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voyant_export::adapters::{FixedDestination, JsonCatalog, SystemTempStorage, ZipArchiver};
//! use voyant_export::core::export::{ExportCoordinator, ExportOutcome, ExportSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = JsonCatalog::from_file("library.json", Some("Novels")).await?;
//!
//! let coordinator = ExportCoordinator::new(
//!     Arc::new(catalog),
//!     Arc::new(FixedDestination::new("novels.zip")),
//!     Arc::new(SystemTempStorage::new()),
//!     Arc::new(ZipArchiver::new()),
//!     ExportSettings::default(),
//! );
//!
//! if let ExportOutcome::Completed(summary) = coordinator.execute_export().await? {
//!     println!("Saved: {}", summary.saved);
//!     println!("Skipped: {}", summary.skipped);
//!     println!("Failed: {}", summary.failed);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bag;
pub mod export;
pub mod metadata;
pub mod retry;
