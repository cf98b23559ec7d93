// Voyant Export - bibliographic collections to BagIt archives
// Copyright (c) 2025 Voyant Export Contributors
// Licensed under the MIT License

//! # Voyant Export
//!
//! Packages a collection of bibliographic records into a BagIt archive that a
//! text-analysis tool can ingest.
//!
//! ## Overview
//!
//! For every record that has a local attachment, the archive holds:
//!
//! ```text
//! bagit.txt
//! data/<record-id>/MODS.bin   MODS v3 description
//! data/<record-id>/DC.xml     OAI Dublin Core description
//! data/<record-id>/CWRC.bin   copy of the attachment
//! ```
//!
//! Records without a usable attachment are skipped. A record that fails is
//! reported and left out; it never stops the rest of the export.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Metadata generation, retry, bag assembly, export orchestration
//! - [`adapters`] - Catalog, destination, staging and archive implementations
//! - [`domain`] - Records, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voyant_export::adapters::{FixedDestination, JsonCatalog, SystemTempStorage, ZipArchiver};
//! use voyant_export::config::load_config;
//! use voyant_export::core::export::{ExportCoordinator, ExportOutcome, ExportSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("voyant.toml")?;
//!     let catalog = JsonCatalog::from_file(
//!         &config.catalog.library_path,
//!         config.catalog.collection.as_deref(),
//!     )
//!     .await?;
//!
//!     let coordinator = ExportCoordinator::new(
//!         Arc::new(catalog),
//!         Arc::new(FixedDestination::new("export.zip")),
//!         Arc::new(SystemTempStorage::new()),
//!         Arc::new(ZipArchiver::new()),
//!         ExportSettings::from_config(&config.export),
//!     );
//!
//!     if let ExportOutcome::Completed(summary) = coordinator.execute_export().await? {
//!         println!("Exported {} records", summary.saved);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Metadata
//!
//! Documents are built as element trees and serialized with every text and
//! attribute value escaped:
//!
//! ```rust
//! use voyant_export::core::metadata::generate_simple;
//! use voyant_export::domain::Record;
//!
//! let record = Record::builder("ABC123")
//!     .title("Test <script>alert(1)</script>")
//!     .build();
//! let xml = generate_simple(&record)?.to_xml();
//!
//! assert!(!xml.contains("<script>"));
//! assert!(xml.contains("<dc:type>Text</dc:type>"));
//! # Ok::<(), voyant_export::domain::MetadataError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::VoyantError`]; the binary maps it to exit
//! codes with `anyhow` at the top.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
