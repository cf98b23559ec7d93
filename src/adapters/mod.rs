//! Integrations with the outside world.
//!
//! The export pipeline talks to its surroundings only through the traits in
//! [`traits`]. This module provides the production implementations:
//!
//! - [`catalog`] - Source catalogs ([`JsonCatalog`])
//! - [`destination`] - Output path choosers ([`FixedDestination`], [`PromptDestination`])
//! - [`storage`] - Staging directories ([`SystemTempStorage`])
//! - [`archive`] - Archive writers ([`ZipArchiver`])
//!
//! Tests substitute their own implementations of the traits.
//!
//! # Example
//!
//! ```rust,no_run
//! use voyant_export::adapters::{
//!     FixedDestination, JsonCatalog, SourceCatalog, SystemTempStorage, ZipArchiver,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = JsonCatalog::from_file("library.json", Some("Novels")).await?;
//! let collection = catalog.active_collection().await?;
//! println!("{} records in {}", collection.len(), collection.name);
//!
//! let _destination = FixedDestination::new("novels.zip");
//! let _storage = SystemTempStorage::new();
//! let _archiver = ZipArchiver::new();
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod catalog;
pub mod destination;
pub mod storage;
pub mod traits;

pub use archive::ZipArchiver;
pub use catalog::JsonCatalog;
pub use destination::{FixedDestination, PromptDestination};
pub use storage::{StagingDir, SystemTempStorage};
pub use traits::{Archiver, DestinationChooser, SourceCatalog, TempStorage};
