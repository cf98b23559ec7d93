//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod inspect;
pub mod validate;

use crate::adapters::JsonCatalog;
use crate::config::{load_config_or_default, VoyantConfig};
use std::path::PathBuf;

/// Loads the configuration, falling back to defaults when the file is absent
///
/// Errors are printed; the caller exits with the configuration exit code.
pub(crate) fn load_or_report(config_path: &str) -> Option<VoyantConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ {e}");
            None
        }
    }
}

/// Applies `--library` and `--collection` overrides
pub(crate) fn apply_catalog_overrides(
    config: &mut VoyantConfig,
    library: Option<&PathBuf>,
    collection: Option<&String>,
) {
    if let Some(library) = library {
        tracing::info!(library = %library.display(), "Overriding library path from CLI");
        config.catalog.library_path = library.clone();
    }
    if let Some(collection) = collection {
        tracing::info!(collection = %collection, "Overriding collection from CLI");
        config.catalog.collection = Some(collection.clone());
    }
}

/// Opens the configured library
pub(crate) async fn open_catalog(config: &VoyantConfig) -> crate::domain::Result<JsonCatalog> {
    JsonCatalog::from_file(
        &config.catalog.library_path,
        config.catalog.collection.as_deref(),
    )
    .await
}
