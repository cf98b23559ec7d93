//! Inspect command implementation
//!
//! Prints the metadata documents generated for one record without writing
//! anything to disk.

use super::{apply_catalog_overrides, load_or_report, open_catalog};
use crate::adapters::SourceCatalog;
use crate::cli::{EXIT_CONFIG, EXIT_PRECONDITION};
use crate::core::metadata::{generate_rich, generate_simple, MetadataDocument};
use crate::domain::{MetadataError, Record};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Which documents to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaChoice {
    /// MODS only
    Mods,
    /// Dublin Core only
    Dc,
    /// Both documents
    Both,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Record identifier
    #[arg(short, long)]
    pub record: String,

    /// Documents to print
    #[arg(short, long, value_enum, default_value_t = SchemaChoice::Both)]
    pub schema: SchemaChoice,

    /// Override the library file
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Override the collection to search
    #[arg(long)]
    pub collection: Option<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(record = %self.record, "Inspecting record metadata");

        let Some(mut config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };
        apply_catalog_overrides(
            &mut config,
            self.library.as_ref(),
            self.collection.as_ref(),
        );

        let collection = match open_catalog(&config).await {
            Ok(catalog) => catalog.active_collection().await,
            Err(e) => Err(e),
        };
        let collection = match collection {
            Ok(collection) => collection,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_PRECONDITION);
            }
        };

        let Some(record) = collection
            .records
            .iter()
            .find(|r| r.id.as_str() == self.record)
        else {
            eprintln!(
                "❌ Record '{}' not found in collection '{}'",
                self.record, collection.name
            );
            return Ok(EXIT_PRECONDITION);
        };

        match render(record, self.schema) {
            Ok(output) => {
                print!("{output}");
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Record '{}' cannot be exported: {e}", self.record);
                Ok(1)
            }
        }
    }
}

/// Serialized documents for `record`, separated by a blank line
pub fn render(record: &Record, schema: SchemaChoice) -> Result<String, MetadataError> {
    let documents: Vec<MetadataDocument> = match schema {
        SchemaChoice::Mods => vec![generate_rich(record)?],
        SchemaChoice::Dc => vec![generate_simple(record)?],
        SchemaChoice::Both => vec![generate_rich(record)?, generate_simple(record)?],
    };

    Ok(documents
        .iter()
        .map(MetadataDocument::to_xml)
        .collect::<Vec<_>>()
        .join("\n"))
}
