//! Export command implementation
//!
//! This module implements the `export` command, which packages the selected
//! collection into a BagIt archive.

use super::{apply_catalog_overrides, load_or_report, open_catalog};
use crate::adapters::{
    DestinationChooser, FixedDestination, PromptDestination, SystemTempStorage, ZipArchiver,
};
use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_PARTIAL, EXIT_PRECONDITION};
use crate::core::export::{ExportCoordinator, ExportOutcome, ExportSettings, ExportSummary};
use crate::domain::VoyantError;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the library file
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Override the collection to export
    #[arg(long)]
    pub collection: Option<String>,

    /// Archive path; prompts when neither this nor export.output is set
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the number of records processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let Some(mut config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };

        // Apply CLI overrides
        apply_catalog_overrides(
            &mut config,
            self.library.as_ref(),
            self.collection.as_ref(),
        );
        if let Some(output) = &self.output {
            tracing::info!(output = %output.display(), "Overriding output from CLI");
            config.export.output = Some(output.clone());
        }
        if let Some(concurrency) = self.concurrency {
            tracing::info!(concurrency, "Overriding concurrency from CLI");
            config.export.concurrency = concurrency;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let catalog = match open_catalog(&config).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open library");
                eprintln!("❌ Failed to open library: {e}");
                return Ok(EXIT_PRECONDITION);
            }
        };

        let destination: Arc<dyn DestinationChooser> = match &config.export.output {
            Some(output) => {
                if !self.yes && !confirm(&config.catalog.library_path, output)? {
                    println!("Export cancelled.");
                    return Ok(0);
                }
                Arc::new(FixedDestination::new(output))
            }
            None => Arc::new(PromptDestination::new(std::env::current_dir()?)),
        };

        let storage = match &config.export.temp_dir {
            Some(dir) => SystemTempStorage::in_dir(dir),
            None => SystemTempStorage::new(),
        };

        let coordinator = ExportCoordinator::new(
            Arc::new(catalog),
            destination,
            Arc::new(storage),
            Arc::new(ZipArchiver::new()),
            ExportSettings::from_config(&config.export),
        );

        let outcome = match coordinator.execute_export().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                return Ok(error_exit_code(&e));
            }
        };

        let exit_code = match outcome {
            ExportOutcome::Completed(summary) => {
                print_summary(&summary);
                summary_exit_code(&summary)
            }
            ExportOutcome::EmptyCollection { collection } => {
                println!("Collection '{collection}' has no records; nothing to export.");
                0
            }
            ExportOutcome::Cancelled { .. } => {
                println!("Export cancelled.");
                0
            }
        };

        Ok(exit_code)
    }
}

fn confirm(library: &std::path::Path, output: &std::path::Path) -> io::Result<bool> {
    println!("Export Configuration:");
    println!("  Library: {}", library.display());
    println!("  Output: {}", output.display());
    println!();
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Collection: {}", summary.collection);
    println!("  Archive: {}", summary.output_path.display());
    println!("  Records: {}", summary.total_records);
    println!("  Saved: {}", summary.saved);
    println!("  Skipped: {}", summary.skipped);
    println!("  Failed: {}", summary.failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.skips.is_empty() {
        println!("ℹ️  Skipped records:");
        for (record_id, reason) in &summary.skips {
            println!("  - {record_id}: {reason}");
        }
        println!();
    }

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Record: {context}");
            }
        }
        println!();
    }

    if summary.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with failures");
    }
}

/// Exit code for a completed job
pub fn summary_exit_code(summary: &ExportSummary) -> i32 {
    if summary.is_successful() {
        0
    } else {
        EXIT_PARTIAL
    }
}

/// Exit code for a job that ended with an error
pub fn error_exit_code(error: &VoyantError) -> i32 {
    match error {
        VoyantError::Precondition(_) => EXIT_PRECONDITION,
        VoyantError::Configuration(_) => EXIT_CONFIG,
        _ => EXIT_FATAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::{ItemOutcome, ItemReport};
    use crate::domain::RecordId;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(
            error_exit_code(&VoyantError::Precondition("none".to_string())),
            3
        );
        assert_eq!(
            error_exit_code(&VoyantError::Configuration("bad".to_string())),
            2
        );
        assert_eq!(error_exit_code(&VoyantError::Archive("full".to_string())), 5);
    }

    #[test]
    fn test_summary_exit_codes() {
        let mut summary = ExportSummary::new(Uuid::new_v4(), "Novels", "out.zip", Utc::now());
        summary.record(ItemReport {
            record_id: RecordId::new("A"),
            outcome: ItemOutcome::Saved,
        });
        assert_eq!(summary_exit_code(&summary), 0);

        summary.record(ItemReport {
            record_id: RecordId::new("B"),
            outcome: ItemOutcome::Failed(VoyantError::Io("denied".to_string())),
        });
        assert_eq!(summary_exit_code(&summary), 1);
    }
}
