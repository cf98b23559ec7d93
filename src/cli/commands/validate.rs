//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Voyant Export configuration file.

use crate::cli::EXIT_CONFIG;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike `export`, a missing file is an error here.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Library: {}", config.catalog.library_path.display());
        println!(
            "  Collection: {}",
            config.catalog.collection.as_deref().unwrap_or("(only collection)")
        );
        println!(
            "  Output: {}",
            config
                .export
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(prompt)".to_string())
        );
        println!("  Concurrency: {}", config.export.concurrency);
        println!(
            "  Retry: {} attempts, {}ms initial delay, x{}",
            config.export.retry.max_attempts,
            config.export.retry.initial_delay_ms,
            config.export.retry.backoff_multiplier
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("definitely-missing-voyant.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[export]\nconcurrency = 2").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, 0);
    }
}
