//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "voyant.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Voyant Export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            generate_config_with_examples()
        } else {
            generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point catalog.library_path at your library export");
                println!("  2. Set catalog.collection if the library has several collections");
                println!("  3. Validate configuration: voyant-export validate-config");
                println!("  4. Run export: voyant-export export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Generate minimal configuration
pub fn generate_minimal_config() -> String {
    r#"# Voyant Export configuration

[application]
log_level = "info"

[catalog]
library_path = "library.json"
# collection = "Thesis sources"

[export]
# output = "export.zip"
concurrency = 4
"#
    .to_string()
}

/// Generate configuration with every option and comments
pub fn generate_config_with_examples() -> String {
    r#"# Voyant Export configuration
#
# Every value below is the default unless noted. Values may reference
# environment variables with ${VAR_NAME}, and any key can be overridden with
# VOYANT_<SECTION>_<KEY>, for example VOYANT_EXPORT_CONCURRENCY=8.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# Source Catalog
# ============================================================================
[catalog]
# JSON library export; relative attachment paths resolve against its folder
library_path = "library.json"

# Collection to export. Required when the library holds more than one.
# collection = "Thesis sources"

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Archive path. When unset, the export command asks for one.
# output = "export.zip"

# Records processed at once (1-64)
concurrency = 4

# Base directory for the staging bag; the system temp directory when unset
# temp_dir = "/var/tmp"

[export.retry]
# Attempts per record write and for the archive step, the first one included
max_attempts = 3

# Delay after the first failure; multiplied by backoff_multiplier each time
initial_delay_ms = 1000
backoff_multiplier = 2.0

# Upper bound for any single delay
max_delay_ms = 30000

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files next to the console output
local_enabled = false
local_path = "./logs"

# daily | hourly
local_rotation = "daily"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "voyant.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "voyant.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = parse_config(&generate_minimal_config()).unwrap();
        assert_eq!(config.export.concurrency, 4);
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = parse_config(&generate_config_with_examples()).unwrap();
        assert_eq!(config.export.retry.max_attempts, 3);
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voyant.toml");
        std::fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voyant.toml");

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: true,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(path.is_file());
    }
}
