//! Configuration management for Voyant Export.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Voyant Export uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VOYANT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voyant_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("voyant.toml")?;
//!
//! println!("Library: {}", config.catalog.library_path.display());
//! println!("Concurrency: {}", config.export.concurrency);
//! println!("Attempts per record: {}", config.export.retry.max_attempts);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`CatalogConfig`] - Library file and collection selection
//! - [`ExportConfig`] - Output path, concurrency, staging directory
//! - [`RetryConfig`] - Attempts and backoff for per-record writes
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [catalog]
//! library_path = "${HOME}/library.json"
//! collection = "Thesis sources"
//!
//! [export]
//! output = "thesis.zip"
//! concurrency = 4
//!
//! [export.retry]
//! max_attempts = 3
//! initial_delay_ms = 1000
//! backoff_multiplier = 2.0
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, CatalogConfig, ExportConfig, LoggingConfig, RetryConfig, VoyantConfig,
    MAX_CONCURRENCY,
};
