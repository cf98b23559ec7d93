//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Voyant Export using clap.
//!
//! Exit codes:
//! - `0` success, empty collection, or cancelled
//! - `1` archive written but some records failed
//! - `2` configuration error
//! - `3` missing precondition (library, collection or record not found)
//! - `5` fatal error

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for a job whose archive was written with failed records
pub const EXIT_PARTIAL: i32 = 1;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for missing preconditions
pub const EXIT_PRECONDITION: i32 = 3;

/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Voyant Export - bibliographic collections to BagIt archives
#[derive(Parser, Debug)]
#[command(name = "voyant-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "voyant.toml", env = "VOYANT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VOYANT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a collection to a BagIt archive
    Export(commands::export::ExportArgs),

    /// Print the metadata generated for one record
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
