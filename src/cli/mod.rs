//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::domain::errors::ReconError;
use clap::{Parser, Subcommand};

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for missing or malformed input data
pub const EXIT_INPUT_ERROR: i32 = 3;

/// Exit code for everything else
pub const EXIT_FATAL: i32 = 5;

/// Map an error onto the process exit code
pub fn exit_code_for(error: &ReconError) -> i32 {
    match error {
        ReconError::Configuration(_) => EXIT_CONFIG_ERROR,
        e if e.is_input_error() => EXIT_INPUT_ERROR,
        _ => EXIT_FATAL,
    }
}

/// proprietor-recon - HMLR overseas proprietors vs the Register of Overseas Entities
#[derive(Parser, Debug)]
#[command(name = "proprietor-recon")]
#[command(version, about, long_about = None)]
#[command(author = "Proprietor Recon Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "proprietor-recon.toml", env = "RECON_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RECON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the newest HMLR extract against the ROE and write reports
    Run(commands::run::RunArgs),

    /// Print the matching key of one or more names
    Normalize(commands::normalize::NormalizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
