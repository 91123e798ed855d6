//! Configuration management.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! proprietor-recon uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RECON_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use proprietor_recon::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("proprietor-recon.toml")?;
//!
//! println!("HMLR extracts: {}", config.inputs.hmlr_dir);
//! println!("Whitespace order: {}", config.normalization.whitespace_order);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`InputConfig`] - Input directories and files
//! - [`OutputConfig`] - Report directory
//! - [`NormalizationConfig`] - Whitespace order and extra suffixes
//! - [`ExpansionConfig`] - Proprietor slot count and null sentinels
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [inputs]
//! hmlr_dir = "${RECON_DATA_ROOT}/hmlr"
//! exclusions_dir = "${RECON_DATA_ROOT}/exclusions"
//! roe_path = "${RECON_DATA_ROOT}/roe/roe_entities.csv"
//!
//! [normalization]
//! whitespace_order = "after_suffix"
//!
//! [expansion]
//! slot_count = 4
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, ExpansionConfig, InputConfig, LoggingConfig, NormalizationConfig,
    OutputConfig, ReconConfig,
};
