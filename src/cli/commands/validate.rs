//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::normalize::NameNormalizer;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let normalizer = NameNormalizer::new(
            config.normalization.whitespace_order,
            &config.normalization.extra_suffixes,
        );

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  HMLR Directory: {}", config.inputs.hmlr_dir);
        println!("  Exclusions Directory: {}", config.inputs.exclusions_dir);
        println!("  ROE Export: {}", config.inputs.roe_path);
        println!("  Output Directory: {}", config.output.directory);
        println!("  Report Format: {}", config.output.format);
        println!("  Whitespace Order: {}", config.normalization.whitespace_order);
        println!("  Suffix Vocabulary: {} entries", normalizer.vocabulary_len());
        println!("  Proprietor Slots: {}", config.expansion.slot_count);
        println!("  Null Sentinels: {:?}", config.expansion.null_sentinels);
        println!();
        Ok(EXIT_SUCCESS)
    }
}
