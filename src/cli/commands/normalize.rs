//! Normalize command implementation
//!
//! Prints the matching key of each name given on the command line, which is
//! the quickest way to see why two names do or do not match.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config_or_default;
use crate::core::normalize::{NameNormalizer, WhitespaceOrder};
use clap::Args;

/// Arguments for the normalize command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Organization names to normalize
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Override the whitespace order (after_suffix or before_suffix)
    #[arg(long, value_name = "ORDER")]
    pub whitespace_order: Option<WhitespaceOrder>,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let order = self
            .whitespace_order
            .unwrap_or(config.normalization.whitespace_order);
        let normalizer = NameNormalizer::new(order, &config.normalization.extra_suffixes);

        for line in self.render(&normalizer) {
            println!("{line}");
        }
        Ok(EXIT_SUCCESS)
    }

    fn render(&self, normalizer: &NameNormalizer) -> Vec<String> {
        self.names
            .iter()
            .map(|name| {
                let key = normalizer.normalize(name);
                if key.is_empty() {
                    format!("{name}\t(empty)")
                } else {
                    format!("{name}\t{key}")
                }
            })
            .collect()
    }
}
