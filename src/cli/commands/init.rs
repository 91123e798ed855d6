//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "proprietor-recon.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your input locations", self.output);
                println!("  2. Export the ROE register to the configured roe_path");
                println!("  3. Validate configuration: proprietor-recon validate-config");
                println!("  4. Run: proprietor-recon run");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn sample_config() -> &'static str {
        r##"# proprietor-recon configuration
#
# Values may reference environment variables as ${VAR_NAME}; any setting can
# also be overridden with RECON_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Compute and print stats without writing reports
dry_run = false

[inputs]
# Monthly extracts named RXN_DD_Mon_YYYY.xlsx; the newest date wins
hmlr_dir = "inputs/hmlr-data"

# Curated lists named YYYY-MM-DD-exclusions.xlsx; the newest date wins
exclusions_dir = "inputs"

# ROE export with incorporation_number, corporate_body_name, incorporation_date
roe_path = "inputs/roe-register.csv"

# Header of the name column in the exclusion list
exclusion_name_column = "entity name (from hmlr datasets)"

[output]
directory = "outputs"

# Unmatched report format: csv or xlsx
format = "csv"
write_summary_json = true

[normalization]
# after_suffix: strip legal-form suffix words, then remove spaces
# before_suffix: remove spaces, then strip suffixes that start at a former word break
whitespace_order = "after_suffix"

# Extra legal-form suffixes, e.g. ["ehf", "jsc"]
extra_suffixes = []

[expansion]
# Proprietor slots per title row (1-16)
slot_count = 4

# Cell values treated as "no proprietor"
null_sentinels = ["nan", "null", "none", "n/a", "#n/a"]

[logging]
local_enabled = false
local_path = "logs"
# daily, hourly or never
local_rotation = "daily"
"##
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_is_valid() {
        let config: crate::config::ReconConfig = toml::from_str(InitArgs::sample_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.expansion.slot_count, 4);
        assert!(config.expansion.null_sentinels.iter().any(|s| s == "#n/a"));
        assert!(InitArgs::sample_config().ends_with("local_rotation = \"daily\"\n"));
    }

    #[test]
    fn test_init_writes_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recon.toml");
        let mut args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().unwrap(), EXIT_SUCCESS);
        assert!(load_config(&path).is_ok());

        assert_eq!(args.execute().unwrap(), EXIT_CONFIG_ERROR);

        args.force = true;
        assert_eq!(args.execute().unwrap(), EXIT_SUCCESS);
    }
}
