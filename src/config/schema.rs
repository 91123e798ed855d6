//! Configuration schema types
//!
//! Every section has defaults, so an empty file is a valid configuration.

use crate::adapters::exclusions::DEFAULT_NAME_COLUMN;
use crate::adapters::export::ReportFormat;
use crate::core::expand::{DEFAULT_NULL_SENTINELS, DEFAULT_SLOT_COUNT};
use crate::core::normalize::WhitespaceOrder;
use serde::{Deserialize, Serialize};

/// Upper bound on proprietor slots per HMLR row
pub const MAX_SLOT_COUNT: usize = 16;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Where the input files live
    #[serde(default)]
    pub inputs: InputConfig,

    /// Where the reports go
    #[serde(default)]
    pub output: OutputConfig,

    /// Name normalization settings
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// HMLR row expansion settings
    #[serde(default)]
    pub expansion: ExpansionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReconConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.inputs.validate()?;
        self.output.validate()?;
        self.normalization.validate()?;
        self.expansion.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (compute and log stats, write no reports)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Input locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding `RXN_DD_Mon_YYYY.xlsx` HMLR extracts
    #[serde(default = "default_hmlr_dir")]
    pub hmlr_dir: String,

    /// Directory holding `YYYY-MM-DD-exclusions.xlsx` lists
    #[serde(default = "default_exclusions_dir")]
    pub exclusions_dir: String,

    /// Exported ROE table (CSV or workbook)
    #[serde(default = "default_roe_path")]
    pub roe_path: String,

    /// Header of the entity-name column in the exclusion list
    #[serde(default = "default_exclusion_name_column")]
    pub exclusion_name_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hmlr_dir: default_hmlr_dir(),
            exclusions_dir: default_exclusions_dir(),
            roe_path: default_roe_path(),
            exclusion_name_column: default_exclusion_name_column(),
        }
    }
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.hmlr_dir.trim().is_empty() {
            return Err("inputs.hmlr_dir cannot be empty".to_string());
        }
        if self.exclusions_dir.trim().is_empty() {
            return Err("inputs.exclusions_dir cannot be empty".to_string());
        }
        if self.roe_path.trim().is_empty() {
            return Err("inputs.roe_path cannot be empty".to_string());
        }
        if self.exclusion_name_column.trim().is_empty() {
            return Err("inputs.exclusion_name_column cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the reports are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Unmatched report format (csv or xlsx)
    #[serde(default)]
    pub format: ReportFormat,

    /// Also write `{date}-summary.json`
    #[serde(default = "default_true")]
    pub write_summary_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: ReportFormat::default(),
            write_summary_json: true,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Name normalization settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Whether whitespace is removed after (default) or before suffix stripping
    #[serde(default)]
    pub whitespace_order: WhitespaceOrder,

    /// Legal-form suffixes added to the built-in vocabulary
    #[serde(default)]
    pub extra_suffixes: Vec<String>,
}

impl NormalizationConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(blank) = self.extra_suffixes.iter().position(|s| s.trim().is_empty()) {
            return Err(format!(
                "normalization.extra_suffixes[{}] cannot be empty",
                blank
            ));
        }
        Ok(())
    }
}

/// HMLR row expansion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Proprietor slots read per row
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,

    /// Cell values treated as "no proprietor", compared case-insensitively
    #[serde(default = "default_null_sentinels")]
    pub null_sentinels: Vec<String>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            slot_count: default_slot_count(),
            null_sentinels: default_null_sentinels(),
        }
    }
}

impl ExpansionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.slot_count == 0 || self.slot_count > MAX_SLOT_COUNT {
            return Err(format!(
                "expansion.slot_count must be between 1 and {}",
                MAX_SLOT_COUNT
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_hmlr_dir() -> String {
    "inputs/hmlr-data".to_string()
}

fn default_exclusions_dir() -> String {
    "inputs".to_string()
}

fn default_roe_path() -> String {
    "inputs/roe-register.csv".to_string()
}

fn default_exclusion_name_column() -> String {
    DEFAULT_NAME_COLUMN.to_string()
}

fn default_output_directory() -> String {
    "outputs".to_string()
}

fn default_slot_count() -> usize {
    DEFAULT_SLOT_COUNT
}

fn default_null_sentinels() -> Vec<String> {
    DEFAULT_NULL_SENTINELS.iter().map(|s| s.to_string()).collect()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
