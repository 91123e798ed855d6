//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ReconConfig;
use crate::adapters::export::ReportFormat;
use crate::core::normalize::WhitespaceOrder;
use crate::domain::errors::ReconError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("Invalid placeholder pattern")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ReconConfig
/// 4. Applies environment variable overrides (RECON_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ReconError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use proprietor_recon::config::loader::load_config;
///
/// let config = load_config("proprietor-recon.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ReconConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReconError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReconError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same steps as [`load_config`] minus the file read.
pub fn load_config_from_str(contents: &str) -> Result<ReconConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ReconConfig = toml::from_str(&contents)
        .map_err(|e| ReconError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Loads the file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ReconConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = ReconConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ReconConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| ReconError::Configuration(format!("Configuration validation failed: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_PLACEHOLDER.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ReconError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using RECON_* prefix
///
/// Environment variables follow the pattern: RECON_<SECTION>_<KEY>
/// For example: RECON_INPUTS_HMLR_DIR, RECON_EXPANSION_SLOT_COUNT
fn apply_env_overrides(config: &mut ReconConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RECON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RECON_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Input overrides
    if let Ok(val) = std::env::var("RECON_INPUTS_HMLR_DIR") {
        config.inputs.hmlr_dir = val;
    }
    if let Ok(val) = std::env::var("RECON_INPUTS_EXCLUSIONS_DIR") {
        config.inputs.exclusions_dir = val;
    }
    if let Ok(val) = std::env::var("RECON_INPUTS_ROE_PATH") {
        config.inputs.roe_path = val;
    }
    if let Ok(val) = std::env::var("RECON_INPUTS_EXCLUSION_NAME_COLUMN") {
        config.inputs.exclusion_name_column = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("RECON_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("RECON_OUTPUT_FORMAT") {
        config.output.format = val
            .parse::<ReportFormat>()
            .map_err(|e| ReconError::Configuration(format!("RECON_OUTPUT_FORMAT: {e}")))?;
    }
    if let Ok(val) = std::env::var("RECON_OUTPUT_WRITE_SUMMARY_JSON") {
        config.output.write_summary_json = val.parse().unwrap_or(true);
    }

    // Normalization overrides
    if let Ok(val) = std::env::var("RECON_NORMALIZATION_WHITESPACE_ORDER") {
        config.normalization.whitespace_order = val
            .parse::<WhitespaceOrder>()
            .map_err(|e| ReconError::Configuration(format!("RECON_NORMALIZATION_WHITESPACE_ORDER: {e}")))?;
    }

    // Expansion overrides
    if let Ok(val) = std::env::var("RECON_EXPANSION_SLOT_COUNT") {
        if let Ok(count) = val.parse() {
            config.expansion.slot_count = count;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RECON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("RECON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RECON_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("RECON_LOADER_TEST_VAR", "test_value");
        let input = "roe_path = \"${RECON_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "roe_path = \"test_value\"");
        std::env::remove_var("RECON_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("RECON_LOADER_MISSING_VAR");
        let input = "roe_path = \"${RECON_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("RECON_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# roe_path = \"${RECON_LOADER_COMMENTED_VAR}\"\nlog_level = \"info\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ReconError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[inputs]
hmlr_dir = "/data/hmlr"
roe_path = "/data/roe.csv"

[normalization]
whitespace_order = "before_suffix"
extra_suffixes = ["ehf"]

[expansion]
slot_count = 6
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.inputs.hmlr_dir, "/data/hmlr");
        assert_eq!(config.inputs.exclusions_dir, "inputs");
        assert_eq!(config.normalization.whitespace_order, WhitespaceOrder::BeforeSuffix);
        assert_eq!(config.normalization.extra_suffixes, vec!["ehf".to_string()]);
        assert_eq!(config.expansion.slot_count, 6);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let err = load_config_from_str("[expansion]\nslot_count = 0\n").unwrap_err();
        assert!(err.to_string().contains("slot_count"));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output.directory, "outputs");
    }
}
