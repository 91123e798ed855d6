//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do
//! not interfere with each other.

use proprietor_recon::adapters::export::ReportFormat;
use proprietor_recon::config::{load_config, load_config_or_default};
use proprietor_recon::core::normalize::WhitespaceOrder;
use proprietor_recon::domain::ReconError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("RECON_APPLICATION_LOG_LEVEL");
    std::env::remove_var("RECON_APPLICATION_DRY_RUN");
    std::env::remove_var("RECON_INPUTS_ROE_PATH");
    std::env::remove_var("RECON_OUTPUT_DIRECTORY");
    std::env::remove_var("RECON_OUTPUT_FORMAT");
    std::env::remove_var("RECON_NORMALIZATION_WHITESPACE_ORDER");
    std::env::remove_var("RECON_EXPANSION_SLOT_COUNT");
    std::env::remove_var("TEST_RECON_DATA_ROOT");
}

fn config_file(toml_content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"
dry_run = true

[inputs]
hmlr_dir = "/data/hmlr"
exclusions_dir = "/data/curated"
roe_path = "/data/roe.xlsx"
exclusion_name_column = "Organisation"

[output]
directory = "/data/out"
format = "xlsx"
write_summary_json = false

[normalization]
whitespace_order = "before_suffix"
extra_suffixes = ["ehf", "JSC"]

[expansion]
slot_count = 2
null_sentinels = ["-"]

[logging]
local_enabled = true
local_path = "/var/log/recon"
local_rotation = "hourly"
"#;

    let temp_file = config_file(toml_content);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.inputs.hmlr_dir, "/data/hmlr");
    assert_eq!(config.inputs.roe_path, "/data/roe.xlsx");
    assert_eq!(config.inputs.exclusion_name_column, "Organisation");
    assert_eq!(config.output.directory, "/data/out");
    assert_eq!(config.output.format, ReportFormat::Xlsx);
    assert!(!config.output.write_summary_json);
    assert_eq!(config.normalization.whitespace_order, WhitespaceOrder::BeforeSuffix);
    assert_eq!(config.normalization.extra_suffixes, vec!["ehf", "JSC"]);
    assert_eq!(config.expansion.slot_count, 2);
    assert_eq!(config.expansion.null_sentinels, vec!["-"]);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = config_file("[application]\nlog_level = \"warn\"\n");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(!config.application.dry_run);
    assert_eq!(config.inputs.hmlr_dir, "inputs/hmlr-data");
    assert_eq!(config.output.directory, "outputs");
    assert_eq!(config.normalization.whitespace_order, WhitespaceOrder::AfterSuffix);
    assert_eq!(config.expansion.slot_count, 4);
    assert!(config.output.write_summary_json);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_RECON_DATA_ROOT", "/mnt/share");

    let toml_content = r#"
[inputs]
# Commented ${UNSET_PLACEHOLDER} is ignored
hmlr_dir = "${TEST_RECON_DATA_ROOT}/hmlr"
roe_path = "${TEST_RECON_DATA_ROOT}/roe.csv"
"#;

    let temp_file = config_file(toml_content);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.inputs.hmlr_dir, "/mnt/share/hmlr");
    assert_eq!(config.inputs.roe_path, "/mnt/share/roe.csv");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_is_config_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = config_file("[inputs]\nroe_path = \"${TEST_RECON_DATA_ROOT}/roe.csv\"\n");
    let err = load_config(temp_file.path()).unwrap_err();

    assert!(matches!(err, ReconError::Configuration(_)));
    assert!(err.to_string().contains("TEST_RECON_DATA_ROOT"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("RECON_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("RECON_APPLICATION_DRY_RUN", "true");
    std::env::set_var("RECON_OUTPUT_DIRECTORY", "/tmp/reports");
    std::env::set_var("RECON_NORMALIZATION_WHITESPACE_ORDER", "before_suffix");
    std::env::set_var("RECON_EXPANSION_SLOT_COUNT", "6");
    std::env::set_var("RECON_OUTPUT_FORMAT", "xlsx");

    let toml_content = r#"
[application]
log_level = "info"

[output]
directory = "outputs"

[expansion]
slot_count = 4
"#;

    let temp_file = config_file(toml_content);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert!(config.application.dry_run);
    assert_eq!(config.output.directory, "/tmp/reports");
    assert_eq!(config.normalization.whitespace_order, WhitespaceOrder::BeforeSuffix);
    assert_eq!(config.expansion.slot_count, 6);
    assert_eq!(config.output.format, ReportFormat::Xlsx);

    cleanup_env_vars();
}

#[test]
fn test_overrides_apply_without_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("RECON_INPUTS_ROE_PATH", "/exports/roe.xlsx");

    let config = load_config_or_default("/does/not/exist/recon.toml").unwrap();
    assert_eq!(config.inputs.roe_path, "/exports/roe.xlsx");

    cleanup_env_vars();
}

#[test]
fn test_invalid_whitespace_order_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("RECON_NORMALIZATION_WHITESPACE_ORDER", "sideways");

    let temp_file = config_file("");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(matches!(err, ReconError::Configuration(_)));

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for toml_content in [
        "[application]\nlog_level = \"loud\"\n",
        "[expansion]\nslot_count = 0\n",
        "[expansion]\nslot_count = 17\n",
        "[normalization]\nextra_suffixes = [\"ltd\", \"  \"]\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[output]\ndirectory = \"\"\n",
    ] {
        let temp_file = config_file(toml_content);
        let result = load_config(temp_file.path());
        assert!(result.is_err(), "accepted invalid config: {toml_content}");
    }
}

#[test]
fn test_unknown_whitespace_order_in_file_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = config_file("[normalization]\nwhitespace_order = \"middle\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
