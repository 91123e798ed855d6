//! Domain error types
//!
//! This module defines the error hierarchy for proprietor-recon.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the library. Core
/// computation only ever produces [`ReconError::InvalidInput`] and
/// [`ReconError::MalformedRecord`]; the remaining variants come from the
/// configuration layer and the I/O adapters.
#[derive(Debug, Error)]
pub enum ReconError {
    /// A side of the reconciliation is empty or otherwise degenerate
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record is missing a required shared field
    #[error("Malformed record in {source_name} at row {row}: {reason}")]
    MalformedRecord {
        /// Dataset the record came from (e.g. "hmlr")
        source_name: String,
        /// 1-based data row number (header excluded)
        row: usize,
        /// What is wrong with the record
        reason: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An input table does not match its declared schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// No input file follows the expected naming convention
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Spreadsheet parsing errors
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ReconError {
    /// Creates a malformed record error
    pub fn malformed(source_name: impl Into<String>, row: usize, reason: impl Into<String>) -> Self {
        ReconError::MalformedRecord {
            source_name: source_name.into(),
            row,
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the input data rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ReconError::InvalidInput(_)
                | ReconError::MalformedRecord { .. }
                | ReconError::Schema(_)
                | ReconError::Discovery(_)
                | ReconError::Workbook(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReconError {
    fn from(err: std::io::Error) -> Self {
        ReconError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReconError {
    fn from(err: toml::de::Error) -> Self {
        ReconError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for ReconError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            ReconError::Io(err.to_string())
        } else {
            ReconError::Serialization(format!("CSV error: {err}"))
        }
    }
}

impl From<calamine::Error> for ReconError {
    fn from(err: calamine::Error) -> Self {
        ReconError::Workbook(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recon_error_display() {
        let err = ReconError::InvalidInput("side A is empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: side A is empty");
    }

    #[test]
    fn test_malformed_record_display() {
        let err = ReconError::malformed("hmlr", 12, "title_number is blank");
        assert_eq!(
            err.to_string(),
            "Malformed record in hmlr at row 12: title_number is blank"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(ReconError::InvalidInput("x".to_string()).is_input_error());
        assert!(ReconError::malformed("roe", 1, "x").is_input_error());
        assert!(ReconError::Discovery("x".to_string()).is_input_error());
        assert!(!ReconError::Configuration("x".to_string()).is_input_error());
        assert!(!ReconError::Io("x".to_string()).is_input_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ReconError = io_err.into();
        assert!(matches!(err, ReconError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ReconError = json_err.into();
        assert!(matches!(err, ReconError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ReconError = toml_err.into();
        assert!(matches!(err, ReconError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_recon_error_implements_std_error() {
        let err = ReconError::Schema("missing column".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
