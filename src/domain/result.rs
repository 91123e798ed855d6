//! Result type alias for proprietor-recon
//!
//! This module provides a convenient Result type alias that uses ReconError
//! as the error type.

use super::errors::ReconError;

/// Result type alias for reconciliation operations
///
/// # Examples
///
/// ```
/// use proprietor_recon::domain::result::Result;
/// use proprietor_recon::domain::errors::ReconError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReconError::InvalidInput("side A is empty".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReconError>;
