//! Result type alias for Voyant Export

use super::errors::VoyantError;

/// Result type alias for Voyant Export operations
///
/// This is a convenience type alias that uses `VoyantError` as the error type.
///
/// # Examples
///
/// ```
/// use voyant_export::domain::result::Result;
/// use voyant_export::domain::errors::VoyantError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VoyantError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VoyantError>;
