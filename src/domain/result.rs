//! Result type alias for pii-risk

use super::errors::RiskError;

/// Result type alias for pii-risk operations
///
/// # Examples
///
/// ```
/// use pii_risk::domain::result::Result;
/// use pii_risk::domain::errors::RiskError;
///
/// fn failing_function() -> Result<()> {
///     Err(RiskError::Validation("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, RiskError>;
