//! Domain error types
//!
//! Every fallible operation in the crate reports one of these variants. Third-party
//! error types are flattened into strings so they never leak through the public API.

use thiserror::Error;

/// Main pii-risk error type
#[derive(Debug, Error)]
pub enum RiskError {
    /// A canonical PII type is absent from the mapping table
    ///
    /// This signals taxonomy drift and is never recovered silently.
    #[error("Unknown PII type: {0}")]
    UnknownPiiType(String),

    /// A canonical/provider pair has no cross-reference
    ///
    /// Expected during best-effort multi-provider reconciliation; callers
    /// skip the item and keep going.
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    /// Malformed input, raised before any detector call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Statistics requested over an empty or ill-formed sequence
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// Configuration and packaged data errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by a detector collaborator
    #[error("Detector error: {0}")]
    Detector(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl RiskError {
    /// Builds an [`RiskError::UnsupportedConversion`] from any two displayable endpoints
    pub fn unsupported(from: impl Into<String>, to: impl Into<String>) -> Self {
        RiskError::UnsupportedConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether the error is the recoverable "no equivalent" case
    pub fn is_unsupported_conversion(&self) -> bool {
        matches!(self, RiskError::UnsupportedConversion { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RiskError {
    fn from(err: std::io::Error) -> Self {
        RiskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RiskError {
    fn from(err: serde_json::Error) -> Self {
        RiskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RiskError {
    fn from(err: toml::de::Error) -> Self {
        RiskError::Configuration(format!("TOML parse error: {err}"))
    }
}
