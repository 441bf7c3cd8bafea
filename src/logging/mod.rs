//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with span timings
//! - JSON-formatted local log files with daily or hourly rotation
//! - `RUST_LOG` filter overrides
//!
//! # Example
//!
//! ```no_run
//! use pii_risk::logging::init_logging;
//! use pii_risk::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a detector hit or metadata flag skipped during reconciliation
///
/// # Example
///
/// ```no_run
/// use pii_risk::log_reconciliation_skip;
/// use pii_risk::domain::RiskError;
///
/// let error = RiskError::unsupported("aws:PIN", "canonical");
/// log_reconciliation_skip!("aws", "PIN", &error);
/// ```
#[macro_export]
macro_rules! log_reconciliation_skip {
    ($source:expr, $value:expr, $error:expr) => {
        tracing::warn!(
            source = %$source,
            value = %$value,
            error = %$error,
            "Skipping type without canonical equivalent"
        );
    };
}

/// Log a collection item replaced by the Non-Identifiable default
///
/// # Example
///
/// ```no_run
/// use pii_risk::log_degraded_item;
/// use pii_risk::domain::RiskError;
///
/// let error = RiskError::Detector("timeout".to_string());
/// log_degraded_item!(3, &error);
/// ```
#[macro_export]
macro_rules! log_degraded_item {
    ($index:expr, $error:expr) => {
        tracing::error!(
            index = $index,
            error = %$error,
            "Item analysis failed, substituting default assessment"
        );
    };
}

/// Log the outcome of a collection analysis
///
/// # Example
///
/// ```no_run
/// use pii_risk::log_collection_summary;
/// use std::time::Duration;
///
/// log_collection_summary!("posts", 120, 37, 2, 1.42, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_collection_summary {
    ($name:expr, $items:expr, $detections:expr, $failures:expr, $mean:expr, $duration:expr) => {
        tracing::info!(
            collection = %$name,
            items = $items,
            detections = $detections,
            failures = $failures,
            risk_score_mean = $mean,
            duration_ms = $duration.as_millis() as u64,
            "Collection analysis completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pii_risk::log_error_with_context;
/// use pii_risk::domain::RiskError;
///
/// let error = RiskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
