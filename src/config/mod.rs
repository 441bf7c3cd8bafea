//! Configuration management for pii-risk.
//!
//! pii-risk uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PII_RISK_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pii_risk::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pii-risk.toml")?;
//! println!("Collection type: {}", config.analysis.collection_type);
//! println!("Workers: {}", config.analysis.max_concurrency);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`AnalysisConfig`] - Language, statistics semantics, failure policy, concurrency
//! - [`MappingConfig`] - Optional replacement mapping table
//! - [`DetectorConfig`] - Pattern library and confidence threshold
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [analysis]
//! language_code = "en"
//! collection_type = "population"
//! failure_policy = "degrade"
//! max_concurrency = 4
//! replacement_token = "<REDACTED>"
//!
//! [mapping]
//! table_path = "${PII_RISK_TABLE}"
//!
//! [detector]
//! confidence_threshold = 0.7
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_str, ENV_PREFIX};
pub use schema::{
    AnalysisConfig, ApplicationConfig, DetectorConfig, LoggingConfig, MappingConfig, RiskConfig,
};
