//! Configuration schema types
//!
//! Every section is optional; an empty file yields the defaults.

use crate::adapters::pattern::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_REPLACEMENT_TOKEN};
use crate::core::analysis::{AnalysisOptions, FailurePolicy};
use crate::core::mapping::MappingTable;
use crate::core::statistics::CollectionType;
use crate::domain::Result;
use serde::{Deserialize, Serialize};

/// Main pii-risk configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Collection analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Mapping table source
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Built-in pattern detector settings
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RiskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.analysis.validate()?;
        self.mapping.validate()?;
        self.detector.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Load the mapping table named by `[mapping] table_path`, or the built-in one
    pub fn load_mapping_table(&self) -> Result<MappingTable> {
        match self.mapping.table_path {
            Some(ref path) => MappingTable::from_file(path),
            None => MappingTable::builtin(),
        }
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            language_code: self.analysis.language_code.clone(),
            entities: self.analysis.entities.clone(),
            failure_policy: self.analysis.failure_policy,
            max_concurrency: self.analysis.max_concurrency,
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
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

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Collection analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Language code passed to the detector
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Variance denominator for collection statistics
    #[serde(default)]
    pub collection_type: CollectionType,

    /// Degrade failed items to the default assessment, or abort
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Maximum texts analyzed at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Token substituted for each hit in sanitized text
    #[serde(default = "default_replacement_token")]
    pub replacement_token: String,

    /// Restrict detection to these entity types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<String>>,
}

impl AnalysisConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.language_code.trim().is_empty() {
            return Err("analysis.language_code cannot be empty".to_string());
        }

        if self.max_concurrency == 0 || self.max_concurrency > 256 {
            return Err(format!(
                "analysis.max_concurrency must be between 1 and 256, got {}",
                self.max_concurrency
            ));
        }

        if self.replacement_token.is_empty() {
            return Err("analysis.replacement_token cannot be empty".to_string());
        }

        if let Some(ref entities) = self.entities {
            if entities.is_empty() {
                return Err("analysis.entities cannot be an empty list".to_string());
            }
        }

        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            collection_type: CollectionType::default(),
            failure_policy: FailurePolicy::default(),
            max_concurrency: default_max_concurrency(),
            replacement_token: default_replacement_token(),
            entities: None,
        }
    }
}

/// Mapping table configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MappingConfig {
    /// TOML mapping table replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<String>,
}

impl MappingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref path) = self.table_path {
            if path.trim().is_empty() {
                return Err("mapping.table_path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Pattern detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// TOML pattern library replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<String>,

    /// Patterns below this confidence are ignored
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl DetectorConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "detector.confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            ));
        }
        if let Some(ref path) = self.pattern_library {
            if path.trim().is_empty() {
                return Err("detector.pattern_library cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pattern_library: None,
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }

        Ok(())
    }
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

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_language_code() -> String {
    "en".to_string()
}

fn default_max_concurrency() -> usize {
    4
}

fn default_replacement_token() -> String {
    DEFAULT_REPLACEMENT_TOKEN.to_string()
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: RiskConfig = toml::from_str("").unwrap();
        assert_eq!(config, RiskConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.replacement_token, "<REDACTED>");
        assert_eq!(config.detector.confidence_threshold, 0.7);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_analysis_section_parses_enums() {
        let config: RiskConfig = toml::from_str(
            r#"
            [analysis]
            collection_type = "sample"
            failure_policy = "fail_fast"
            max_concurrency = 8
            entities = ["US_SSN"]
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.collection_type, CollectionType::Sample);
        assert_eq!(config.analysis.failure_policy, FailurePolicy::FailFast);

        let options = config.analysis_options();
        assert_eq!(options.max_concurrency, 8);
        assert_eq!(options.entities, Some(vec!["US_SSN".to_string()]));
        assert_eq!(options.language_code, "en");
    }

    #[test]
    fn test_unknown_collection_type_fails_to_parse() {
        let result: std::result::Result<RiskConfig, _> = toml::from_str(
            r#"
            [analysis]
            collection_type = "census"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_analysis_config_validation() {
        let mut config = AnalysisConfig::default();
        assert!(config.validate().is_ok());

        config.max_concurrency = 0;
        assert!(config.validate().is_err());

        config.max_concurrency = 4;
        config.replacement_token = String::new();
        assert!(config.validate().is_err());

        config.replacement_token = "***".to_string();
        config.entities = Some(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_detector_config_validation() {
        let mut config = DetectorConfig::default();
        assert!(config.validate().is_ok());
        config.confidence_threshold = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());
        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_builtin_mapping_table() {
        let table = RiskConfig::default().load_mapping_table().unwrap();
        assert!(!table.is_empty());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_language_code(), "en");
        assert_eq!(default_max_concurrency(), 4);
        assert_eq!(default_local_rotation(), "daily");
    }
}
