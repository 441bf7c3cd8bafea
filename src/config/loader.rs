//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RiskConfig;
use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PII_RISK_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RiskConfig
/// 4. Applies environment variable overrides (PII_RISK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable, a
/// referenced variable is unset, parsing fails, an override is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use pii_risk::config::loader::load_config;
///
/// let config = load_config("pii-risk.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RiskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RiskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RiskError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    load_config_str(&contents)
}

/// Same as [`load_config`] but from TOML text
pub fn load_config_str(contents: &str) -> Result<RiskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RiskConfig = toml::from_str(&contents)
        .map_err(|e| RiskError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RiskError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Every missing variable is reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RiskError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
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
        return Err(RiskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        RiskError::Configuration(format!("Invalid value '{value}' for {ENV_PREFIX}{key}: {e}"))
    })
}

/// Applies environment variable overrides using the PII_RISK_* prefix
///
/// Variables follow the pattern PII_RISK_<SECTION>_<KEY>, for example
/// PII_RISK_ANALYSIS_MAX_CONCURRENCY.
fn apply_env_overrides(config: &mut RiskConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Analysis overrides
    if let Some(val) = env_override("ANALYSIS_LANGUAGE_CODE") {
        config.analysis.language_code = val;
    }
    if let Some(val) = env_override("ANALYSIS_COLLECTION_TYPE") {
        config.analysis.collection_type = parse_override("ANALYSIS_COLLECTION_TYPE", &val)?;
    }
    if let Some(val) = env_override("ANALYSIS_FAILURE_POLICY") {
        config.analysis.failure_policy = parse_override("ANALYSIS_FAILURE_POLICY", &val)?;
    }
    if let Some(val) = env_override("ANALYSIS_MAX_CONCURRENCY") {
        config.analysis.max_concurrency = parse_override("ANALYSIS_MAX_CONCURRENCY", &val)?;
    }
    if let Some(val) = env_override("ANALYSIS_REPLACEMENT_TOKEN") {
        config.analysis.replacement_token = val;
    }

    // Mapping overrides
    if let Some(val) = env_override("MAPPING_TABLE_PATH") {
        config.mapping.table_path = Some(val);
    }

    // Detector overrides
    if let Some(val) = env_override("DETECTOR_PATTERN_LIBRARY") {
        config.detector.pattern_library = Some(val);
    }
    if let Some(val) = env_override("DETECTOR_CONFIDENCE_THRESHOLD") {
        config.detector.confidence_threshold =
            parse_override("DETECTOR_CONFIDENCE_THRESHOLD", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
