//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pii-risk using clap.

pub mod commands;

use crate::config::{load_config, load_config_str, RiskConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "pii-risk.toml";

/// pii-risk - PII Type Mapping & Risk Assessment Engine
#[derive(Parser, Debug)]
#[command(name = "pii-risk")]
#[command(version, about, long_about = None)]
#[command(author = "pii-risk Contributors")]
pub struct Cli {
    /// Path to configuration file [default: pii-risk.toml]
    #[arg(short, long, env = "PII_RISK_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PII_RISK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration path in effect
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }

    /// Load the configuration for a command
    ///
    /// An explicit `--config` must exist. Without one, `pii-risk.toml` is read
    /// when present and the defaults (plus `PII_RISK_*` overrides) are used
    /// otherwise.
    pub fn resolve_config(&self) -> Result<RiskConfig> {
        match self.config {
            Some(ref path) => load_config(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
            None => load_config_str(""),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess the risk of canonical PII types
    Assess(commands::assess::AssessArgs),

    /// List the canonical taxonomy, optionally filtered
    Types(commands::types::TypesArgs),

    /// Convert between canonical and provider entity types
    Convert(commands::convert::ConvertArgs),

    /// Assess vendor detection responses from a JSON file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Detect PII in texts with the built-in pattern detector
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
