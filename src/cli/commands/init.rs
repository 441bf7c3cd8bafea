//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing pii-risk configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: pii-risk validate-config");
                println!("  3. Scan some text: pii-risk scan --text \"mail me at a@b.com\"");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# pii-risk Configuration File

[application]
log_level = "info"

[analysis]
language_code = "en"
collection_type = "population"
failure_policy = "degrade"
max_concurrency = 4
replacement_token = "<REDACTED>"

[detector]
confidence_threshold = 0.7

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# pii-risk Configuration File
#
# Every section is optional. Values may reference environment variables
# with ${VAR_NAME}, and any key can be overridden with
# PII_RISK_<SECTION>_<KEY>, e.g. PII_RISK_ANALYSIS_MAX_CONCURRENCY=8.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Collection Analysis
# ============================================================================
[analysis]
# Language code passed to the detector
language_code = "en"

# Variance denominator: "population" (n) or "sample" (n - 1)
collection_type = "population"

# What to do when one text fails:
#   degrade   - score it as Non-Identifiable and record the failure
#   fail_fast - abort the whole collection
failure_policy = "degrade"

# Texts analyzed at once (1-256)
max_concurrency = 4

# Token substituted for each hit in sanitized text
replacement_token = "<REDACTED>"

# Restrict detection to these entity types (Presidio names or canonical types)
# entities = ["EMAIL_ADDRESS", "US_SSN"]

# ============================================================================
# Mapping Table
# ============================================================================
[mapping]
# Replace the built-in canonical mapping table
# table_path = "${PII_RISK_TABLE}"

# ============================================================================
# Pattern Detector
# ============================================================================
[detector]
# Replace the built-in pattern library
# pattern_library = "./patterns.toml"

# Patterns below this confidence are ignored (0.0-1.0)
confidence_threshold = 0.7

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"

# Rotation strategy (daily, hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
