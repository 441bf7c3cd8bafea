//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Besides parsing the
//! file it loads the mapping table and pattern library the file points at.

use crate::adapters::PatternDetector;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let table = match config.load_mapping_table() {
            Ok(t) => {
                println!("✅ Mapping table loaded ({} types)", t.len());
                t
            }
            Err(e) => {
                println!("❌ Failed to load mapping table");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let detector = match PatternDetector::from_config(&config) {
            Ok(d) => {
                println!(
                    "✅ Pattern library loaded ({} patterns)",
                    d.registry().len()
                );
                d
            }
            Err(e) => {
                println!("❌ Failed to load pattern library");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Language: {}", config.analysis.language_code);
        println!("  Collection Type: {}", config.analysis.collection_type);
        println!("  Failure Policy: {}", config.analysis.failure_policy);
        println!("  Max Concurrency: {}", config.analysis.max_concurrency);
        println!("  Replacement Token: {}", config.analysis.replacement_token);
        println!(
            "  Entities: {}",
            config
                .analysis
                .entities
                .as_ref()
                .map_or_else(|| "all".to_string(), |e| e.join(", "))
        );
        println!(
            "  Mapping Table: {} ({} types)",
            config.mapping.table_path.as_deref().unwrap_or("built-in"),
            table.len()
        );
        println!(
            "  Pattern Library: {}",
            config.detector.pattern_library.as_deref().unwrap_or("built-in")
        );
        println!("  Confidence Threshold: {}", detector.confidence_threshold());
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!(
                    "{} ({})",
                    config.logging.local_path, config.logging.local_rotation
                )
            } else {
                "disabled".to_string()
            }
        );
        println!();

        Ok(0)
    }
}
