// pii-risk - PII Type Mapping & Risk Assessment Engine
// Copyright (c) 2025 pii-risk Contributors
// Licensed under the MIT License

use clap::Parser;
use pii_risk::cli::commands::exit_code_for;
use pii_risk::cli::{Cli, Commands};
use pii_risk::config::{LoggingConfig, RiskConfig};
use pii_risk::domain::RiskError;
use pii_risk::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Configuration errors are reported by the command that needs the config
    let config = cli.resolve_config();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code_for(&e));
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "pii-risk - PII Type Mapping & Risk Assessment Engine"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Drop the guard first so buffered file logs are flushed
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: Result<RiskConfig, RiskError>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ValidateConfig(args) => return args.execute(cli.config_path()).await,
        Commands::Init(args) => return args.execute().await,
        _ => {}
    }

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            return Ok(exit_code_for(&e));
        }
    };

    match &cli.command {
        Commands::Assess(args) => args.execute(&config).await,
        Commands::Types(args) => args.execute(&config).await,
        Commands::Convert(args) => args.execute(&config).await,
        Commands::Analyze(args) => args.execute(&config).await,
        Commands::Scan(args) => args.execute(&config).await,
        Commands::ValidateConfig(_) | Commands::Init(_) => Ok(0),
    }
}
