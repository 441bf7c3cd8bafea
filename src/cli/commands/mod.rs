//! CLI command implementations
//!
//! Every command returns a process exit code: 0 on success, 2 for
//! configuration errors and 5 for anything else.

pub mod analyze;
pub mod assess;
pub mod convert;
pub mod init;
pub mod scan;
pub mod types;
pub mod validate;

use crate::adapters::PatternDetector;
use crate::config::RiskConfig;
use crate::core::analysis::{AnalysisResultSet, AnalysisService};
use crate::core::mapping::MappingTable;
use crate::domain::{Result, RiskError};
use std::fmt::Display;
use std::sync::Arc;

/// Exit code for a failed command
pub fn exit_code_for(error: &RiskError) -> i32 {
    match error {
        RiskError::Configuration(_) => 2,
        _ => 5,
    }
}

/// Print a failure in the usual two-line form and pick its exit code
pub(crate) fn report_failure(context: &str, error: &RiskError) -> i32 {
    tracing::error!(error = %error, "{context}");
    println!("❌ {context}");
    println!("   Error: {error}");
    exit_code_for(error)
}

pub(crate) fn load_table(config: &RiskConfig) -> Result<Arc<MappingTable>> {
    let table = config.load_mapping_table()?;
    tracing::debug!(types = table.len(), "Mapping table loaded");
    Ok(Arc::new(table))
}

/// Analysis service backed by the pattern detector
pub(crate) fn build_service(config: &RiskConfig) -> Result<AnalysisService> {
    let table = load_table(config)?;
    let detector = PatternDetector::from_config(config)?;
    Ok(AnalysisService::new(
        table,
        Arc::new(detector),
        config.analysis_options(),
    ))
}

pub(crate) fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Print a collection result as a human-readable report
pub(crate) fn print_result_set(set: &AnalysisResultSet, show_sanitized: bool) {
    println!(
        "📊 Collection: {} ({})",
        set.collection_name.as_deref().unwrap_or("unnamed"),
        set.collection_type
    );
    println!("  Items: {}", set.len());
    println!("  Detections: {}", set.detection_count);
    println!("  Mean risk score: {:.3}", set.risk_score_mean);
    println!("  Median risk score: {:.3}", set.risk_score_median);
    println!("  Mode risk score: {:.3}", set.risk_score_mode);
    println!("  Variance: {:.3}", set.risk_score_variance);
    println!("  Standard deviation: {:.3}", set.risk_score_standard_deviation);

    if !set.detected_pii_types.is_empty() {
        println!();
        println!("Most common PII types:");
        for (pii_type, count) in set.most_common_types(5) {
            println!("  {pii_type}: {count}");
        }
    }

    println!();
    println!("Items:");
    for analysis in &set.analyses {
        let types: Vec<String> = analysis
            .detected_types()
            .iter()
            .map(|t| t.to_string())
            .collect();
        println!(
            "  [{}] score {:.2}  types: {}",
            analysis.index,
            analysis.risk_score_mean,
            if types.is_empty() {
                "-".to_string()
            } else {
                types.join(", ")
            }
        );
        if show_sanitized {
            if let Some(ref sanitized) = analysis.sanitized_text {
                println!("       {sanitized}");
            }
        }
    }

    if set.has_failures() {
        println!();
        println!("⚠️  {} item(s) degraded to Non-Identifiable:", set.failures.len());
        for failure in &set.failures {
            println!("  [{}] {}", failure.index, failure.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&RiskError::Configuration("x".into())), 2);
        assert_eq!(exit_code_for(&RiskError::Validation("x".into())), 5);
        assert_eq!(exit_code_for(&RiskError::UnknownPiiType("X".into())), 5);
        assert_eq!(exit_code_for(&RiskError::unsupported("a", "b")), 5);
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None::<u8>), "-");
        assert_eq!(or_dash(Some(3)), "3");
    }

    #[test]
    fn test_build_service_from_defaults() {
        let service = build_service(&RiskConfig::default()).unwrap();
        assert_eq!(service.options().max_concurrency, 4);
    }
}
