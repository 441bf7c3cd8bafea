//! Assess command implementation
//!
//! Looks up canonical PII types and prints their classification and the
//! average risk score.

use super::{load_table, or_dash, report_failure};
use crate::config::RiskConfig;
use crate::core::assessment::RiskAssessor;
use clap::Args;

/// Arguments for the assess command
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Canonical PII type symbols, e.g. EMAIL_ADDRESS
    #[arg(required = true, value_name = "TYPES")]
    pub types: Vec<String>,

    /// Print the assessments as JSON
    #[arg(long)]
    pub json: bool,
}

impl AssessArgs {
    /// Execute the assess command
    pub async fn execute(&self, config: &RiskConfig) -> anyhow::Result<i32> {
        tracing::info!(types = ?self.types, "Assessing PII types");

        let table = match load_table(config) {
            Ok(t) => t,
            Err(e) => return Ok(report_failure("Failed to load mapping table", &e)),
        };
        let assessor = RiskAssessor::new(table);

        let list = match assessor.assess_and_score(self.types.as_slice()) {
            Ok(list) => list,
            Err(e) => return Ok(report_failure("Assessment failed", &e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(0);
        }

        println!("🔍 Assessed {} PII type(s)", list.risk_assessments.len());
        println!();
        for assessment in &list.risk_assessments {
            println!(
                "  {}  level {} ({})",
                or_dash(assessment.pii_type_detected),
                assessment.risk_level,
                assessment.risk_level_definition
            );
            println!(
                "      cluster: {}  HIPAA: {}  DHS: {}  NIST: {}",
                or_dash(assessment.cluster_membership_type),
                or_dash(assessment.hipaa_category),
                or_dash(assessment.dhs_category),
                or_dash(assessment.nist_category)
            );
        }
        println!();
        println!("📊 Average risk score: {:.3}", list.average_risk_score);

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assess_known_types() {
        let args = AssessArgs {
            types: vec!["EMAIL_ADDRESS".to_string(), "AGE".to_string()],
            json: true,
        };
        assert_eq!(args.execute(&RiskConfig::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_assess_unknown_type_is_fatal() {
        let args = AssessArgs {
            types: vec!["FAVOURITE_COLOUR".to_string()],
            json: false,
        };
        assert_eq!(args.execute(&RiskConfig::default()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_assess_with_missing_table_is_config_error() {
        let mut config = RiskConfig::default();
        config.mapping.table_path = Some("/nonexistent/table.toml".to_string());
        let args = AssessArgs {
            types: vec!["AGE".to_string()],
            json: false,
        };
        assert_eq!(args.execute(&config).await.unwrap(), 2);
    }
}
