//! Analyze command implementation
//!
//! Reads a JSON array holding one vendor response per text, converts each
//! through the provider adapter and aggregates the collection.

use super::{build_service, load_table, print_result_set, report_failure};
use crate::adapters::create_adapter;
use crate::config::RiskConfig;
use crate::core::analysis::AnalysisResultSet;
use crate::core::statistics::CollectionType;
use crate::domain::{Provider, Result, RiskError};
use clap::Args;
use serde_json::Value;
use std::path::Path;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Provider that produced the responses (presidio, azure, aws)
    #[arg(short, long)]
    pub provider: Provider,

    /// JSON file with one provider response per text
    #[arg(short, long)]
    pub input: String,

    /// Variance denominator (population, sample) [default: from config]
    #[arg(long)]
    pub collection_type: Option<CollectionType>,

    /// Collection name for the report
    #[arg(long)]
    pub name: Option<String>,

    /// Print the result set as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, config: &RiskConfig) -> anyhow::Result<i32> {
        tracing::info!(
            provider = %self.provider,
            input = %self.input,
            "Analyzing provider detections"
        );

        let set = match self.run(config) {
            Ok(set) => set,
            Err(e) => return Ok(report_failure("Analysis failed", &e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&set)?);
        } else {
            println!("🔍 Analyzed {} {} response(s)", set.len(), self.provider);
            println!();
            print_result_set(&set, false);
        }

        Ok(0)
    }

    fn run(&self, config: &RiskConfig) -> Result<AnalysisResultSet> {
        let payloads = read_payloads(&self.input)?;
        let adapter = create_adapter(self.provider, load_table(config)?);
        let results = adapter.convert_analyzed_collection(&payloads)?;

        let service = build_service(config)?;
        service.analyze_detection_collection(
            results,
            self.name.clone(),
            self.collection_type.unwrap_or(config.analysis.collection_type),
        )
    }
}

/// Read a JSON array of provider payloads
pub(crate) fn read_payloads(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RiskError::Io(format!("Failed to read {}: {e}", path.display()))
    })?;

    match serde_json::from_str::<Value>(&contents)? {
        Value::Array(items) => Ok(items),
        _ => Err(RiskError::Validation(format!(
            "{} must contain a JSON array",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn args(provider: Provider, input: &NamedTempFile) -> AnalyzeArgs {
        AnalyzeArgs {
            provider,
            input: input.path().display().to_string(),
            collection_type: None,
            name: Some("tickets".to_string()),
            json: false,
        }
    }

    #[test]
    fn test_run_aws_responses() {
        let file = write_json(
            r#"[
                {"Entities": [{"Type": "EMAIL", "Score": 0.99, "BeginOffset": 0, "EndOffset": 7}]},
                {"Entities": []}
            ]"#,
        );
        let set = args(Provider::Aws, &file).run(&RiskConfig::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.collection_name.as_deref(), Some("tickets"));
        assert_eq!(set.risk_scores, vec![3.0, 1.0]);
        assert_eq!(set.risk_score_mean, 2.0);
    }

    #[test]
    fn test_run_rejects_non_array() {
        let file = write_json(r#"{"entities": []}"#);
        let err = args(Provider::Azure, &file)
            .run(&RiskConfig::default())
            .unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
    }

    #[tokio::test]
    async fn test_execute_missing_input() {
        let args = AnalyzeArgs {
            provider: Provider::Presidio,
            input: "/nonexistent/detections.json".to_string(),
            collection_type: None,
            name: None,
            json: false,
        };
        assert_eq!(args.execute(&RiskConfig::default()).await.unwrap(), 5);
    }
}
