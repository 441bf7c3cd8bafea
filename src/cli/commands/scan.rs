//! Scan command implementation
//!
//! Runs the built-in pattern detector over a collection of texts. The input
//! file is a JSON array of strings, or of `{"text", "metadata"}` rows.

use super::analyze::read_payloads;
use super::{build_service, print_result_set, report_failure};
use crate::config::RiskConfig;
use crate::core::analysis::{AnalysisResultSet, CollectionRequest};
use crate::core::statistics::CollectionType;
use crate::domain::{Result, RiskError};
use clap::Args;
use serde_json::Value;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// JSON file with the texts or rows to scan
    #[arg(short, long, required_unless_present = "text", conflicts_with = "text")]
    pub input: Option<String>,

    /// Inline text to scan (repeatable)
    #[arg(short, long)]
    pub text: Vec<String>,

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

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config: &RiskConfig) -> anyhow::Result<i32> {
        let set = match self.run(config).await {
            Ok(set) => set,
            Err(e) => return Ok(report_failure("Scan failed", &e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&set)?);
        } else {
            println!("🔍 Scanned {} text(s)", set.len());
            println!();
            print_result_set(&set, true);
        }

        Ok(0)
    }

    async fn run(&self, config: &RiskConfig) -> Result<AnalysisResultSet> {
        let request = self
            .request()?
            .with_collection_type(self.collection_type.unwrap_or(config.analysis.collection_type));
        let request = match self.name {
            Some(ref name) => request.with_name(name.clone()),
            None => request,
        };

        tracing::info!(
            collection_type = %request.collection_type,
            "Scanning collection with pattern detector"
        );

        build_service(config)?.analyze_collection(request).await
    }

    fn request(&self) -> Result<CollectionRequest> {
        let Some(ref input) = self.input else {
            return Ok(CollectionRequest::from_texts(self.text.iter().cloned()));
        };

        let values = read_payloads(input)?;
        if values.iter().all(Value::is_string) {
            let texts = values
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string));
            Ok(CollectionRequest::from_texts(texts))
        } else if values.iter().all(Value::is_object) {
            Ok(CollectionRequest::from_rows(values))
        } else {
            Err(RiskError::Validation(format!(
                "{input} must hold only strings or only row objects"
            )))
        }
    }
}
