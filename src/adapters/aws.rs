//! AWS Comprehend `DetectPiiEntities` converter

use super::{reconcile_hits, DetectionAdapter};
use crate::core::analysis::DetectionItem;
use crate::core::reconcile::TypeReconciler;
use crate::domain::{Provider, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectPiiResponse {
    entities: Vec<ComprehendEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ComprehendEntity {
    #[serde(rename = "Type")]
    entity_type: String,
    score: f64,
    begin_offset: usize,
    end_offset: usize,
}

/// Converts `{"Entities": [{"Type", "Score", "BeginOffset", "EndOffset"}]}`
#[derive(Debug, Clone)]
pub struct AwsComprehendAdapter {
    reconciler: TypeReconciler,
}

impl AwsComprehendAdapter {
    pub fn new(reconciler: TypeReconciler) -> Self {
        Self { reconciler }
    }
}

impl DetectionAdapter for AwsComprehendAdapter {
    fn provider(&self) -> Provider {
        Provider::Aws
    }

    fn convert_analyzed_item(&self, payload: &Value) -> Result<Vec<DetectionItem>> {
        let response = DetectPiiResponse::deserialize(payload)?;
        reconcile_hits(
            &self.reconciler,
            Provider::Aws,
            response
                .entities
                .into_iter()
                .map(|e| (e.entity_type, e.score, e.begin_offset, e.end_offset)),
        )
    }
}
