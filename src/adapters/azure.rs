//! Azure AI Language PII recognition converter

use super::{reconcile_hits, DetectionAdapter};
use crate::core::analysis::DetectionItem;
use crate::core::reconcile::TypeReconciler;
use crate::domain::{Provider, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RecognizePiiDocument {
    entities: Vec<AzureEntity>,
}

#[derive(Debug, Deserialize)]
struct AzureEntity {
    category: String,
    confidence_score: f64,
    offset: usize,
    length: usize,
}

/// Converts `{"entities": [{"category", "confidence_score", "offset", "length"}]}`
///
/// Azure reports a length rather than an end offset.
#[derive(Debug, Clone)]
pub struct AzureAdapter {
    reconciler: TypeReconciler,
}

impl AzureAdapter {
    pub fn new(reconciler: TypeReconciler) -> Self {
        Self { reconciler }
    }
}

impl DetectionAdapter for AzureAdapter {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    fn convert_analyzed_item(&self, payload: &Value) -> Result<Vec<DetectionItem>> {
        let document = RecognizePiiDocument::deserialize(payload)?;
        reconcile_hits(
            &self.reconciler,
            Provider::Azure,
            document.entities.into_iter().map(|e| {
                (
                    e.category,
                    e.confidence_score,
                    e.offset,
                    e.offset + e.length,
                )
            }),
        )
    }
}
