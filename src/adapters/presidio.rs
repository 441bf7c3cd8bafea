//! Presidio analyzer result converter

use super::{reconcile_hits, DetectionAdapter};
use crate::core::analysis::DetectionItem;
use crate::core::reconcile::TypeReconciler;
use crate::domain::{Provider, Result};
use serde::Deserialize;
use serde_json::Value;

/// One `RecognizerResult`
#[derive(Debug, Deserialize)]
struct RecognizerResult {
    entity_type: String,
    score: f64,
    start: usize,
    end: usize,
}

/// Converts `[{"entity_type", "score", "start", "end"}]`
#[derive(Debug, Clone)]
pub struct PresidioAdapter {
    reconciler: TypeReconciler,
}

impl PresidioAdapter {
    pub fn new(reconciler: TypeReconciler) -> Self {
        Self { reconciler }
    }
}

impl DetectionAdapter for PresidioAdapter {
    fn provider(&self) -> Provider {
        Provider::Presidio
    }

    fn convert_analyzed_item(&self, payload: &Value) -> Result<Vec<DetectionItem>> {
        let results = Vec::<RecognizerResult>::deserialize(payload)?;
        reconcile_hits(
            &self.reconciler,
            Provider::Presidio,
            results
                .into_iter()
                .map(|r| (r.entity_type, r.score, r.start, r.end)),
        )
    }
}
