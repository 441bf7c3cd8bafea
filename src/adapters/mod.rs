//! External system integrations for pii-risk.
//!
//! - [`aws`], [`azure`], [`presidio`] - Converters from vendor detection
//!   payloads to canonical [`DetectionItem`]s
//! - [`pattern`] - The built-in regex [`PiiDetector`](crate::core::PiiDetector)
//!
//! # Design Pattern
//!
//! Vendor converters never call a vendor service. They take the JSON a caller
//! already received and reconcile every entity type to its canonical symbol so
//! the result can go straight to
//! [`AnalysisService::analyze_detection_collection`](crate::core::AnalysisService::analyze_detection_collection).
//!
//! ```rust
//! use pii_risk::adapters::create_adapter;
//! use pii_risk::core::MappingTable;
//! use pii_risk::domain::Provider;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn example() -> pii_risk::domain::Result<()> {
//! let table = Arc::new(MappingTable::builtin()?);
//! let adapter = create_adapter(Provider::Aws, table);
//!
//! let payload = json!({"Entities": [
//!     {"Type": "SSN", "Score": 0.99, "BeginOffset": 8, "EndOffset": 19}
//! ]});
//! let items = adapter.convert_analyzed_item(&payload)?;
//! assert_eq!(items[0].entity_type, "US_SOCIAL_SECURITY_NUMBER");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod aws;
pub mod azure;
pub mod pattern;
pub mod presidio;

pub use aws::AwsComprehendAdapter;
pub use azure::AzureAdapter;
pub use pattern::{PatternDetector, PatternRegistry};
pub use presidio::PresidioAdapter;

use crate::core::analysis::{DetectionItem, DetectionResult};
use crate::core::mapping::MappingTable;
use crate::core::reconcile::TypeReconciler;
use crate::domain::{Provider, Result};
use serde_json::Value;
use std::sync::Arc;

/// Converter from one vendor's detection payload
pub trait DetectionAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Convert the payload for a single text
    ///
    /// # Errors
    ///
    /// `Serialization` when the payload does not have the vendor's shape.
    fn convert_analyzed_item(&self, payload: &Value) -> Result<Vec<DetectionItem>>;

    /// Convert one payload per text; indices follow position
    fn convert_analyzed_collection(&self, payloads: &[Value]) -> Result<Vec<DetectionResult>> {
        payloads
            .iter()
            .enumerate()
            .map(|(index, payload)| {
                Ok(DetectionResult::new(self.convert_analyzed_item(payload)?, index))
            })
            .collect()
    }
}

/// Build the converter for `provider`
pub fn create_adapter(provider: Provider, table: Arc<MappingTable>) -> Box<dyn DetectionAdapter> {
    let reconciler = TypeReconciler::new(table);
    match provider {
        Provider::Presidio => Box::new(PresidioAdapter::new(reconciler)),
        Provider::Azure => Box::new(AzureAdapter::new(reconciler)),
        Provider::Aws => Box::new(AwsComprehendAdapter::new(reconciler)),
    }
}

/// Reconcile raw vendor hits, dropping those with no canonical equivalent
pub(crate) fn reconcile_hits<I>(
    reconciler: &TypeReconciler,
    provider: Provider,
    hits: I,
) -> Result<Vec<DetectionItem>>
where
    I: IntoIterator<Item = (String, f64, usize, usize)>,
{
    let mut items = Vec::new();
    for (wire, score, start, end) in hits {
        match reconciler.wire_to_canonical(provider, &wire) {
            Ok(pii_type) => items.push(DetectionItem::new(pii_type.as_str(), score, start, end)?),
            Err(e) if e.is_unsupported_conversion() => {
                crate::log_reconciliation_skip!(provider, wire, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> Arc<MappingTable> {
        Arc::new(MappingTable::builtin().unwrap())
    }

    #[test]
    fn test_create_adapter_matches_provider() {
        for provider in Provider::ALL {
            assert_eq!(create_adapter(*provider, table()).provider(), *provider);
        }
    }

    #[test]
    fn test_collection_indices_follow_position() {
        let adapter = create_adapter(Provider::Presidio, table());
        let payloads = vec![
            json!([]),
            json!([{"entity_type": "EMAIL_ADDRESS", "score": 1.0, "start": 0, "end": 5}]),
        ];
        let results = adapter.convert_analyzed_collection(&payloads).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].index, 0);
        assert!(results[0].detections.is_empty());
        assert_eq!(results[1].index, 1);
        assert_eq!(results[1].detections[0].entity_type, "EMAIL_ADDRESS");
    }

    #[test]
    fn test_reconcile_hits_rejects_inverted_span() {
        let reconciler = TypeReconciler::new(table());
        let hits = vec![("EMAIL_ADDRESS".to_string(), 0.9, 9, 2)];
        assert!(reconcile_hits(&reconciler, Provider::Presidio, hits).is_err());
    }
}
