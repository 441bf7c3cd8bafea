//! Detection and analysis result models

use crate::core::assessment::RiskAssessment;
use crate::core::statistics::{self, CollectionType, RiskScoreSummary};
use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use crate::domain::PiiType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single located hit in a text
///
/// `entity_type` is whatever the producer emits. Detector output carries
/// provider wire values; analysis output and converted vendor payloads carry
/// canonical symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionItem {
    pub entity_type: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

impl DetectionItem {
    pub fn new(entity_type: impl Into<String>, score: f64, start: usize, end: usize) -> Result<Self> {
        let entity_type = entity_type.into();
        if start > end {
            return Err(RiskError::Validation(format!(
                "Detection of {entity_type} ends ({end}) before it starts ({start})"
            )));
        }
        if !(0.0..=1.0).contains(&score) {
            return Err(RiskError::Validation(format!(
                "Detection of {entity_type} has confidence {score} outside [0, 1]"
            )));
        }
        Ok(Self {
            entity_type,
            score,
            start,
            end,
        })
    }

    /// Presence marker for a metadata flag: zero score, zero offsets
    pub fn marker(pii_type: PiiType) -> Self {
        Self {
            entity_type: pii_type.as_str().to_string(),
            score: 0.0,
            start: 0,
            end: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Detections for one text, tagged with its position in a collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub detections: Vec<DetectionItem>,
    #[serde(default)]
    pub index: usize,
}

impl DetectionResult {
    pub fn new(detections: Vec<DetectionItem>, index: usize) -> Self {
        Self { detections, index }
    }
}

/// One detection paired with its assessment
///
/// `detection` is `None` only for the Non-Identifiable placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResultItem {
    pub detection: Option<DetectionItem>,
    pub risk_assessment: RiskAssessment,
}

impl AnalysisResultItem {
    pub fn new(detection: DetectionItem, risk_assessment: RiskAssessment) -> Self {
        Self {
            detection: Some(detection),
            risk_assessment,
        }
    }

    pub fn is_detection(&self) -> bool {
        self.detection.is_some()
    }
}

/// All analysis items for one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: Vec<AnalysisResultItem>,
    pub index: usize,
    pub risk_score_mean: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized_text: Option<String>,
}

impl AnalysisResult {
    /// Placeholder result used when an item is degraded
    pub fn non_identifiable(index: usize) -> Self {
        let item = AnalysisResultItem::default();
        Self {
            risk_score_mean: item.risk_assessment.score(),
            analysis: vec![item],
            index,
            sanitized_text: None,
        }
    }

    /// Canonical types of the real detections, in item order
    pub fn detected_types(&self) -> Vec<PiiType> {
        self.analysis
            .iter()
            .filter(|item| item.is_detection())
            .filter_map(|item| item.risk_assessment.pii_type_detected)
            .collect()
    }

    pub fn detection_count(&self) -> usize {
        self.analysis.iter().filter(|item| item.is_detection()).count()
    }
}

/// A collection item that was replaced by the Non-Identifiable default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub index: usize,
    pub message: String,
}

/// Analysis of a whole collection plus its risk score statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResultSet {
    pub collection_name: Option<String>,
    pub collection_type: CollectionType,
    pub analyses: Vec<AnalysisResult>,
    pub risk_scores: Vec<f64>,
    pub risk_score_mean: f64,
    pub risk_score_mode: f64,
    pub risk_score_median: f64,
    pub risk_score_variance: f64,
    pub risk_score_standard_deviation: f64,
    pub detection_count: usize,
    pub detected_pii_types: BTreeSet<PiiType>,
    pub detected_pii_type_frequencies: BTreeMap<PiiType, usize>,
    #[serde(default)]
    pub failures: Vec<AnalysisFailure>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResultSet {
    /// Aggregate per-item analyses, which must already be in index order
    ///
    /// # Errors
    ///
    /// `Aggregation` when `analyses` is empty, or for sample statistics over a
    /// single item.
    pub fn from_analyses(
        collection_name: Option<String>,
        collection_type: CollectionType,
        analyses: Vec<AnalysisResult>,
        failures: Vec<AnalysisFailure>,
    ) -> Result<Self> {
        if analyses.is_empty() {
            return Err(RiskError::Aggregation(
                "Cannot aggregate an empty collection".to_string(),
            ));
        }

        let risk_scores: Vec<f64> = analyses.iter().map(|a| a.risk_score_mean).collect();
        let summary = RiskScoreSummary::from_scores(&risk_scores, collection_type)?;

        let mut detected_pii_type_frequencies = BTreeMap::new();
        for pii_type in analyses.iter().flat_map(AnalysisResult::detected_types) {
            *detected_pii_type_frequencies.entry(pii_type).or_insert(0) += 1;
        }
        let detected_pii_types = detected_pii_type_frequencies.keys().copied().collect();
        let detection_count = analyses.iter().map(AnalysisResult::detection_count).sum();

        Ok(Self {
            collection_name,
            collection_type,
            analyses,
            risk_scores,
            risk_score_mean: summary.mean,
            risk_score_mode: summary.mode,
            risk_score_median: summary.median,
            risk_score_variance: summary.variance,
            risk_score_standard_deviation: summary.standard_deviation,
            detection_count,
            detected_pii_types,
            detected_pii_type_frequencies,
            failures,
            analyzed_at: Utc::now(),
        })
    }

    /// The `n` most frequent types, ties broken by taxonomy order
    pub fn most_common_types(&self, n: usize) -> Vec<(PiiType, usize)> {
        let mut ranked: Vec<(PiiType, usize)> = self
            .detected_pii_type_frequencies
            .iter()
            .map(|(pii_type, count)| (*pii_type, *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    pub fn summary(&self) -> RiskScoreSummary {
        RiskScoreSummary {
            mean: self.risk_score_mean,
            mode: self.risk_score_mode,
            median: self.risk_score_median,
            variance: self.risk_score_variance,
            standard_deviation: self.risk_score_standard_deviation,
        }
    }

    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Mean risk level across the items of one text
pub(crate) fn item_mean(items: &[AnalysisResultItem]) -> Result<f64> {
    let scores: Vec<f64> = items.iter().map(|item| item.risk_assessment.score()).collect();
    statistics::mean(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    fn assessed(pii_type: PiiType, level: RiskLevel) -> AnalysisResultItem {
        AnalysisResultItem::new(
            DetectionItem::new(pii_type.as_str(), 0.9, 0, 4).unwrap(),
            RiskAssessment {
                pii_type_detected: Some(pii_type),
                risk_level: level,
                risk_level_definition: level.definition(),
                ..RiskAssessment::default()
            },
        )
    }

    fn result(index: usize, items: Vec<AnalysisResultItem>) -> AnalysisResult {
        AnalysisResult {
            risk_score_mean: item_mean(&items).unwrap(),
            analysis: items,
            index,
            sanitized_text: None,
        }
    }

    #[test]
    fn test_detection_item_rejects_inverted_span() {
        assert!(matches!(
            DetectionItem::new("EMAIL_ADDRESS", 0.5, 10, 2),
            Err(RiskError::Validation(_))
        ));
        assert!(DetectionItem::new("EMAIL_ADDRESS", 0.5, 3, 3).unwrap().is_empty());
    }

    #[test]
    fn test_detection_item_rejects_bad_confidence() {
        assert!(DetectionItem::new("URL", 1.5, 0, 1).is_err());
        assert!(DetectionItem::new("URL", f64::NAN, 0, 1).is_err());
    }

    #[test]
    fn test_marker_has_zero_score_and_offsets() {
        let marker = DetectionItem::marker(PiiType::ScreenName);
        assert_eq!(marker.entity_type, "SCREEN_NAME");
        assert_eq!((marker.score, marker.start, marker.end), (0.0, 0, 0));
    }

    #[test]
    fn test_non_identifiable_placeholder() {
        let placeholder = AnalysisResult::non_identifiable(4);
        assert_eq!(placeholder.index, 4);
        assert_eq!(placeholder.analysis.len(), 1);
        assert_eq!(placeholder.risk_score_mean, 1.0);
        assert_eq!(placeholder.detection_count(), 0);
        assert!(placeholder.detected_types().is_empty());
    }

    #[test]
    fn test_result_set_aggregation() {
        let analyses = vec![
            result(0, vec![AnalysisResultItem::default()]),
            result(
                1,
                vec![
                    assessed(PiiType::EmailAddress, RiskLevel::Identifiable),
                    assessed(PiiType::Race, RiskLevel::SemiIdentifiable),
                ],
            ),
            result(2, vec![assessed(PiiType::EmailAddress, RiskLevel::Identifiable)]),
        ];

        let set = AnalysisResultSet::from_analyses(
            Some("posts".to_string()),
            CollectionType::Population,
            analyses,
            Vec::new(),
        )
        .unwrap();

        assert_eq!(set.risk_scores, vec![1.0, 2.5, 3.0]);
        assert_eq!(set.risk_score_median, 2.5);
        assert_eq!(set.risk_score_mode, 1.0);
        assert_eq!(set.detection_count, 3);
        assert_eq!(
            set.detected_pii_types,
            BTreeSet::from([PiiType::EmailAddress, PiiType::Race])
        );
        assert_eq!(set.detected_pii_type_frequencies[&PiiType::EmailAddress], 2);
        assert_eq!(
            set.most_common_types(1),
            vec![(PiiType::EmailAddress, 2)]
        );
        assert!(!set.has_failures());
    }

    #[test]
    fn test_result_set_rejects_empty_collection() {
        let err = AnalysisResultSet::from_analyses(
            None,
            CollectionType::Population,
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RiskError::Aggregation(_)));
    }

    #[test]
    fn test_result_set_serializes_symbols() {
        let set = AnalysisResultSet::from_analyses(
            None,
            CollectionType::Sample,
            vec![
                result(0, vec![assessed(PiiType::Url, RiskLevel::SemiIdentifiable)]),
                result(1, vec![AnalysisResultItem::default()]),
            ],
            Vec::new(),
        )
        .unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["collection_type"], "sample");
        assert_eq!(json["detected_pii_types"][0], "URL");
        assert_eq!(json["detected_pii_type_frequencies"]["URL"], 1);
    }
}
