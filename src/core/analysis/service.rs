//! Analysis service
//!
//! Each text is analyzed independently. Collection analysis fans texts out to
//! blocking workers, then reassembles results by their explicit index before
//! any aggregation happens.

use super::detector::PiiDetector;
use super::models::{
    item_mean, AnalysisFailure, AnalysisResult, AnalysisResultItem, AnalysisResultSet,
    DetectionItem, DetectionResult,
};
use crate::core::assessment::RiskAssessor;
use crate::core::mapping::MappingTable;
use crate::core::reconcile::TypeReconciler;
use crate::core::statistics::CollectionType;
use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Metadata presence flags keyed by flag name
pub type MetadataFlags = BTreeMap<String, bool>;

/// What happens to a collection item whose analysis fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Substitute the Non-Identifiable default and record the failure
    #[default]
    Degrade,
    /// Return the first failing item's error
    FailFast,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Degrade => "degrade",
            FailurePolicy::FailFast => "fail_fast",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = RiskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "degrade" => Ok(FailurePolicy::Degrade),
            "fail_fast" => Ok(FailurePolicy::FailFast),
            _ => Err(RiskError::Validation(format!(
                "Invalid failure policy '{s}'. Must be one of: degrade, fail_fast"
            ))),
        }
    }
}

/// Detector call settings and collection behavior
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub language_code: String,
    /// Wire entity types to restrict detection to
    pub entities: Option<Vec<String>>,
    pub failure_policy: FailurePolicy,
    pub max_concurrency: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            language_code: "en".to_string(),
            entities: None,
            failure_policy: FailurePolicy::Degrade,
            max_concurrency: 4,
        }
    }
}

/// Input to [`AnalysisService::analyze_collection`]
///
/// Exactly one of `texts` and `rows` must be set. Rows are JSON objects with a
/// string `text` and an object `metadata` of booleans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionRequest {
    #[serde(default)]
    pub texts: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Option<Vec<Value>>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub collection_type: CollectionType,
}

/// A validated collection entry
#[derive(Debug, Clone)]
struct CollectionInput {
    text: String,
    metadata: Option<MetadataFlags>,
}

impl CollectionRequest {
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self {
            texts: Some(texts.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn from_rows(rows: Vec<Value>) -> Self {
        Self {
            rows: Some(rows),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = Some(name.into());
        self
    }

    pub fn with_collection_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = collection_type;
        self
    }

    /// Check the request shape without touching a detector
    pub fn validate(&self) -> Result<()> {
        self.inputs().map(|_| ())
    }

    fn inputs(&self) -> Result<Vec<CollectionInput>> {
        match (&self.texts, &self.rows) {
            (Some(_), Some(_)) => Err(RiskError::Validation(
                "Supply either texts or rows, not both".to_string(),
            )),
            (None, None) => Err(RiskError::Validation(
                "Either texts or rows must be supplied".to_string(),
            )),
            (Some(texts), None) => Ok(texts
                .iter()
                .map(|text| CollectionInput {
                    text: text.clone(),
                    metadata: None,
                })
                .collect()),
            (None, Some(rows)) => rows
                .iter()
                .enumerate()
                .map(|(position, row)| parse_row(position, row))
                .collect(),
        }
    }
}

fn parse_row(position: usize, row: &Value) -> Result<CollectionInput> {
    let object = row
        .as_object()
        .ok_or_else(|| RiskError::Validation(format!("Row {position} is not an object")))?;

    let text = object
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RiskError::Validation(format!("Row {position} is missing a string 'text' field"))
        })?;

    let raw_metadata = object
        .get("metadata")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            RiskError::Validation(format!(
                "Row {position} is missing an object 'metadata' field"
            ))
        })?;

    let mut metadata = MetadataFlags::new();
    for (key, value) in raw_metadata {
        let flag = value.as_bool().ok_or_else(|| {
            RiskError::Validation(format!(
                "Row {position} metadata flag '{key}' is not a boolean"
            ))
        })?;
        metadata.insert(key.clone(), flag);
    }

    Ok(CollectionInput {
        text: text.to_string(),
        metadata: Some(metadata),
    })
}

/// Analysis service
///
/// Cheap to clone; the table, reconciler and detector are shared.
#[derive(Clone)]
pub struct AnalysisService {
    reconciler: TypeReconciler,
    assessor: RiskAssessor,
    detector: Arc<dyn PiiDetector>,
    options: AnalysisOptions,
}

impl fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisService")
            .field("provider", &self.detector.provider())
            .field("options", &self.options)
            .finish()
    }
}

impl AnalysisService {
    pub fn new(
        table: Arc<MappingTable>,
        detector: Arc<dyn PiiDetector>,
        mut options: AnalysisOptions,
    ) -> Self {
        options.max_concurrency = options.max_concurrency.max(1);
        Self {
            reconciler: TypeReconciler::new(Arc::clone(&table)),
            assessor: RiskAssessor::new(table),
            detector,
            options,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze one text with optional metadata flags
    ///
    /// Hits without a canonical equivalent are logged and skipped. With no
    /// remaining hits and no set flags, the result holds the single
    /// Non-Identifiable default item.
    pub fn analyze_item(&self, text: &str, metadata: Option<&MetadataFlags>) -> Result<AnalysisResult> {
        self.analyze_item_at(0, text, metadata)
    }

    fn analyze_item_at(
        &self,
        index: usize,
        text: &str,
        metadata: Option<&MetadataFlags>,
    ) -> Result<AnalysisResult> {
        let provider = self.detector.provider();
        let detection = self.detector.detect(
            text,
            &self.options.language_code,
            self.options.entities.as_deref(),
        )?;

        let mut items = Vec::with_capacity(detection.items.len());
        for hit in detection.items {
            let pii_type = match self.reconciler.wire_to_canonical(provider, &hit.entity_type) {
                Ok(pii_type) => pii_type,
                Err(e) if e.is_unsupported_conversion() => {
                    crate::log_reconciliation_skip!(provider, hit.entity_type, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let risk_assessment = self.assessor.assess_type(pii_type)?;
            let located = DetectionItem {
                entity_type: pii_type.as_str().to_string(),
                ..hit
            };
            items.push(AnalysisResultItem::new(located, risk_assessment));
        }

        if let Some(metadata) = metadata {
            items.extend(self.analyze_metadata(metadata)?);
        }

        let mut result = self.summarize_analysis_result_items(items, index)?;
        result.sanitized_text = detection.sanitized_text;
        Ok(result)
    }

    /// Presence markers for every set flag with a canonical equivalent
    pub fn analyze_metadata(&self, metadata: &MetadataFlags) -> Result<Vec<AnalysisResultItem>> {
        let mut items = Vec::new();
        for (key, _) in metadata.iter().filter(|(_, present)| **present) {
            let pii_type = match self.reconciler.metadata_to_canonical(key) {
                Ok(pii_type) => pii_type,
                Err(e) if e.is_unsupported_conversion() => {
                    crate::log_reconciliation_skip!("metadata", key, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let risk_assessment = self.assessor.assess_type(pii_type)?;
            items.push(AnalysisResultItem::new(
                DetectionItem::marker(pii_type),
                risk_assessment,
            ));
        }
        Ok(items)
    }

    /// Wrap items into a result, substituting the default item when empty
    pub fn summarize_analysis_result_items(
        &self,
        mut items: Vec<AnalysisResultItem>,
        index: usize,
    ) -> Result<AnalysisResult> {
        if items.is_empty() {
            items.push(AnalysisResultItem::default());
        }
        Ok(AnalysisResult {
            risk_score_mean: item_mean(&items)?,
            analysis: items,
            index,
            sanitized_text: None,
        })
    }

    /// Analyze a collection of texts or rows
    ///
    /// The request is validated before any detector call. Items run on
    /// blocking workers, at most `max_concurrency` at a time.
    pub async fn analyze_collection(&self, request: CollectionRequest) -> Result<AnalysisResultSet> {
        let inputs = request.inputs()?;
        let started = Instant::now();
        let total = inputs.len();

        let mut outcomes: Vec<(usize, Result<AnalysisResult>)> =
            stream::iter(inputs.into_iter().enumerate())
                .map(|(index, input)| {
                    let service = self.clone();
                    async move {
                        let outcome = tokio::task::spawn_blocking(move || {
                            service.analyze_item_at(index, &input.text, input.metadata.as_ref())
                        })
                        .await
                        .unwrap_or_else(|e| {
                            Err(RiskError::Detector(format!("Analysis worker failed: {e}")))
                        });
                        (index, outcome)
                    }
                })
                .buffer_unordered(self.options.max_concurrency)
                .collect()
                .await;

        outcomes.sort_by_key(|(index, _)| *index);

        let mut analyses = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(result) => analyses.push(result),
                Err(e) => match self.options.failure_policy {
                    FailurePolicy::FailFast => return Err(e),
                    FailurePolicy::Degrade => {
                        crate::log_degraded_item!(index, e);
                        failures.push(AnalysisFailure {
                            index,
                            message: e.to_string(),
                        });
                        analyses.push(AnalysisResult::non_identifiable(index));
                    }
                },
            }
        }

        let set = AnalysisResultSet::from_analyses(
            request.collection_name,
            request.collection_type,
            analyses,
            failures,
        )?;

        crate::log_collection_summary!(
            set.collection_name.as_deref().unwrap_or("unnamed"),
            set.len(),
            set.detection_count,
            set.failures.len(),
            set.risk_score_mean,
            started.elapsed()
        );

        Ok(set)
    }

    /// Assess detections produced out of process
    ///
    /// Entity types must be canonical symbols in any case; unknown types fail
    /// with `UnknownPiiType`.
    pub fn analyze_detection_result(
        &self,
        detection_result: DetectionResult,
        index: usize,
    ) -> Result<AnalysisResult> {
        let items = detection_result
            .detections
            .into_iter()
            .map(|detection| {
                let risk_assessment = self.assessor.assess(&detection.entity_type)?;
                let detection = DetectionItem {
                    entity_type: detection.entity_type.trim().to_uppercase(),
                    ..detection
                };
                Ok(AnalysisResultItem::new(detection, risk_assessment))
            })
            .collect::<Result<Vec<_>>>()?;

        self.summarize_analysis_result_items(items, index)
    }

    /// Aggregate detection results; indices follow input position
    pub fn analyze_detection_collection(
        &self,
        detection_results: Vec<DetectionResult>,
        collection_name: Option<String>,
        collection_type: CollectionType,
    ) -> Result<AnalysisResultSet> {
        let analyses = detection_results
            .into_iter()
            .enumerate()
            .map(|(index, result)| self.analyze_detection_result(result, index))
            .collect::<Result<Vec<_>>>()?;

        AnalysisResultSet::from_analyses(collection_name, collection_type, analyses, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::detector::Detection;
    use crate::domain::{PiiType, Provider, RiskLevel};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns fixed hits for texts containing a trigger word
    struct ScriptedDetector {
        calls: AtomicUsize,
    }

    impl ScriptedDetector {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PiiDetector for ScriptedDetector {
        fn provider(&self) -> Provider {
            Provider::Presidio
        }

        fn detect(
            &self,
            text: &str,
            _language_code: &str,
            _entities: Option<&[String]>,
        ) -> Result<Detection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("boom") {
                return Err(RiskError::Detector("scripted failure".to_string()));
            }
            let mut items = Vec::new();
            if let Some(start) = text.find("ssn") {
                items.push(DetectionItem::new("US_SSN", 0.85, start, start + 3)?);
            }
            if let Some(start) = text.find("nhs") {
                items.push(DetectionItem::new("UK_NHS", 0.9, start, start + 3)?);
            }
            Ok(Detection::new(items).with_sanitized_text(text.replace("ssn", "<REDACTED>")))
        }
    }

    fn service_with(options: AnalysisOptions) -> (AnalysisService, Arc<ScriptedDetector>) {
        let detector = Arc::new(ScriptedDetector::new());
        let table = Arc::new(MappingTable::builtin().unwrap());
        let service = AnalysisService::new(table, detector.clone(), options);
        (service, detector)
    }

    fn service() -> (AnalysisService, Arc<ScriptedDetector>) {
        service_with(AnalysisOptions::default())
    }

    #[test]
    fn test_analyze_item_without_hits_is_non_identifiable() {
        let (service, _) = service();
        let result = service.analyze_item("nothing here", None).unwrap();
        assert_eq!(result.analysis.len(), 1);
        assert_eq!(
            result.analysis[0].risk_assessment.risk_level,
            RiskLevel::NonIdentifiable
        );
        assert!(result.analysis[0].detection.is_none());
        assert_eq!(result.risk_score_mean, 1.0);
    }

    #[test]
    fn test_analyze_item_reconciles_wire_types() {
        let (service, _) = service();
        let result = service.analyze_item("my ssn", None).unwrap();
        assert_eq!(result.detected_types(), vec![PiiType::UsSocialSecurityNumber]);
        let detection = result.analysis[0].detection.as_ref().unwrap();
        assert_eq!(detection.entity_type, "US_SOCIAL_SECURITY_NUMBER");
        assert_eq!((detection.start, detection.end), (3, 6));
        assert_eq!(result.sanitized_text.as_deref(), Some("my <REDACTED>"));
    }

    #[test]
    fn test_analyze_item_skips_unsupported_hits() {
        let (service, _) = service();
        let result = service.analyze_item("nhs only", None).unwrap();
        assert_eq!(result.analysis.len(), 1);
        assert!(result.analysis[0].detection.is_none());
    }

    #[test]
    fn test_metadata_flags_become_markers() {
        let (service, _) = service();
        let metadata = MetadataFlags::from([
            ("screen_name".to_string(), true),
            ("user_id".to_string(), true),
            ("location".to_string(), false),
            ("favorite_color".to_string(), true),
        ]);
        let result = service.analyze_item("plain", Some(&metadata)).unwrap();
        let types = result.detected_types();
        assert_eq!(types.len(), 2);
        assert!(types.contains(&PiiType::ScreenName));
        assert!(types.contains(&PiiType::SocialNetworkProfile));
        for item in &result.analysis {
            let detection = item.detection.as_ref().unwrap();
            assert_eq!((detection.score, detection.start, detection.end), (0.0, 0, 0));
        }
    }

    #[test]
    fn test_summarize_empty_items() {
        let (service, _) = service();
        let result = service.summarize_analysis_result_items(Vec::new(), 7).unwrap();
        assert_eq!(result.index, 7);
        assert_eq!(result.analysis.len(), 1);
        assert_eq!(result.risk_score_mean, 1.0);
    }

    #[tokio::test]
    async fn test_collection_preserves_input_order() {
        let (service, detector) = service_with(AnalysisOptions {
            max_concurrency: 3,
            ..AnalysisOptions::default()
        });
        let texts: Vec<String> = (0..12)
            .map(|i| if i % 3 == 0 { format!("ssn {i}") } else { format!("text {i}") })
            .collect();

        let set = service
            .analyze_collection(CollectionRequest::from_texts(texts).with_name("ordered"))
            .await
            .unwrap();

        assert_eq!(detector.calls.load(Ordering::SeqCst), 12);
        let indices: Vec<usize> = set.analyses.iter().map(|a| a.index).collect();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
        for analysis in &set.analyses {
            let expected = if analysis.index % 3 == 0 { 3.0 } else { 1.0 };
            assert_eq!(analysis.risk_score_mean, expected);
        }
        assert_eq!(set.detection_count, 4);
        assert_eq!(set.collection_name.as_deref(), Some("ordered"));
    }

    #[tokio::test]
    async fn test_collection_rejects_texts_and_rows_before_detecting() {
        let (service, detector) = service();
        let request = CollectionRequest {
            texts: Some(vec!["ssn".to_string()]),
            rows: Some(vec![json!({"text": "ssn", "metadata": {}})]),
            ..CollectionRequest::default()
        };
        let err = service.analyze_collection(request).await.unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_collection_requires_input() {
        let (service, _) = service();
        let err = service
            .analyze_collection(CollectionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_row_fails_before_detecting() {
        let (service, detector) = service();
        let rows = vec![
            json!({"text": "ssn", "metadata": {"name": true}}),
            json!({"text": "ssn"}),
        ];
        let err = service
            .analyze_collection(CollectionRequest::from_rows(rows))
            .await
            .unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rows_fold_in_metadata() {
        let (service, _) = service();
        let rows = vec![
            json!({"text": "hello", "metadata": {"name": true, "url": false}}),
            json!({"text": "hello", "metadata": {}}),
        ];
        let set = service
            .analyze_collection(CollectionRequest::from_rows(rows))
            .await
            .unwrap();
        assert_eq!(set.analyses[0].detected_types(), vec![PiiType::Person]);
        assert_eq!(set.analyses[1].detected_types(), Vec::<PiiType>::new());
        assert_eq!(set.detection_count, 1);
    }

    #[tokio::test]
    async fn test_empty_collection_is_an_aggregation_error() {
        let (service, _) = service();
        let err = service
            .analyze_collection(CollectionRequest::from_texts(Vec::<String>::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, RiskError::Aggregation(_)));
    }

    #[tokio::test]
    async fn test_degrade_policy_records_failures() {
        let (service, _) = service();
        let set = service
            .analyze_collection(CollectionRequest::from_texts(["ssn", "boom", "hi"]))
            .await
            .unwrap();
        assert_eq!(set.failures.len(), 1);
        assert_eq!(set.failures[0].index, 1);
        assert_eq!(set.analyses[1].risk_score_mean, 1.0);
        assert_eq!(set.risk_scores, vec![3.0, 1.0, 1.0]);
    }

    #[tokio::test]
    async fn test_fail_fast_policy_returns_error() {
        let (service, _) = service_with(AnalysisOptions {
            failure_policy: FailurePolicy::FailFast,
            ..AnalysisOptions::default()
        });
        let err = service
            .analyze_collection(CollectionRequest::from_texts(["ssn", "boom"]))
            .await
            .unwrap_err();
        assert!(matches!(err, RiskError::Detector(_)));
    }

    #[test]
    fn test_analyze_detection_collection() {
        let (service, detector) = service();
        let results = vec![
            DetectionResult::new(
                vec![
                    DetectionItem::new("us_social_security_number", 0.9, 0, 11).unwrap(),
                    DetectionItem::new("RACE", 0.7, 12, 20).unwrap(),
                ],
                9,
            ),
            DetectionResult::default(),
        ];
        let set = service
            .analyze_detection_collection(results, None, CollectionType::Sample)
            .unwrap();

        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
        assert_eq!(set.analyses[0].index, 0);
        assert_eq!(set.analyses[0].risk_score_mean, 2.5);
        assert_eq!(set.analyses[1].risk_score_mean, 1.0);
        assert_eq!(
            set.analyses[0].analysis[0].detection.as_ref().unwrap().entity_type,
            "US_SOCIAL_SECURITY_NUMBER"
        );
        assert_eq!(set.detection_count, 2);
    }

    #[test]
    fn test_analyze_detection_result_rejects_unknown_type() {
        let (service, _) = service();
        let result = DetectionResult::new(
            vec![DetectionItem::new("FAVORITE_COLOR", 0.9, 0, 3).unwrap()],
            0,
        );
        assert!(matches!(
            service.analyze_detection_result(result, 0),
            Err(RiskError::UnknownPiiType(_))
        ));
    }

    #[test]
    fn test_failure_policy_parsing() {
        assert_eq!("degrade".parse::<FailurePolicy>().unwrap(), FailurePolicy::Degrade);
        assert_eq!("Fail-Fast".parse::<FailurePolicy>().unwrap(), FailurePolicy::FailFast);
        assert!(matches!(
            "retry".parse::<FailurePolicy>(),
            Err(RiskError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_is_raised_to_one() {
        let (service, _) = service_with(AnalysisOptions {
            max_concurrency: 0,
            ..AnalysisOptions::default()
        });
        assert_eq!(service.options().max_concurrency, 1);
    }
}
