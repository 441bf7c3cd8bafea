//! Risk assessment engine
//!
//! Turns canonical type names into full risk assessment records by table lookup.
//! Unknown names always fail; there is no silent fallback to a default level.

use crate::core::mapping::{MappingTable, PiiMapping};
use crate::core::statistics;
use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use crate::domain::{
    ClusterMembershipType, DhsCategory, HipaaCategory, NistCategory, PiiType, RiskLevel,
    RiskLevelDefinition,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Classification of one detection or metadata flag
///
/// The default value is the "nothing detected" placeholder: level 1 with no
/// type and no classification axes.
///
/// Classification axes serialize as their labels, like `risk_level_definition`.
/// Deserialization accepts labels or symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub pii_type_detected: Option<PiiType>,
    pub risk_level: RiskLevel,
    pub risk_level_definition: RiskLevelDefinition,
    #[serde(serialize_with = "serialize_label")]
    pub cluster_membership_type: Option<ClusterMembershipType>,
    #[serde(serialize_with = "serialize_label")]
    pub hipaa_category: Option<HipaaCategory>,
    #[serde(serialize_with = "serialize_label")]
    pub dhs_category: Option<DhsCategory>,
    #[serde(serialize_with = "serialize_label")]
    pub nist_category: Option<NistCategory>,
}

fn serialize_label<T, S>(value: &Option<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    match value {
        Some(axis) => serializer.collect_str(axis),
        None => serializer.serialize_none(),
    }
}

impl RiskAssessment {
    pub fn from_mapping(mapping: &PiiMapping) -> Self {
        Self {
            pii_type_detected: Some(mapping.pii_type),
            risk_level: mapping.risk_level,
            risk_level_definition: mapping.risk_level.definition(),
            cluster_membership_type: Some(mapping.cluster_membership_type),
            hipaa_category: Some(mapping.hipaa_category),
            dhs_category: Some(mapping.dhs_category),
            nist_category: Some(mapping.nist_category),
        }
    }

    /// Risk level as a float score
    pub fn score(&self) -> f64 {
        self.risk_level.score()
    }

    /// Whether this is the Non-Identifiable placeholder
    pub fn is_default(&self) -> bool {
        self.pii_type_detected.is_none()
    }
}

/// Assessments plus their average score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentList {
    pub risk_assessments: Vec<RiskAssessment>,
    pub average_risk_score: f64,
}

/// Arithmetic mean of risk levels
///
/// Fails on an empty slice; callers substitute the default assessment first.
pub fn average_risk_score(assessments: &[RiskAssessment]) -> Result<f64> {
    if assessments.is_empty() {
        return Err(RiskError::Aggregation(
            "Cannot average the risk score of zero assessments".to_string(),
        ));
    }
    let scores: Vec<f64> = assessments.iter().map(RiskAssessment::score).collect();
    statistics::mean(&scores)
}

/// Risk assessor over a shared mapping table
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    table: Arc<MappingTable>,
}

impl RiskAssessor {
    pub fn new(table: Arc<MappingTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Assesses a canonical type name, upper-casing it first
    ///
    /// # Examples
    ///
    /// ```
    /// use pii_risk::core::{MappingTable, RiskAssessor};
    /// use pii_risk::domain::RiskLevel;
    /// use std::sync::Arc;
    ///
    /// let assessor = RiskAssessor::new(Arc::new(MappingTable::builtin().unwrap()));
    /// let assessment = assessor.assess("us_social_security_number").unwrap();
    /// assert_eq!(assessment.risk_level, RiskLevel::Identifiable);
    /// ```
    pub fn assess(&self, name: &str) -> Result<RiskAssessment> {
        let mapping = self.table.lookup_name(name)?;
        Ok(RiskAssessment::from_mapping(mapping))
    }

    pub fn assess_type(&self, pii_type: PiiType) -> Result<RiskAssessment> {
        let mapping = self.table.lookup(pii_type)?;
        Ok(RiskAssessment::from_mapping(mapping))
    }

    /// Element-wise [`assess`](Self::assess); keeps order and duplicates
    pub fn assess_many<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<RiskAssessment>> {
        names.iter().map(|name| self.assess(name.as_ref())).collect()
    }

    pub fn average_risk_score(&self, assessments: &[RiskAssessment]) -> Result<f64> {
        average_risk_score(assessments)
    }

    pub fn assess_and_score<S: AsRef<str>>(&self, names: &[S]) -> Result<RiskAssessmentList> {
        let risk_assessments = self.assess_many(names)?;
        let average_risk_score = average_risk_score(&risk_assessments)?;
        Ok(RiskAssessmentList {
            risk_assessments,
            average_risk_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessor() -> RiskAssessor {
        RiskAssessor::new(Arc::new(MappingTable::builtin().unwrap()))
    }

    #[test]
    fn test_every_canonical_type_assesses() {
        let assessor = assessor();
        for pii_type in PiiType::ALL {
            let assessment = assessor.assess(pii_type.as_str()).unwrap();
            assert_eq!(assessment.pii_type_detected, Some(*pii_type));
            assert_eq!(
                assessment.risk_level_definition,
                assessment.risk_level.definition()
            );
        }
    }

    #[test]
    fn test_assess_ssn() {
        let assessment = assessor().assess("US_SOCIAL_SECURITY_NUMBER").unwrap();
        assert_eq!(assessment.risk_level, RiskLevel::Identifiable);
        assert_eq!(assessment.risk_level_definition.label(), "Identifiable");
        assert_eq!(
            assessment.hipaa_category.unwrap().label(),
            "Protected Health Information"
        );
        assert_eq!(assessment.nist_category, Some(NistCategory::DirectlyPii));
    }

    #[test]
    fn test_assess_unknown_type() {
        let err = assessor().assess("FAVORITE_COLOR").unwrap_err();
        assert!(matches!(err, RiskError::UnknownPiiType(_)));
    }

    #[test]
    fn test_assess_many_keeps_order_and_duplicates() {
        let assessments = assessor()
            .assess_many(&["RACE", "email_address", "RACE"])
            .unwrap();
        let types: Vec<_> = assessments
            .iter()
            .map(|a| a.pii_type_detected.unwrap())
            .collect();
        assert_eq!(types, vec![PiiType::Race, PiiType::EmailAddress, PiiType::Race]);
    }

    #[test]
    fn test_average_of_mixed_levels() {
        let assessor = assessor();
        let assessments = assessor
            .assess_many(&["US_SOCIAL_SECURITY_NUMBER", "RACE"])
            .unwrap();
        assert_eq!(assessor.average_risk_score(&assessments).unwrap(), 2.5);
    }

    #[test]
    fn test_average_of_equal_levels_is_exact() {
        let scored = assessor()
            .assess_and_score(&["US_SOCIAL_SECURITY_NUMBER", "PHONE_NUMBER"])
            .unwrap();
        assert_eq!(scored.average_risk_score, 3.0);
        assert_eq!(scored.risk_assessments.len(), 2);
    }

    #[test]
    fn test_average_of_nothing_is_an_error() {
        assert!(matches!(
            average_risk_score(&[]),
            Err(RiskError::Aggregation(_))
        ));
    }

    #[test]
    fn test_default_assessment() {
        let assessment = RiskAssessment::default();
        assert_eq!(assessment.risk_level, RiskLevel::NonIdentifiable);
        assert_eq!(
            assessment.risk_level_definition,
            RiskLevelDefinition::NonIdentifiable
        );
        assert!(assessment.is_default());
        assert_eq!(average_risk_score(&[assessment]).unwrap(), 1.0);
    }

    #[test]
    fn test_assessment_serializes_axis_labels() {
        let assessment = assessor().assess("US_SOCIAL_SECURITY_NUMBER").unwrap();
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["pii_type_detected"], "US_SOCIAL_SECURITY_NUMBER");
        assert_eq!(json["risk_level"], 3);
        assert_eq!(json["risk_level_definition"], "Identifiable");
        assert_eq!(json["hipaa_category"], "Protected Health Information");
        assert_eq!(json["cluster_membership_type"], "Secure Identifiers");
        assert_eq!(json["nist_category"], "Directly PII");
        assert_eq!(json["dhs_category"], "Stand Alone PII");

        let parsed: RiskAssessment = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, assessment);
    }

    #[test]
    fn test_default_assessment_serializes_null_axes() {
        let json = serde_json::to_value(RiskAssessment::default()).unwrap();
        assert!(json["pii_type_detected"].is_null());
        assert!(json["hipaa_category"].is_null());
        assert_eq!(json["risk_level_definition"], "Non-Identifiable");
    }
}
