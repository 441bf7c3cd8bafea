//! Core business logic for pii-risk.
//!
//! # Modules
//!
//! - [`mapping`] - The canonical type mapping table
//! - [`reconcile`] - Translation between canonical and provider entity types
//! - [`assessment`] - Risk assessment of canonical types
//! - [`statistics`] - Numeric aggregation over risk scores
//! - [`analysis`] - Detector orchestration and collection aggregation
//!
//! # Example
//!
//! ```rust
//! use pii_risk::core::{MappingTable, RiskAssessor, TypeReconciler};
//! use pii_risk::domain::{PiiType, Provider};
//! use std::sync::Arc;
//!
//! # fn example() -> pii_risk::domain::Result<()> {
//! let table = Arc::new(MappingTable::builtin()?);
//!
//! let reconciler = TypeReconciler::new(Arc::clone(&table));
//! let pii_type = reconciler.wire_to_canonical(Provider::Aws, "SSN")?;
//! assert_eq!(pii_type, PiiType::UsSocialSecurityNumber);
//!
//! let assessor = RiskAssessor::new(table);
//! let scored = assessor.assess_and_score(&["US_SOCIAL_SECURITY_NUMBER", "RACE"])?;
//! assert_eq!(scored.average_risk_score, 2.5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod analysis;
pub mod assessment;
pub mod mapping;
pub mod reconcile;
pub mod statistics;

pub use analysis::{
    AnalysisOptions, AnalysisResult, AnalysisResultItem, AnalysisResultSet, AnalysisService,
    CollectionRequest, Detection, DetectionItem, DetectionResult, FailurePolicy, PiiDetector,
};
pub use assessment::{RiskAssessment, RiskAssessmentList, RiskAssessor};
pub use mapping::{MappingTable, PiiMapping};
pub use reconcile::TypeReconciler;
pub use statistics::{CollectionType, RiskScoreSummary};
