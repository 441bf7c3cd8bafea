//! Analysis orchestration
//!
//! Runs a [`PiiDetector`] over texts, reconciles each hit to the canonical
//! taxonomy, assesses it, and aggregates per-text scores into collection
//! statistics.

pub mod detector;
pub mod models;
pub mod service;

pub use detector::{Detection, PiiDetector};
pub use models::{
    AnalysisFailure, AnalysisResult, AnalysisResultItem, AnalysisResultSet, DetectionItem,
    DetectionResult,
};
pub use service::{AnalysisOptions, AnalysisService, CollectionRequest, FailurePolicy};
