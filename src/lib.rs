// pii-risk - PII Type Mapping & Risk Assessment Engine
// Copyright (c) 2025 pii-risk Contributors
// Licensed under the MIT License

//! # pii-risk - PII Type Mapping & Risk Assessment Engine
//!
//! pii-risk maps PII detections from Presidio, Azure AI Language and AWS
//! Comprehend onto one canonical taxonomy and scores how identifying they are.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Mapping** every canonical PII type to its identifiability level, its
//!   cluster and its NIST, DHS and HIPAA categories
//! - **Reconciling** vendor entity types with the canonical taxonomy, in both
//!   directions
//! - **Assessing** single detections, texts and whole collections, with
//!   mean, mode, median, variance and standard deviation of risk scores
//! - **Detecting** common PII with a built-in regex detector that also
//!   produces redacted text
//!
//! ## Architecture
//!
//! pii-risk follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (mapping, reconciliation, assessment, statistics, analysis)
//! - [`adapters`] - Vendor response converters and the pattern detector
//! - [`domain`] - Closed taxonomies, errors and the result alias
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pii_risk::adapters::PatternDetector;
//! use pii_risk::core::{AnalysisOptions, AnalysisService, CollectionRequest, MappingTable};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = Arc::new(MappingTable::builtin()?);
//!     let detector = Arc::new(PatternDetector::new()?);
//!     let service = AnalysisService::new(table, detector, AnalysisOptions::default());
//!
//!     let request = CollectionRequest::from_texts(["Hi", "example@example.com"]);
//!     let set = service.analyze_collection(request).await?;
//!
//!     println!("Mean risk score: {}", set.risk_score_mean);
//!     Ok(())
//! }
//! ```
//!
//! ## Risk Assessment
//!
//! ```rust
//! use pii_risk::core::{MappingTable, RiskAssessor};
//! use std::sync::Arc;
//!
//! # fn example() -> pii_risk::domain::Result<()> {
//! let assessor = RiskAssessor::new(Arc::new(MappingTable::builtin()?));
//! let list = assessor.assess_and_score(&["EMAIL_ADDRESS", "AGE"])?;
//! assert_eq!(list.risk_assessments.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::RiskError`]. A missing cross-reference is
//! [`domain::RiskError::UnsupportedConversion`] and is skipped during
//! reconciliation; an unknown canonical type is
//! [`domain::RiskError::UnknownPiiType`] and always propagates.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
