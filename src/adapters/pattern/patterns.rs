//! Pattern library for the regex detector

use crate::domain::{PresidioEntityType, Result, RiskError};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Embedded default library
const DEFAULT_PATTERNS: &str = include_str!("../../../data/pii_patterns.toml");

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this entity type
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
    /// Presidio wire value reported for matches
    pub entity_type: String,
    /// Language codes this definition applies to; empty means all
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Table name the pattern came from
    pub name: String,
    pub regex: Regex,
    pub entity_type: PresidioEntityType,
    pub confidence: f64,
    pub languages: Vec<String>,
}

impl CompiledPattern {
    /// Presidio wire value to report
    pub fn wire_value(&self) -> &'static str {
        self.entity_type.wire_value()
    }

    pub fn applies_to(&self, language_code: &str) -> bool {
        self.languages.is_empty()
            || self
                .languages
                .iter()
                .any(|language| language.eq_ignore_ascii_case(language_code))
    }
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Compiled pattern library
///
/// Patterns keep the name order of the library file so detection output is
/// stable across runs.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RiskError::Configuration(format!(
                "Failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            RiskError::Configuration(format!("Failed to parse pattern library TOML: {e}"))
        })?;

        let mut patterns = Vec::new();

        for (name, def) in library.patterns {
            let entity_type = PresidioEntityType::from_wire(&def.entity_type)
                .or_else(|| PresidioEntityType::from_symbol(&def.entity_type))
                .ok_or_else(|| {
                    RiskError::Configuration(format!(
                        "Invalid entity type in pattern '{name}': {}",
                        def.entity_type
                    ))
                })?;

            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(RiskError::Configuration(format!(
                    "Confidence for pattern '{name}' must be between 0.0 and 1.0, got {}",
                    def.confidence
                )));
            }

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    RiskError::Configuration(format!(
                        "Invalid regex in pattern '{name}': {pattern_str} ({e})"
                    ))
                })?;

                patterns.push(CompiledPattern {
                    name: name.clone(),
                    regex,
                    entity_type,
                    confidence: def.confidence,
                    languages: def.languages.clone(),
                });
            }
        }

        tracing::debug!(patterns = patterns.len(), "Pattern library compiled");

        Ok(Self { patterns })
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        Self::from_toml(DEFAULT_PATTERNS)
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Patterns reporting the given wire value
    pub fn patterns_for(&self, wire_value: &str) -> Vec<&CompiledPattern> {
        self.patterns
            .iter()
            .filter(|p| p.wire_value().eq_ignore_ascii_case(wire_value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
