//! Built-in regex detector
//!
//! Reports Presidio wire types so its output goes through the same
//! reconciliation path as a real Presidio analyzer.

pub mod patterns;
pub mod redaction;

pub use patterns::{CompiledPattern, PatternRegistry};
pub use redaction::{Redactor, DEFAULT_REPLACEMENT_TOKEN};

use crate::config::RiskConfig;
use crate::core::analysis::{Detection, DetectionItem, PiiDetector};
use crate::domain::{Provider, Result};
use std::ops::Range;
use std::sync::Arc;

/// Default minimum pattern confidence
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Regex-based PII detector
#[derive(Debug, Clone)]
pub struct PatternDetector {
    pattern_registry: Arc<PatternRegistry>,
    confidence_threshold: f64,
    redactor: Redactor,
}

impl PatternDetector {
    /// Create a new detector with the embedded patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::default_patterns()?))
    }

    /// Create a new detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            redactor: Redactor::default(),
        }
    }

    /// Build from the `[detector]` and `[analysis]` sections
    pub fn from_config(config: &RiskConfig) -> Result<Self> {
        let registry = match config.detector.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path)?,
            None => PatternRegistry::default_patterns()?,
        };
        Ok(Self::with_registry(registry)
            .with_confidence_threshold(config.detector.confidence_threshold)
            .with_replacement_token(config.analysis.replacement_token.clone()))
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_replacement_token(mut self, token: impl Into<String>) -> Self {
        self.redactor = Redactor::new(token);
        self
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }

    fn is_requested(pattern: &CompiledPattern, entities: Option<&[String]>) -> bool {
        entities.map_or(true, |allowed| {
            allowed.iter().any(|entity| {
                entity.eq_ignore_ascii_case(pattern.wire_value())
                    || entity.eq_ignore_ascii_case(pattern.entity_type.symbol())
            })
        })
    }
}

impl PiiDetector for PatternDetector {
    fn provider(&self) -> Provider {
        Provider::Presidio
    }

    /// Offsets in the returned items count chars, not bytes
    fn detect(
        &self,
        text: &str,
        language_code: &str,
        entities: Option<&[String]>,
    ) -> Result<Detection> {
        let mut hits: Vec<(Range<usize>, &CompiledPattern)> = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            if pattern.confidence < self.confidence_threshold
                || !pattern.applies_to(language_code)
                || !Self::is_requested(pattern, entities)
            {
                continue;
            }

            for matched in pattern.regex.find_iter(text) {
                let span = matched.range();
                let duplicate = hits.iter().any(|(existing, other)| {
                    *existing == span && other.wire_value() == pattern.wire_value()
                });
                if !duplicate {
                    hits.push((span, pattern));
                }
            }
        }

        hits.sort_by_key(|(span, _)| (span.start, span.end));

        let items = hits
            .iter()
            .map(|(span, pattern)| {
                DetectionItem::new(
                    pattern.wire_value(),
                    pattern.confidence,
                    char_offset(text, span.start),
                    char_offset(text, span.end),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let spans: Vec<Range<usize>> = hits.into_iter().map(|(span, _)| span).collect();
        let sanitized = self.redactor.redact(text, &spans);

        Ok(Detection::new(items).with_sanitized_text(sanitized))
    }
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Detection {
        PatternDetector::new().unwrap().detect(text, "en", None).unwrap()
    }

    fn types(detection: &Detection) -> Vec<&str> {
        detection.items.iter().map(|i| i.entity_type.as_str()).collect()
    }

    #[test]
    fn test_detect_email() {
        let detection = detect("Contact: john.doe@example.com");
        assert_eq!(types(&detection), vec!["EMAIL_ADDRESS"]);
        assert_eq!(detection.items[0].start, 9);
        assert_eq!(detection.sanitized_text.as_deref(), Some("Contact: <REDACTED>"));
    }

    #[test]
    fn test_detect_phone() {
        let detection = detect("Call (555) 123-4567");
        assert!(types(&detection).contains(&"PHONE_NUMBER"));
    }

    #[test]
    fn test_detect_ssn_and_ip() {
        let detection = detect("ssn 123-45-6789 from 192.168.0.1");
        assert_eq!(types(&detection), vec!["US_SSN", "IP_ADDRESS"]);
    }

    #[test]
    fn test_no_hits() {
        let detection = detect("Hi");
        assert!(detection.items.is_empty());
        assert_eq!(detection.sanitized_text.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_entity_allowlist() {
        let detector = PatternDetector::new().unwrap();
        let allow = vec!["US_SSN".to_string()];
        let detection = detector
            .detect("a@b.com 123-45-6789", "en", Some(&allow))
            .unwrap();
        assert_eq!(types(&detection), vec!["US_SSN"]);
        assert_eq!(detection.sanitized_text.as_deref(), Some("a@b.com <REDACTED>"));
    }

    #[test]
    fn test_confidence_threshold_filters_patterns() {
        let detector = PatternDetector::new().unwrap().with_confidence_threshold(0.9);
        let detection = detector
            .detect("a@b.com 123-45-6789", "en", None)
            .unwrap();
        assert_eq!(types(&detection), vec!["EMAIL_ADDRESS"]);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let detector = PatternDetector::new().unwrap().with_confidence_threshold(4.0);
        assert_eq!(detector.confidence_threshold(), 1.0);
    }

    #[test]
    fn test_language_scoped_patterns() {
        let detector = PatternDetector::new().unwrap();
        let detection = detector.detect("123-45-6789", "de", None).unwrap();
        assert!(!types(&detection).contains(&"US_SSN"));
    }

    #[test]
    fn test_offsets_count_chars() {
        let detection = detect("Zoë: zoe@example.com");
        assert_eq!(detection.items[0].start, 5);
        assert_eq!(detection.items[0].end, 20);
    }

    #[test]
    fn test_custom_token() {
        let detector = PatternDetector::new().unwrap().with_replacement_token("[PII]");
        let detection = detector.detect("visit https://example.org", "en", None).unwrap();
        assert_eq!(detection.sanitized_text.as_deref(), Some("visit [PII]"));
    }
}
