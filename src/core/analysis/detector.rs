//! Detector collaborator interface

use super::models::DetectionItem;
use crate::domain::result::Result;
use crate::domain::Provider;

/// Output of one detector call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detection {
    /// Hits in text order, typed with the detector provider's wire values
    pub items: Vec<DetectionItem>,
    /// Redacted rendering of the input, passed through untouched
    pub sanitized_text: Option<String>,
}

impl Detection {
    pub fn new(items: Vec<DetectionItem>) -> Self {
        Self {
            items,
            sanitized_text: None,
        }
    }

    pub fn with_sanitized_text(mut self, sanitized_text: impl Into<String>) -> Self {
        self.sanitized_text = Some(sanitized_text.into());
        self
    }
}

/// Trait for PII detection implementations
///
/// Detectors are called from blocking worker threads and must be shareable.
pub trait PiiDetector: Send + Sync {
    /// Provider whose taxonomy the detector's entity types belong to
    fn provider(&self) -> Provider;

    /// Detect PII in `text`
    ///
    /// `entities` restricts detection to the listed wire types when given.
    fn detect(
        &self,
        text: &str,
        language_code: &str,
        entities: Option<&[String]>,
    ) -> Result<Detection>;
}
