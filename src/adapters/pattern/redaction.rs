//! Span redaction for sanitized text

use std::ops::Range;

/// Replacement token used when none is configured
pub const DEFAULT_REPLACEMENT_TOKEN: &str = "<REDACTED>";

/// Replaces byte spans of a text with a fixed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redactor {
    token: String,
}

impl Redactor {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Redact `spans` from `text`
    ///
    /// Overlapping or touching spans collapse into a single token. Spans must
    /// lie on char boundaries, as regex match offsets do.
    pub fn redact(&self, text: &str, spans: &[Range<usize>]) -> String {
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in merge_spans(spans) {
            let start = span.start.min(text.len());
            let end = span.end.min(text.len());
            output.push_str(&text[cursor..start]);
            output.push_str(&self.token);
            cursor = end;
        }
        output.push_str(&text[cursor..]);
        output
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_REPLACEMENT_TOKEN)
    }
}

/// Sort spans and merge those that overlap or touch
pub fn merge_spans(spans: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut sorted: Vec<Range<usize>> = spans.iter().filter(|s| s.start < s.end).cloned().collect();
    sorted.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}
