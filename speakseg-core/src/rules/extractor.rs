//! Rule resource extraction
//!
//! Resource layout:
//!
//! ```text
//! anything before the block is ignored
//! [boundary-rules]
//! # comment
//! sentence ending<TAB>[.!?]+\s+
//! phrase ending<TAB>[;:]\s+
//! [end-boundary-rules]
//! ```
//!
//! A blank line inside the block ends it early. Lines that are not exactly
//! two tab-separated fields are skipped, as are labels outside the
//! recognized set.

use crate::{
    config::{defaults, SegmenterConfig},
    error::{Result, SegmentError},
    rules::RulePattern,
};

/// Pulls boundary expressions with recognized labels out of a rule resource
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    labels: Vec<String>,
    block_start: String,
    block_end: String,
}

impl Default for RuleExtractor {
    fn default() -> Self {
        Self::new(
            defaults::RULE_LABELS.iter().map(|s| s.to_string()).collect(),
            defaults::BLOCK_START,
            defaults::BLOCK_END,
        )
    }
}

impl RuleExtractor {
    /// Create an extractor for the given labels and block markers
    pub fn new(
        labels: Vec<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            labels,
            block_start: block_start.into(),
            block_end: block_end.into(),
        }
    }

    /// Create from segmenter configuration
    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self::new(
            config.rule_labels.clone(),
            config.block_start.clone(),
            config.block_end.clone(),
        )
    }

    /// Extract expressions from a resource; the result may be empty
    pub fn extract(&self, resource: &str) -> RulePattern {
        let mut patterns = RulePattern::default();
        let mut in_block = false;

        for (index, raw) in resource.lines().enumerate() {
            let line = raw.trim_start();

            if !in_block {
                in_block = line.starts_with(&self.block_start);
                continue;
            }

            if line.starts_with(&self.block_end) || line.trim().is_empty() {
                break;
            }

            if line.starts_with('#') {
                continue;
            }

            match parse_rule_line(raw, index + 1) {
                Ok((label, regex)) if self.is_recognized(label) => patterns.push(regex),
                Ok((label, _)) => log::trace!("ignoring rule label '{label}'"),
                Err(e) => log::debug!("skipping rule line: {e}"),
            }
        }

        patterns
    }

    /// Extract from an optional resource, using the built-in set when absent
    pub fn extract_or_builtin(&self, resource: Option<&str>) -> RulePattern {
        match resource {
            Some(text) => self.extract(text),
            None => RulePattern::builtin(),
        }
    }

    fn is_recognized(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Split a data line into `(label, regex)`
fn parse_rule_line(line: &str, number: usize) -> Result<(&str, &str)> {
    let fields: Vec<&str> = line.split('\t').collect();

    match fields.as_slice() {
        [label, regex] if !regex.is_empty() => Ok((label.trim_start(), regex)),
        [_, _] => Err(SegmentError::MalformedRuleLine {
            line: number,
            reason: "empty expression".to_string(),
        }),
        _ => Err(SegmentError::MalformedRuleLine {
            line: number,
            reason: format!("expected 2 tab-separated fields, found {}", fields.len()),
        }),
    }
}
