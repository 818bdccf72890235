//! Error types for the segmentation pipeline
//!
//! None of these reach callers of [`crate::Segmenter::segment`]; they are
//! recovered inside the pipeline and logged. [`crate::Segmenter::try_segment`]
//! and the configuration loaders surface them directly.

use thiserror::Error;

/// Errors raised while loading rules, compiling patterns or reading config
#[derive(Error, Debug)]
pub enum SegmentError {
    /// A rule resource could not be located or read
    #[error("rule resource '{source_name}' unavailable: {reason}")]
    ResourceUnavailable {
        /// Name of the provider that failed
        source_name: String,
        /// Why the resource could not be read
        reason: String,
    },

    /// A data line inside the rule block was not `label<TAB>regex`
    #[error("malformed rule line {line}: {reason}")]
    MalformedRuleLine {
        /// 1-based line number within the resource
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The combined boundary expression did not compile
    #[error("boundary pattern failed to compile: {0}")]
    PatternCompilation(#[from] regex::Error),

    /// No boundary pattern is available to compile
    #[error("rule set is empty")]
    EmptyRuleSet,

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML for [`crate::SegmenterConfig`]
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The pipeline panicked; payload message if one was available
    #[error("segmentation pipeline aborted: {0}")]
    PipelineAborted(String),
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_unavailable_display() {
        let error = SegmentError::ResourceUnavailable {
            source_name: "system:de".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "rule resource 'system:de' unavailable: not found"
        );
    }

    #[test]
    fn test_malformed_line_display() {
        let error = SegmentError::MalformedRuleLine {
            line: 7,
            reason: "expected 2 fields, found 3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "malformed rule line 7: expected 2 fields, found 3"
        );
    }

    #[test]
    fn test_regex_error_conversion() {
        let err = regex::Regex::new("(unclosed").unwrap_err();
        let error: SegmentError = err.into();
        assert!(matches!(error, SegmentError::PatternCompilation(_)));
        assert!(error.to_string().starts_with("boundary pattern failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: SegmentError = io.into();
        assert!(matches!(error, SegmentError::Io(_)));
    }
}
