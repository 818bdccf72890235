//! Segmenter configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! max_chars = 200
//! phrase_delimiters = [",", ";"]
//! rules_dir = "/opt/speech/rules"
//! ```

use crate::{
    error::{Result, SegmentError},
    language::LanguageCode,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration constants
pub mod defaults {
    /// Character budget for non-CJK fragments
    pub const MAX_CHARS: usize = 250;

    /// Character budget for fragments containing CJK code points
    pub const MAX_CJK_CHARS: usize = 85;

    /// UTF-8 byte budget for every fragment
    pub const MAX_BYTES: usize = 250;

    /// Fragments shorter than this are merge candidates
    pub const MIN_FRAGMENT_CHARS: usize = 4;

    /// Preferred cut points when a fragment must be subdivided
    pub const PHRASE_DELIMITERS: [char; 3] = [',', '(', '\u{2026}'];

    /// Longest capitalized abbreviation kept as a short form ("Mrs.")
    pub const ABBREVIATION_LIMIT: usize = 3;

    /// Language whose rules are tried when the requested one has none
    pub const DEFAULT_LANGUAGE: &str = "en";

    /// System directory holding `<language>.rules` files
    pub const RULES_DIR: &str = "/usr/share/speakseg/rules";

    /// Rule labels retained by the extractor
    pub const RULE_LABELS: [&str; 2] = ["sentence ending", "phrase ending"];

    /// Marker line opening the rule block
    pub const BLOCK_START: &str = "[boundary-rules]";

    /// Marker line closing the rule block
    pub const BLOCK_END: &str = "[end-boundary-rules]";

    /// Smallest byte budget that still fits any UTF-8 scalar value
    pub const MIN_BYTE_BUDGET: usize = 4;
}

/// Segmentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Character budget for Roman-script fragments
    pub max_chars: usize,
    /// Character budget for fragments containing CJK
    pub max_cjk_chars: usize,
    /// UTF-8 byte budget
    pub max_bytes: usize,
    /// Minimum fragment length before merge consideration
    pub min_fragment_chars: usize,
    /// Characters preferred as cut points
    pub phrase_delimiters: Vec<char>,
    /// Letter count limit for capitalized abbreviations
    pub abbreviation_limit: usize,
    /// Fallback language for rule lookup
    pub default_language: String,
    /// Directory of system rule resources (None = skip system lookup)
    pub rules_dir: Option<PathBuf>,
    /// Labels the extractor keeps
    pub rule_labels: Vec<String>,
    /// Rule block start marker
    pub block_start: String,
    /// Rule block end marker
    pub block_end: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_chars: defaults::MAX_CHARS,
            max_cjk_chars: defaults::MAX_CJK_CHARS,
            max_bytes: defaults::MAX_BYTES,
            min_fragment_chars: defaults::MIN_FRAGMENT_CHARS,
            phrase_delimiters: defaults::PHRASE_DELIMITERS.to_vec(),
            abbreviation_limit: defaults::ABBREVIATION_LIMIT,
            default_language: defaults::DEFAULT_LANGUAGE.to_string(),
            rules_dir: Some(PathBuf::from(defaults::RULES_DIR)),
            rule_labels: defaults::RULE_LABELS.iter().map(|s| s.to_string()).collect(),
            block_start: defaults::BLOCK_START.to_string(),
            block_end: defaults::BLOCK_END.to_string(),
        }
    }
}

impl SegmenterConfig {
    /// Create a configuration builder
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SegmenterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(SegmentError::InvalidConfig(
                "max_chars must be greater than 0".into(),
            ));
        }

        if self.max_cjk_chars == 0 {
            return Err(SegmentError::InvalidConfig(
                "max_cjk_chars must be greater than 0".into(),
            ));
        }

        if self.max_bytes < defaults::MIN_BYTE_BUDGET {
            return Err(SegmentError::InvalidConfig(format!(
                "max_bytes must be at least {}",
                defaults::MIN_BYTE_BUDGET
            )));
        }

        if self.min_fragment_chars == 0 {
            return Err(SegmentError::InvalidConfig(
                "min_fragment_chars must be greater than 0".into(),
            ));
        }

        if LanguageCode::parse(&self.default_language).is_none() {
            return Err(SegmentError::InvalidConfig(format!(
                "default_language '{}' is not a language tag",
                self.default_language
            )));
        }

        if self.block_start.trim().is_empty() || self.block_end.trim().is_empty() {
            return Err(SegmentError::InvalidConfig(
                "rule block markers must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`SegmenterConfig`]
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    config: SegmenterConfig,
}

impl SegmenterConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Roman-script character budget
    pub fn max_chars(mut self, chars: usize) -> Self {
        self.config.max_chars = chars;
        self
    }

    /// Set the CJK character budget
    pub fn max_cjk_chars(mut self, chars: usize) -> Self {
        self.config.max_cjk_chars = chars;
        self
    }

    /// Set the UTF-8 byte budget
    pub fn max_bytes(mut self, bytes: usize) -> Self {
        self.config.max_bytes = bytes;
        self
    }

    /// Set the merge threshold
    pub fn min_fragment_chars(mut self, chars: usize) -> Self {
        self.config.min_fragment_chars = chars;
        self
    }

    /// Replace the phrase delimiter set
    pub fn phrase_delimiters<I: IntoIterator<Item = char>>(mut self, delimiters: I) -> Self {
        self.config.phrase_delimiters = delimiters.into_iter().collect();
        self
    }

    /// Set the abbreviation letter-count limit
    pub fn abbreviation_limit(mut self, limit: usize) -> Self {
        self.config.abbreviation_limit = limit;
        self
    }

    /// Set the fallback language
    pub fn default_language(mut self, code: impl Into<String>) -> Self {
        self.config.default_language = code.into();
        self
    }

    /// Set the system rules directory (None disables system lookup)
    pub fn rules_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.config.rules_dir = dir.map(Into::into);
        self
    }

    /// Replace the recognized rule labels
    pub fn rule_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.rule_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SegmenterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
