//! Language code normalization

use std::fmt;

const MIN_SUBTAG_LEN: usize = 2;
const MAX_SUBTAG_LEN: usize = 8;

/// Lowercase primary language subtag, e.g. `en` for `en-US` or `en_US`
///
/// Used as the pattern cache key and to name rule resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Derive the primary subtag from a tag in `xx`, `xx-YY` or `xx_YY` form
    ///
    /// Returns `None` unless the primary subtag is 2 to 8 ASCII letters. The
    /// code names rule files, so nothing else may reach a path.
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default();

        let valid = (MIN_SUBTAG_LEN..=MAX_SUBTAG_LEN).contains(&primary.len())
            && primary.bytes().all(|b| b.is_ascii_alphabetic());
        valid.then(|| Self(primary.to_ascii_lowercase()))
    }

    /// Like [`LanguageCode::parse`], substituting `default` for invalid tags
    pub fn parse_or(tag: &str, default: &str) -> Self {
        Self::parse(tag)
            .or_else(|| Self::parse(default))
            .unwrap_or_else(|| Self("en".to_string()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
