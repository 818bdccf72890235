//! Single-slot pattern cache
//!
//! Holds the compiled boundary matcher for the most recently requested
//! language. Requesting another language evicts it.

use crate::{language::LanguageCode, rules::RulePattern};
use regex::Regex;

/// Rules and matcher cached for one language
#[derive(Debug, Clone)]
pub struct CachedRules {
    /// Language the entry belongs to
    pub language: LanguageCode,
    /// Extracted boundary expressions
    pub patterns: RulePattern,
    /// Provider that supplied the expressions
    pub origin: String,
    /// Compiled alternation; `None` when compilation failed and splitting
    /// uses the punctuation heuristic instead
    pub matcher: Option<Regex>,
}

/// Cache holding at most one language
#[derive(Debug, Default)]
pub struct PatternCache {
    slot: Option<CachedRules>,
}

impl PatternCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `language`, if it is the cached one
    pub fn get(&self, language: &LanguageCode) -> Option<&CachedRules> {
        self.slot.as_ref().filter(|entry| &entry.language == language)
    }

    /// Store an entry, evicting whatever was cached before
    pub fn insert(&mut self, entry: CachedRules) -> &CachedRules {
        if let Some(previous) = self.slot.as_ref() {
            if previous.language != entry.language {
                log::debug!(
                    "evicting cached rules for '{}' in favor of '{}'",
                    previous.language,
                    entry.language
                );
            }
        }
        self.slot.insert(entry)
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Language currently cached
    pub fn language(&self) -> Option<&LanguageCode> {
        self.slot.as_ref().map(|entry| &entry.language)
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: &str) -> CachedRules {
        CachedRules {
            language: LanguageCode::parse(tag).unwrap(),
            patterns: RulePattern::builtin(),
            origin: "builtin".to_string(),
            matcher: None,
        }
    }

    #[test]
    fn test_get_matches_language_only() {
        let mut cache = PatternCache::new();
        assert!(cache.is_empty());

        cache.insert(entry("en"));
        let en = LanguageCode::parse("en").unwrap();
        let de = LanguageCode::parse("de").unwrap();

        assert!(cache.get(&en).is_some());
        assert!(cache.get(&de).is_none());
    }

    #[test]
    fn test_insert_evicts_previous_language() {
        let mut cache = PatternCache::new();
        cache.insert(entry("en"));
        cache.insert(entry("ja"));

        assert_eq!(cache.language().map(LanguageCode::as_str), Some("ja"));
        assert!(cache.get(&LanguageCode::parse("en").unwrap()).is_none());
    }

    #[test]
    fn test_invalidate() {
        let mut cache = PatternCache::new();
        cache.insert(entry("en"));
        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.language().is_none());
    }
}
