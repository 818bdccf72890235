//! Boundary rule tables
//!
//! A [`RulePattern`] is the ordered list of boundary regular expressions for
//! one language. Patterns come from line-oriented rule resources (see
//! [`extractor`]) located through an ordered provider chain (see [`source`]),
//! with a built-in minimal set as the last resort.

pub mod extractor;
pub mod source;

pub use extractor::RuleExtractor;
pub use source::{ResolvedRules, RuleChain, RuleProvider, BUNDLED_RULES};

/// Built-in boundary patterns: `.`, `!`, `?` end sentences, `;`, `:` end phrases
pub const BUILTIN_PATTERNS: [&str; 2] = [r#"[.!?]+["')\]]*\s+"#, r"[;:]\s+"];

/// Ordered boundary expressions for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePattern {
    patterns: Vec<String>,
}

impl RulePattern {
    /// Create from a list of expressions
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// The built-in minimal rule set
    pub fn builtin() -> Self {
        Self::new(BUILTIN_PATTERNS.iter().map(|p| p.to_string()).collect())
    }

    /// Append one expression
    pub fn push(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into());
    }

    /// Whether no expression is present
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of expressions
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Iterate expressions in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Combine into a single alternation, each branch in a non-capturing group
    pub fn alternation(&self) -> String {
        self.patterns
            .iter()
            .map(|p| format!("(?:{p})"))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl FromIterator<String> for RulePattern {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_non_empty() {
        let rules = RulePattern::builtin();
        assert_eq!(rules.len(), 2);
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_alternation_groups_each_branch() {
        let rules: RulePattern = vec!["a|b".to_string(), r"\.".to_string()]
            .into_iter()
            .collect();
        assert_eq!(rules.alternation(), r"(?:a|b)|(?:\.)");
    }

    #[test]
    fn test_builtin_alternation_compiles() {
        let regex = regex::Regex::new(&RulePattern::builtin().alternation()).unwrap();
        assert!(regex.is_match("Done. Next"));
        assert!(regex.is_match("Note: this"));
        assert!(!regex.is_match("3.14"));
    }
}
