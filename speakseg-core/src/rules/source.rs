//! Rule resource providers
//!
//! Resolution walks an ordered list of named providers and keeps the first
//! resource that extracts to a non-empty [`RulePattern`]. The standard chain
//! is: system file for the requested language, system file for the default
//! language, the bundled resource. If all of them fail the built-in minimal
//! set is used, so resolution always produces patterns.

use crate::{
    config::SegmenterConfig,
    error::{Result, SegmentError},
    language::LanguageCode,
    rules::{RuleExtractor, RulePattern},
};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bundled rule resource, embedded at compile time
pub const BUNDLED_RULES: &str = include_str!("../../rules/bundled.rules");

/// File extension of rule resources inside a rules directory
pub const RULES_EXTENSION: &str = "rules";

/// Name recorded when the built-in minimal set is used
pub const BUILTIN_ORIGIN: &str = "builtin";

/// One source of rule resource text
pub type RuleProvider = Box<dyn Fn(&LanguageCode) -> Result<String> + Send + Sync>;

/// Patterns together with the provider that supplied them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRules {
    /// Extracted boundary expressions, never empty
    pub patterns: RulePattern,
    /// Name of the provider, or [`BUILTIN_ORIGIN`]
    pub origin: String,
}

/// Ordered list of rule providers
#[derive(Default)]
pub struct RuleChain {
    providers: Vec<(String, RuleProvider)>,
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|(name, _)| name))
            .finish()
    }
}

impl RuleChain {
    /// Create an empty chain; resolution falls straight to the built-in set
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain for a configuration
    pub fn standard(config: &SegmenterConfig) -> Self {
        let mut chain = Self::new();

        if let Some(dir) = &config.rules_dir {
            chain.push("system", system_file(dir, None));
            if let Some(default) = LanguageCode::parse(&config.default_language) {
                chain.push("system-default", system_file(dir, Some(default)));
            }
        }

        chain.push("bundled", bundled());
        chain
    }

    /// Append a provider
    pub fn push<F>(&mut self, name: impl Into<String>, provider: F) -> &mut Self
    where
        F: Fn(&LanguageCode) -> Result<String> + Send + Sync + 'static,
    {
        self.providers.push((name.into(), Box::new(provider)));
        self
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in evaluation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|(name, _)| name.as_str())
    }

    /// Resolve patterns for a language
    pub fn resolve(&self, language: &LanguageCode, extractor: &RuleExtractor) -> ResolvedRules {
        for (name, provider) in &self.providers {
            match provider(language) {
                Ok(resource) => {
                    let patterns = extractor.extract(&resource);
                    if !patterns.is_empty() {
                        log::debug!(
                            "loaded {} boundary patterns for '{language}' from {name}",
                            patterns.len()
                        );
                        return ResolvedRules {
                            patterns,
                            origin: name.clone(),
                        };
                    }
                    log::debug!("{name} has no usable rules for '{language}'");
                }
                Err(e) => log::debug!("{e}"),
            }
        }

        log::debug!("using built-in boundary patterns for '{language}'");
        ResolvedRules {
            patterns: extractor.extract_or_builtin(None),
            origin: BUILTIN_ORIGIN.to_string(),
        }
    }
}

/// Path of the rule resource for `language` inside `dir`
pub fn rules_path(dir: &Path, language: &LanguageCode) -> PathBuf {
    dir.join(format!("{language}.{RULES_EXTENSION}"))
}

/// Provider reading `<dir>/<language>.rules`
///
/// With `fixed` set, that language is read regardless of the request.
pub fn system_file(
    dir: impl Into<PathBuf>,
    fixed: Option<LanguageCode>,
) -> impl Fn(&LanguageCode) -> Result<String> + Send + Sync + 'static {
    let dir = dir.into();
    move |requested: &LanguageCode| {
        let language = fixed.as_ref().unwrap_or(requested);
        let path = rules_path(&dir, language);
        std::fs::read_to_string(&path).map_err(|e| SegmentError::ResourceUnavailable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Provider returning the bundled resource
pub fn bundled() -> impl Fn(&LanguageCode) -> Result<String> + Send + Sync + 'static {
    |_: &LanguageCode| Ok(BUNDLED_RULES.to_string())
}
