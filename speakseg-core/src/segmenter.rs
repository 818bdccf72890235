//! Segmentation entry point
//!
//! [`Segmenter::segment`] runs splitting, budget enforcement and merging for
//! a language, caching the compiled boundary rules of the last language
//! used. It never fails: any error inside the pipeline is logged and
//! answered with the punctuation heuristic.

use crate::{
    cache::{CachedRules, PatternCache},
    config::SegmenterConfig,
    enforcer::{Budgets, LengthEnforcer},
    error::{Result, SegmentError},
    language::LanguageCode,
    merger::FragmentMerger,
    rules::{RuleChain, RuleExtractor},
    splitter::{compile_boundaries, split_heuristic, split_sentences},
};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Text segmenter for speech synthesis
///
/// Safe to share between threads; the pattern cache is behind a mutex.
///
/// ```
/// use speakseg_core::{Segmenter, SegmenterConfig};
///
/// let config = SegmenterConfig::builder()
///     .rules_dir(None::<std::path::PathBuf>)
///     .build()
///     .unwrap();
/// let segmenter = Segmenter::new(config).unwrap();
///
/// let fragments = segmenter.segment("Bye! Sleep Well!", "en-US");
/// assert_eq!(fragments, vec!["Bye!", "Sleep Well!"]);
/// ```
#[derive(Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    extractor: RuleExtractor,
    chain: RuleChain,
    enforcer: LengthEnforcer,
    merger: FragmentMerger,
    cache: Mutex<PatternCache>,
}

impl Segmenter {
    /// Create a segmenter using the standard rule chain
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        let chain = RuleChain::standard(&config);
        Self::with_chain(config, chain)
    }

    /// Create a segmenter with a custom rule chain
    pub fn with_chain(config: SegmenterConfig, chain: RuleChain) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, chain))
    }

    fn assemble(config: SegmenterConfig, chain: RuleChain) -> Self {
        Self {
            extractor: RuleExtractor::from_config(&config),
            enforcer: LengthEnforcer::new(Budgets::from_config(&config)),
            merger: FragmentMerger::from_config(&config),
            chain,
            config,
            cache: Mutex::new(PatternCache::new()),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment `text` into speech-ready fragments
    ///
    /// Whitespace-only input yields no fragments; any other input yields at
    /// least one. Fallback output is held to the same budgets.
    pub fn segment(&self, text: &str, language: &str) -> Vec<String> {
        match self.try_segment(text, language) {
            Ok(fragments) => fragments,
            Err(e) => {
                log::warn!("segmentation failed, using punctuation fallback: {e}");
                self.enforcer.enforce(split_heuristic(text))
            }
        }
    }

    /// Run the pipeline, reporting failures instead of recovering
    pub fn try_segment(&self, text: &str, language: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let language = LanguageCode::parse_or(language, &self.config.default_language);

        panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(text, &language)))
            .map_err(|payload| SegmentError::PipelineAborted(panic_message(payload.as_ref())))
    }

    fn run_pipeline(&self, text: &str, language: &LanguageCode) -> Vec<String> {
        let sentences = self.split(text, language);
        let bounded = self.enforcer.enforce(sentences);
        self.merger.merge(bounded)
    }

    fn split(&self, text: &str, language: &LanguageCode) -> Vec<String> {
        match self.matcher(language) {
            Some(matcher) => split_sentences(text, &matcher),
            None => split_heuristic(text),
        }
    }

    /// Compiled matcher for `language`, loading it on a cache miss
    ///
    /// The lock is released before the caller splits; `Regex` clones share
    /// the compiled program.
    fn matcher(&self, language: &LanguageCode) -> Option<Regex> {
        let mut cache = self.lock_cache();

        if cache.get(language).is_none() {
            let entry = self.load(language);
            cache.insert(entry);
        }

        cache
            .get(language)
            .and_then(|rules| rules.matcher.clone())
    }

    fn load(&self, language: &LanguageCode) -> CachedRules {
        let resolved = self.chain.resolve(language, &self.extractor);

        let matcher = match compile_boundaries(&resolved.patterns) {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!(
                    "rules for '{language}' from {} unusable, splitting on punctuation: {e}",
                    resolved.origin
                );
                None
            }
        };

        CachedRules {
            language: language.clone(),
            patterns: resolved.patterns,
            origin: resolved.origin,
            matcher,
        }
    }

    /// Drop the cached rules so the next call reloads them
    pub fn invalidate_cache(&self) {
        self.lock_cache().invalidate();
    }

    /// Language whose rules are currently cached
    pub fn cached_language(&self) -> Option<LanguageCode> {
        self.lock_cache().language().cloned()
    }

    /// Provider that supplied the cached rules
    pub fn cached_origin(&self) -> Option<String> {
        let cache = self.lock_cache();
        let language = cache.language()?.clone();
        cache.get(&language).map(|rules| rules.origin.clone())
    }

    fn lock_cache(&self) -> MutexGuard<'_, PatternCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        let config = SegmenterConfig::default();
        let chain = RuleChain::standard(&config);
        Self::assemble(config, chain)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn offline_config() -> SegmenterConfig {
        SegmenterConfig::builder()
            .rules_dir(None::<PathBuf>)
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_segmentation() {
        let segmenter = Segmenter::new(offline_config()).unwrap();
        let fragments = segmenter.segment("Bye! Sleep Well!", "en");
        assert_eq!(fragments, vec!["Bye!", "Sleep Well!"]);
    }

    #[test]
    fn test_empty_input() {
        let segmenter = Segmenter::new(offline_config()).unwrap();
        assert!(segmenter.segment("", "en").is_empty());
        assert!(segmenter.segment(" \n\t", "en").is_empty());
    }

    #[test]
    fn test_cache_follows_language() {
        let segmenter = Segmenter::new(offline_config()).unwrap();
        assert!(segmenter.cached_language().is_none());

        segmenter.segment("Hello there.", "en-GB");
        assert_eq!(segmenter.cached_language().unwrap().as_str(), "en");
        assert_eq!(segmenter.cached_origin().as_deref(), Some("bundled"));

        segmenter.segment("こんにちは。", "ja_JP");
        assert_eq!(segmenter.cached_language().unwrap().as_str(), "ja");

        segmenter.invalidate_cache();
        assert!(segmenter.cached_language().is_none());
    }

    #[test]
    fn test_rules_loaded_once_per_language() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);

        let mut chain = RuleChain::new();
        chain.push("counting", move |_: &LanguageCode| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("[boundary-rules]\nsentence ending\t[.!?]\\s+\n".to_string())
        });
        let segmenter = Segmenter::with_chain(offline_config(), chain).unwrap();

        segmenter.segment("One. Two.", "en");
        segmenter.segment("Three. Four.", "en-US");
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        segmenter.segment("Eins. Zwei.", "de");
        segmenter.segment("Five. Six.", "en");
        assert_eq!(loads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_invalid_rules_use_heuristic() {
        let mut chain = RuleChain::new();
        chain.push("broken", |_: &LanguageCode| {
            Ok("[boundary-rules]\nsentence ending\t([unclosed\n".to_string())
        });
        let segmenter = Segmenter::with_chain(offline_config(), chain).unwrap();

        let fragments = segmenter.segment("First one. Second one.", "en");
        assert_eq!(fragments, vec!["First one.", "Second one."]);
    }

    #[test]
    fn test_unknown_language_uses_default() {
        let segmenter = Segmenter::new(offline_config()).unwrap();
        let fragments = segmenter.segment("Yes. No.", "");
        assert_eq!(fragments, vec!["Yes.", "No."]);
        assert_eq!(segmenter.cached_language().unwrap().as_str(), "en");
    }

    #[test]
    fn test_provider_panic_is_recovered() {
        let mut chain = RuleChain::new();
        chain.push("panicking", |_: &LanguageCode| -> Result<String> {
            panic!("rule provider exploded")
        });
        let segmenter = Segmenter::with_chain(offline_config(), chain).unwrap();

        match segmenter.try_segment("Still here. Really.", "en") {
            Err(SegmentError::PipelineAborted(message)) => {
                assert!(message.contains("exploded"));
            }
            other => panic!("Expected PipelineAborted, got {other:?}"),
        }

        let fragments = segmenter.segment("Still here. Really.", "en");
        assert_eq!(fragments, vec!["Still here.", "Really."]);
    }

    #[test]
    fn test_fallback_output_keeps_budgets() {
        let mut chain = RuleChain::new();
        chain.push("panicking", |_: &LanguageCode| -> Result<String> {
            panic!("rule provider exploded")
        });
        let segmenter = Segmenter::with_chain(offline_config(), chain).unwrap();

        let text = "word ".repeat(100);
        let fragments = segmenter.segment(&text, "en");
        assert!(fragments.len() > 1);
        assert!(fragments.iter().all(|f| f.chars().count() <= 250 && f.len() <= 250));
        assert_eq!(fragments.join(" "), text.trim());

        let cjk = "漢字".repeat(60);
        let fragments = segmenter.segment(&cjk, "ja");
        assert!(fragments.iter().all(|f| f.chars().count() <= 85 && f.len() <= 250));
        assert_eq!(fragments.concat(), cjk);
    }

    #[test]
    fn test_cache_is_released_during_split() {
        let segmenter = Segmenter::new(offline_config()).unwrap();
        let matcher = segmenter.matcher(&LanguageCode::parse("en").unwrap());
        assert!(matcher.is_some());

        // Lock is free again once the matcher has been handed out
        assert!(segmenter.cache.try_lock().is_ok());
        let fragments = split_sentences("One. Two.", &matcher.unwrap());
        assert_eq!(fragments, vec!["One.", "Two."]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SegmenterConfig {
            max_bytes: 1,
            ..SegmenterConfig::default()
        };
        assert!(matches!(
            Segmenter::new(config),
            Err(SegmentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_shared_across_threads() {
        let segmenter = Arc::new(Segmenter::new(offline_config()).unwrap());
        let handles: Vec<_> = ["en", "ja", "de", "fr"]
            .into_iter()
            .map(|language| {
                let segmenter = Arc::clone(&segmenter);
                std::thread::spawn(move || segmenter.segment("One thing. Another thing.", language))
            })
            .collect();

        for handle in handles {
            let fragments = handle.join().unwrap();
            assert_eq!(fragments, vec!["One thing.", "Another thing."]);
        }
    }
}
