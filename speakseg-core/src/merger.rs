//! Short fragment merging
//!
//! Fragments below the minimum length are carried forward and prefixed to
//! the next fragment, unless they are valid short forms: list markers
//! ("1."), initials ("A.") and short capitalized abbreviations ("Dr.").

use crate::{config::SegmenterConfig, enforcer::Budgets};

/// Whether `fragment` is a short form that stands on its own
///
/// Accepts digits followed by one period, a single letter followed by a
/// period, or 2 to `limit` letters with only the first uppercase followed by
/// a period.
pub fn is_valid_short_form(fragment: &str, limit: usize) -> bool {
    let Some(body) = fragment.strip_suffix('.') else {
        return false;
    };
    if body.is_empty() {
        return false;
    }

    if body.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    let mut letters = body.chars();
    let Some(first) = letters.next() else {
        return false;
    };
    let count = body.chars().count();

    if count == 1 {
        return first.is_alphabetic();
    }

    (2..=limit).contains(&count)
        && first.is_uppercase()
        && letters.all(|c| c.is_alphabetic() && c.is_lowercase())
}

/// Coalesces fragments shorter than the minimum into their successor
#[derive(Debug, Clone)]
pub struct FragmentMerger {
    min_chars: usize,
    abbreviation_limit: usize,
    budgets: Budgets,
}

impl Default for FragmentMerger {
    fn default() -> Self {
        Self::from_config(&SegmenterConfig::default())
    }
}

impl FragmentMerger {
    /// Create a merger
    pub fn new(min_chars: usize, abbreviation_limit: usize, budgets: Budgets) -> Self {
        Self {
            min_chars,
            abbreviation_limit,
            budgets,
        }
    }

    /// Create from segmenter configuration
    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self::new(
            config.min_fragment_chars,
            config.abbreviation_limit,
            Budgets::from_config(config),
        )
    }

    /// Whether `fragment` would be carried forward
    pub fn is_mergeable(&self, fragment: &str) -> bool {
        fragment.chars().count() < self.min_chars
            && !is_valid_short_form(fragment, self.abbreviation_limit)
    }

    /// Merge short fragments forward, space-joined
    ///
    /// Order and content are preserved. A pending buffer is emitted on its
    /// own whenever joining would break the character or byte budget.
    pub fn merge<I>(&self, fragments: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut merged = Vec::new();
        let mut pending = String::new();

        for fragment in fragments {
            if fragment.trim().is_empty() {
                continue;
            }

            if pending.is_empty() {
                if self.is_mergeable(&fragment) {
                    pending = fragment;
                } else {
                    merged.push(fragment);
                }
                continue;
            }

            let joined = format!("{pending} {fragment}");
            let carry = self.is_mergeable(&fragment);

            if self.budgets.fits(&joined) {
                if carry {
                    pending = joined;
                } else {
                    merged.push(joined);
                    pending.clear();
                }
            } else {
                merged.push(std::mem::take(&mut pending));
                if carry {
                    pending = fragment;
                } else {
                    merged.push(fragment);
                }
            }
        }

        if !pending.is_empty() {
            merged.push(pending);
        }

        merged
    }
}
