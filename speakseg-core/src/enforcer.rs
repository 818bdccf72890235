//! Character and byte budget enforcement
//!
//! Oversized fragments are cut in two passes. The character pass prefers the
//! last phrase delimiter inside the budget, then the last whitespace, then a
//! hard cut. The byte pass runs afterwards and takes the longest prefix whose
//! UTF-8 encoding fits, since multi-byte scripts can meet a character budget
//! and still exceed the byte budget.

use crate::{config::SegmenterConfig, script::contains_cjk};

/// Size limits applied to every fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budgets {
    /// Character budget for fragments without CJK
    pub max_chars: usize,
    /// Character budget for fragments with CJK
    pub max_cjk_chars: usize,
    /// UTF-8 byte budget
    pub max_bytes: usize,
    /// Preferred cut points
    pub phrase_delimiters: Vec<char>,
}

impl Budgets {
    /// Create from segmenter configuration
    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self {
            max_chars: config.max_chars,
            max_cjk_chars: config.max_cjk_chars,
            max_bytes: config.max_bytes,
            phrase_delimiters: config.phrase_delimiters.clone(),
        }
    }

    /// Character budget that applies to `text`
    pub fn char_budget(&self, text: &str) -> usize {
        if contains_cjk(text) {
            self.max_cjk_chars
        } else {
            self.max_chars
        }
    }

    /// Whether `text` satisfies both the character and the byte budget
    pub fn fits(&self, text: &str) -> bool {
        text.len() <= self.max_bytes && text.chars().count() <= self.char_budget(text)
    }
}

impl Default for Budgets {
    fn default() -> Self {
        Self::from_config(&SegmenterConfig::default())
    }
}

/// Subdivides fragments until every piece fits its budgets
#[derive(Debug, Clone, Default)]
pub struct LengthEnforcer {
    budgets: Budgets,
}

impl LengthEnforcer {
    /// Create an enforcer for the given budgets
    pub fn new(budgets: Budgets) -> Self {
        Self { budgets }
    }

    /// Budgets in use
    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    /// Enforce budgets on every fragment, preserving order
    pub fn enforce<I, S>(&self, fragments: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut char_bounded = Vec::new();
        for fragment in fragments {
            self.cut_by_chars(fragment.as_ref(), &mut char_bounded);
        }

        let mut out = Vec::with_capacity(char_bounded.len());
        for piece in &char_bounded {
            self.cut_by_bytes(piece, &mut out);
        }
        out
    }

    fn cut_by_chars(&self, fragment: &str, out: &mut Vec<String>) {
        let mut rest = fragment.trim();

        while !rest.is_empty() {
            let Some(cut) = self.char_cut(rest) else {
                out.push(rest.to_string());
                return;
            };

            let head = rest[..cut].trim_end();
            if !head.is_empty() {
                out.push(head.to_string());
            }
            rest = rest[cut..].trim_start();
        }
    }

    /// Byte offset to cut `text` at, or `None` when it fits its budget
    fn char_cut(&self, text: &str) -> Option<usize> {
        let cut = self.cut_within(text, self.budgets.char_budget(text))?;

        // A head without CJK of its own is held to the Roman budget
        let head = &text[..cut];
        let head_budget = self.budgets.char_budget(head);
        if head.chars().count() > head_budget {
            return self.cut_within(text, head_budget);
        }
        Some(cut)
    }

    fn cut_within(&self, text: &str, budget: usize) -> Option<usize> {
        let (boundary, _) = text.char_indices().nth(budget)?;
        match self.find_cut(&text[..boundary]) {
            0 => Some(longest_prefix_within(text, 0)),
            cut => Some(cut),
        }
    }

    /// Byte offset to cut `window` at; `window` holds exactly the budget
    fn find_cut(&self, window: &str) -> usize {
        let delimiter = window
            .char_indices()
            .rev()
            .find(|(_, c)| self.budgets.phrase_delimiters.contains(c));
        if let Some((index, c)) = delimiter {
            return index + c.len_utf8();
        }

        let space = window
            .char_indices()
            .rev()
            .find(|&(index, c)| index > 0 && c.is_whitespace());
        if let Some((index, _)) = space {
            return index;
        }

        window.len()
    }

    fn cut_by_bytes(&self, piece: &str, out: &mut Vec<String>) {
        let max_bytes = self.budgets.max_bytes;
        let mut rest = piece;

        while rest.len() > max_bytes {
            let cut = longest_prefix_within(rest, max_bytes);
            // A byte cut can drop the only CJK of a piece, tightening its
            // character budget, so pieces go back through the character pass
            self.cut_by_chars(&rest[..cut], out);
            rest = rest[cut..].trim_start();
        }

        self.cut_by_chars(rest, out);
    }
}

/// Length in bytes of the longest char-aligned prefix of at most `max_bytes`
///
/// Always takes at least one character so callers make progress.
fn longest_prefix_within(text: &str, max_bytes: usize) -> usize {
    let mut cut = max_bytes.min(text.len());
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }

    if cut == 0 {
        text.chars().next().map_or(text.len(), char::len_utf8)
    } else {
        cut
    }
}
