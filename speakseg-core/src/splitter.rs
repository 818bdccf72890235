//! Sentence splitting
//!
//! Text is partitioned at the end of every match of the combined boundary
//! expression. Without a usable expression, a fixed punctuation heuristic
//! takes over.

use crate::{
    error::{Result, SegmentError},
    rules::RulePattern,
};
use regex::{Regex, RegexBuilder};

/// Characters after which a line break is not replaced by `". "`
const TERMINATORS: [char; 6] = ['.', '!', '?', '\u{3002}', '\u{FF01}', '\u{FF1F}'];

/// Break points of the heuristic splitter when followed by whitespace
pub const HEURISTIC_BREAKS: [char; 15] = [
    '.', '?', '!', ';', ':', '\u{2014}', '\u{2013}', '\u{2026}', '\u{3002}', '\u{FF01}',
    '\u{FF1F}', '\u{FE12}', '\u{FE52}', '\u{FF1B}', '\u{FF1A}',
];

/// Upper bound on the compiled size of a rule alternation
const COMPILED_SIZE_LIMIT: usize = 1 << 20;

/// Compile a rule set into one alternation
pub fn compile_boundaries(patterns: &RulePattern) -> Result<Regex> {
    if patterns.is_empty() {
        return Err(SegmentError::EmptyRuleSet);
    }

    let regex = RegexBuilder::new(&patterns.alternation())
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()?;
    Ok(regex)
}

/// Turn unmarked line breaks into phrase boundaries
///
/// A run of line breaks (with any whitespace between them) becomes `". "`
/// unless the last visible character before it already ends a sentence, in
/// which case a single `'\n'` is kept. Leading and trailing runs are dropped.
pub fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    let mut last_visible: Option<char> = None;

    while let Some(ch) = chars.next() {
        if ch != '\n' {
            out.push(ch);
            if !ch.is_whitespace() {
                last_visible = Some(ch);
            }
            continue;
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        out.truncate(out.trim_end().len());

        match last_visible {
            _ if chars.peek().is_none() => {}
            None => {}
            Some(c) if TERMINATORS.contains(&c) => out.push('\n'),
            Some(_) => out.push_str(". "),
        }
    }

    out
}

/// Split text at the end of every boundary match
///
/// Fragments are trimmed and never empty; concatenated they hold every
/// visible character of the normalized input in order.
pub fn split_sentences(text: &str, boundaries: &Regex) -> Vec<String> {
    let normalized = normalize_newlines(text);
    let mut fragments = Vec::new();
    let mut start = 0;

    for found in boundaries.find_iter(&normalized) {
        push_trimmed(&mut fragments, &normalized[start..found.end()]);
        start = found.end();
    }
    push_trimmed(&mut fragments, &normalized[start..]);

    fragments
}

/// Punctuation-only splitting used when no boundary expression is usable
///
/// Breaks after any of [`HEURISTIC_BREAKS`] that is followed by whitespace,
/// and at every line break.
pub fn split_heuristic(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' || ch == '\r' {
            push_trimmed(&mut fragments, &current);
            current.clear();
            continue;
        }

        current.push(ch);
        if HEURISTIC_BREAKS.contains(&ch) && chars.peek().is_some_and(|c| c.is_whitespace()) {
            push_trimmed(&mut fragments, &current);
            current.clear();
        }
    }
    push_trimmed(&mut fragments, &current);

    fragments
}

fn push_trimmed(fragments: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}
