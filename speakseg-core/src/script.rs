//! Script classification for budget selection

/// Whether `ch` is a CJK code point for budgeting purposes
///
/// Covers CJK Unified Ideographs (plus extension A and compatibility
/// ideographs), Hiragana, Katakana and Hangul.
#[inline]
pub fn is_cjk_char(ch: char) -> bool {
    matches!(
        ch as u32,
        0x3040..=0x309F     // Hiragana
        | 0x30A0..=0x30FF   // Katakana
        | 0x31F0..=0x31FF   // Katakana phonetic extensions
        | 0x3400..=0x4DBF   // CJK extension A
        | 0x4E00..=0x9FFF   // CJK unified ideographs
        | 0xF900..=0xFAFF   // CJK compatibility ideographs
        | 0x1100..=0x11FF   // Hangul jamo
        | 0x3130..=0x318F   // Hangul compatibility jamo
        | 0xAC00..=0xD7AF   // Hangul syllables
    )
}

/// Whether the text contains at least one CJK code point
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_blocks() {
        assert!(is_cjk_char('日'));
        assert!(is_cjk_char('ひ'));
        assert!(is_cjk_char('カ'));
        assert!(is_cjk_char('한'));
        assert!(is_cjk_char('ㄱ'));
    }

    #[test]
    fn test_non_cjk() {
        assert!(!is_cjk_char('a'));
        assert!(!is_cjk_char('é'));
        assert!(!is_cjk_char('Я'));
        assert!(!is_cjk_char('。'));
        assert!(!is_cjk_char('…'));
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("Hello 世界"));
        assert!(!contains_cjk("Hello world"));
        assert!(!contains_cjk(""));
    }
}
