//! Lexical token-overlap similarity

use std::collections::HashSet;

/// Tokens of this many characters or fewer are ignored
const MIN_WORD_LEN: usize = 3;

/// Lower-cased words longer than three characters
pub fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() > MIN_WORD_LEN)
        .map(str::to_string)
        .collect()
}

/// `|A ∩ B| / max(|A|, |B|)`, or `None` when either set is empty
pub fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let shared = a.intersection(b).count();
    Some(shared as f64 / a.len().max(b.len()) as f64)
}

/// Similarity of two texts; `None` means they can never match
pub fn text_similarity(a: &str, b: &str) -> Option<f64> {
    overlap(&word_set(a), &word_set(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_set_filters_short_tokens() {
        let words = word_set("The new API for my chat-app, finally!");
        let mut sorted: Vec<_> = words.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, vec!["chat", "finally"]);
    }

    #[test]
    fn test_overlap_uses_larger_set() {
        let a = word_set("alpha bravo charlie delta");
        let b = word_set("alpha bravo");
        assert_eq!(overlap(&a, &b), Some(0.5));
        assert_eq!(overlap(&b, &a), Some(0.5));
    }

    #[test]
    fn test_empty_sets_never_match() {
        assert_eq!(text_similarity("", "alpha bravo"), None);
        assert_eq!(text_similarity("a an the", "alpha"), None);
    }

    #[test]
    fn test_identical_texts() {
        assert_eq!(text_similarity("memory system design", "Memory SYSTEM design"), Some(1.0));
    }
}
