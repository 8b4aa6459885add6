//! Query and document tokenization.
//!
//! Lowercase alphanumeric word split, no stemming, no stopword removal.
//! Both the BM25 index and query parsing go through this so the two sides
//! always agree on term boundaries.

/// Split `text` into lowercase alphanumeric terms.
///
/// Pure and deterministic; empty or whitespace-only input yields an empty
/// vec.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_word_boundaries() {
        assert_eq!(tokenize("binary search trees"), ["binary", "search", "trees"]);
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("What is a B-Tree, really?"),
            ["what", "is", "a", "b", "tree", "really"]
        );
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(tokenize("BM25 uses k1=1.5"), ["bm25", "uses", "k1", "1", "5"]);
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize("---").is_empty());
    }

    #[test]
    fn single_char_terms_survive() {
        assert_eq!(tokenize("a b c"), ["a", "b", "c"]);
    }
}
