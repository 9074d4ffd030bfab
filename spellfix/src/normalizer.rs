//! Canonical key derivation.
//!
//! A single normalization rule is shared by delete-key generation, lookup,
//! duplicate merging at load time and protected-term matching. Any two of
//! those diverging produces silent misses, so everything funnels through
//! [`normalized_key`].

use smol_str::SmolStr;

/// Lowercases every character using the Unicode lowercase mapping.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Derives the normalized key for a term: Unicode lowercase, then every
/// White_Space character removed. Punctuation is preserved, and no NFC/NFD
/// normalization is applied; the input is treated as a code point sequence.
///
/// `"New York"` becomes `"newyork"`, `"IL-6"` becomes `"il-6"`. The result
/// may be empty; callers must reject empty keys.
#[inline(always)]
pub fn normalized_key(s: &str) -> SmolStr {
    s.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_elided() {
        assert_eq!(normalized_key("New York"), "newyork");
        assert_eq!(normalized_key("new\tyork"), "newyork");
        assert_eq!(normalized_key("San Francisco Bay"), "sanfranciscobay");
    }

    #[test]
    fn unicode_whitespace_is_elided() {
        // no-break space and ideographic space are both White_Space
        assert_eq!(normalized_key("a\u{a0}b"), "ab");
        assert_eq!(normalized_key("a\u{3000}b"), "ab");
    }

    #[test]
    fn punctuation_is_preserved() {
        assert_eq!(normalized_key("IL-6"), "il-6");
        assert_eq!(normalized_key("don't"), "don't");
    }

    #[test]
    fn case_folds_to_lower() {
        assert_eq!(normalized_key("NASA"), "nasa");
        assert_eq!(normalized_key("iPhone"), "iphone");
        assert_eq!(lower_case("İstanbul"), "i\u{307}stanbul");
    }

    #[test]
    fn empty_and_all_whitespace() {
        assert_eq!(normalized_key(""), "");
        assert_eq!(normalized_key(" \t "), "");
    }
}
