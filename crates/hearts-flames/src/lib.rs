//! FLAMES name-compatibility engine.
//!
//! Pure and deterministic: the label depends only on the multiset of letters
//! in each name after lowercasing and removing whitespace.

mod label;

pub use label::{Flames, ParseFlamesError};

use std::collections::HashMap;

/// Lowercase and drop every whitespace character.
///
/// The whole string is lowercased before whitespace goes, so word-final
/// rules (Greek capital sigma becomes `ς`) still see the word boundaries.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn frequencies(name: &str) -> HashMap<char, usize> {
    let mut freq = HashMap::new();
    for c in name.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Number of letter occurrences that cannot be paired one-to-one between the
/// two normalized names.
pub fn leftover(name_a: &str, name_b: &str) -> usize {
    let freq_a = frequencies(&normalize(name_a));
    let freq_b = frequencies(&normalize(name_b));

    let mut remaining = 0;
    for (c, &count) in &freq_a {
        let common = count.min(freq_b.get(c).copied().unwrap_or(0));
        remaining += count - common;
    }
    for (c, &count) in &freq_b {
        let common = count.min(freq_a.get(c).copied().unwrap_or(0));
        remaining += count - common;
    }
    remaining
}

/// Compute the FLAMES label for two names.
pub fn compute(name_a: &str, name_b: &str) -> Flames {
    match leftover(name_a, name_b) {
        0 => Flames::Love,
        n => Flames::ALL[(n - 1) % Flames::ALL.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_are_love() {
        assert_eq!(leftover("Alice", "Alice"), 0);
        assert_eq!(compute("Alice", "Alice"), Flames::Love);
    }

    #[test]
    fn anagrams_are_love() {
        assert_eq!(compute("AB", "BA"), Flames::Love);
    }

    #[test]
    fn steve_and_alice() {
        // steve/alice share one 'e': 4 left on each side, (8 - 1) % 6 = 1
        assert_eq!(leftover("Steve", "Alice"), 8);
        assert_eq!(compute("Steve", "Alice"), Flames::Love);
    }

    #[test]
    fn index_walks_the_label_list() {
        assert_eq!(compute("a", ""), Flames::Friends);
        assert_eq!(compute("ab", ""), Flames::Love);
        assert_eq!(compute("abc", ""), Flames::Affection);
        assert_eq!(compute("abcd", ""), Flames::Marriage);
        assert_eq!(compute("abcde", ""), Flames::Enemies);
        assert_eq!(compute("abcdef", ""), Flames::Siblings);
        assert_eq!(compute("abcdefg", ""), Flames::Friends);
    }

    #[test]
    fn both_empty_is_love() {
        assert_eq!(compute("", ""), Flames::Love);
        assert_eq!(compute("   ", "\t\n"), Flames::Love);
    }

    #[test]
    fn repeated_letters_count_individually() {
        // "aaa" vs "a": two unmatched a's
        assert_eq!(leftover("aaa", "a"), 2);
        assert_eq!(leftover("aab", "abb"), 2);
    }

    #[test]
    fn symmetric_in_argument_order() {
        let pairs = [
            ("Steve", "Alice"),
            ("Romeo", "Juliet"),
            ("Mary Jane", "Peter Parker"),
            ("x", ""),
            ("Zoë", "zoe"),
        ];
        for (a, b) in pairs {
            assert_eq!(compute(a, b), compute(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn ignores_case_and_whitespace() {
        assert_eq!(compute("Romeo", "Juliet"), compute("r O m E o", "JULIET"));
        assert_eq!(compute("Mary Jane", "Peter"), compute("maryjane", " P e t e r "));
        assert_eq!(normalize("  Mary\tJane\n"), "maryjane");
    }

    #[test]
    fn final_sigma_follows_word_boundaries() {
        assert_eq!(normalize("ΑΣ"), "ας");
        assert_eq!(normalize("ΣΑ"), "σα");
        assert_eq!(leftover("ΑΣ", "ας x"), 1);
        assert_eq!(compute("ΑΣ", "ας x"), Flames::Friends);
    }

    #[test]
    fn letter_order_does_not_matter() {
        assert_eq!(compute("Romeo", "Juliet"), compute("oemoR", "teiluJ"));
    }
}
