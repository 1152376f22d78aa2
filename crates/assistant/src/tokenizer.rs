//! Word tokenization shared by the classifier and the extractor.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into lowercase word tokens.
///
/// Words follow Unicode word boundaries (UAX #29), so `"1999.99"` stays one
/// token while `"les-paul"` becomes two. Punctuation inside a word is dropped
/// unless the word is a number. Empty or whitespace-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter_map(|word| {
            let lower = word.to_lowercase();
            if is_number(&lower) {
                return Some(lower);
            }
            let cleaned: String = lower.chars().filter(|c| c.is_alphanumeric()).collect();
            (!cleaned.is_empty()).then_some(cleaned)
        })
        .collect()
}

/// Parse a token as a non-negative finite number.
pub fn parse_number(token: &str) -> Option<f64> {
    if !is_number(token) {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_number(token: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in token.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Fold a simple English plural onto its singular (`guitars` -> `guitar`).
///
/// Deliberately conservative: short words and `-ss` endings are left alone.
pub fn fold_plural(token: &str) -> &str {
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        &token[..token.len() - 1]
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Where is the Fender Stratocaster?!"),
            vec!["where", "is", "the", "fender", "stratocaster"]
        );
    }

    #[test]
    fn collapses_whitespace_and_handles_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
        assert_eq!(tokenize("  black   guitar\tcables "), vec!["black", "guitar", "cables"]);
    }

    #[test]
    fn keeps_decimal_numbers_whole() {
        assert_eq!(tokenize("under $1999.99 please"), vec!["under", "1999.99", "please"]);
        assert_eq!(parse_number("1999.99"), Some(1999.99));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("."), None);
    }

    #[test]
    fn splits_hyphenated_and_drops_apostrophes() {
        assert_eq!(tokenize("Les-Paul don't"), vec!["les", "paul", "dont"]);
    }

    #[test]
    fn fold_plural_is_conservative() {
        assert_eq!(fold_plural("guitars"), "guitar");
        assert_eq!(fold_plural("bass"), "bass");
        assert_eq!(fold_plural("is"), "is");
        assert_eq!(fold_plural("keys"), "key");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: tokens are non-empty, lowercase and free of whitespace.
        #[test]
        fn tokens_are_normalized(text in "\\PC{0,64}") {
            for token in tokenize(&text) {
                prop_assert!(!token.is_empty());
                prop_assert_eq!(token.clone(), token.to_lowercase());
                prop_assert!(!token.chars().any(char::is_whitespace));
            }
        }

        /// Property: tokenization ignores letter case.
        #[test]
        fn tokenization_is_case_insensitive(text in "[A-Za-z0-9 ,.?!]{0,48}") {
            prop_assert_eq!(tokenize(&text.to_uppercase()), tokenize(&text.to_lowercase()));
        }
    }
}
