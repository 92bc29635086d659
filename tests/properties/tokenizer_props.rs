use proptest::prelude::*;

use faqkit::search::{Tokenizer, edit_ratio};

proptest! {
    #[test]
    fn tokenize_is_deterministic(text in "\\PC{0,60}") {
        let tokenizer = Tokenizer::default();
        prop_assert_eq!(tokenizer.tokenize(&text), tokenizer.tokenize(&text));
    }

    #[test]
    fn tokens_are_non_empty_and_have_no_whitespace(text in "\\PC{0,60}") {
        let tokenizer = Tokenizer::default();
        for token in tokenizer.tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn latin_tokens_are_lowercase(words in prop::collection::vec("[A-Za-z]{1,8}", 1..6)) {
        let text = words.join(" ");
        let tokens = Tokenizer::default().tokenize(&text);
        let expected: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn cjk_segmentation_preserves_text(text in "[\u{4e00}-\u{4e80}]{1,20}") {
        let tokens = Tokenizer::default().tokenize(&text);
        prop_assert_eq!(tokens.concat(), text);
    }

    #[test]
    fn edit_ratio_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let ratio = edit_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn edit_ratio_of_identical_strings_is_one(a in "\\PC{0,30}") {
        prop_assert_eq!(edit_ratio(&a, &a), 1.0);
    }
}
