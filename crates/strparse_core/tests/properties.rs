//! Property tests for the built-in conversions.

use proptest::prelude::*;
use strparse_core::{ParseError, ParserRegistry};

/// Any ASCII casing of `word`.
fn any_casing(word: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn integers_match_std(n in any::<i64>()) {
        let registry = ParserRegistry::new();
        prop_assert_eq!(registry.parse::<i64>(&n.to_string()).unwrap(), n);
    }

    #[test]
    fn integers_ignore_padding(
        n in any::<i64>(),
        left in "[ \t\n]{0,3}",
        right in "[ \t\n]{0,3}"
    ) {
        let registry = ParserRegistry::new();
        let padded = format!("{left}{n}{right}");
        prop_assert_eq!(registry.parse::<i64>(&padded).unwrap(), n);
    }

    #[test]
    fn booleans_ignore_casing(t in any_casing("true"), f in any_casing("false")) {
        let registry = ParserRegistry::new();
        prop_assert!(registry.parse::<bool>(&t).unwrap());
        prop_assert!(!registry.parse::<bool>(&f).unwrap());
    }

    #[test]
    fn non_numeric_text_is_rejected(text in "[a-zA-Z]{1,12}") {
        let registry = ParserRegistry::new();
        let result = registry.parse::<i32>(&text);
        prop_assert!(matches!(result, Err(ParseError::Conversion(_))));
    }
}
