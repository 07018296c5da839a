use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)<queries::(\w+)>").expect("name pattern is a valid regex")
});

/// Split a run name into its query and strategy identifiers.
///
/// `"LeastPopular<queries::StdIA>"` yields `("LeastPopular", "StdIA")`. Only the
/// start of the name has to match, so google-benchmark's argument suffixes
/// (`/Span:3/manual_time`) are ignored.
pub fn decompose_name(raw_name: &str) -> Result<(String, String)> {
    let captures = NAME_PATTERN
        .captures(raw_name)
        .ok_or_else(|| Error::MalformedName {
            name: raw_name.to_string(),
        })?;

    Ok((captures[1].to_string(), captures[2].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decompose_simple() {
        let (query, strategy) = decompose_name("LeastPopular<queries::StdIA>").unwrap();
        assert_eq!(query, "LeastPopular");
        assert_eq!(strategy, "StdIA");
    }

    #[test]
    fn test_decompose_ignores_argument_suffix() {
        let (query, strategy) =
            decompose_name("NumberOfTransactionsOver15BM<queries::MapReduceParallel>/Span:6/manual_time")
                .unwrap();
        assert_eq!(query, "NumberOfTransactionsOver15BM");
        assert_eq!(strategy, "MapReduceParallel");
    }

    #[test]
    fn test_decompose_plain_name_fails() {
        let err = decompose_name("PlainName").unwrap_err();
        match err {
            Error::MalformedName { name } => assert_eq!(name, "PlainName"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decompose_requires_queries_namespace() {
        assert!(decompose_name("LeastPopular<other::Sorted>").is_err());
        assert!(decompose_name("LeastPopular<Sorted>").is_err());
        assert!(decompose_name("LeastPopular<queries::Sorted").is_err());
        assert!(decompose_name("<queries::Sorted>").is_err());
        assert!(decompose_name("").is_err());
    }

    #[test]
    fn test_decompose_must_match_at_start() {
        assert!(decompose_name("/LeastPopular<queries::Sorted>").is_err());
    }

    proptest! {
        #[test]
        fn prop_decompose_roundtrip(query in "[A-Za-z0-9_]{1,24}", strategy in "[A-Za-z0-9_]{1,24}") {
            let name = format!("{query}<queries::{strategy}>");
            let (q, s) = decompose_name(&name).unwrap();
            prop_assert_eq!(q, query);
            prop_assert_eq!(s, strategy);
        }

        #[test]
        fn prop_names_without_suffix_fail(name in "[A-Za-z0-9_]{0,32}") {
            prop_assert!(decompose_name(&name).is_err());
        }
    }
}
