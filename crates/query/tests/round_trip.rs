use encoding_rs::UTF_8;
use indexmap::IndexMap;
use micro_query::codec::{QueryDecoder, QueryMap, decode_query_map, encode_query_string, normalize_query_string};
use proptest::prelude::*;

/// Splits a query the plain way: `&` separates tokens, empty tokens are dropped, the
/// first `=` splits name from value and the last value of a name wins.
fn split_naive(raw: &str) -> QueryMap {
    let mut map = IndexMap::new();
    for token in raw.split('&').filter(|token| !token.is_empty()) {
        let (name, value) = token.split_once('=').unwrap_or((token, ""));
        map.insert(name.to_owned(), value.to_owned());
    }
    map
}

fn assert_same_map(decoded: &QueryMap, expected: &QueryMap) {
    assert_eq!(decoded, expected);
    assert!(decoded.keys().eq(expected.keys()), "{decoded:?} != {expected:?}");
}

proptest! {
    #[test]
    fn test_normalized_ascii_decodes_to_plain_split(raw in "[ -$&-~]{0,64}") {
        let normalized = normalize_query_string(&raw, UTF_8);
        let decoded = decode_query_map(&normalized, UTF_8).unwrap();
        assert_same_map(&decoded, &split_naive(&raw));
    }

    #[test]
    fn test_normalized_separators_decode_to_plain_split(raw in "[ab&=+ ?#/]{0,40}") {
        let normalized = normalize_query_string(&raw, UTF_8);
        let decoded = decode_query_map(&normalized, UTF_8).unwrap();
        assert_same_map(&decoded, &split_naive(&raw));
    }

    #[test]
    fn test_normalized_text_decodes_to_plain_split(raw in "[^%]{0,32}") {
        let normalized = normalize_query_string(&raw, UTF_8);
        let decoded = decode_query_map(&normalized, UTF_8).unwrap();
        assert_same_map(&decoded, &split_naive(&raw));
    }

    #[test]
    fn test_normalize_is_idempotent(raw in "[ -~]{0,64}") {
        let once = normalize_query_string(&raw, UTF_8);
        prop_assert_eq!(normalize_query_string(&once, UTF_8), once);
    }

    #[test]
    fn test_encoded_params_decode_to_given_text(params in prop::collection::vec((".{1,12}", ".{0,12}"), 0..8)) {
        let query = encode_query_string(params.iter().map(|(name, value)| (name.as_str(), value.as_str())), UTF_8);
        let decoded = QueryDecoder::new(UTF_8).decode_pairs(&query).unwrap();
        prop_assert_eq!(decoded, params);
    }
}
