//! Query string decoding.
//!
//! A query is split on every literal `&`, then each token on its first literal `=`.
//! Escaped separators (`%26`, `%3D`) are data, not structure, because splitting
//! happens before percent-decoding. A token without `=` is a name with an empty
//! value; empty tokens (`&&`) are skipped.

use encoding_rs::{Encoding, UTF_8};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use tracing::trace;

use super::encode_set::is_escape;
use crate::QueryError;

/// Parameter name to value, in first-seen name order.
///
/// A repeated name keeps its first position and takes its last value.
pub type QueryMap = IndexMap<String, String>;

/// Parameter name to every value seen for it, in first-seen name order.
///
/// Values of the same name keep their order of occurrence.
pub type QueryMultiMap = IndexMap<String, Vec<String>>;

/// Configurable query string decoder.
///
/// The defaults follow RFC 3986: a malformed escape is an error and `+` is a
/// literal plus sign.
///
/// # Example
///
/// ```
/// use micro_query::codec::QueryDecoder;
///
/// let decoder = QueryDecoder::new(encoding_rs::UTF_8).lenient(true).plus_as_space(true);
/// let map = decoder.decode_map("q=rust+lang&rate=100%").unwrap();
/// assert_eq!(map["q"], "rust lang");
/// assert_eq!(map["rate"], "100%");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryDecoder {
    charset: &'static Encoding,
    lenient: bool,
    plus_as_space: bool,
    strip_path: bool,
}

impl Default for QueryDecoder {
    fn default() -> Self {
        Self::new(UTF_8)
    }
}

impl QueryDecoder {
    pub fn new(charset: &'static Encoding) -> Self {
        Self { charset, lenient: false, plus_as_space: false, strip_path: false }
    }

    /// Pass malformed escapes through literally instead of failing.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Decode `+` as a space, as `application/x-www-form-urlencoded` does.
    pub fn plus_as_space(mut self, plus_as_space: bool) -> Self {
        self.plus_as_space = plus_as_space;
        self
    }

    /// Ignore everything up to and including the first `?`, so a path with a
    /// query can be decoded directly.
    pub fn strip_path(mut self, strip_path: bool) -> Self {
        self.strip_path = strip_path;
        self
    }

    pub fn charset(&self) -> &'static Encoding {
        self.charset
    }

    /// Decodes into ordered `(name, value)` pairs, duplicates included.
    pub fn decode_pairs(&self, raw: &str) -> Result<Vec<(String, String)>, QueryError> {
        let query = match raw.split_once('?') {
            Some((_, query)) if self.strip_path => query,
            _ => raw,
        };

        let mut pairs = Vec::new();
        for token in query.split('&').filter(|token| !token.is_empty()) {
            let (name, value) = token.split_once('=').unwrap_or((token, ""));
            pairs.push((self.decode_component(name)?, self.decode_component(value)?));
        }
        Ok(pairs)
    }

    pub fn decode_map(&self, raw: &str) -> Result<QueryMap, QueryError> {
        Ok(self.decode_pairs(raw)?.into_iter().collect())
    }

    pub fn decode_multi_map(&self, raw: &str) -> Result<QueryMultiMap, QueryError> {
        let mut map = QueryMultiMap::new();
        for (name, value) in self.decode_pairs(raw)? {
            map.entry(name).or_default().push(value);
        }
        Ok(map)
    }

    fn decode_component(&self, component: &str) -> Result<String, QueryError> {
        if let Some(sequence) = find_malformed(component) {
            if !self.lenient {
                return Err(QueryError::malformed(sequence, component));
            }
            trace!(sequence, "pass through malformed percent-encoding");
        }

        let bytes: Vec<u8> = if self.plus_as_space && component.contains('+') {
            percent_decode_str(&component.replace('+', " ")).collect()
        } else {
            percent_decode_str(component).collect()
        };

        let (text, _) = self.charset.decode_without_bom_handling(&bytes);
        Ok(text.into_owned())
    }
}

/// Returns the first `%` sequence that is not followed by two hex digits.
fn find_malformed(component: &str) -> Option<&str> {
    let bytes = component.as_bytes();
    let index = bytes.iter().enumerate().position(|(i, &b)| b == b'%' && !is_escape(&bytes[i..]))?;
    let end = component[index..].char_indices().nth(3).map_or(component.len(), |(offset, _)| index + offset);
    Some(&component[index..end])
}

/// Decodes `raw` into a name to value map, see [`QueryMap`].
///
/// # Errors
///
/// Fails with [`QueryError::MalformedEncoding`] on a bad percent-escape.
pub fn decode_query_map(raw: &str, charset: &'static Encoding) -> Result<QueryMap, QueryError> {
    QueryDecoder::new(charset).decode_map(raw)
}

/// Decodes `raw` into a name to values map, see [`QueryMultiMap`].
///
/// # Example
///
/// ```
/// use micro_query::codec::decode_query_multi_map;
///
/// let map = decode_query_multi_map("a=1&a=2&b=3", encoding_rs::UTF_8).unwrap();
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(map["a"], ["1", "2"]);
/// assert_eq!(map["b"], ["3"]);
/// ```
///
/// # Errors
///
/// Fails with [`QueryError::MalformedEncoding`] on a bad percent-escape.
pub fn decode_query_multi_map(raw: &str, charset: &'static Encoding) -> Result<QueryMultiMap, QueryError> {
    QueryDecoder::new(charset).decode_multi_map(raw)
}

/// Deserializes a form-urlencoded query into `T`.
///
/// `+` is read as a space and text is UTF-8.
pub fn decode_query_as<T: DeserializeOwned>(raw: &str) -> Result<T, QueryError> {
    Ok(serde_urlencoded::from_str(raw)?)
}
