//! Query string normalization.
//!
//! [`normalize_query_string`] rewrites a raw query fragment, the text after `?`, into a
//! fully percent-encoded form. The input may be unencoded, partially encoded or use
//! separators loosely, the output always consists of `name=value` pairs joined by `&`.
//!
//! The scanner walks the fragment once, carrying two pieces of state:
//!
//! | state  | meaning                                              |
//! |--------|------------------------------------------------------|
//! | `pos`  | start offset of the token not flushed yet            |
//! | `name` | the captured parameter name, `None` until a `=` is seen |
//!
//! | input   | `name` is `None`                      | `name` is `Some`               |
//! |---------|---------------------------------------|--------------------------------|
//! | `=`     | `name = [pos, i)`, `pos = i + 1`      | literal value character        |
//! | `&`     | flush `[pos, i)` as `name=`           | flush `name=[pos, i)`          |
//! | other   | nothing                               | nothing                        |
//!
//! A `&` with nothing consumed since the last flush emits nothing, which collapses
//! `&&` and a leading `&`. The trailing token is flushed with the same rule once the
//! scan ends and the result never ends with `&`.

use encoding_rs::Encoding;
use tracing::trace;

use super::encode_set::{QUERY_PARAM_NAME, QUERY_PARAM_VALUE, encode_component};

/// Normalizes a raw query fragment into a percent-encoded query string.
///
/// # Example
///
/// ```
/// use micro_query::codec::normalize_query_string;
///
/// let charset = encoding_rs::UTF_8;
/// assert_eq!(normalize_query_string("a=1&b=2", charset), "a=1&b=2");
/// assert_eq!(normalize_query_string("a&&b=2&", charset), "a=&b=2");
/// assert_eq!(normalize_query_string("q=rust lang", charset), "q=rust%20lang");
/// ```
pub fn normalize_query_string(raw: &str, charset: &'static Encoding) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut normalizer = Normalizer::new(raw, charset);
    for (i, c) in raw.char_indices() {
        match c {
            '=' => normalizer.on_equals(i),
            '&' => normalizer.on_ampersand(i),
            _ => {}
        }
    }
    normalizer.finish()
}

/// Encodes a url that may carry a query, only the query part is touched.
///
/// - no `?` and no `=`: the input is a bare url and returned unchanged
/// - no `?` but a `=`: the whole input is a parameter string and gets normalized
/// - a `?`: the part before it is kept verbatim, the part after it is normalized;
///   a blank query yields just the url part
///
/// # Example
///
/// ```
/// use micro_query::codec::encode_full_url;
///
/// let charset = encoding_rs::UTF_8;
/// assert_eq!(encode_full_url("http://x/a b", charset), "http://x/a b");
/// assert_eq!(encode_full_url("http://x/p?q=a b&", charset), "http://x/p?q=a%20b");
/// assert_eq!(encode_full_url("http://x/p?  ", charset), "http://x/p");
/// ```
pub fn encode_full_url(url: &str, charset: &'static Encoding) -> String {
    match url.split_once('?') {
        Some((url_part, query)) if query.trim().is_empty() => url_part.to_owned(),
        Some((url_part, query)) => {
            let query = normalize_query_string(query, charset);
            if url_part.trim().is_empty() {
                query
            } else {
                format!("{url_part}?{query}")
            }
        }
        None if url.contains('=') => normalize_query_string(url, charset),
        None => url.to_owned(),
    }
}

struct Normalizer<'a> {
    raw: &'a str,
    charset: &'static Encoding,
    pos: usize,
    name: Option<&'a str>,
    output: String,
}

impl<'a> Normalizer<'a> {
    fn new(raw: &'a str, charset: &'static Encoding) -> Self {
        Self { raw, charset, pos: 0, name: None, output: String::with_capacity(raw.len() + 16) }
    }

    fn on_equals(&mut self, i: usize) {
        if self.name.is_none() {
            let raw = self.raw;
            self.name = Some(&raw[self.pos..i]);
            self.pos = i + 1;
        }
    }

    fn on_ampersand(&mut self, i: usize) {
        self.flush(i);
        self.pos = i + 1;
    }

    fn flush(&mut self, end: usize) {
        let raw = self.raw;
        let token = &raw[self.pos..end];
        match self.name.take() {
            // nothing consumed since the last separator
            None if token.is_empty() => {
                trace!(offset = end, "skip empty query token");
            }
            None => self.emit(token, ""),
            Some(name) => self.emit(name, token),
        }
    }

    fn emit(&mut self, name: &str, value: &str) {
        self.output.push_str(&encode_component(name, QUERY_PARAM_NAME, self.charset));
        self.output.push('=');
        self.output.push_str(&encode_component(value, QUERY_PARAM_VALUE, self.charset));
        self.output.push('&');
    }

    fn finish(mut self) -> String {
        self.flush(self.raw.len());
        if self.output.ends_with('&') {
            self.output.pop();
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{GBK, UTF_8};

    #[test]
    fn test_plain_pairs() {
        assert_eq!(normalize_query_string("a=1&b=2", UTF_8), "a=1&b=2");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_query_string("", UTF_8), "");
        assert_eq!(normalize_query_string("&", UTF_8), "");
        assert_eq!(normalize_query_string("&&&", UTF_8), "");
    }

    #[test]
    fn test_bare_name_gets_empty_value() {
        assert_eq!(normalize_query_string("a&b=2&", UTF_8), "a=&b=2");
        assert_eq!(normalize_query_string("a=1&b", UTF_8), "a=1&b=");
        assert_eq!(normalize_query_string("a", UTF_8), "a=");
    }

    #[test]
    fn test_collapse_separators() {
        assert_eq!(normalize_query_string("a&&b=2", UTF_8), "a=&b=2");
        assert_eq!(normalize_query_string("&a=1&&&b=2&&", UTF_8), "a=1&b=2");
    }

    #[test]
    fn test_empty_name_and_value() {
        assert_eq!(normalize_query_string("=", UTF_8), "=");
        assert_eq!(normalize_query_string("=v", UTF_8), "=v");
        assert_eq!(normalize_query_string("a=", UTF_8), "a=");
        assert_eq!(normalize_query_string("a=&b=", UTF_8), "a=&b=");
    }

    #[test]
    fn test_equals_inside_value_is_literal() {
        assert_eq!(normalize_query_string("a==b", UTF_8), "a==b");
        assert_eq!(normalize_query_string("token=x=y=z&c=1", UTF_8), "token=x=y=z&c=1");
    }

    #[test]
    fn test_encodes_unsafe_characters() {
        assert_eq!(normalize_query_string("q=rust lang&tag=a#b", UTF_8), "q=rust%20lang&tag=a%23b");
        assert_eq!(normalize_query_string("name=张三", UTF_8), "name=%E5%BC%A0%E4%B8%89");
        assert_eq!(normalize_query_string("name=张三", GBK), "name=%D5%C5%C8%FD");
    }

    #[test]
    fn test_plus_kept_literal() {
        assert_eq!(normalize_query_string("q=rust+lang", UTF_8), "q=rust+lang");
        assert_eq!(normalize_query_string("a+b=c+d&e", UTF_8), "a+b=c+d&e=");
        assert_eq!(encode_full_url("http://x/s?q=rust+lang&p=a b", UTF_8), "http://x/s?q=rust+lang&p=a%20b");
    }

    #[test]
    fn test_idempotent_on_encoded_input() {
        let once = normalize_query_string("q=a b&r=c%2Fd&s=50%&t=x+y", UTF_8);
        assert_eq!(once, "q=a%20b&r=c%2Fd&s=50%25&t=x+y");
        assert_eq!(normalize_query_string(&once, UTF_8), once);
    }

    #[test]
    fn test_encode_full_url() {
        assert_eq!(encode_full_url("http://x.com/path", UTF_8), "http://x.com/path");
        assert_eq!(encode_full_url("a=1 2&b", UTF_8), "a=1%202&b=");
        assert_eq!(encode_full_url("http://x.com/p?a=1 2&", UTF_8), "http://x.com/p?a=1%202");
        assert_eq!(encode_full_url("http://x.com/p?", UTF_8), "http://x.com/p");
        assert_eq!(encode_full_url("?a=b", UTF_8), "a=b");
        assert_eq!(encode_full_url("http://x.com/p?q=1?2", UTF_8), "http://x.com/p?q=1?2");
    }
}
