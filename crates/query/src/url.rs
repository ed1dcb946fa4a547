//! Url composition for GET-style form submission.
//!
//! The new parameters are always encoded; the query the url already carries is
//! only normalized when asked to, since it may have been encoded by the caller.

use encoding_rs::Encoding;

use crate::codec::{QueryParameter, encode_full_url, encode_query_string, normalize_query_string};

/// Appends encoded form parameters to `url`.
///
/// When `encode_existing` is set, a query already present in `url` is normalized
/// first. `&` is only inserted between a non-empty existing query and non-empty
/// new parameters, `?` only when the url had none. Without new parameters the
/// url is returned as is, normalized if requested.
///
/// # Example
///
/// ```
/// use micro_query::url::merge_form_into_url;
///
/// let charset = encoding_rs::UTF_8;
/// assert_eq!(merge_form_into_url("http://x?z=9", [("a", "1")], charset, true), "http://x?z=9&a=1");
/// assert_eq!(merge_form_into_url("http://x", [("a", "1")], charset, true), "http://x?a=1");
/// ```
pub fn merge_form_into_url<I>(url: &str, params: I, charset: &'static Encoding, encode_existing: bool) -> String
where
    I: IntoIterator,
    I::Item: Into<QueryParameter>,
{
    let query = encode_query_string(params, charset);
    compose(url, &query, charset, encode_existing)
}

/// Appends an already rendered query string to `url`.
///
/// With `encode` set both the query of `url` and `query` are normalized,
/// otherwise both are used verbatim.
pub fn merge_query_into_url(url: &str, query: &str, charset: &'static Encoding, encode: bool) -> String {
    if encode {
        compose(url, &normalize_query_string(query, charset), charset, true)
    } else {
        compose(url, query, charset, false)
    }
}

fn compose(url: &str, query: &str, charset: &'static Encoding, encode_existing: bool) -> String {
    if query.trim().is_empty() {
        return if encode_existing && url.contains('?') { encode_full_url(url, charset) } else { url.to_owned() };
    }

    let (base, existing) = match url.split_once('?') {
        Some((base, existing)) if encode_existing => (base, Some(normalize_query_string(existing, charset))),
        Some((base, existing)) => (base, Some(existing.to_owned())),
        None => (url, None),
    };

    let mut composed = String::with_capacity(url.len() + query.len() + 2);
    composed.push_str(base);
    composed.push('?');
    if let Some(existing) = existing.filter(|existing| !existing.is_empty()) {
        composed.push_str(&existing);
        if !existing.ends_with('&') {
            composed.push('&');
        }
    }
    composed.push_str(query);
    composed
}
