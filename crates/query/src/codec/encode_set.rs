//! Percent-encoding rule-sets for the two positions of a query parameter.
//!
//! All sets start from RFC 3986 `pchar` plus `/` and `?`, the characters a
//! query component may carry literally. They differ in the separators:
//!
//! - [`QUERY_PARAM_NAME`] escapes `=` and `&`, a name ends at either of them
//! - [`QUERY_PARAM_VALUE`] escapes `&` and keeps `=`, a value only ends at `&`
//!
//! The `FORM_*` variants also escape `+`, since form decoders read it as a
//! space. They apply to parameters given as data; raw query text keeps its `+`,
//! which may already stand for an encoded space.
//!
//! Text is first converted into bytes with the caller's charset, then every
//! byte outside the set is written as `%XX`. [`encode_component`] copies escapes
//! that are already valid in the input so normalizing a query twice never
//! double-encodes it. [`encode_data`] escapes every `%`.

use encoding_rs::Encoding;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

/// Characters that may stay literal in any query component.
const QUERY_PCHAR: &AsciiSet = &NON_ALPHANUMERIC
    // unreserved
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    // sub-delims, without `&` `=`
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    // pchar extras and the query-only `/` `?`
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?');

/// Encode set applied to parameter names of raw query text.
pub const QUERY_PARAM_NAME: &AsciiSet = QUERY_PCHAR;

/// Encode set applied to parameter values of raw query text, `=` is a plain character here.
pub const QUERY_PARAM_VALUE: &AsciiSet = &QUERY_PCHAR.remove(b'=');

/// Encode set applied to parameter names given as data.
pub const FORM_PARAM_NAME: &AsciiSet = &QUERY_PARAM_NAME.add(b'+');

/// Encode set applied to parameter values given as data.
pub const FORM_PARAM_VALUE: &AsciiSet = &QUERY_PARAM_VALUE.add(b'+');

/// Percent-encodes raw query text with `set`, converting text to bytes with `charset`.
///
/// Valid `%XX` escapes are kept as they are; a lone `%` becomes `%25`.
pub fn encode_component(input: &str, set: &'static AsciiSet, charset: &'static Encoding) -> String {
    let mut encoded = String::with_capacity(input.len() + 8);
    let mut rest = input;

    while let Some(index) = rest.find('%') {
        let (head, tail) = rest.split_at(index);
        push_encoded(&mut encoded, head, set, charset);

        if is_escape(tail.as_bytes()) {
            encoded.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            encoded.push_str("%25");
            rest = &tail[1..];
        }
    }

    push_encoded(&mut encoded, rest, set, charset);
    encoded
}

/// Percent-encodes a parameter given as data; every `%` is written as `%25`.
pub fn encode_data(input: &str, set: &'static AsciiSet, charset: &'static Encoding) -> String {
    let mut encoded = String::with_capacity(input.len() + 8);
    push_encoded(&mut encoded, input, set, charset);
    encoded
}

/// Returns true if `bytes` starts with `%` followed by two hex digits.
#[inline]
pub(crate) fn is_escape(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == b'%' && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}

fn push_encoded(dst: &mut String, text: &str, set: &'static AsciiSet, charset: &'static Encoding) {
    if text.is_empty() {
        return;
    }
    let (bytes, _, _) = charset.encode(text);
    dst.extend(percent_encode(&bytes, set));
}
