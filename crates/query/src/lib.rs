//! Percent-encoded query strings for the micro http client
//!
//! This crate covers the query side of building a request: turning parameters into a
//! well-formed, percent-encoded query string, decoding a query back into parameters
//! and merging new parameters into a url that may already carry some.
//!
//! # Example
//!
//! ```
//! use micro_query::codec::{decode_query_multi_map, normalize_query_string};
//! use micro_query::url::merge_form_into_url;
//!
//! let charset = encoding_rs::UTF_8;
//!
//! let query = normalize_query_string("q=micro http&&lang", charset);
//! assert_eq!(query, "q=micro%20http&lang=");
//!
//! let params = decode_query_multi_map("tag=a&tag=b&page=1", charset).unwrap();
//! assert_eq!(params["tag"], ["a", "b"]);
//!
//! let url = merge_form_into_url("https://example.com/search?page=1", [("q", "rust")], charset, true);
//! assert_eq!(url, "https://example.com/search?page=1&q=rust");
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: encoding, normalization and decoding of query strings
//! - [`url`]: composition of a url with new form parameters
//!
//! # Charsets
//!
//! Percent-escapes carry bytes, so every operation takes the [`encoding_rs::Encoding`]
//! used to convert between text and bytes. [`charset_for_label`] resolves a charset
//! from its label, e.g. the `charset` parameter of a `Content-Type` header.
//!
//! # Error Handling
//!
//! - [`QueryError`]: malformed escapes, unknown charsets and typed (de)serialization errors

pub mod codec;
pub mod url;

mod error;
pub use error::QueryError;

use encoding_rs::Encoding;

/// Resolves a charset from a label such as `utf-8`, `GBK` or `latin1`.
pub fn charset_for_label(label: &str) -> Result<&'static Encoding, QueryError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| QueryError::unknown_charset(label))
}
