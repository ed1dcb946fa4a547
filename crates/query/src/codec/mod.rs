//! Query string codec
//!
//! Stateless functions that turn parameters into percent-encoded query strings and
//! back. Every function takes the charset used to convert text to and from the
//! escaped bytes, `encoding_rs::UTF_8` being the usual choice.
//!
//! # Components
//!
//! ## Encoding
//! - [`normalize_query_string`]: re-encodes a raw, possibly loosely formed query fragment
//! - [`encode_full_url`]: normalizes only the query part of a url
//! - [`encode_query_string`]: builds a query from ordered [`QueryParameter`]s
//! - [`encode_form`]: form-urlencodes any `Serialize` value
//!
//! ## Decoding
//! - [`decode_query_map`]: name to last value
//! - [`decode_query_multi_map`]: name to every value, in occurrence order
//! - [`QueryDecoder`]: the configurable decoder behind both
//! - [`decode_query_as`]: deserializes into a typed value
//!
//! ## Rule-sets
//! - [`QUERY_PARAM_NAME`] and [`QUERY_PARAM_VALUE`] for raw query text
//! - [`FORM_PARAM_NAME`] and [`FORM_PARAM_VALUE`] for parameters given as data, see [`encode_set`]

mod decoder;
mod encoder;
pub mod encode_set;
mod normalizer;

pub use decoder::QueryDecoder;
pub use decoder::QueryMap;
pub use decoder::QueryMultiMap;
pub use decoder::decode_query_as;
pub use decoder::decode_query_map;
pub use decoder::decode_query_multi_map;
pub use encode_set::FORM_PARAM_NAME;
pub use encode_set::FORM_PARAM_VALUE;
pub use encode_set::QUERY_PARAM_NAME;
pub use encode_set::QUERY_PARAM_VALUE;
pub use encoder::QueryParameter;
pub use encoder::encode_form;
pub use encoder::encode_query_string;
pub use normalizer::encode_full_url;
pub use normalizer::normalize_query_string;
