use encoding_rs::Encoding;
use serde::Serialize;

use super::encode_set::{FORM_PARAM_NAME, FORM_PARAM_VALUE, encode_data};
use crate::QueryError;

/// A single `name=value` pair of a query string.
///
/// Several parameters may share a name; the order they are encoded in is the
/// order they are given in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameter {
    name: String,
    value: Option<String>,
}

impl QueryParameter {
    pub fn new<N: Into<String>>(name: N, value: Option<String>) -> Self {
        Self { name: name.into(), value }
    }

    /// A parameter without value, encoded as `name=`.
    pub fn bare<N: Into<String>>(name: N) -> Self {
        Self::new(name, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for QueryParameter {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, Some(value.into()))
    }
}

/// Encodes parameters into a query string.
///
/// Parameters with an empty name are skipped and a missing value is written as
/// `name=`. Names and values are data: every `%` and `+` in them is escaped, so they
/// decode back to exactly the text given.
///
/// # Example
///
/// ```
/// use micro_query::codec::{QueryParameter, encode_query_string};
///
/// let params = vec![QueryParameter::from(("q", "rust lang")), QueryParameter::bare("debug")];
/// assert_eq!(encode_query_string(params, encoding_rs::UTF_8), "q=rust%20lang&debug=");
/// ```
pub fn encode_query_string<I>(params: I, charset: &'static Encoding) -> String
where
    I: IntoIterator,
    I::Item: Into<QueryParameter>,
{
    let mut query = String::new();
    for param in params.into_iter().map(Into::into) {
        if param.name.is_empty() {
            continue;
        }
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&encode_data(&param.name, FORM_PARAM_NAME, charset));
        query.push('=');
        if let Some(value) = &param.value {
            query.push_str(&encode_data(value, FORM_PARAM_VALUE, charset));
        }
    }
    query
}

/// Encodes a serializable form as `application/x-www-form-urlencoded`.
///
/// Text is UTF-8 and a space is written as `+`.
pub fn encode_form<T: Serialize + ?Sized>(form: &T) -> Result<String, QueryError> {
    Ok(serde_urlencoded::to_string(form)?)
}
