use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("malformed percent-encoding `{sequence}` in `{input}`")]
    MalformedEncoding { sequence: String, input: String },

    #[error("unknown charset: {label}")]
    UnknownCharset { label: String },

    #[error("serialize form error: {source}")]
    Serialize {
        #[from]
        source: serde_urlencoded::ser::Error,
    },

    #[error("deserialize query error: {source}")]
    Deserialize {
        #[from]
        source: serde_urlencoded::de::Error,
    },
}

impl QueryError {
    pub fn malformed<S: ToString, I: ToString>(sequence: S, input: I) -> Self {
        Self::MalformedEncoding { sequence: sequence.to_string(), input: input.to_string() }
    }

    pub fn unknown_charset<S: ToString>(label: S) -> Self {
        Self::UnknownCharset { label: label.to_string() }
    }
}
