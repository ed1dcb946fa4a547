use std::io::Read;

use http::HeaderName;
use http::header::CONTENT_LENGTH;

/// The completed HTTP exchange a [`ResponseBody`](crate::body::ResponseBody) reads from.
///
/// Connection handling, redirects and header parsing happen before a value of this
/// type exists; the body only needs header lookup, the declared length and the
/// payload stream itself.
pub trait Response {
    /// The payload stream, readable once.
    type Body: Read;

    /// Returns the first value of the header `name`, if present and visible ASCII.
    fn header(&self, name: &HeaderName) -> Option<&str>;

    /// Returns the declared payload length, `None` when unknown.
    fn content_length(&self) -> Option<u64> {
        self.header(&CONTENT_LENGTH).and_then(|value| value.trim().parse().ok())
    }

    /// Consumes the response and hands out its payload stream.
    fn into_body_stream(self) -> Self::Body;
}

impl<B: Read> Response for http::Response<B> {
    type Body = B;

    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }

    fn into_body_stream(self) -> Self::Body {
        self.into_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    fn response(headers: &[(&str, &str)]) -> http::Response<&'static [u8]> {
        let mut builder = http::Response::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(&b"hello"[..]).unwrap()
    }

    #[test]
    fn test_header() {
        let response = response(&[("content-type", "text/plain")]);
        assert_eq!(Response::header(&response, &CONTENT_TYPE), Some("text/plain"));
        assert_eq!(Response::header(&response, &CONTENT_LENGTH), None);
    }

    #[test]
    fn test_content_length() {
        assert_eq!(response(&[("content-length", "5")]).content_length(), Some(5));
        assert_eq!(response(&[("content-length", "five")]).content_length(), None);
        assert_eq!(response(&[]).content_length(), None);
    }

    #[test]
    fn test_into_body_stream() {
        let mut body = response(&[]).into_body_stream();
        let mut content = String::new();
        body.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");
    }
}
