//! Streaming copy of a response body into a sink.
//!
//! [`BodyCopier`] describes one transfer: the source stream, its declared length and
//! how an early end of the stream is treated. It is consumed by [`BodyCopier::copy`],
//! so a transfer runs at most once.
//!
//! # Truncation
//!
//! A chunked body ends with a zero-length chunk. A server that drops the connection
//! before that terminator makes the transport report an end-of-stream error. The same
//! applies to a body that ends before its declared `Content-Length`. With
//! [`TruncationPolicy::Ignore`] such an error ends the copy successfully at the bytes
//! reached so far; every other I/O error is always returned.

use std::cmp;
use std::io::{self, ErrorKind, Read, Write};

use tracing::{trace, warn};

use super::StreamProgress;
use crate::protocol::BodyError;

/// Default size of the copy buffer
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// How an early end of the body stream is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Fail with [`BodyError::TransportTruncation`].
    #[default]
    Fail,
    /// Treat the copy as complete at the byte count reached.
    Ignore,
}

impl TruncationPolicy {
    pub fn from_ignore(ignore: bool) -> Self {
        if ignore { Self::Ignore } else { Self::Fail }
    }

    #[inline]
    pub fn is_ignore(self) -> bool {
        matches!(self, TruncationPolicy::Ignore)
    }
}

/// The result of a copy that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The whole body was copied.
    Complete(u64),
    /// The body ended early and the truncation was ignored; holds the bytes copied.
    Truncated(u64),
}

impl CopyOutcome {
    /// Returns the number of bytes written to the sink.
    pub fn bytes(self) -> u64 {
        match self {
            CopyOutcome::Complete(bytes) | CopyOutcome::Truncated(bytes) => bytes,
        }
    }

    #[inline]
    pub fn is_complete(self) -> bool {
        matches!(self, CopyOutcome::Complete(_))
    }

    #[inline]
    pub fn is_truncated(self) -> bool {
        matches!(self, CopyOutcome::Truncated(_))
    }
}

/// A single transfer from a body stream into a sink.
///
/// # Example
///
/// ```
/// use micro_client::body::{BodyCopier, CopyOutcome, NoProgress};
///
/// let mut sink = Vec::new();
/// let outcome = BodyCopier::new(&b"hello world"[..], Some(5)).copy(&mut sink, NoProgress).unwrap();
/// assert_eq!(outcome, CopyOutcome::Complete(5));
/// assert_eq!(sink, b"hello");
/// ```
#[derive(Debug)]
pub struct BodyCopier<R> {
    source: R,
    total: Option<u64>,
    policy: TruncationPolicy,
    buffer_size: usize,
}

impl<R: Read> BodyCopier<R> {
    /// Creates a transfer of `source`, `total` being the declared length if known.
    pub fn new(source: R, total: Option<u64>) -> Self {
        Self { source, total, policy: TruncationPolicy::default(), buffer_size: DEFAULT_BUFFER_SIZE }
    }

    pub fn truncation(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Copies the body into `sink`.
    ///
    /// With a known total at most that many bytes are read, otherwise the source is
    /// read to its end. `progress` is notified after every buffer written. The sink is
    /// flushed before returning.
    ///
    /// # Errors
    ///
    /// - [`BodyError::TransportTruncation`] when the body ends early under
    ///   [`TruncationPolicy::Fail`]
    /// - [`BodyError::Io`] for any other read or write failure
    pub fn copy<W, P>(mut self, mut sink: W, mut progress: P) -> Result<CopyOutcome, BodyError>
    where
        W: Write,
        P: StreamProgress,
    {
        let mut buffer = vec![0u8; self.buffer_size];
        let mut transferred = 0u64;

        progress.start();
        loop {
            let want = match self.total {
                Some(total) if transferred >= total => break,
                #[allow(clippy::cast_possible_truncation, reason = "bounded by the buffer length")]
                Some(total) => cmp::min(total - transferred, buffer.len() as u64) as usize,
                None => buffer.len(),
            };

            let read = match self.source.read(&mut buffer[..want]) {
                Ok(0) => match self.total {
                    Some(total) if transferred < total => {
                        let eof = io::Error::new(
                            ErrorKind::UnexpectedEof,
                            format!("body ended after {transferred} of {total} bytes"),
                        );
                        return self.on_truncation(&mut sink, transferred, eof);
                    }
                    _ => break,
                },
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if is_truncation(&e) => return self.on_truncation(&mut sink, transferred, e),
                Err(e) => return Err(BodyError::io(e)),
            };

            sink.write_all(&buffer[..read])?;
            transferred += read as u64;
            trace!(read, transferred, "copied body bytes");
            progress.progress(transferred, self.total);
        }

        sink.flush()?;
        progress.finish();
        Ok(CopyOutcome::Complete(transferred))
    }

    fn on_truncation<W: Write>(
        &self,
        sink: &mut W,
        transferred: u64,
        cause: io::Error,
    ) -> Result<CopyOutcome, BodyError> {
        if !self.policy.is_ignore() {
            return Err(BodyError::truncation(transferred, cause));
        }

        warn!(transferred, total = ?self.total, cause = %cause, "ignore truncated body");
        sink.flush()?;
        Ok(CopyOutcome::Truncated(transferred))
    }
}

/// Returns true if `error` reports a stream that ended before its terminator.
///
/// Transports signal this either with [`ErrorKind::UnexpectedEof`], directly or on a
/// wrapped inner error, or with a "premature EOF" message.
pub(crate) fn is_truncation(error: &io::Error) -> bool {
    if error.kind() == ErrorKind::UnexpectedEof {
        return true;
    }

    let wrapped_eof = error
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<io::Error>())
        .is_some_and(|inner| inner.kind() == ErrorKind::UnexpectedEof);

    wrapped_eof || error.to_string().to_ascii_lowercase().contains("premature eof")
}
