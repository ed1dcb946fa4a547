use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use mime::Mime;
use tracing::{debug, trace};

use super::copier::{BodyCopier, CopyOutcome, TruncationPolicy};
use super::disposition::{DEFAULT_FILE_NAME_PARAM, file_name_from_disposition};
use super::progress::{NoProgress, StreamProgress};
use super::target::{DownloadTarget, TempFile};
use crate::fs::{FileSystem, StdFileSystem};
use crate::protocol::{BodyError, Response};

/// The body of a completed response, consumed exactly once.
///
/// Every consuming method takes `self`, so the body stream can't be read twice. Header
/// accessors borrow and may be called any number of times before that.
///
/// # Downloads
///
/// [`write_file`](Self::write_file) and its variants stream the body into a temporary
/// file beside the final path and rename it into place only after the copy succeeded:
///
/// ```text
/// resolve target ──> write <name><suffix> ──┬─ copy ok ──> rename onto <name>
///                                            └─ error ────> delete <name><suffix>
/// ```
///
/// A target that is a directory gets its file name from `Content-Disposition`. A
/// failed rename keeps the temporary file, which holds the complete body.
///
/// # Example
///
/// ```
/// use micro_client::body::{NoProgress, ResponseBody, TruncationPolicy};
///
/// let response = http::Response::builder()
///     .header("content-type", "text/plain; charset=utf-8")
///     .body(&b"hello"[..])
///     .unwrap();
///
/// let body = ResponseBody::new(response, TruncationPolicy::Fail);
/// assert_eq!(body.content_type(), Some("text/plain; charset=utf-8"));
/// assert_eq!(body.charset(), Some(encoding_rs::UTF_8));
///
/// let mut out = Vec::new();
/// body.write_to(&mut out, NoProgress).unwrap();
/// assert_eq!(out, b"hello");
/// ```
#[derive(Debug)]
pub struct ResponseBody<R, F = StdFileSystem> {
    response: R,
    policy: TruncationPolicy,
    fs: F,
}

impl<R: Response> ResponseBody<R> {
    pub fn new(response: R, policy: TruncationPolicy) -> Self {
        Self { response, policy, fs: StdFileSystem }
    }
}

impl<R: Response, F: FileSystem> ResponseBody<R, F> {
    /// Replaces the file system downloads are written to.
    pub fn with_file_system<G: FileSystem>(self, fs: G) -> ResponseBody<R, G> {
        ResponseBody { response: self.response, policy: self.policy, fs }
    }

    pub fn truncation_policy(&self) -> TruncationPolicy {
        self.policy
    }

    pub fn content_type(&self) -> Option<&str> {
        self.response.header(&CONTENT_TYPE)
    }

    /// Returns the parsed `Content-Type`, `None` if absent or malformed.
    pub fn mime(&self) -> Option<Mime> {
        self.content_type()?.parse().ok()
    }

    /// Returns the encoding named by the `charset` parameter of `Content-Type`.
    pub fn charset(&self) -> Option<&'static Encoding> {
        let mime = self.mime()?;
        let label = mime.get_param(mime::CHARSET)?;
        Encoding::for_label(label.as_str().as_bytes())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Returns the file name announced by `Content-Disposition`, looked up under `param`
    /// or `filename` when `None`.
    pub fn file_name(&self, param: Option<&str>) -> Option<String> {
        let header = self.response.header(&CONTENT_DISPOSITION)?;
        file_name_from_disposition(header, param.unwrap_or(DEFAULT_FILE_NAME_PARAM))
    }

    /// Hands out the raw body stream.
    pub fn into_stream(self) -> R::Body {
        self.response.into_body_stream()
    }

    /// Copies the body into `out`.
    ///
    /// `out` is closed when this returns if it was passed by value; pass `&mut out` to
    /// keep using it.
    ///
    /// # Errors
    ///
    /// See [`BodyCopier::copy`].
    pub fn write_to<W, P>(self, out: W, progress: P) -> Result<CopyOutcome, BodyError>
    where
        W: Write,
        P: StreamProgress,
    {
        let total = self.response.content_length();
        BodyCopier::new(self.response.into_body_stream(), total).truncation(self.policy).copy(out, progress)
    }

    /// Downloads the body to `target`, returning the final file path.
    ///
    /// # Errors
    ///
    /// See [`write_file_with`](Self::write_file_with).
    pub fn write_file<T: AsRef<Path>>(self, target: T) -> Result<PathBuf, BodyError> {
        self.write_file_with(target, None, NoProgress)
    }

    pub fn write_file_with_progress<T, P>(self, target: T, progress: P) -> Result<PathBuf, BodyError>
    where
        T: AsRef<Path>,
        P: StreamProgress,
    {
        self.write_file_with(target, None, progress)
    }

    /// Downloads the body through a temporary file named `<final name><temp_suffix>`.
    ///
    /// `temp_suffix` defaults to `.temp`. An existing file at the final path is
    /// replaced. Under [`TruncationPolicy::Ignore`] a truncated body is committed with
    /// the bytes received.
    ///
    /// # Errors
    ///
    /// - [`BodyError::MissingFileName`] for a directory target without a file name in
    ///   `Content-Disposition`
    /// - [`BodyError::InvalidTarget`] for a target with no file name component
    /// - [`BodyError::TransportTruncation`] or [`BodyError::Io`] when the copy fails;
    ///   the temporary file is deleted first
    /// - [`BodyError::RenameFailure`] when the commit fails; the temporary file is kept
    pub fn write_file_with<T, P>(self, target: T, temp_suffix: Option<&str>, progress: P) -> Result<PathBuf, BodyError>
    where
        T: AsRef<Path>,
        P: StreamProgress,
    {
        let final_path = self.resolve_target(target.as_ref(), None)?;
        let target = DownloadTarget::new(final_path, temp_suffix.unwrap_or_default())?;

        let Self { response, policy, fs } = self;
        let total = response.content_length();

        let guard = TempFile::new(&fs, target.temp_path());
        let file = fs.create(target.temp_path())?;
        trace!(temp = %target.temp_path().display(), "created temporary file");

        let outcome = BodyCopier::new(response.into_body_stream(), total).truncation(policy).copy(file, progress)?;
        guard.commit(target.final_path())?;

        debug!(
            path = %target.final_path().display(),
            bytes = outcome.bytes(),
            truncated = outcome.is_truncated(),
            "download finished"
        );
        Ok(target.into_final_path())
    }

    /// Downloads the body straight to the resolved path, with no temporary file.
    ///
    /// `param` names the `Content-Disposition` parameter consulted for a directory
    /// target. A failed copy leaves the partial file in place.
    ///
    /// # Errors
    ///
    /// - [`BodyError::MissingFileName`] for a directory target without a file name
    /// - [`BodyError::TransportTruncation`] or [`BodyError::Io`] when the copy fails
    pub fn write_direct<T, P>(self, target: T, param: Option<&str>, progress: P) -> Result<PathBuf, BodyError>
    where
        T: AsRef<Path>,
        P: StreamProgress,
    {
        let final_path = self.resolve_target(target.as_ref(), param)?;

        let Self { response, policy, fs } = self;
        let total = response.content_length();
        let file = fs.create(&final_path)?;

        let outcome = BodyCopier::new(response.into_body_stream(), total).truncation(policy).copy(file, progress)?;
        debug!(
            path = %final_path.display(),
            bytes = outcome.bytes(),
            truncated = outcome.is_truncated(),
            "download finished"
        );
        Ok(final_path)
    }

    fn resolve_target(&self, target: &Path, param: Option<&str>) -> Result<PathBuf, BodyError> {
        if !self.fs.is_dir(target) {
            return Ok(target.to_path_buf());
        }

        let name = self.file_name(param).ok_or_else(|| BodyError::missing_file_name(target))?;
        let final_path = target.join(name);
        debug!(dir = %target.display(), path = %final_path.display(), "resolved download target");
        Ok(final_path)
    }
}
