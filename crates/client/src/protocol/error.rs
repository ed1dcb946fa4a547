use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("can't get file name from [Content-Disposition] for directory {}", dir.display())]
    MissingFileName { dir: PathBuf },

    #[error("invalid download target: {}", path.display())]
    InvalidTarget { path: PathBuf },

    #[error("transport truncated after {transferred} bytes: {source}")]
    TransportTruncation {
        transferred: u64,
        #[source]
        source: io::Error,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("failed to rename {} to {}: {source}", temp_path.display(), final_path.display())]
    RenameFailure {
        temp_path: PathBuf,
        final_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BodyError {
    pub fn missing_file_name<P: Into<PathBuf>>(dir: P) -> Self {
        Self::MissingFileName { dir: dir.into() }
    }

    pub fn invalid_target<P: Into<PathBuf>>(path: P) -> Self {
        Self::InvalidTarget { path: path.into() }
    }

    pub fn truncation(transferred: u64, source: io::Error) -> Self {
        Self::TransportTruncation { transferred, source }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    pub fn rename<P: Into<PathBuf>, Q: Into<PathBuf>>(temp_path: P, final_path: Q, source: io::Error) -> Self {
        Self::RenameFailure { temp_path: temp_path.into(), final_path: final_path.into(), source }
    }

    /// Returns true if the body ended before it was complete.
    #[inline]
    pub fn is_truncation(&self) -> bool {
        matches!(self, BodyError::TransportTruncation { .. })
    }
}
