use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::protocol::BodyError;

/// Suffix appended to the final file name while a download is in flight
pub const DEFAULT_TEMP_SUFFIX: &str = ".temp";

/// The pair of paths a temp-file download works with.
///
/// The temporary file lives in the same directory as the final file so the commit is
/// a rename within one file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadTarget {
    final_path: PathBuf,
    temp_path: PathBuf,
}

impl DownloadTarget {
    pub(crate) fn new(final_path: PathBuf, suffix: &str) -> Result<Self, BodyError> {
        let suffix = if suffix.is_empty() { DEFAULT_TEMP_SUFFIX } else { suffix };

        let Some(name) = final_path.file_name() else {
            return Err(BodyError::invalid_target(final_path));
        };
        let mut temp_name = name.to_os_string();
        temp_name.push(suffix);
        let temp_path = final_path.with_file_name(temp_name);

        Ok(Self { final_path, temp_path })
    }

    pub(crate) fn final_path(&self) -> &Path {
        &self.final_path
    }

    pub(crate) fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub(crate) fn into_final_path(self) -> PathBuf {
        self.final_path
    }
}

/// Deletes the temporary file when dropped, unless it was committed.
///
/// Every early return between creating the file and renaming it runs through `Drop`,
/// so a failed copy never leaves a partial file behind.
pub(crate) struct TempFile<'fs, F: FileSystem> {
    fs: &'fs F,
    path: &'fs Path,
    armed: bool,
}

impl<'fs, F: FileSystem> TempFile<'fs, F> {
    pub(crate) fn new(fs: &'fs F, path: &'fs Path) -> Self {
        Self { fs, path, armed: true }
    }

    /// Renames the temporary file onto `final_path`, replacing any existing file.
    ///
    /// A failed rename keeps the temporary file, which already holds the complete body.
    pub(crate) fn commit(mut self, final_path: &Path) -> Result<(), BodyError> {
        // past this point the temporary file is either renamed or kept for recovery
        self.armed = false;

        match self.fs.rename(self.path, final_path, true) {
            Ok(()) => {
                debug!(temp = %self.path.display(), target = %final_path.display(), "committed download");
                Ok(())
            }
            Err(e) => Err(BodyError::rename(self.path, final_path, e)),
        }
    }
}

impl<F: FileSystem> Drop for TempFile<'_, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        debug!(temp = %self.path.display(), "roll back download");
        if let Err(e) = self.fs.remove_if_exists(self.path) {
            warn!(temp = %self.path.display(), cause = %e, "failed to remove temporary file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::io;

    #[test]
    fn test_temp_path_beside_final() {
        let target = DownloadTarget::new(PathBuf::from("/data/report.pdf"), ".part").unwrap();
        assert_eq!(target.final_path(), Path::new("/data/report.pdf"));
        assert_eq!(target.temp_path(), Path::new("/data/report.pdf.part"));
    }

    #[test]
    fn test_empty_suffix_uses_default() {
        let target = DownloadTarget::new(PathBuf::from("report.pdf"), "").unwrap();
        assert_eq!(target.temp_path(), Path::new("report.pdf.temp"));
    }

    #[test]
    fn test_target_without_file_name() {
        let error = DownloadTarget::new(PathBuf::from("/"), ".temp").unwrap_err();
        assert!(matches!(error, BodyError::InvalidTarget { .. }));
    }

    #[test]
    fn test_drop_removes_temp_file() {
        let mut fs = MockFileSystem::new();
        fs.expect_remove_if_exists().withf(|path| path == Path::new("a.temp")).times(1).returning(|_| Ok(()));

        drop(TempFile::new(&fs, Path::new("a.temp")));
    }

    #[test]
    fn test_drop_swallows_remove_failure() {
        let mut fs = MockFileSystem::new();
        fs.expect_remove_if_exists().times(1).returning(|_| Err(io::Error::other("busy")));

        drop(TempFile::new(&fs, Path::new("a.temp")));
    }

    #[test]
    fn test_commit_renames_with_overwrite() {
        let mut fs = MockFileSystem::new();
        fs.expect_rename()
            .withf(|from, to, overwrite| from == Path::new("a.temp") && to == Path::new("a") && *overwrite)
            .times(1)
            .returning(|_, _, _| Ok(()));
        fs.expect_remove_if_exists().never();

        TempFile::new(&fs, Path::new("a.temp")).commit(Path::new("a")).unwrap();
    }

    #[test]
    fn test_failed_commit_keeps_temp_file() {
        let mut fs = MockFileSystem::new();
        fs.expect_rename().times(1).returning(|_, _, _| Err(io::Error::other("cross device")));
        fs.expect_remove_if_exists().never();

        let error = TempFile::new(&fs, Path::new("a.temp")).commit(Path::new("a")).unwrap_err();
        match error {
            BodyError::RenameFailure { temp_path, final_path, .. } => {
                assert_eq!(temp_path, Path::new("a.temp"));
                assert_eq!(final_path, Path::new("a"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
