//! File system capability used by downloads.
//!
//! Downloads only need four primitives, kept behind [`FileSystem`] so the commit and
//! rollback paths can be exercised against failures a real disk rarely produces.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates or truncates the file at `path`, creating missing parent directories.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;

    /// Renames `from` to `to`. An existing `to` is replaced only with `overwrite`.
    fn rename(&self, from: &Path, to: &Path, overwrite: bool) -> io::Result<()>;

    /// Deletes the file at `path`; a missing file is not an error.
    fn remove_if_exists(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Box::new(File::create(path)?))
    }

    fn rename(&self, from: &Path, to: &Path, overwrite: bool) -> io::Result<()> {
        if !overwrite && to.exists() {
            return Err(io::Error::new(ErrorKind::AlreadyExists, format!("{} already exists", to.display())));
        }
        fs::rename(from, to)
    }

    fn remove_if_exists(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
