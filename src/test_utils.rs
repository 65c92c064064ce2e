/*!
Helpers shared by unit tests across modules.
*/

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::fs::{EntryKind, FileSystem, InMemoryFileSystem};

/// Install a logger that captures every event for `cargo test`.
pub(crate) fn setup_logging() {
    let _ = env_logger::builder()
        // Include all events in tests
        .filter_level(log::LevelFilter::max())
        // Ensure events are captured by `cargo test`
        .is_test(true)
        // Ignore errors initializing the logger if tests race to configure it
        .try_init();
}

/**
Delegates to an in-memory file system but can be told to fail specific operations.

Used to exercise error paths that a healthy file system never takes.
*/
#[derive(Debug)]
pub(crate) struct FaultyFileSystem {
    inner: InMemoryFileSystem,

    /// Listing this directory fails with a permission error.
    broken_dir: Option<PathBuf>,

    /// Asking for the working directory fails.
    current_dir_unavailable: bool,
}

impl FaultyFileSystem {
    /// Wrap `inner` without injecting any faults.
    pub(crate) fn new(inner: InMemoryFileSystem) -> Self {
        Self {
            inner,
            broken_dir: None,
            current_dir_unavailable: false,
        }
    }

    /// Make listing the directory at `path` fail.
    pub(crate) fn with_broken_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.broken_dir = Some(path.into());
        self
    }

    /// Make reporting the working directory fail.
    pub(crate) fn with_current_dir_unavailable(mut self) -> Self {
        self.current_dir_unavailable = true;
        self
    }
}

impl FileSystem for FaultyFileSystem {
    fn get_name(&self) -> String {
        "FaultyFileSystem".to_string()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.inner.create_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        if self.broken_dir.as_deref() == Some(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission revoked",
            ));
        }

        self.inner.list_dir(path)
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        self.inner.open_file(path)
    }

    fn create_file(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>> {
        self.inner.create_file(path, append)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.inner.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_file(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        self.inner.metadata(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        if self.current_dir_unavailable {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "working directory was removed",
            ));
        }

        self.inner.current_dir()
    }
}
