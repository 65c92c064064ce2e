/*!
File system wrappers to enable different implementations of file systems to be used.

The primary purpose of this wrapper to enable testing with temp file based or in-memory file
systems.
*/

use core::fmt::Debug;
use std::io::{Read, Result, Write};
use std::path::{Path, PathBuf};

/// The kind of entry that lives at a path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else the platform can report e.g. sockets or device files.
    Other,
}

/// An interface for the raw file system operations the adapter is built on.
pub trait FileSystem: Send + Sync {
    /// Return the name of file system wrapper being used.
    fn get_name(&self) -> String;

    /// Recursively create a directory and all of its parent components if they are missing.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /**
    List the names of the immediate children of the directory at `path`.

    Names are returned in enumeration order. The `.` and `..` pseudo-entries are never included.
    */
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;

    /// Open a file in read-only mode.
    fn open_file(&self, path: &Path) -> Result<Box<dyn Read>>;

    /**
    Open a file in write mode.

    This function will create the file if it doesn't exist. Setting the `append` parameter to true
    will start appending to an existing file, otherwise an existing file is truncated to length 0.
    */
    fn create_file(&self, path: &Path, append: bool) -> Result<Box<dyn Write>>;

    /**
    Rename a file or directory. For files, it will attempt to replace a file if it already exists
    at the destination name.

    This corresponds to the [`std::fs::rename`] function when used for disk-based implementations.
    It has the same caveats for platform-specific behavior.
    */
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Remove a file from the filesystem.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /**
    Get the kind of entry at `path`.

    Returns an error of kind [`std::io::ErrorKind::NotFound`] if nothing exists at the path.
    */
    fn metadata(&self, path: &Path) -> Result<EntryKind>;

    /// Get the working directory that relative paths are resolved against.
    fn current_dir(&self) -> Result<PathBuf>;

    /// Check if anything exists at `path`. Errors are treated as absence.
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Check if `path` is an existing directory. Errors are treated as absence.
    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.metadata(path), Ok(EntryKind::Directory))
    }

    /// Check if `path` is an existing regular file. Errors are treated as absence.
    fn is_file(&self, path: &Path) -> bool {
        matches!(self.metadata(path), Ok(EntryKind::File))
    }
}

impl Debug for dyn FileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_name())
    }
}
