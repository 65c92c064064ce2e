/*!
This module contains error types specific to minfs as well as wrappers and `From` implementations
for common errors to enable error propagation.

Only operations whose success a caller must rely on return these errors. Reads and existence
checks report absence as a normal value instead.
*/

use std::fmt;
use std::io;

/// Alias for a [`Result`] that wraps a [`FsAdapterError`].
pub type FsAdapterResult<T> = Result<T, FsAdapterError>;

/// Errors surfaced by the [`FilesystemAdapter`](crate::FilesystemAdapter).
#[derive(Debug)]
pub enum FsAdapterError {
    /**
    Variant for a directory that could not be created.

    This is only raised if the path is still not a directory after the creation attempt.
    */
    DirectoryCreateFailed {
        /// The directory that was being created.
        path: String,
        /// The error reported by the file system, if any.
        source: Option<io::Error>,
    },

    /// Variant for failed writes and appends.
    FileWriteFailed {
        /// The file that was being written to.
        path: String,
        /// The error reported by the file system.
        source: io::Error,
    },

    /// Variant for failed renames or moves.
    RenameFailed {
        /// The path being renamed.
        source_path: String,
        /// The destination of the rename.
        destination_path: String,
        /// The error reported by the file system.
        source: io::Error,
    },

    /// Variant for a failed deletion of an existing path.
    DeleteFailed {
        /// The path being deleted.
        path: String,
        /// The error reported by the file system.
        source: io::Error,
    },

    /// Variant for failures enumerating the entries of an existing directory.
    DirectoryReadFailed {
        /// The directory being enumerated.
        path: String,
        /// The error reported by the file system.
        source: io::Error,
    },

    /// Variant for when the process working directory cannot be determined.
    WorkingDirectoryUnavailable(io::Error),
}

impl std::error::Error for FsAdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsAdapterError::DirectoryCreateFailed { source, .. } => {
                source.as_ref().map(|err| err as &(dyn std::error::Error + 'static))
            }
            FsAdapterError::FileWriteFailed { source, .. } => Some(source),
            FsAdapterError::RenameFailed { source, .. } => Some(source),
            FsAdapterError::DeleteFailed { source, .. } => Some(source),
            FsAdapterError::DirectoryReadFailed { source, .. } => Some(source),
            FsAdapterError::WorkingDirectoryUnavailable(source) => Some(source),
        }
    }
}

impl fmt::Display for FsAdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsAdapterError::DirectoryCreateFailed { path, source } => match source {
                Some(base_err) => write!(
                    f,
                    "Failed to create directory \"{}\". The original error was {}",
                    path, base_err
                ),
                None => write!(f, "Failed to create directory \"{}\"", path),
            },
            FsAdapterError::FileWriteFailed { path, source } => write!(
                f,
                "Failed to write file \"{}\". The original error was {}",
                path, source
            ),
            FsAdapterError::RenameFailed {
                source_path,
                destination_path,
                source,
            } => write!(
                f,
                "Failed to rename \"{}\" to \"{}\". The original error was {}",
                source_path, destination_path, source
            ),
            FsAdapterError::DeleteFailed { path, source } => write!(
                f,
                "Failed to delete file \"{}\". The original error was {}",
                path, source
            ),
            FsAdapterError::DirectoryReadFailed { path, source } => write!(
                f,
                "Failed to read directory contents at \"{}\". The original error was {}",
                path, source
            ),
            FsAdapterError::WorkingDirectoryUnavailable(base_err) => write!(
                f,
                "Failed to get current directory. The original error was {}",
                base_err
            ),
        }
    }
}
