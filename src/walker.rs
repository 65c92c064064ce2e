/*!
Directory traversal used by file searches.

Results are full paths built by appending the platform separator and the entry name to the path
that was passed in. Nothing is normalized, so relative inputs produce relative outputs.

The walker does not special-case symbolic links and has no cycle detection. A symlink loop will
recurse until the platform refuses to resolve the path.
*/

use std::path::{Path, MAIN_SEPARATOR};

use crate::errors::{FsAdapterError, FsAdapterResult};
use crate::fs::FileSystem;

/// Stateless traversal over a [`FileSystem`].
pub(crate) struct DirectoryWalker<'fs> {
    file_system: &'fs dyn FileSystem,
}

impl<'fs> DirectoryWalker<'fs> {
    /// Create a walker over the provided file system.
    pub(crate) fn new(file_system: &'fs dyn FileSystem) -> Self {
        Self { file_system }
    }

    /**
    List the entries under `path` as full paths.

    Returns an empty list if `path` is not a directory. When `recursive` is set, all immediate
    entries of a directory come first, followed by the flattened contents of each subdirectory in
    the order the subdirectories were discovered.

    # Errors

    Returns [`FsAdapterError::DirectoryReadFailed`] if an existing directory at any depth cannot
    be enumerated. Entries gathered before the failure are discarded.
    */
    pub(crate) fn list(&self, path: &str, recursive: bool) -> FsAdapterResult<Vec<String>> {
        if !self.file_system.is_dir(Path::new(path)) {
            return Ok(vec![]);
        }

        let names = self
            .file_system
            .list_dir(Path::new(path))
            .map_err(|source| FsAdapterError::DirectoryReadFailed {
                path: path.to_string(),
                source,
            })?;

        let mut entries: Vec<String> = names
            .iter()
            .map(|name| format!("{}{}{}", path, MAIN_SEPARATOR, name))
            .collect();

        if !recursive {
            return Ok(entries);
        }

        let mut nested_entries = vec![];
        for entry in entries.iter() {
            if !self.file_system.is_dir(Path::new(entry)) {
                continue;
            }

            log::debug!("Descending into {}", entry);
            nested_entries.extend(self.list(entry, true)?);
        }

        entries.extend(nested_entries);

        Ok(entries)
    }
}

impl std::fmt::Debug for DirectoryWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DirectoryWalker over {}", self.file_system.get_name())
    }
}
