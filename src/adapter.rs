/*!
The filesystem adapter exposes every operation of minfs behind one struct.

Operations fall into two groups:

- Reads and checks (`read_file`, `exists`, `list_files`, ...) never fail. A missing or unreadable
  path is reported as `None`, `false` or an empty list.
- Mutations and searches return a [`FsAdapterResult`] and fail with a distinct
  [`FsAdapterError`] variant. Nothing is retried.

All state lives in the underlying [`FileSystem`]; the adapter itself caches nothing between calls.
*/

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::errors::{FsAdapterError, FsAdapterResult};
use crate::fs::{FileSystem, InMemoryFileSystem, OsFileSystem};
use crate::mask::Mask;
use crate::walker::DirectoryWalker;

/// Safe, uniform file system primitives over a pluggable [`FileSystem`].
#[derive(Clone, Debug)]
pub struct FilesystemAdapter {
    /**
    A wrapper around a particular file system to use.

    **This defaults to [`OsFileSystem`](crate::fs::OsFileSystem).**
    */
    filesystem_provider: Arc<Box<dyn FileSystem>>,
}

/// Public methods
impl FilesystemAdapter {
    /// Create an adapter over the provided file system.
    pub fn new(filesystem_provider: Arc<Box<dyn FileSystem>>) -> Self {
        Self {
            filesystem_provider,
        }
    }

    /// Create an adapter over a fresh [`InMemoryFileSystem`].
    pub fn with_memory_env() -> Self {
        Self::new(Arc::new(Box::new(InMemoryFileSystem::new())))
    }

    /// Get a strong reference to the file system provider.
    pub fn filesystem_provider(&self) -> Arc<Box<dyn FileSystem>> {
        Arc::clone(&self.filesystem_provider)
    }

    /**
    Create a directory and all of its missing ancestors.

    This is a no-op if the directory already exists.

    # Errors

    Fails with [`FsAdapterError::DirectoryCreateFailed`] if the path is still not a directory after
    the creation attempt. A creation error is ignored if another writer created the directory in
    the meantime.
    */
    pub fn create_directory(&self, path: &str) -> FsAdapterResult<()> {
        let dir_path = Path::new(path);
        if self.filesystem_provider.is_dir(dir_path) {
            return Ok(());
        }

        log::debug!("Creating directory {}", path);
        let creation_result = self.filesystem_provider.create_dir_all(dir_path);
        if self.filesystem_provider.is_dir(dir_path) {
            return Ok(());
        }

        Err(FsAdapterError::DirectoryCreateFailed {
            path: path.to_string(),
            source: creation_result.err(),
        })
    }

    /**
    Overwrite the file at `path` with `content`, creating missing parent directories first.

    # Errors

    Fails with [`FsAdapterError::DirectoryCreateFailed`] if the parent directory cannot be
    created, or with [`FsAdapterError::FileWriteFailed`] if the write itself fails.
    */
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) -> FsAdapterResult<()> {
        self.write_contents(path, content.as_ref(), false)
    }

    /**
    Append `content` to the file at `path`, creating the file and missing parent directories if
    needed. No separator is inserted between existing and new content.

    # Errors

    Same as [`FilesystemAdapter::write_file`].
    */
    pub fn append_to_file(&self, path: &str, content: impl AsRef<[u8]>) -> FsAdapterResult<()> {
        self.write_contents(path, content.as_ref(), true)
    }

    /// Read the full contents of a file. Any failure, including a missing file, yields `None`.
    pub fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        let mut contents = vec![];
        let read_result = self
            .filesystem_provider
            .open_file(Path::new(path))
            .and_then(|mut file| file.read_to_end(&mut contents));

        match read_result {
            Ok(_) => Some(contents),
            Err(error) => {
                log::debug!("Could not read {}. Treating it as absent. Error: {}", path, error);
                None
            }
        }
    }

    /// Read the full contents of a file as UTF-8. Contents that are not valid UTF-8 yield `None`.
    pub fn read_file_to_string(&self, path: &str) -> Option<String> {
        let contents = self.read_file(path)?;
        String::from_utf8(contents).ok()
    }

    /// Returns true if `path` is a regular file that the current process can open for reading.
    pub fn is_readable_file(&self, path: &str) -> bool {
        let file_path = Path::new(path);
        self.filesystem_provider.is_file(file_path)
            && self.filesystem_provider.open_file(file_path).is_ok()
    }

    /**
    Rename or move `source` to `destination`.

    # Errors

    Fails with [`FsAdapterError::RenameFailed`] if the platform rename fails.
    */
    pub fn rename_file(&self, source: &str, destination: &str) -> FsAdapterResult<()> {
        log::debug!("Renaming {} to {}", source, destination);
        self.filesystem_provider
            .rename(Path::new(source), Path::new(destination))
            .map_err(|err| FsAdapterError::RenameFailed {
                source_path: source.to_string(),
                destination_path: destination.to_string(),
                source: err,
            })
    }

    /**
    Delete the file at `path`. Deleting a path that does not exist is a no-op.

    # Errors

    Fails with [`FsAdapterError::DeleteFailed`] if something exists at the path but cannot be
    removed, e.g. because it is a directory.
    */
    pub fn delete_file(&self, path: &str) -> FsAdapterResult<()> {
        let file_path = Path::new(path);
        if !self.filesystem_provider.exists(file_path) {
            return Ok(());
        }

        log::debug!("Deleting {}", path);
        self.filesystem_provider
            .remove_file(file_path)
            .map_err(|source| FsAdapterError::DeleteFailed {
                path: path.to_string(),
                source,
            })
    }

    /// Returns true if anything exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.filesystem_provider.exists(Path::new(path))
    }

    /// Returns true if `path` exists and is a regular file.
    pub fn exists_file(&self, path: &str) -> bool {
        self.filesystem_provider.is_file(Path::new(path))
    }

    /// Alias for [`FilesystemAdapter::exists_file`].
    pub fn is_file(&self, path: &str) -> bool {
        self.exists_file(path)
    }

    /// Returns true if `path` exists and is a directory.
    pub fn exists_directory(&self, path: &str) -> bool {
        self.filesystem_provider.is_dir(Path::new(path))
    }

    /// Alias for [`FilesystemAdapter::exists_directory`].
    pub fn is_directory(&self, path: &str) -> bool {
        self.exists_directory(path)
    }

    /**
    List the names (not full paths) of the immediate children of the directory at `path`.

    Returns an empty list if `path` is not a directory or cannot be enumerated.
    */
    pub fn list_files(&self, path: &str) -> Vec<String> {
        let dir_path = Path::new(path);
        if !self.filesystem_provider.is_dir(dir_path) {
            return vec![];
        }

        match self.filesystem_provider.list_dir(dir_path) {
            Ok(names) => names,
            Err(error) => {
                log::warn!(
                    "Failed to list the contents of {}. Returning no entries. Error: {}",
                    path,
                    error
                );
                vec![]
            }
        }
    }

    /**
    Find the immediate entries of `path` whose name matches `mask`.

    Returned paths are `path` joined with each entry name, in discovery order.

    # Errors

    Fails with [`FsAdapterError::DirectoryReadFailed`] if the directory exists but cannot be
    enumerated.
    */
    pub fn search_files(&self, path: &str, mask: &str) -> FsAdapterResult<Vec<String>> {
        self.search(path, mask, false)
    }

    /**
    Find every entry under `path`, at any depth, whose name matches `mask`.

    Entries directly under a directory are returned before the contents of its subdirectories.

    # Errors

    Fails with [`FsAdapterError::DirectoryReadFailed`] if any directory in the tree cannot be
    enumerated. No partial results are returned in that case.
    */
    pub fn search_files_recursively(
        &self,
        path: &str,
        mask: &str,
    ) -> FsAdapterResult<Vec<String>> {
        self.search(path, mask, true)
    }

    /**
    Get the working directory of the underlying file system.

    # Errors

    Fails with [`FsAdapterError::WorkingDirectoryUnavailable`] if it cannot be determined.
    */
    pub fn get_current_directory(&self) -> FsAdapterResult<String> {
        let current_dir = self
            .filesystem_provider
            .current_dir()
            .map_err(FsAdapterError::WorkingDirectoryUnavailable)?;

        Ok(current_dir.to_string_lossy().into_owned())
    }
}

/// Private methods
impl FilesystemAdapter {
    /// Ensure the parent directory of `path` exists then write or append `content` to it.
    fn write_contents(&self, path: &str, content: &[u8], append: bool) -> FsAdapterResult<()> {
        self.create_directory_for_file(path)?;

        log::debug!(
            "Writing {} bytes to {} (append: {})",
            content.len(),
            path,
            append
        );
        let to_write_error = |source: io::Error| FsAdapterError::FileWriteFailed {
            path: path.to_string(),
            source,
        };
        let mut file = self
            .filesystem_provider
            .create_file(Path::new(path), append)
            .map_err(to_write_error)?;
        file.write_all(content).map_err(to_write_error)?;
        file.flush().map_err(to_write_error)?;

        Ok(())
    }

    /// Create the directory that will hold the file at `path`.
    fn create_directory_for_file(&self, path: &str) -> FsAdapterResult<()> {
        match Path::new(path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.create_directory(&parent.to_string_lossy())
            }
            _ => Ok(()),
        }
    }

    /// Walk `path` and keep the entries whose leaf name matches `mask`.
    fn search(&self, path: &str, mask: &str, recursive: bool) -> FsAdapterResult<Vec<String>> {
        let walker = DirectoryWalker::new(&**self.filesystem_provider);
        let entries = walker.list(path, recursive)?;

        Ok(Mask::parse(mask).filter(entries))
    }
}

impl Default for FilesystemAdapter {
    fn default() -> Self {
        Self::new(Arc::new(Box::new(OsFileSystem::new())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::path::MAIN_SEPARATOR;

    use crate::test_utils::{setup_logging, FaultyFileSystem};

    use super::*;

    fn setup() -> FilesystemAdapter {
        setup_logging();

        FilesystemAdapter::with_memory_env()
    }

    /// An adapter over a tree with `/dir/a.txt`, `/dir/sub/b.txt` and `/dir/sub/deep/c.txt`.
    fn faulty_adapter(
        configure: impl FnOnce(FaultyFileSystem) -> FaultyFileSystem,
    ) -> FilesystemAdapter {
        setup_logging();

        let inner = InMemoryFileSystem::new();
        inner.create_dir_all(Path::new("/dir/sub/deep")).unwrap();
        inner.create_file(Path::new("/dir/a.txt"), false).unwrap();
        inner.create_file(Path::new("/dir/sub/b.txt"), false).unwrap();
        inner
            .create_file(Path::new("/dir/sub/deep/c.txt"), false)
            .unwrap();

        FilesystemAdapter::new(Arc::new(Box::new(configure(FaultyFileSystem::new(inner)))))
    }

    fn joined(parts: &[&str]) -> String {
        parts.join(&MAIN_SEPARATOR.to_string())
    }

    #[test]
    fn create_directory_is_idempotent() {
        let adapter = setup();

        adapter.create_directory("/a/b").unwrap();
        adapter.create_directory("/a/b").unwrap();

        assert!(adapter.is_directory("/a"));
        assert!(adapter.is_directory("/a/b"));
    }

    #[test]
    fn create_directory_over_a_file_fails() {
        let adapter = setup();
        adapter.write_file("/a", "not a dir").unwrap();

        match adapter.create_directory("/a/b") {
            Err(FsAdapterError::DirectoryCreateFailed { path, source }) => {
                assert_eq!(path, "/a/b");
                assert!(source.is_some());
            }
            other => panic!("Expected a directory creation failure but got {:?}", other),
        }
    }

    #[test]
    fn write_then_read_returns_the_same_content() {
        let adapter = setup();

        adapter.write_file("/file.bin", [0_u8, 159, 146, 150]).unwrap();

        assert_eq!(adapter.read_file("/file.bin"), Some(vec![0, 159, 146, 150]));
        assert_eq!(adapter.read_file_to_string("/file.bin"), None);
    }

    #[test]
    fn append_concatenates_without_a_separator() {
        let adapter = setup();

        adapter.write_file("/log.txt", "first").unwrap();
        adapter.append_to_file("/log.txt", "second").unwrap();
        adapter.append_to_file("/new.txt", "created").unwrap();

        assert_eq!(
            adapter.read_file_to_string("/log.txt").as_deref(),
            Some("firstsecond")
        );
        assert_eq!(
            adapter.read_file_to_string("/new.txt").as_deref(),
            Some("created")
        );
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let adapter = setup();

        adapter.write_file("a/b/c/file.txt", "hi").unwrap();

        assert!(adapter.is_directory("a"));
        assert!(adapter.is_directory("a/b"));
        assert!(adapter.is_directory("a/b/c"));
        assert!(adapter.is_readable_file("a/b/c/file.txt"));
    }

    #[test]
    fn writing_over_a_directory_fails() {
        let adapter = setup();
        adapter.create_directory("/dir").unwrap();

        assert!(matches!(
            adapter.write_file("/dir", "x"),
            Err(FsAdapterError::FileWriteFailed { .. })
        ));
    }

    #[test]
    fn reading_a_missing_file_is_absent_not_an_error() {
        let adapter = setup();

        assert_eq!(adapter.read_file("/missing"), None);
        assert!(!adapter.is_readable_file("/missing"));
    }

    #[test]
    fn directories_are_not_readable_files() {
        let adapter = setup();
        adapter.create_directory("/dir").unwrap();

        assert!(!adapter.is_readable_file("/dir"));
        assert!(!adapter.exists_file("/dir"));
        assert!(adapter.exists("/dir"));
    }

    #[test]
    fn delete_of_a_missing_path_is_a_no_op() {
        let adapter = setup();

        assert!(adapter.delete_file("/missing").is_ok());

        adapter.write_file("/present", "x").unwrap();
        adapter.delete_file("/present").unwrap();
        assert!(!adapter.exists("/present"));
    }

    #[test]
    fn deleting_a_directory_fails() {
        let adapter = setup();
        adapter.create_directory("/dir").unwrap();

        assert!(matches!(
            adapter.delete_file("/dir"),
            Err(FsAdapterError::DeleteFailed { .. })
        ));
    }

    #[test]
    fn rename_moves_a_file_and_reports_failures() {
        let adapter = setup();
        adapter.write_file("/old.txt", "content").unwrap();

        adapter.rename_file("/old.txt", "/new.txt").unwrap();
        assert!(!adapter.exists("/old.txt"));
        assert_eq!(
            adapter.read_file_to_string("/new.txt").as_deref(),
            Some("content")
        );

        match adapter.rename_file("/old.txt", "/other.txt") {
            Err(FsAdapterError::RenameFailed {
                source_path,
                destination_path,
                ..
            }) => {
                assert_eq!(source_path, "/old.txt");
                assert_eq!(destination_path, "/other.txt");
            }
            other => panic!("Expected a rename failure but got {:?}", other),
        }
    }

    #[test]
    fn list_files_returns_names_only() {
        let adapter = setup();
        adapter.write_file("/dir/x.txt", "").unwrap();
        adapter.write_file("/dir/y.txt", "").unwrap();
        adapter.create_directory("/dir/sub").unwrap();

        assert_eq!(adapter.list_files("/dir"), vec!["sub", "x.txt", "y.txt"]);
        assert!(adapter.list_files("/dir/x.txt").is_empty());
        assert!(adapter.list_files("/missing").is_empty());
    }

    #[test]
    fn search_files_filters_immediate_entries_by_mask() {
        let adapter = setup();
        adapter.write_file("/dir/report.txt", "").unwrap();
        adapter.write_file("/dir/report.csv", "").unwrap();
        adapter.write_file("/dir/data.csv", "").unwrap();
        adapter.write_file("/dir/sub/nested.csv", "").unwrap();

        assert_eq!(
            adapter.search_files("/dir", "*.csv").unwrap(),
            vec![joined(&["/dir", "data.csv"]), joined(&["/dir", "report.csv"])]
        );
        assert_eq!(
            adapter.search_files("/dir", "report.*").unwrap(),
            vec![
                joined(&["/dir", "report.csv"]),
                joined(&["/dir", "report.txt"])
            ]
        );
        assert_eq!(
            adapter.search_files("/dir", "data.csv").unwrap(),
            vec![joined(&["/dir", "data.csv"])]
        );
        assert!(adapter.search_files("/missing", "*").unwrap().is_empty());
    }

    #[test]
    fn search_files_recursively_descends_into_subdirectories() {
        let adapter = setup();
        adapter.write_file("/dir/a.txt", "").unwrap();
        adapter.write_file("/dir/sub/b.txt", "").unwrap();
        adapter.write_file("/dir/sub/deep/c.txt", "").unwrap();
        adapter.write_file("/dir/sub/deep/skip.md", "").unwrap();

        assert_eq!(
            adapter.search_files_recursively("/dir", "*.txt").unwrap(),
            vec![
                joined(&["/dir", "a.txt"]),
                joined(&["/dir", "sub", "b.txt"]),
                joined(&["/dir", "sub", "deep", "c.txt"]),
            ]
        );
        assert_eq!(
            adapter.search_files_recursively("/dir", "deep").unwrap(),
            vec![joined(&["/dir", "sub", "deep"])]
        );
    }

    #[test]
    fn current_directory_comes_from_the_file_system() {
        let adapter = FilesystemAdapter::new(Arc::new(Box::new(
            InMemoryFileSystem::with_working_dir("/home/me".into()),
        )));

        assert_eq!(adapter.get_current_directory().unwrap(), "/home/me");
    }

    #[test]
    fn list_files_swallows_enumeration_failures() {
        let adapter = faulty_adapter(|fs| fs.with_broken_dir("/dir"));

        assert!(adapter.is_directory("/dir"));
        assert!(adapter.list_files("/dir").is_empty());
        assert_eq!(adapter.list_files("/dir/sub"), vec!["b.txt", "deep"]);
    }

    #[test]
    fn searches_propagate_enumeration_failures() {
        let adapter = faulty_adapter(|fs| fs.with_broken_dir("/dir"));

        assert!(matches!(
            adapter.search_files("/dir", "*"),
            Err(FsAdapterError::DirectoryReadFailed { .. })
        ));
        assert!(matches!(
            adapter.search_files_recursively("/dir", "*"),
            Err(FsAdapterError::DirectoryReadFailed { .. })
        ));
    }

    #[test]
    fn recursive_search_fails_without_partial_results_when_a_deep_directory_is_unreadable() {
        let deep_dir = joined(&["/dir", "sub", "deep"]);
        let adapter = faulty_adapter(|fs| fs.with_broken_dir(deep_dir.clone()));

        match adapter.search_files_recursively("/dir", "*.txt") {
            Err(FsAdapterError::DirectoryReadFailed { path, .. }) => assert_eq!(path, deep_dir),
            other => panic!("Expected a directory read failure but got {:?}", other),
        }
        assert_eq!(
            adapter.search_files("/dir", "*.txt").unwrap(),
            vec![joined(&["/dir", "a.txt"])]
        );
    }

    #[test]
    fn current_directory_failure_is_reported() {
        let adapter = faulty_adapter(|fs| fs.with_current_dir_unavailable());

        match adapter.get_current_directory() {
            Err(FsAdapterError::WorkingDirectoryUnavailable(source)) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!(
                "Expected the working directory to be unavailable but got {:?}",
                other
            ),
        }
    }
}
