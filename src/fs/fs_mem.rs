/*!
This module contains a wrapper for an in-memory file system implementation.
*/

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::traits::{EntryKind, FileSystem};

/// File system implementation that is backed by memory.
#[derive(Debug)]
pub struct InMemoryFileSystem {
    /**
    The files and directories on the file system.

    A single lock guards both tables so that checks like "does the parent directory exist" are
    consistent with the mutation that follows them.
    */
    entries: RwLock<EntryTable>,

    /// The directory that relative paths are resolved against.
    working_dir: PathBuf,
}

/// Public methods.
impl InMemoryFileSystem {
    /// Create a new instance of the in-memory file system rooted at `/`.
    pub fn new() -> Self {
        Self::with_working_dir(PathBuf::from("/"))
    }

    /**
    Create a new instance of the in-memory file system that resolves relative paths against
    `working_dir`.

    The working directory and its ancestors are created as part of construction.
    */
    pub fn with_working_dir(working_dir: PathBuf) -> Self {
        let working_dir = normalize(Path::new("/"), &working_dir);
        let mut table = EntryTable::default();
        for ancestor in working_dir.ancestors() {
            table.directories.insert(ancestor.to_path_buf());
        }

        InMemoryFileSystem {
            entries: RwLock::new(table),
            working_dir,
        }
    }
}

impl Default for InMemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Private methods.
impl InMemoryFileSystem {
    /// Resolve `path` to the absolute form used as a key in the entry tables.
    fn resolve(&self, path: &Path) -> PathBuf {
        normalize(&self.working_dir, path)
    }
}

impl FileSystem for InMemoryFileSystem {
    fn get_name(&self) -> String {
        "InMemoryFileSystem".to_string()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = self.resolve(path);
        let mut entries = self.entries.write();

        if let Some(file_ancestor) = path
            .ancestors()
            .find(|ancestor| entries.files.contains_key(*ancestor))
        {
            let error_message = format!(
                "A file already exists at {path}",
                path = file_ancestor.to_string_lossy()
            );
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, error_message));
        }

        for ancestor in path.ancestors() {
            entries.directories.insert(ancestor.to_path_buf());
        }

        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let path = self.resolve(path);
        let entries = self.entries.read();
        entries.ensure_directory(&path)?;

        // Iterate both tables and keep the entries whose parent is the target path
        let mut children: Vec<String> = entries
            .files
            .keys()
            .chain(entries.directories.iter())
            .filter(|child| child.parent() == Some(path.as_path()))
            .filter_map(|child| child.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        children.sort();

        Ok(children)
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let path = self.resolve(path);
        let entries = self.entries.read();
        match entries.files.get(&path) {
            Some(file) => Ok(Box::new(InMemoryFileReader::new(file.clone()))),
            None => Err(not_found(&path)),
        }
    }

    fn create_file(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>> {
        let path = self.resolve(path);
        let mut entries = self.entries.write();

        if entries.directories.contains(&path) {
            let error_message = format!(
                "Cannot open the directory at {path} as a file",
                path = path.to_string_lossy()
            );
            return Err(io::Error::new(io::ErrorKind::InvalidInput, error_message));
        }

        if let Some(parent) = path.parent() {
            entries.ensure_directory(parent)?;
        }

        if let Some(file) = entries.files.get(&path) {
            if !append {
                file.0.write().contents.clear();
            }

            return Ok(Box::new(file.clone()));
        }

        let new_file = LockableInMemoryFile::new();
        entries.files.insert(path, new_file.clone());

        Ok(Box::new(new_file))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from = self.resolve(from);
        let to = self.resolve(to);
        let mut entries = self.entries.write();

        if let Some(parent) = to.parent() {
            entries.ensure_directory(parent)?;
        }

        if entries.files.contains_key(&from) {
            if entries.directories.contains(&to) {
                let error_message = format!(
                    "Cannot replace the directory at {path} with a file",
                    path = to.to_string_lossy()
                );
                return Err(io::Error::new(io::ErrorKind::InvalidInput, error_message));
            }

            let moved_file = entries.files.remove(&from);
            if let Some(file) = moved_file {
                entries.files.insert(to, file);
            }

            return Ok(());
        }

        if !entries.directories.contains(&from) {
            return Err(not_found(&from));
        }

        if from == to {
            return Ok(());
        }

        if to.starts_with(&from) || entries.files.contains_key(&to) || entries.has_children(&to) {
            let error_message = format!(
                "Cannot move the directory at {from} to {to}",
                from = from.to_string_lossy(),
                to = to.to_string_lossy()
            );
            return Err(io::Error::new(io::ErrorKind::InvalidInput, error_message));
        }

        // Re-key every entry in the moved subtree
        let moved_directories: Vec<PathBuf> = entries
            .directories
            .iter()
            .filter(|dir| dir.starts_with(&from))
            .cloned()
            .collect();
        for dir in moved_directories {
            entries.directories.remove(&dir);
            entries.directories.insert(rebase(&dir, &from, &to));
        }

        let moved_files: Vec<PathBuf> = entries
            .files
            .keys()
            .filter(|file| file.starts_with(&from))
            .cloned()
            .collect();
        for file_path in moved_files {
            let moved_file = entries.files.remove(&file_path);
            if let Some(file) = moved_file {
                entries.files.insert(rebase(&file_path, &from, &to), file);
            }
        }

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let path = self.resolve(path);
        let mut entries = self.entries.write();
        let removed_file = entries.files.remove(&path);
        match removed_file {
            Some(_) => Ok(()),
            None if entries.directories.contains(&path) => {
                let error_message = format!(
                    "The path {path} is a directory",
                    path = path.to_string_lossy()
                );
                Err(io::Error::new(io::ErrorKind::InvalidInput, error_message))
            }
            None => Err(not_found(&path)),
        }
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        let path = self.resolve(path);
        let entries = self.entries.read();
        if entries.files.contains_key(&path) {
            return Ok(EntryKind::File);
        }

        if entries.directories.contains(&path) {
            return Ok(EntryKind::Directory);
        }

        Err(not_found(&path))
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.working_dir.clone())
    }
}

/// The tables backing the in-memory file system. Keys are absolute, normalized paths.
#[derive(Debug, Default)]
struct EntryTable {
    files: HashMap<PathBuf, LockableInMemoryFile>,
    directories: HashSet<PathBuf>,
}

impl EntryTable {
    /// Returns an error unless `path` is an existing directory.
    fn ensure_directory(&self, path: &Path) -> io::Result<()> {
        if self.directories.contains(path) {
            return Ok(());
        }

        if self.files.contains_key(path) {
            let error_message = format!(
                "The path {path} is not a directory",
                path = path.to_string_lossy()
            );
            return Err(io::Error::new(io::ErrorKind::InvalidInput, error_message));
        }

        Err(not_found(path))
    }

    /// Returns true if anything lives directly or transitively under `path`.
    fn has_children(&self, path: &Path) -> bool {
        self.files
            .keys()
            .chain(self.directories.iter())
            .any(|entry| entry != path && entry.starts_with(path))
    }
}

/// Represents a file in the in-memory file system.
#[derive(Debug, Default)]
struct InMemoryFile {
    /// The contents of the file.
    contents: Vec<u8>,
}

/// A shared handle to an in-memory file. Writes always go to the end of the file.
#[derive(Clone, Debug, Default)]
struct LockableInMemoryFile(Arc<RwLock<InMemoryFile>>);

impl LockableInMemoryFile {
    /// Create an instance of [`LockableInMemoryFile`](self::LockableInMemoryFile).
    fn new() -> Self {
        Self::default()
    }
}

/**
A read handle over an in-memory file.

Opening a file does not copy it. Bytes are copied out of the shared buffer only as they are read,
so a handle that is opened and dropped costs nothing beyond the reference count.
*/
struct InMemoryFileReader {
    file: LockableInMemoryFile,

    /// The offset of the next byte to read.
    position: usize,
}

impl InMemoryFileReader {
    fn new(file: LockableInMemoryFile) -> Self {
        Self { file, position: 0 }
    }
}

impl Read for InMemoryFileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let file = self.file.0.read();
        let remaining = file.contents.get(self.position..).unwrap_or(&[]);
        let bytes_read = remaining.len().min(buf.len());
        buf[..bytes_read].copy_from_slice(&remaining[..bytes_read]);
        self.position += bytes_read;

        Ok(bytes_read)
    }
}

impl Write for LockableInMemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write().contents.extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/**
Make `path` absolute against `base` and fold away `.` and `..` components.

`..` at the root stays at the root, like it does on disk.
*/
fn normalize(base: &Path, path: &Path) -> PathBuf {
    let mut normalized = if path.is_absolute() {
        PathBuf::new()
    } else {
        base.to_path_buf()
    };

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Replace the `from` prefix of `path` with `to`.
fn rebase(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(relative_path) if relative_path.as_os_str().is_empty() => to.to_path_buf(),
        Ok(relative_path) => to.join(relative_path),
        Err(_) => path.to_path_buf(),
    }
}

/// Build the error returned when nothing exists at `path`.
fn not_found(path: &Path) -> io::Error {
    let error_message = format!(
        "Could not find the file with path {path}",
        path = path.to_string_lossy()
    );
    io::Error::new(io::ErrorKind::NotFound, error_message)
}
