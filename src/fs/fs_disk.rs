/*!
This module contains file system wrappers for disk-based file systems.
*/

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

use crate::config::is_pseudo_entry;

use super::traits::{EntryKind, FileSystem};

/**
Read the names of the entries of a directory on disk.

Order is whatever the platform enumerates in. A name that is not valid unicode fails the whole
listing with [`io::ErrorKind::InvalidData`] since it could not be turned back into a usable path.
*/
fn read_dir_names(path: &Path) -> io::Result<Vec<String>> {
    let mut names = vec![];
    for maybe_entry in fs::read_dir(path)? {
        let name = maybe_entry?.file_name().into_string().map_err(|raw_name| {
            let error_message = format!(
                "The entry {raw_name:?} in {path} is not valid unicode",
                path = path.to_string_lossy()
            );
            io::Error::new(io::ErrorKind::InvalidData, error_message)
        })?;
        if is_pseudo_entry(&name) {
            continue;
        }

        names.push(name);
    }

    Ok(names)
}

/// Open a file on disk for writing, truncating it unless `append` is set.
fn open_for_write(path: &Path, append: bool) -> io::Result<File> {
    let mut open_options = OpenOptions::new();
    open_options.create(true);

    if append {
        open_options.append(true);
    } else {
        open_options.write(true).truncate(true);
    }

    open_options.open(path)
}

/// Classify the entry at `path`, following symbolic links.
fn disk_entry_kind(path: &Path) -> io::Result<EntryKind> {
    let metadata = fs::metadata(path)?;
    if metadata.is_file() {
        return Ok(EntryKind::File);
    }

    if metadata.is_dir() {
        return Ok(EntryKind::Directory);
    }

    Ok(EntryKind::Other)
}

/// File system implementation that delegates I/O to the operating system.
#[derive(Debug)]
pub struct OsFileSystem {}

/// Public methods.
impl OsFileSystem {
    /// Create an instance of [`OsFileSystem`].
    pub fn new() -> Self {
        OsFileSystem {}
    }
}

impl Default for OsFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for OsFileSystem {
    fn get_name(&self) -> String {
        "OsFileSystem".to_string()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        read_dir_names(path)
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let file = File::open(path)?;
        Ok(Box::new(file))
    }

    fn create_file(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>> {
        let file = open_for_write(path, append)?;
        Ok(Box::new(file))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        disk_entry_kind(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }
}

/**
A file system implmentation built on `tempfiles` crate structures. All provided paths are
resolved relative to the root directory.

Only the root directory is backed by `tempfiles` to take advantage of the auto-cleanup mechanism.
Everything under the root is created with plain `std::fs` calls so that control over naming is
retained.
*/
#[derive(Debug)]
pub struct TmpFileSystem {
    root_dir: TempDir,
}

/// Public methods
impl TmpFileSystem {
    /**
    Create a new instance of [`TmpFileSystem`] where all files are created in the provided root.

    If no root is provided, the root is created in the platform's temporary directory.
    */
    pub fn new(root_path: Option<&Path>) -> io::Result<Self> {
        let root_dir = match root_path {
            Some(path) => TempDir::new_in(path)?,
            None => TempDir::new()?,
        };

        Ok(TmpFileSystem { root_dir })
    }

    /**
    Get the root path of this temporary file system.

    All methods will operate relatively to this root path.
    */
    pub fn get_root_path(&self) -> PathBuf {
        self.root_dir.path().to_owned()
    }
}

/// Private methods.
impl TmpFileSystem {
    /**
    Get a path rooted by the root path of this file system. Prefixes that match the root path will
    be stripped.

    Any other absolute path is re-rooted under the root, and `..` never climbs above the root.
    */
    fn get_rooted_path(&self, path: &Path) -> PathBuf {
        let root = self.root_dir.path();
        let relative_path = path.strip_prefix(root).unwrap_or(path);

        let mut rooted_path = root.to_path_buf();
        let mut depth = 0_usize;
        for component in relative_path.components() {
            match component {
                Component::Normal(part) => {
                    rooted_path.push(part);
                    depth += 1;
                }
                Component::ParentDir if depth > 0 => {
                    rooted_path.pop();
                    depth -= 1;
                }
                Component::ParentDir
                | Component::CurDir
                | Component::RootDir
                | Component::Prefix(_) => {}
            }
        }

        rooted_path
    }
}

impl FileSystem for TmpFileSystem {
    fn get_name(&self) -> String {
        "TmpFileSystem".to_string()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(self.get_rooted_path(path))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        read_dir_names(&self.get_rooted_path(path))
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let file = File::open(self.get_rooted_path(path))?;
        Ok(Box::new(file))
    }

    fn create_file(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>> {
        let file = open_for_write(&self.get_rooted_path(path), append)?;
        Ok(Box::new(file))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(self.get_rooted_path(from), self.get_rooted_path(to))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(self.get_rooted_path(path))
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        disk_entry_kind(&self.get_rooted_path(path))
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.get_root_path())
    }
}
