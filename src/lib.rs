/*!
minfs is a small filesystem abstraction layer. It provides directory creation, whole-file
read/write/append, existence checks, renaming, deletion and directory search with single-wildcard
masks behind one consistent interface.

Two error philosophies are used on purpose:

- Reads and existence checks report "not found" as a normal value (`None`, `false`, empty list).
- Mutations and searches return a [`FsAdapterResult`] with a distinct [`FsAdapterError`] variant
  for each kind of failure.

The platform is reached through the [`fs::FileSystem`] trait so that the same adapter can run over
the operating system, a self-cleaning temporary directory, or memory.

```no_run
use minfs::FilesystemAdapter;

let adapter = FilesystemAdapter::default();
adapter.write_file("reports/q1.csv", "region,total\n")?;
let csv_files = adapter.search_files_recursively("reports", "*.csv")?;
# Ok::<(), minfs::FsAdapterError>(())
```
*/

#![warn(missing_debug_implementations, missing_docs)]

pub mod adapter;
pub use adapter::FilesystemAdapter;

pub mod fs;

mod config;
mod walker;

#[cfg(test)]
mod test_utils;

mod errors;
pub use errors::{FsAdapterError, FsAdapterResult};

pub mod mask;
pub use mask::Mask;

pub mod path_ops;
