/*!
The platform layer that the adapter is built on, with disk, temporary-directory and in-memory
implementations.
*/

mod traits;
pub use self::traits::{EntryKind, FileSystem};

mod fs_disk;
pub use self::fs_disk::{OsFileSystem, TmpFileSystem};

mod fs_mem;
pub use self::fs_mem::InMemoryFileSystem;
