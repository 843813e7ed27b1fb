//! I/O boundary traits
//!
//! Services read order documents only through [`FileSystem`], so tests can
//! hand them an in-memory implementation.

use std::io;
use std::path::Path;

/// Read-only view of the files order documents live in.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// True for an existing regular file (directories and missing paths are false).
    fn is_file(&self, path: &Path) -> bool;
}

/// Local disk.
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
