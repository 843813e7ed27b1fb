//! Attaching file context to I/O failures

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns a bare `io::Error` into [`ApplicationError::OperationFailed`]
/// naming what was attempted and on which file.
pub trait IoResultExt<T> {
    /// ```ignore
    /// let content = fs.read_to_string(path).with_path_context("read order document", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: Box::new(source),
        })
    }
}
