use std::path::{Path, PathBuf};

/// Filesystem access needed by the traversal.
///
/// The engine never touches `std::fs` directly so tests can run it against
/// an in-memory tree.
pub trait SourceFs {
    fn is_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Stable key for the visited set. Falls back to the input on failure.
    fn canonicalize(&self, path: &Path) -> PathBuf;
}

/// The real disk.
pub struct DiskFs;

impl SourceFs for DiskFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| crate::util::normalize(path))
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFs;
