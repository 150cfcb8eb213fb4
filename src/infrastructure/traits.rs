//! I/O boundary traits for testability
//!
//! Config files, config templates and session scripts go through this trait so
//! the CLI and settings loader can be exercised against a temporary directory.

use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_nested_path_when_ensure_parent_then_creates_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/billsplit.toml");
        let fs = RealFileSystem;

        fs.ensure_parent(&path).unwrap();
        fs.write(&path, "people = 3\n").unwrap();

        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "people = 3\n");
    }

    #[test]
    fn given_bare_file_name_when_ensure_parent_then_noop() {
        RealFileSystem
            .ensure_parent(Path::new("billsplit.toml"))
            .unwrap();
    }
}
