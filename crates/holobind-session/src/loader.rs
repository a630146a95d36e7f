//! Filesystem-backed [`TheoryLoader`], the one place this crate touches disk.

use holobind_encode::TheoryLoader;
use std::path::PathBuf;

/// Resolves `Load "path"` against a base directory on disk.
///
/// Relative paths are joined to `base_dir`; an absolute path is read
/// as-is. This is the only filesystem-touching type in the workspace —
/// everything below `holobind-session` stays pure so it can be tested
/// with [`holobind_encode::InMemoryLoader`] instead.
#[derive(Debug, Clone)]
pub struct FilesystemLoader {
    base_dir: PathBuf,
}

impl FilesystemLoader {
    /// Reads theories relative to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl Default for FilesystemLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TheoryLoader for FilesystemLoader {
    fn read(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.base_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_theory_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("animals.hb"), "isA Rex Dog\n").unwrap();
        let loader = FilesystemLoader::new(dir.path());
        assert_eq!(loader.read("animals.hb").unwrap(), "isA Rex Dog\n");
    }

    #[test]
    fn missing_theory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FilesystemLoader::new(dir.path());
        assert!(loader.read("missing.hb").is_err());
    }
}
