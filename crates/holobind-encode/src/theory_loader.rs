//! The seam between the (IO-free) encoder and wherever theory text lives.

/// Resolves a `Load "path"` directive to UTF-8 source text.
///
/// This crate never touches the filesystem directly; `holobind-session`
/// supplies a filesystem-backed implementation, and tests supply an
/// in-memory one, so the encoder itself stays pure and easy to test.
pub trait TheoryLoader {
    /// Reads the theory text at `path`.
    fn read(&self, path: &str) -> std::io::Result<String>;
}

/// An in-memory loader, for tests and for embedding canned theories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    theories: std::collections::HashMap<String, String>,
}

impl InMemoryLoader {
    /// An empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` as the content found at `path`.
    pub fn with_theory(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.theories.insert(path.into(), text.into());
        self
    }
}

impl TheoryLoader for InMemoryLoader {
    fn read(&self, path: &str) -> std::io::Result<String> {
        self.theories.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no theory at {}", path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_loader_reads_registered_theory() {
        let loader = InMemoryLoader::new().with_theory("animals.hb", "isA Rex Dog\n");
        assert_eq!(loader.read("animals.hb").unwrap(), "isA Rex Dog\n");
    }

    #[test]
    fn in_memory_loader_fails_on_unknown_path() {
        let loader = InMemoryLoader::new();
        assert!(loader.read("missing.hb").is_err());
    }
}
