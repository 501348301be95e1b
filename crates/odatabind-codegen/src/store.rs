use crate::{Error, Result};

use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File access used by the orchestrator.
///
/// Each call is atomic from the orchestrator's point of view, and calls are
/// not ordered against each other. Paths are relative to the project root.
pub trait SourceStore {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<String>;

    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;

    /// Paths matching a glob pattern such as
    /// `src/main/java/com/acme/web/*Controller_Roo_Controller*.aj`.
    /// `*` does not cross directory separators.
    fn list_matching(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// Compiles `pattern` the way every [`SourceStore`] interprets it.
pub fn glob_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::from(anyhow::Error::new(e)).context(format!("invalid glob `{pattern}`")))?;

    Ok(glob.compile_matcher())
}

/// A [`SourceStore`] kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Seeds a file, replacing any previous contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> MemoryStore {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.files.keys().map(PathBuf::as_path)
    }
}

impl SourceStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::missing_file(path.display().to_string()))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn list_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = glob_matcher(pattern)?;

        Ok(self
            .files
            .keys()
            .filter(|path| matcher.is_match(path))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_missing_file() {
        let store = MemoryStore::new();
        let err = store.read(Path::new("a/B.java")).unwrap_err();
        assert!(err.is_source_error());
    }

    #[test]
    fn glob_does_not_cross_directories() {
        let store = MemoryStore::new()
            .with_file("pkg/A_metadata.xml", "")
            .with_file("pkg/B_metadata.xml", "")
            .with_file("pkg/sub/C_metadata.xml", "")
            .with_file("pkg/A.java", "");

        let found = store.list_matching("pkg/*_metadata.xml").unwrap();
        assert_eq!(
            found,
            vec![PathBuf::from("pkg/A_metadata.xml"), PathBuf::from("pkg/B_metadata.xml")]
        );
    }

    #[test]
    fn write_replaces() {
        let mut store = MemoryStore::new().with_file("A.java", "old");
        store.write(Path::new("A.java"), "new").unwrap();
        assert_eq!(store.get("A.java"), Some("new"));
    }
}
