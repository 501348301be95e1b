use log::debug;
use odatabind_codegen::{glob_matcher, SourceStore};
use odatabind_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A [`SourceStore`] over the project directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        let full = self.root.join(path);

        if !full.is_file() {
            return Err(Error::missing_file(path.display().to_string()));
        }

        fs::read_to_string(&full).map_err(|err| Error::from(err).context(format!("reading `{}`", path.display())))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        let full = self.root.join(path);

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full, contents).map_err(|err| Error::from(err).context(format!("writing `{}`", path.display())))?;
        debug!("stored {} bytes at {}", contents.len(), full.display());
        Ok(())
    }

    /// Only the directory part of the pattern before the last separator is
    /// scanned; wildcards are matched against file names in it.
    fn list_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = glob_matcher(pattern)?;
        let dir = Path::new(pattern).parent().unwrap_or_else(|| Path::new(""));

        let entries = match fs::read_dir(self.root.join(dir)) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };

        let mut paths = vec![];
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = dir.join(entry.file_name());
            if matcher.is_match(&path) {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_create_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path());
        let path = Path::new("src/main/java/com/acme/domain/Products.java");

        assert!(!store.exists(path));
        store.write(path, "class Products {}\n").unwrap();

        assert!(store.exists(path));
        assert_eq!(store.read(path).unwrap(), "class Products {}\n");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        let err = store.read(Path::new("nope.java")).unwrap_err();
        assert!(err.source_error().is_some());
    }

    #[test]
    fn listing_matches_file_names_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path());

        for path in [
            "web/ProductsController_Roo_Controller.aj",
            "web/ProductsController_Roo_Controller_Finder.aj",
            "web/ProductsController.java",
            "web/nested/ProductsController_Roo_Controller.aj",
        ] {
            store.write(Path::new(path), "").unwrap();
        }

        assert_eq!(
            store.list_matching("web/ProductsController_Roo_Controller*.aj").unwrap(),
            vec![
                PathBuf::from("web/ProductsController_Roo_Controller.aj"),
                PathBuf::from("web/ProductsController_Roo_Controller_Finder.aj"),
            ]
        );
        assert_eq!(store.list_matching("domain/*.java").unwrap(), Vec::<PathBuf>::new());
    }
}
