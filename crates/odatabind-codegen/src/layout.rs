use std::path::{Path, PathBuf};

/// The three sub-packages generated code is spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    /// Endpoint classes, their metadata documents and `ODataConnectivity`
    Connectivity,

    /// Entity classes
    Domain,

    /// MVC controllers
    Web,
}

/// Where the generated project keeps its sources.
///
/// Paths produced here are relative to the store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    source_root: PathBuf,
    top_level_package: String,
    connectivity: String,
    domain: String,
    web: String,
}

impl ProjectLayout {
    pub fn new(top_level_package: impl Into<String>) -> ProjectLayout {
        ProjectLayout {
            source_root: PathBuf::from("src/main/java"),
            top_level_package: top_level_package.into(),
            connectivity: "connectivity".to_string(),
            domain: "domain".to_string(),
            web: "web".to_string(),
        }
    }

    pub fn source_root(mut self, path: impl Into<PathBuf>) -> ProjectLayout {
        self.source_root = path.into();
        self
    }

    pub fn connectivity(mut self, name: impl Into<String>) -> ProjectLayout {
        self.connectivity = name.into();
        self
    }

    pub fn domain(mut self, name: impl Into<String>) -> ProjectLayout {
        self.domain = name.into();
        self
    }

    pub fn web(mut self, name: impl Into<String>) -> ProjectLayout {
        self.web = name.into();
        self
    }

    pub fn top_level_package(&self) -> &str {
        &self.top_level_package
    }

    /// Fully qualified package name, e.g. `com.acme.domain`.
    pub fn package_name(&self, package: Package) -> String {
        let sub = match package {
            Package::Connectivity => &self.connectivity,
            Package::Domain => &self.domain,
            Package::Web => &self.web,
        };

        if self.top_level_package.is_empty() {
            sub.clone()
        } else {
            format!("{}.{sub}", self.top_level_package)
        }
    }

    /// The `package ...;` line of files in `package`.
    pub fn package_line(&self, package: Package) -> String {
        format!("package {};", self.package_name(package))
    }

    pub fn package_dir(&self, package: Package) -> PathBuf {
        let mut dir = self.source_root.clone();
        for segment in self.package_name(package).split('.') {
            dir.push(segment);
        }
        dir
    }

    pub fn class_path(&self, package: Package, class: &str) -> PathBuf {
        self.file_path(package, &format!("{class}.java"))
    }

    pub fn file_path(&self, package: Package, file: &str) -> PathBuf {
        self.package_dir(package).join(file)
    }

    /// A glob pattern matching `pattern` inside the package directory.
    pub fn glob(&self, package: Package, pattern: &str) -> String {
        let dir = self.package_dir(package);
        format!("{}/{pattern}", slashed(&dir))
    }
}

fn slashed(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_layout() {
        let layout = ProjectLayout::new("com.acme");
        assert_eq!(layout.package_name(Package::Domain), "com.acme.domain");
        assert_eq!(layout.package_line(Package::Web), "package com.acme.web;");
        assert_eq!(
            layout.class_path(Package::Connectivity, "Northwind"),
            PathBuf::from("src/main/java/com/acme/connectivity/Northwind.java")
        );
        assert_eq!(
            layout.glob(Package::Connectivity, "*_metadata.xml"),
            "src/main/java/com/acme/connectivity/*_metadata.xml"
        );
    }

    #[test]
    fn renamed_packages() {
        let layout = ProjectLayout::new("org.shop")
            .source_root("java")
            .domain("model")
            .web("mvc");
        assert_eq!(
            layout.class_path(Package::Domain, "Product"),
            PathBuf::from("java/org/shop/model/Product.java")
        );
        assert_eq!(layout.package_name(Package::Web), "org.shop.mvc");
    }
}
