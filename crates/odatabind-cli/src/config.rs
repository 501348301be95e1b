use anyhow::{bail, Result};
use odatabind_codegen::ProjectLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const CONFIG_FILE_VERSION: u32 = 1;

/// Default name of the configuration file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = "odatabind.toml";

/// Configuration for odatabind CLI operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    version: u32,

    /// Where the generated project lives
    pub project: ProjectConfig,

    /// Sub-package names under the top-level package
    pub packages: PackagesConfig,

    /// How metadata documents are retrieved
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project root; every generated path is relative to it
    pub root: PathBuf,

    /// Java source root, relative to `root`
    pub source_dir: PathBuf,

    /// Base package of the generated classes, e.g. `com.acme`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_level_package: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    pub connectivity: String,
    pub domain: String,
    pub web: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Program that prints the metadata document of a service
    pub command: String,

    /// Arguments passed before the service URL and credentials. A leading
    /// `~/` is expanded to the home directory.
    pub args: Vec<String>,

    /// Seconds to wait for the retriever before giving up
    pub timeout_secs: u64,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        contents.parse()
    }

    /// Loads the config, or returns the defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    /// Save the config to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_string())?;
        Ok(())
    }

    /// Set the project configuration
    pub fn project(mut self, project: ProjectConfig) -> Self {
        self.project = project;
        self
    }

    /// Set the sub-package names
    pub fn packages(mut self, packages: PackagesConfig) -> Self {
        self.packages = packages;
        self
    }

    /// Set the metadata retrieval configuration
    pub fn metadata(mut self, metadata: MetadataConfig) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the project root
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project.root = root.into();
        self
    }

    /// Set the top-level package
    pub fn top_level_package(mut self, package: impl Into<String>) -> Self {
        self.project.top_level_package = Some(package.into());
        self
    }

    /// The package layout generated classes are written to.
    pub fn layout(&self) -> Result<ProjectLayout> {
        let Some(package) = self.project.top_level_package.as_deref() else {
            bail!(
                "no top-level package configured; set `project.top_level_package` in {CONFIG_FILE} \
                 or run `odatabind setup --top-level-package <PACKAGE>`"
            );
        };

        Ok(ProjectLayout::new(package)
            .source_root(&self.project.source_dir)
            .connectivity(&self.packages.connectivity)
            .domain(&self.packages.domain)
            .web(&self.packages.web))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_FILE_VERSION,
            project: ProjectConfig::default(),
            packages: PackagesConfig::default(),
            metadata: MetadataConfig::default(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_dir: PathBuf::from("src/main/java"),
            top_level_package: None,
        }
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            connectivity: "connectivity".to_string(),
            domain: "domain".to_string(),
            web: "web".to_string(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            command: "java".to_string(),
            args: vec!["-jar".to_string(), "~/appToRetrieveOdataMetadata.jar".to_string()],
            timeout_secs: 30,
        }
    }
}

impl MetadataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;

        if config.version != CONFIG_FILE_VERSION {
            bail!(
                "Unsupported config file version: {}. Expected version {}",
                config.version,
                CONFIG_FILE_VERSION
            );
        }

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toml_str = toml::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.metadata.timeout(), Duration::from_secs(30));
        assert_eq!(config.metadata.args, vec!["-jar", "~/appToRetrieveOdataMetadata.jar"]);
    }

    #[test]
    fn partial_sections_keep_their_defaults() {
        let config: Config = r#"
            version = 1

            [project]
            top_level_package = "com.acme"

            [packages]
            web = "mvc"

            [metadata]
            timeout_secs = 5
        "#
        .parse()
        .unwrap();

        assert_eq!(config.project.source_dir, PathBuf::from("src/main/java"));
        assert_eq!(config.packages.domain, "domain");
        assert_eq!(config.metadata.command, "java");

        let layout = config.layout().unwrap();
        assert_eq!(
            layout.package_line(odatabind_codegen::Package::Web),
            "package com.acme.mvc;"
        );
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = "version = 2".parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("Unsupported config file version: 2"));
    }

    #[test]
    fn layout_needs_a_package() {
        assert!(Config::default().layout().is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let config = Config::new().top_level_package("com.acme").root("/work/app");
        let parsed: Config = config.to_string().parse().unwrap();
        assert_eq!(parsed, config);
    }
}
