mod command;
mod config;
mod fetch;
mod store;

pub use config::*;
pub use fetch::{FetchRequest, MetadataFetcher, ProcessFetcher};
pub use store::FsStore;

use anyhow::Result;
use clap::Parser;
use command::Command;
use odatabind_codegen::Orchestrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// odatabind CLI library for building custom command-line tools
pub struct OdatabindCli {
    config: Config,
    config_path: PathBuf,
    fetcher: Option<Arc<dyn MetadataFetcher>>,
}

impl OdatabindCli {
    /// Create a new OdatabindCli instance with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: PathBuf::from(CONFIG_FILE),
            fetcher: None,
        }
    }

    /// Where `setup` writes the configuration
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Use `fetcher` instead of running the configured retriever
    pub fn fetcher(mut self, fetcher: impl MetadataFetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_file(&self) -> &Path {
        &self.config_path
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli).await
    }

    /// Execute already parsed arguments
    pub async fn run(&self, cli: Cli) -> Result<()> {
        cli.command.run(self).await
    }

    pub(crate) fn orchestrator(&self) -> Result<Orchestrator<FsStore>> {
        let layout = self.config.layout()?;
        Ok(Orchestrator::new(FsStore::new(&self.config.project.root), layout))
    }

    /// The injected fetcher, or the configured retriever with its timeout
    /// optionally overridden.
    pub(crate) fn metadata_fetcher(&self, timeout_secs: Option<u64>) -> Arc<dyn MetadataFetcher> {
        if let Some(fetcher) = &self.fetcher {
            return fetcher.clone();
        }

        let mut metadata = self.config.metadata.clone();
        if let Some(secs) = timeout_secs {
            metadata.timeout_secs = secs;
        }

        Arc::new(ProcessFetcher::from_config(&metadata))
    }
}

#[derive(Parser, Debug)]
#[command(name = "odatabind")]
#[command(about = "odatabind - Generate JPA entity classes backed by OData services")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Command,
}
