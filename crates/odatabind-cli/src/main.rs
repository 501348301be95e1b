use anyhow::Result;
use clap::Parser;
use odatabind_cli::{Cli, Config, OdatabindCli, CONFIG_FILE};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // An explicit config file must exist.
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(CONFIG_FILE)?,
    };
    let path = cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    OdatabindCli::new(config).config_path(path).run(cli).await
}
