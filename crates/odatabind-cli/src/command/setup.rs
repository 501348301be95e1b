use super::{done, heading, step};
use crate::OdatabindCli;
use anyhow::Result;
use clap::Parser;
use console::style;

#[derive(Parser, Debug)]
pub struct SetupCommand {
    /// Base package of the generated classes, e.g. `com.acme`
    #[arg(long)]
    top_level_package: Option<String>,
}

impl SetupCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Setup");

        let mut config = cli.config().clone();
        if let Some(package) = self.top_level_package {
            config = config.top_level_package(package);
        }

        let config_path = cli.config_file();
        if std::fs::exists(config_path)? {
            step(format!("Keeping {}", style(config_path.display()).bold()));
        } else {
            config.save(config_path)?;
            step(format!("Wrote {}", style(config_path.display()).bold()));
        }

        let cli = OdatabindCli::new(config);
        cli.orchestrator()?.bootstrap_connectivity()?;

        done("Wrote ODataConnectivity");
        Ok(())
    }
}
