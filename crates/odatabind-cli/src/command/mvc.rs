use super::{done, heading};
use crate::OdatabindCli;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct MvcAdaptCommand {
    /// Domain class whose `<Class>Controller` is adapted
    #[arg(long)]
    class: String,
}

impl MvcAdaptCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Adapt Controller");

        cli.orchestrator()?.adapt_controller(&self.class)?;

        done(format!("Adapted {}Controller", self.class));
        Ok(())
    }
}
