use super::{done, heading};
use crate::OdatabindCli;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct FieldCommand {
    /// Generated class to extend
    #[arg(long)]
    class: String,

    /// Remote field name
    #[arg(long)]
    name: String,
}

impl FieldCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Add Remote Field");

        cli.orchestrator()?.add_remote_field(&self.class, &self.name)?;

        done(format!("Added {}.{}", self.class, self.name));
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct LocalFieldCommand {
    /// Generated class to extend
    #[arg(long)]
    class: String,

    #[arg(long)]
    name: String,

    /// Java type, simple or fully qualified
    #[arg(long = "type")]
    ty: String,
}

impl LocalFieldCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Add Local Field");

        cli.orchestrator()?
            .add_local_field(&self.class, &self.name, &self.ty)?;

        done(format!("Added local {} {}.{}", self.ty, self.class, self.name));
        Ok(())
    }
}
