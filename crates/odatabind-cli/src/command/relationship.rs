use super::{done, heading};
use crate::OdatabindCli;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RelationshipCommand {
    /// Generated class owning the navigation property
    #[arg(long)]
    class: String,

    /// Navigation property name
    #[arg(long)]
    name: String,
}

impl RelationshipCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Add Relationship");

        cli.orchestrator()?.add_relationship(&self.class, &self.name)?;

        done(format!("Wove {}.{}", self.class, self.name));
        Ok(())
    }
}
