use super::{done, heading};
use crate::OdatabindCli;
use anyhow::Result;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
pub struct EntityCommand {
    /// Endpoint the entity set belongs to
    #[arg(long)]
    namespace: String,

    /// Remote entity set; also the name of the generated class
    #[arg(long)]
    entity: String,

    /// Declare every remote field, not just the keys
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    import_all: bool,
}

impl EntityCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Generate Entity");

        cli.orchestrator()?
            .materialize_entity(&self.namespace, &self.entity, self.import_all)?;

        done(format!("Generated {} from {}", self.entity, self.namespace));
        Ok(())
    }
}
