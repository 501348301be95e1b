use crate::OdatabindCli;
use anyhow::Result;
use clap::{Parser, Subcommand};

/// Prints one name per line, for scripts and shell completion.
#[derive(Parser, Debug)]
pub struct ListCommand {
    #[command(subcommand)]
    subcommand: ListSubcommand,
}

#[derive(Subcommand, Debug)]
enum ListSubcommand {
    /// Endpoints with a stored metadata document
    Endpoints,

    /// Entity sets of an endpoint
    Entities {
        #[arg(long)]
        namespace: String,
    },

    /// Domain classes bound to an endpoint
    Classes,

    /// Remote fields a generated class does not declare yet
    Fields {
        #[arg(long)]
        class: String,
    },
}

impl ListCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        let orchestrator = cli.orchestrator()?;

        let names = match self.subcommand {
            ListSubcommand::Endpoints => orchestrator.endpoints()?,
            ListSubcommand::Entities { namespace } => orchestrator.remote_entities(&namespace)?,
            ListSubcommand::Classes => orchestrator.gateway_classes()?,
            ListSubcommand::Fields { class } => orchestrator.available_fields(&class)?,
        };

        for name in names {
            println!("{name}");
        }

        Ok(())
    }
}
