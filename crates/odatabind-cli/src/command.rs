mod endpoint;
mod entity;
mod field;
mod key;
mod list;
mod mvc;
mod relationship;
mod setup;

use crate::OdatabindCli;
use anyhow::Result;
use clap::Subcommand;
use console::style;

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Write the ODataConnectivity base class and a default configuration
    Setup(setup::SetupCommand),

    /// Retrieve a service's metadata and generate its endpoint class
    Endpoint(endpoint::EndpointCommand),

    /// Generate or refresh the domain class of a remote entity set
    Entity(entity::EntityCommand),

    /// Add a remote field to a generated class
    Field(field::FieldCommand),

    /// Add a field that is only stored locally to a generated class
    LocalField(field::LocalFieldCommand),

    /// Materialize a navigation property of a generated class
    Relationship(relationship::RelationshipCommand),

    /// Make a scaffolded controller look entities up by their encoded key
    MvcAdapt(mvc::MvcAdaptCommand),

    /// Print endpoints, entity sets, generated classes or available fields
    List(list::ListCommand),

    /// Convert between key strings and local identifiers
    Key(key::KeyCommand),
}

impl Command {
    pub(crate) async fn run(self, cli: &OdatabindCli) -> Result<()> {
        match self {
            Command::Setup(cmd) => cmd.run(cli),
            Command::Endpoint(cmd) => cmd.run(cli).await,
            Command::Entity(cmd) => cmd.run(cli),
            Command::Field(cmd) => cmd.run(cli),
            Command::LocalField(cmd) => cmd.run(cli),
            Command::Relationship(cmd) => cmd.run(cli),
            Command::MvcAdapt(cmd) => cmd.run(cli),
            Command::List(cmd) => cmd.run(cli),
            Command::Key(cmd) => cmd.run(cli),
        }
    }
}

fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

fn step(message: impl std::fmt::Display) {
    println!("  {} {}", style("→").cyan(), message);
}

fn done(message: impl std::fmt::Display) {
    println!("  {} {}", style("✓").green().bold(), style(message).dim());
    println!();
}
