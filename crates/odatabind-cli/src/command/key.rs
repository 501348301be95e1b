use crate::OdatabindCli;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use odatabind_codegen::{Package, SourceStore};
use odatabind_core::key;
use odatabind_core::MetadataDocument;

#[derive(Parser, Debug)]
pub struct KeyCommand {
    #[command(subcommand)]
    subcommand: KeySubcommand,
}

#[derive(Subcommand, Debug)]
enum KeySubcommand {
    /// Print the local identifier of a key string such as `(OrderID=1,ProductID=2)`
    Encode {
        value: String,

        #[command(flatten)]
        scope: EntityArgs,
    },

    /// Print the key string a local identifier stands for
    Decode {
        value: String,

        #[command(flatten)]
        scope: EntityArgs,
    },
}

/// When given, the key string is checked against the entity's key fields.
#[derive(Args, Debug)]
struct EntityArgs {
    #[arg(long, requires = "entity")]
    namespace: Option<String>,

    #[arg(long, requires = "namespace")]
    entity: Option<String>,
}

impl KeyCommand {
    pub(crate) fn run(self, cli: &OdatabindCli) -> Result<()> {
        let output = match self.subcommand {
            KeySubcommand::Encode { value, scope } => {
                scope.check(cli, &value)?;
                key::encode_identifier(&value)
            }
            KeySubcommand::Decode { value, scope } => {
                let decoded = key::decode_identifier(&value)?;
                scope.check(cli, &decoded)?;
                decoded
            }
        };

        println!("{output}");
        Ok(())
    }
}

impl EntityArgs {
    fn check(&self, cli: &OdatabindCli, key_string: &str) -> Result<()> {
        let (Some(namespace), Some(entity)) = (&self.namespace, &self.entity) else {
            return Ok(());
        };

        let layout = cli.config().layout()?;
        let path = layout.file_path(Package::Connectivity, &format!("{namespace}_metadata.xml"));
        let text = cli.orchestrator()?.store().read(&path)?;

        let shape = MetadataDocument::parse(&text)?.entity(entity)?.key_shape();
        key::parse_key_string(&shape, key_string)
            .with_context(|| format!("checking key of `{namespace}.{entity}`"))?;
        Ok(())
    }
}
