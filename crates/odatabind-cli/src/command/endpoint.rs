use super::{done, heading, step};
use crate::{FetchRequest, OdatabindCli};
use anyhow::Result;
use clap::Parser;
use console::style;
use odatabind_codegen::{CsrfMode, EndpointDefinition};

#[derive(Parser, Debug)]
pub struct EndpointCommand {
    /// Endpoint class name, also the namespace entity classes refer to
    #[arg(long)]
    name: String,

    /// Service root URL
    #[arg(long)]
    url: String,

    #[arg(long, default_value = "")]
    user: String,

    #[arg(long, default_value = "")]
    password: String,

    /// `standard` or `compatibility`
    #[arg(long, default_value = "standard")]
    csrf_mode: CsrfMode,

    #[arg(long, requires = "proxy_port")]
    proxy_host: Option<String>,

    #[arg(long, requires = "proxy_host")]
    proxy_port: Option<String>,

    /// Seconds to wait for the metadata retriever
    #[arg(long)]
    timeout: Option<u64>,
}

impl EndpointCommand {
    pub(crate) async fn run(self, cli: &OdatabindCli) -> Result<()> {
        heading("Define Endpoint");

        let proxy = self.proxy_host.zip(self.proxy_port);

        let request = FetchRequest {
            url: self.url.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            proxy: proxy.clone(),
        };

        step(format!("Retrieving metadata from {}", style(&self.url).bold()));
        let document = cli.metadata_fetcher(self.timeout).fetch(&request).await?;

        let mut endpoint = EndpointDefinition::new(&self.name, self.url)
            .credentials(self.user, self.password)
            .csrf_mode(self.csrf_mode);
        if let Some((host, port)) = proxy {
            endpoint = endpoint.proxy(host, port);
        }

        let mut orchestrator = cli.orchestrator()?;
        orchestrator.define_endpoint(&endpoint, &document)?;
        let entities = orchestrator.remote_entities(&self.name)?;

        done(format!(
            "Defined endpoint {} with {} entity set(s)",
            self.name,
            entities.len()
        ));
        Ok(())
    }
}
