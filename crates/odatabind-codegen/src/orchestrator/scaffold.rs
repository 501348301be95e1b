use super::Orchestrator;
use crate::{Package, SourceStore};
use odatabind_core::{bail, Error, MetadataDocument, Result};

use log::{debug, info};
use std::path::PathBuf;
use std::str::FromStr;
use std_util::str::java_string;

const CONNECTIVITY_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/ODataConnectivity.java.tmpl"
));

const ENDPOINT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/ODataEndpoint.java.tmpl"
));

/// How an endpoint class handles cross-site request forgery tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsrfMode {
    /// Fetch a token on reads and echo it, with its cookie, on writes.
    #[default]
    Standard,

    /// Mark writes as XHR requests, for services that accept that instead
    /// of a token.
    Compatibility,
}

impl CsrfMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CsrfMode::Standard => "standard",
            CsrfMode::Compatibility => "compatibility",
        }
    }

    fn read_headers(self) -> &'static str {
        match self {
            CsrfMode::Standard => ".header(\"X-CSRF-Token\", \"Fetch\")",
            CsrfMode::Compatibility => "",
        }
    }

    fn write_headers(self) -> &'static str {
        match self {
            CsrfMode::Standard => {
                ".header(\"X-CSRF-Token\", this.xsrfTokenValue).header(\"Cookie\", xsrfCookieName + \"=\" + xsrfCookieValue)"
            }
            CsrfMode::Compatibility => ".header(\"X-Requested-With\", \"XMLHttpRequest\")",
        }
    }
}

impl FromStr for CsrfMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<CsrfMode> {
        match s {
            "standard" => Ok(CsrfMode::Standard),
            "compatibility" => Ok(CsrfMode::Compatibility),
            _ => bail!("unknown CSRF mode `{s}`; expected `standard` or `compatibility`"),
        }
    }
}

/// Connection settings of a remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDefinition {
    /// Endpoint class name, also the namespace of classes bound to it
    pub name: String,
    pub url: String,
    pub user: String,
    pub password: String,
    pub csrf_mode: CsrfMode,

    /// Proxy host and port
    pub proxy: Option<(String, String)>,
}

impl EndpointDefinition {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> EndpointDefinition {
        EndpointDefinition {
            name: name.into(),
            url: url.into(),
            user: String::new(),
            password: String::new(),
            csrf_mode: CsrfMode::default(),
            proxy: None,
        }
    }

    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> EndpointDefinition {
        self.user = user.into();
        self.password = password.into();
        self
    }

    pub fn csrf_mode(mut self, mode: CsrfMode) -> EndpointDefinition {
        self.csrf_mode = mode;
        self
    }

    pub fn proxy(mut self, host: impl Into<String>, port: impl Into<String>) -> EndpointDefinition {
        self.proxy = Some((host.into(), port.into()));
        self
    }
}

impl<S: SourceStore> Orchestrator<S> {
    /// Writes the `ODataConnectivity` base class every endpoint extends.
    pub fn bootstrap_connectivity(&mut self) -> Result<()> {
        let (path, text) = self.render_connectivity();

        self.store.write(&path, &text)?;
        info!("wrote {}", path.display());
        Ok(())
    }

    /// Writes the endpoint class and its metadata document.
    ///
    /// Every file is rendered before the first write. The metadata document
    /// is written last, so an endpoint is only listed once its class exists.
    pub fn define_endpoint(&mut self, endpoint: &EndpointDefinition, document: &str) -> Result<()> {
        let name = endpoint.name.as_str();

        if !is_java_identifier(name) {
            bail!("endpoint name `{name}` is not a valid Java class name");
        }

        if document.trim().is_empty() {
            return Err(Error::invalid_document(format!(
                "metadata document of endpoint `{name}` is empty"
            )));
        }

        let entities = MetadataDocument::parse(document)?.entity_names();
        debug!("endpoint `{name}` exposes {} entity sets", entities.len());

        let mut files = vec![];

        let (base, text) = self.render_connectivity();
        if !self.store.exists(&base) {
            files.push((base, text));
        }

        files.push((
            self.layout.class_path(Package::Connectivity, name),
            self.render_endpoint(endpoint),
        ));
        files.push((self.metadata_path(name), document.to_string()));

        for (path, text) in &files {
            self.store.write(path, text)?;
            info!("wrote {}", path.display());
        }

        Ok(())
    }

    fn render_connectivity(&self) -> (PathBuf, String) {
        (
            self.layout.class_path(Package::Connectivity, "ODataConnectivity"),
            CONNECTIVITY_TEMPLATE.replace("<<PACKAGE>>", &self.package_header()),
        )
    }

    fn render_endpoint(&self, endpoint: &EndpointDefinition) -> String {
        let (host, port) = endpoint
            .proxy
            .as_ref()
            .map_or(("", ""), |(host, port)| (host.as_str(), port.as_str()));

        ENDPOINT_TEMPLATE
            .replace("<<PACKAGE>>", &self.package_header())
            .replace("<<NSNAME>>", &endpoint.name)
            .replace("<<URL>>", &java_string(&endpoint.url))
            .replace("<<USER>>", &java_string(&endpoint.user))
            .replace("<<PASSWORD>>", &java_string(&endpoint.password))
            .replace("<<HOST>>", &java_string(host))
            .replace("<<PORT>>", &java_string(port))
            .replace("<<CSRF_MODE_GET>>", endpoint.csrf_mode.read_headers())
            .replace("<<CSRF_MODE_SET>>", endpoint.csrf_mode.write_headers())
    }

    fn package_header(&self) -> String {
        format!("{}\n", self.layout.package_line(Package::Connectivity))
    }
}

fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_modes_parse() {
        assert_eq!("standard".parse::<CsrfMode>().unwrap(), CsrfMode::Standard);
        assert_eq!("compatibility".parse::<CsrfMode>().unwrap(), CsrfMode::Compatibility);
        assert!("strict".parse::<CsrfMode>().is_err());
    }

    #[test]
    fn identifiers() {
        assert!(is_java_identifier("Northwind"));
        assert!(is_java_identifier("_v2"));
        assert!(!is_java_identifier("2go"));
        assert!(!is_java_identifier("north wind"));
        assert!(!is_java_identifier(""));
    }
}
