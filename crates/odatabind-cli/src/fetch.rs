use crate::MetadataConfig;
use async_trait::async_trait;
use log::debug;
use odatabind_core::{Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Connection settings handed to the metadata retriever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub user: String,
    pub password: String,

    /// Proxy host and port
    pub proxy: Option<(String, String)>,
}

/// Retrieves the metadata document of a remote service.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Returns the whole document, or fails. Never returns partial output.
    async fn fetch(&self, request: &FetchRequest) -> Result<String>;
}

/// Runs an external retriever and reads the document from its stdout.
///
/// The retriever is called as `<command> <args..> <url> <user> <password>
/// [<proxy host> <proxy port>]`.
#[derive(Debug, Clone)]
pub struct ProcessFetcher {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessFetcher {
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &MetadataConfig) -> Self {
        Self::new(&config.command, &config.args).timeout(config.timeout())
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, request: &FetchRequest) -> Command {
        let mut cmd = Command::new(&self.command);

        cmd.args(self.args.iter().map(|arg| expand_home(arg)))
            .arg(&request.url)
            .arg(&request.user)
            .arg(&request.password);

        if let Some((host, port)) = &request.proxy {
            cmd.arg(host).arg(port);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl MetadataFetcher for ProcessFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String> {
        debug!("running `{}` for {}", self.command, request.url);

        let child = self
            .command(request)
            .spawn()
            .map_err(|err| Error::transport(format!("failed to start `{}`: {err}", self.command)))?;

        // Dropping the child on timeout kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(|err| Error::transport(format!("`{}` failed: {err}", self.command)))?,
            Err(_) => return Err(Error::timeout(self.timeout.as_secs())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::transport(format!(
                "`{}` exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let document = String::from_utf8(output.stdout)
            .map_err(|_| Error::transport(format!("`{}` printed a document that is not UTF-8", self.command)))?;

        if document.trim().is_empty() {
            return Err(Error::transport(format!("`{}` printed no metadata", self.command)));
        }

        Ok(document)
    }
}

fn expand_home(arg: &str) -> String {
    match (arg.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest).display().to_string(),
        _ => arg.to_string(),
    }
}
