//! Startup configuration
//!
//! Every flag can also be supplied through its environment variable so the server
//! can be registered with an MCP client without a long argument list.

use clap::Parser;
use reqwest::Url;

use crate::error::{Error, Result};
use crate::log_tools::TracingLevel;

/// Command line for the MCSManager MCP server
#[derive(Debug, Parser)]
#[command(name = "mcsm_mcp", version, about = "MCP server for MCSManager game server instances")]
pub struct Cli {
    /// Base URL of the MCSManager panel, e.g. `http://127.0.0.1:23333`
    #[arg(long, env = "MCSM_URL")]
    pub url: Url,

    /// API key issued by the MCSManager panel
    #[arg(long, env = "MCSM_API_KEY", hide_env_values = true)]
    pub apikey: String,

    /// Instance identifier (sent as `uuid`)
    #[arg(long, env = "MCSM_UUID")]
    pub uuid: String,

    /// Daemon identifier (sent as `daemonId`)
    #[arg(long, env = "MCSM_DAEMON_ID")]
    pub daemon_id: String,

    /// Trace log level (error, warn, info, debug, trace)
    #[arg(long, env = "MCSM_LOG_LEVEL", default_value = "warn")]
    pub log_level: TracingLevel,
}

/// Immutable connection settings shared by every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McsmConfig {
    pub base_url:   Url,
    pub api_key:    String,
    pub account_id: String,
    pub daemon_id:  String,
}

impl McsmConfig {
    /// Build a validated configuration from parsed arguments.
    ///
    /// # Errors
    /// Returns `Error::Configuration` when an identifier is blank or the URL cannot carry a path.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::new(cli.url.clone(), &cli.apikey, &cli.uuid, &cli.daemon_id)
    }

    pub fn new(base_url: Url, api_key: &str, account_id: &str, daemon_id: &str) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(error_stack::Report::new(Error::Configuration(format!(
                "URL '{base_url}' cannot be used as a base URL"
            ))));
        }

        for (name, value) in [("apikey", api_key), ("uuid", account_id), ("daemonId", daemon_id)] {
            if value.trim().is_empty() {
                return Err(error_stack::Report::new(Error::missing(name))
                    .attach(format!("'{name}' must not be empty")));
            }
        }

        Ok(Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.to_string(),
            account_id: account_id.to_string(),
            daemon_id: daemon_id.to_string(),
        })
    }

    /// Resolve an API path like `/api/protected_instance/command` against the base URL,
    /// keeping any path prefix the panel is mounted under
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| {
                error_stack::Report::new(Error::Configuration(format!(
                    "cannot build URL for endpoint '{endpoint}': {e}"
                )))
            })
    }
}

/// Ensure the base path ends with `/` so relative joins append instead of replacing
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
