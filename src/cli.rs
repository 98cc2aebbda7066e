use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use crate::config::{ClickUpConfig, DEFAULT_BASE_URL};
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// `start` with env/default settings when no subcommand is given.
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Start(CommandArguments::parse_from([PKG_NAME])))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the MCP server (default)
    Start(CommandArguments),
    /// List every tool the server exposes
    Tools,
    /// Print version information
    Version,
}

#[derive(Parser, Debug, Clone)]
pub struct CommandArguments {
    /// ClickUp personal API token
    #[arg(long, env = "CLICKUP_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// ClickUp REST API base URL
    #[arg(long, env = "CLICKUP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Serve streamable HTTP on this address in addition to stdio
    #[arg(long, env = "MCP_HTTP_ADDR")]
    pub http_addr: Option<String>,

    /// Disable the stdio transport
    #[arg(long, env = "MCP_DISABLE_STDIO", default_value_t = false)]
    pub no_stdio: bool,
}

impl CommandArguments {
    pub fn default_settings() -> Self {
        Self {
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            http_addr: None,
            no_stdio: false,
        }
    }

    pub fn config(&self) -> ClickUpConfig {
        ClickUpConfig::new(self.base_url.clone(), self.api_token.clone())
    }

    /// Parsed HTTP bind address, if the HTTP transport is enabled.
    pub fn http_socket(&self) -> Result<Option<SocketAddr>, String> {
        self.http_addr
            .as_deref()
            .map(|addr| {
                addr.parse::<SocketAddr>()
                    .map_err(|e| format!("Invalid MCP_HTTP_ADDR '{addr}': {e}"))
            })
            .transpose()
    }

    /// Validate CLI/environment-derived arguments.
    pub fn validate(&self) -> Result<(), String> {
        let http = self.http_socket()?;
        if self.no_stdio && http.is_none() {
            return Err(
                "Enable at least one transport (stdio, or http via MCP_HTTP_ADDR)".to_string(),
            );
        }
        if self.base_url.trim().is_empty() {
            return Err("CLICKUP_BASE_URL cannot be empty".to_string());
        }
        Ok(())
    }
}
