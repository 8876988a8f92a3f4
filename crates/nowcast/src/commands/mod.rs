//! CLI command handlers.

pub mod ask;
pub mod cities;
pub mod config;
pub mod tools;
pub mod weather;

use std::path::PathBuf;

use anyhow::Result;
use console::Style;
use nowcast_config::NowcastConfig;
use nowcast_mcp::{McpClient, McpError, McpServerConfig};

/// Name the weather server is registered under in logs.
const SERVER_NAME: &str = "kma";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration (files, env and CLI flags merged).
    pub config: NowcastConfig,
    /// Config files that were loaded, lowest precedence first.
    pub sources: Vec<PathBuf>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build an MCP client from the effective configuration.
    pub fn client(&self) -> Result<McpClient> {
        let mut server = McpServerConfig::http(SERVER_NAME, self.config.mcp_url())
            .with_timeout(self.config.timeout());
        for (key, value) in self.config.headers() {
            server = server.with_header(key, value);
        }

        if self.verbose {
            let dim = Style::new().dim();
            eprintln!(
                "{}",
                dim.apply_to(format!("MCP server: {}", self.config.mcp_url()))
            );
        }

        Ok(McpClient::connect_http(server)?)
    }
}

/// Print a classified client error and turn it into a command failure.
pub fn report(err: McpError) -> anyhow::Error {
    let red = Style::new().red();
    eprintln!("{} [{}] {}", red.apply_to("Error:"), err.kind(), err);
    anyhow::Error::new(err)
}
