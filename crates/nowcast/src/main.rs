//! Nowcast - current weather for Korean metro cities over MCP
//!
//! Main entry point for the nowcast CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{ask, cities, config, tools, weather};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Nowcast - current weather for Korean metro cities over MCP
#[derive(Parser)]
#[command(name = "nowcast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// MCP server URL (default: http://localhost:8000/mcp)
    #[arg(long, global = true, env = "MCP_SERVER_URL")]
    pub mcp_url: Option<String>,

    /// Per-call timeout in seconds (default: 20)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the cities the weather server supports
    Cities(cities::CitiesArgs),

    /// Show the current observation for a city
    Weather(weather::WeatherArgs),

    /// List the tools the MCP server exposes
    Tools(tools::ToolsArgs),

    /// Ask in free text, e.g. "부산 지금 날씨"
    Ask(ask::AskArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "nowcast=debug,nowcast_mcp=debug,nowcast_agent=debug,nowcast_config=debug,info"
    } else {
        "nowcast=info,warn"
    };

    let log_dir = nowcast_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("nowcast.log")
        .build(&log_dir);

    use tracing_subscriber::prelude::*;
    let (file_layer, _guard) = match file_appender {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "nowcast=trace,nowcast_mcp=trace,nowcast_agent=trace,nowcast_config=trace,info",
                ));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(file_layer)
        .init();

    // Config files + MCP_SERVER_URL, then CLI flags on top
    let loaded = nowcast_config::load_config(None)?;
    let mut config = loaded.config;
    if let Some(url) = cli.mcp_url {
        config.set_mcp_url(url);
    }
    if let Some(secs) = cli.timeout {
        config.set_timeout_secs(secs);
    }
    config.validate()?;

    let ctx = commands::Context {
        config,
        sources: loaded
            .sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.clone())
            .collect(),
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Cities(args) => cities::run(args, &ctx).await,
        Commands::Weather(args) => weather::run(args, &ctx).await,
        Commands::Tools(args) => tools::run(args, &ctx).await,
        Commands::Ask(args) => ask::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
