//! Config command - show the effective configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show resolved configuration
    Show,

    /// Show which config files are loaded and their precedence
    Which,

    /// Show the user configuration file path
    Path,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Which => cmd_which(ctx),
        ConfigCommand::Path => cmd_path(),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.json_output {
        let output = serde_json::json!({
            "mcp_url": config.mcp_url(),
            "timeout_secs": config.timeout().as_secs(),
            "headers": config.headers().iter().map(|(k, _)| k).collect::<Vec<_>>(),
            "default_city": config.default_city(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("# Nowcast Configuration\n");
    if ctx.sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    }
    println!("MCP server:   {}", config.mcp_url());
    println!("Timeout:      {}s", config.timeout().as_secs());
    println!("Default city: {}", config.default_city());

    let headers = config.headers();
    if !headers.is_empty() {
        // Values may hold credentials.
        println!("Headers:");
        for (key, _) in headers {
            println!("  {}: ***", key);
        }
    }

    Ok(())
}

fn cmd_which(ctx: &Context) -> Result<()> {
    if ctx.sources.is_empty() {
        println!("No config files loaded.");
        return Ok(());
    }

    println!("Loaded (lowest precedence first):");
    for path in &ctx.sources {
        println!("  {}", path.display());
    }
    Ok(())
}

fn cmd_path() -> Result<()> {
    match nowcast_config::xdg_config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no config directory on this platform)"),
    }
    Ok(())
}
