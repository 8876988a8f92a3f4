//! Tools command - list the tools the MCP server exposes.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::{Context, report};

/// Arguments for the tools command.
#[derive(Args, Debug)]
pub struct ToolsArgs {}

/// Run the tools command.
pub async fn run(_args: ToolsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let tools = client.list_tools().await.map_err(report)?;

    if ctx.json_output {
        let output: Vec<_> = tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if tools.is_empty() {
        println!("No tools available.");
        return Ok(());
    }

    let dim = Style::new().dim();
    for tool in &tools {
        println!("  • {}", tool.name);
        if let Some(desc) = &tool.description {
            for line in desc.lines() {
                println!("      {}", dim.apply_to(line));
            }
        }
    }

    Ok(())
}
