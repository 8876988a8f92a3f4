//! Cities command - list the supported cities.

use anyhow::Result;
use clap::Args;

use super::{Context, report};

/// Arguments for the cities command.
#[derive(Args, Debug)]
pub struct CitiesArgs {}

/// Run the cities command.
pub async fn run(_args: CitiesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let value = client.list_supported_cities().await.map_err(report)?;

    if ctx.json_output {
        println!("{}", value.to_pretty_json());
        return Ok(());
    }

    match value.string_list("supported_cities") {
        Some(cities) => {
            for city in cities {
                println!("{}", city);
            }
        }
        None => println!("{}", value.to_pretty_json()),
    }

    Ok(())
}
