//! Weather command - current observation for one city.

use anyhow::Result;
use clap::Args;
use console::Style;
use nowcast_agent::render;

use super::{Context, report};

/// Arguments for the weather command.
#[derive(Args, Debug)]
pub struct WeatherArgs {
    /// City name, e.g. 서울 (default: configured default city)
    pub city: Option<String>,
}

/// Run the weather command.
pub async fn run(args: WeatherArgs, ctx: &Context) -> Result<()> {
    let city = args
        .city
        .unwrap_or_else(|| ctx.config.default_city().to_string());
    let client = ctx.client()?;
    let value = client.get_now_weather(&city).await.map_err(report)?;

    if ctx.json_output {
        println!("{}", value.to_pretty_json());
        return Ok(());
    }

    if ctx.verbose {
        let dim = Style::new().dim();
        eprintln!("{}", dim.apply_to(format!("City: {}", city)));
    }
    println!("{}", render::render_weather(value));

    Ok(())
}
