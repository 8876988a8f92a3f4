//! Ask command - free-text request through the weather agent.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::Style;
use nowcast_agent::WeatherAgent;

use super::Context;

/// Arguments for the ask command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The request, e.g. "부산 지금 날씨" or "지원 도시 목록"
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Run the ask command.
///
/// Always succeeds once the client is built: failures are part of the reply.
pub async fn run(args: AskArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let agent =
        WeatherAgent::new(Arc::new(client)).with_default_city(ctx.config.default_city());
    let text = args.text.join(" ");

    if ctx.verbose {
        let dim = Style::new().dim();
        eprintln!("{}", dim.apply_to(format!("Intent: {:?}", agent.classify(&text))));
    }

    let reply = agent.invoke(&text).await;

    if ctx.json_output {
        let output = serde_json::json!({ "input": text, "reply": reply });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", reply);
    }

    Ok(())
}
