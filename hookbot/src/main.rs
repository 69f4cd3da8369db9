//! hookbot binary: `run` serves the webhook, `set-webhook` registers it.

use anyhow::Result;
use clap::Parser;
use hookbot::{load_config, register_webhook, run_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run_server(load_config(token)?).await,
        Commands::SetWebhook { url, token } => register_webhook(load_config(token)?, &url).await,
    }
}
