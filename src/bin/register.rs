//! rollbot_register - One-time command registration tool
//!
//! Uploads the bot's slash command definitions to the platform.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rollbot::commands::all_commands;
use rollbot::discord::DiscordClient;
use rollbot::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// rollbot command registration tool
#[derive(Parser, Debug)]
#[command(
    name = "rollbot_register",
    version,
    about = "Register rollbot's slash commands"
)]
struct Args {
    /// Config file (defaults to ./rollbot.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the command definitions instead of uploading them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollbot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let commands = all_commands();

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    // Application id and bot token come from the config file or
    // ROLLBOT_APPLICATION_ID / ROLLBOT_BOT_TOKEN
    let config = Config::load(args.config.as_deref())?;
    let client = DiscordClient::new(
        config.api_base.as_str(),
        config.require_application_id()?,
        config.require_bot_token()?,
    )?;

    let installed = client.install_global_commands(&commands).await?;
    info!(
        "Registered {} commands for application {}",
        installed.len(),
        config.require_application_id()?
    );

    Ok(())
}
