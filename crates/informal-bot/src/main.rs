//! Main entry point for the informal registration bot.

use clap::Parser;
use informal_bot::{logging, BotResult, InformalBot};
use informal_config::ConfigLoader;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> BotResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = ConfigLoader::load(args.config.as_deref())?;
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(level, config.logging.json)?;

    info!("Starting informal registration bot");
    info!(
        open = config.registration.open_minute,
        close = config.registration.close_minute,
        capacity = config.registration.capacity,
        offset = config.registration.utc_offset_hours,
        "Configuration loaded successfully"
    );

    let bot = InformalBot::new(config);
    if let Err(e) = bot.start().await {
        error!("Bot failed: {}", e);
        return Err(e);
    }

    Ok(())
}
