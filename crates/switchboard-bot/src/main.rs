//! Main entry point for Switchboard.

use switchboard_bot::{BotResult, SwitchboardBot};
use switchboard_common::init_logging;
use switchboard_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    let config = ConfigLoader::load()?;
    let _logging_guard = init_logging(&config.logging)?;

    info!("Starting Switchboard v{}", env!("CARGO_PKG_VERSION"));

    let bot = SwitchboardBot::new(config);

    if let Err(e) = bot.start().await {
        error!("Bot stopped with an error: {}", e);
        return Err(e);
    }

    info!("Switchboard stopped");
    Ok(())
}
