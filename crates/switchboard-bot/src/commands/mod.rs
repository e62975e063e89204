//! Built-in commands.

mod help;
mod moderation;
mod paint;
mod prefix;
mod shutdown;
mod slap;

pub use help::HelpCommand;
pub use moderation::{KickCommand, MuteCommand};
pub use paint::{Color, PaintCommand};
pub use prefix::PrefixCommand;
pub use shutdown::ShutdownCommand;
pub use slap::SlapCommand;

use crate::discord::Moderation;
use crate::error::BotResult;
use std::sync::Arc;
use switchboard_commands::{Command, CommandRegistry};
use switchboard_config::GuildDirectory;
use tokio::sync::Notify;

/// What the built-in commands need from the running bot.
#[derive(Clone)]
pub struct Services {
    /// Guild prefixes and administrator levels
    pub directory: Arc<GuildDirectory>,
    /// Moderation backend
    pub moderation: Arc<dyn Moderation>,
    /// Notified when a bot administrator asks for shutdown
    pub shutdown: Arc<Notify>,
}

/// Creates every built-in command.
pub fn builtin_commands(services: &Services) -> BotResult<Vec<Arc<dyn Command>>> {
    let commands: Vec<Arc<dyn Command>> = vec![
        Arc::new(HelpCommand::new()?),
        Arc::new(KickCommand::new(Arc::clone(&services.moderation))?),
        Arc::new(MuteCommand::new(Arc::clone(&services.moderation))?),
        Arc::new(PrefixCommand::new(Arc::clone(&services.directory))?),
        Arc::new(ShutdownCommand::new(Arc::clone(&services.shutdown))?),
        Arc::new(SlapCommand::new()?),
        Arc::new(PaintCommand::new()?),
    ];
    Ok(commands)
}

/// Registry holding every built-in command.
pub fn build_registry(services: &Services) -> BotResult<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    registry.register_all(builtin_commands(services)?)?;
    Ok(registry)
}
