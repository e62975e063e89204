//! Default values of every configuration section.

use crate::schema::{CommandsConfig, Config, DiscordConfig};
use std::collections::BTreeMap;
use switchboard_common::LoggingConfig;

/// Prefix used when neither the file nor the environment sets one.
pub const DEFAULT_PREFIX: &str = "!";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            commands: CommandsConfig::default(),
            logging: LoggingConfig::default(),
            guilds: BTreeMap::new(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            bot_administrators: Vec::new(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            default_prefix: DEFAULT_PREFIX.to_string(),
            error_replies: true,
        }
    }
}
