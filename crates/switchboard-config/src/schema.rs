//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use switchboard_common::{GuildId, LoggingConfig, RoleId, UserId};

/// Main configuration structure for Switchboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord connection settings.
    pub discord: DiscordConfig,
    /// Command handling settings.
    pub commands: CommandsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Per-guild settings keyed by guild id.
    ///
    /// Keys are strings so the same file works in YAML and TOML.
    pub guilds: BTreeMap<String, GuildConfig>,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Users allowed to run bot-administrator-only commands.
    pub bot_administrators: Vec<UserId>,
}

/// Command handling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Prefix used by guilds without their own.
    pub default_prefix: String,
    /// Whether rejected invocations get a reply explaining why.
    pub error_replies: bool,
}

/// Settings of a single guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildConfig {
    /// Prefix overriding the default one.
    pub prefix: Option<String>,
    /// Administrator level granted by each role id.
    pub administrator_roles: BTreeMap<String, u8>,
}

impl Config {
    /// Settings stored for `guild_id`, if any.
    pub fn guild(&self, guild_id: GuildId) -> Option<&GuildConfig> {
        self.guilds.get(&guild_id.to_string())
    }

    /// Prefix configured for `guild_id`, falling back to the default.
    pub fn prefix_for(&self, guild_id: GuildId) -> &str {
        self.guild(guild_id)
            .and_then(|guild| guild.prefix.as_deref())
            .unwrap_or(&self.commands.default_prefix)
    }

    /// Whether `user_id` administers the bot.
    pub fn is_bot_administrator(&self, user_id: UserId) -> bool {
        self.discord.bot_administrators.contains(&user_id)
    }
}

impl GuildConfig {
    /// Highest administrator level granted by any of `roles`, 0 if none.
    pub fn administrator_level(&self, roles: &[RoleId]) -> u8 {
        roles
            .iter()
            .filter_map(|role| self.administrator_roles.get(&role.to_string()))
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_falls_back_to_default() {
        let mut config = Config::default();
        config.guilds.insert(
            "1".to_string(),
            GuildConfig {
                prefix: Some("bot".to_string()),
                ..GuildConfig::default()
            },
        );
        config.guilds.insert("2".to_string(), GuildConfig::default());

        assert_eq!(config.prefix_for(GuildId(1)), "bot");
        assert_eq!(config.prefix_for(GuildId(2)), "!");
        assert_eq!(config.prefix_for(GuildId(3)), "!");
    }

    #[test]
    fn test_administrator_level_takes_highest_role() {
        let guild = GuildConfig {
            prefix: None,
            administrator_roles: BTreeMap::from([
                ("10".to_string(), 1),
                ("20".to_string(), 3),
            ]),
        };

        assert_eq!(guild.administrator_level(&[RoleId(10), RoleId(20)]), 3);
        assert_eq!(guild.administrator_level(&[RoleId(10)]), 1);
        assert_eq!(guild.administrator_level(&[RoleId(30)]), 0);
        assert_eq!(guild.administrator_level(&[]), 0);
    }
}
