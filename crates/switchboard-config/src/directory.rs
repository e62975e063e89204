//! Guild prefixes and administrator levels backed by the configuration.

use crate::cache::ConfigCache;
use crate::loader::ConfigError;
use crate::validator::validate_prefix;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use switchboard_commands::{Authority, LookupError, PrefixLookup};
use switchboard_common::{GuildId, RoleId, UserId};
use tracing::{debug, info};

/// Answers prefix and authority lookups from the cached configuration.
///
/// Prefixes changed at runtime are kept in memory and take precedence over
/// the configured ones until reset.
#[derive(Debug)]
pub struct GuildDirectory {
    config: Arc<ConfigCache>,
    prefix_overrides: DashMap<GuildId, String>,
}

impl GuildDirectory {
    /// Creates a directory reading from `config`.
    pub fn new(config: Arc<ConfigCache>) -> Self {
        Self {
            config,
            prefix_overrides: DashMap::new(),
        }
    }

    /// Raw prefix in effect for `guild_id`.
    pub fn prefix(&self, guild_id: GuildId) -> String {
        if let Some(prefix) = self.prefix_overrides.get(&guild_id) {
            return prefix.clone();
        }
        self.config.get().prefix_for(guild_id).to_string()
    }

    /// Overrides the prefix of `guild_id`.
    pub fn set_prefix(&self, guild_id: GuildId, prefix: impl Into<String>) -> Result<(), ConfigError> {
        let prefix = prefix.into();
        validate_prefix("prefix", &prefix)?;

        info!("Setting prefix of guild {} to {}", guild_id, prefix);
        self.prefix_overrides.insert(guild_id, prefix);
        Ok(())
    }

    /// Drops the runtime override of `guild_id`, returning it if one existed.
    pub fn reset_prefix(&self, guild_id: GuildId) -> Option<String> {
        let removed = self.prefix_overrides.remove(&guild_id).map(|(_, prefix)| prefix);
        if removed.is_some() {
            info!("Reset prefix of guild {}", guild_id);
        }
        removed
    }
}

#[async_trait]
impl PrefixLookup for GuildDirectory {
    async fn lookup_prefix(&self, guild_id: GuildId) -> Result<String, LookupError> {
        Ok(self.prefix(guild_id))
    }
}

#[async_trait]
impl Authority for GuildDirectory {
    async fn administrator_level(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        roles: &[RoleId],
    ) -> Result<u8, LookupError> {
        let level = self
            .config
            .get()
            .guild(guild_id)
            .map_or(0, |guild| guild.administrator_level(roles));

        debug!("User {} has administrator level {} in guild {}", user_id, level, guild_id);
        Ok(level)
    }

    async fn is_bot_administrator(&self, user_id: UserId) -> Result<bool, LookupError> {
        Ok(self.config.get().is_bot_administrator(user_id))
    }
}
