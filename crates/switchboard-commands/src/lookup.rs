//! Collaborators the framework reads guild state through.
//!
//! Persistence lives outside the framework. Commands only see these
//! key-value style traits, so the backing store can be a config file, a
//! database or a test double.

use crate::error::{HandlerError, LookupError};
use async_trait::async_trait;
use switchboard_common::{is_alphabetic_word, ChannelId, GuildId, RoleId, UserId};

/// Resolves the command prefix configured for a guild.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrefixLookup: Send + Sync {
    /// Returns the raw prefix, e.g. `!` or `bot`.
    async fn lookup_prefix(&self, guild_id: GuildId) -> Result<String, LookupError>;
}

/// Answers who may run privileged commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authority: Send + Sync {
    /// Administrator level (0 to 4) of a member holding `roles`.
    async fn administrator_level(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        roles: &[RoleId],
    ) -> Result<u8, LookupError>;

    /// Whether the user administers the bot itself.
    async fn is_bot_administrator(&self, user_id: UserId) -> Result<bool, LookupError>;
}

/// Sends text back to the channel a command was invoked in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// Posts `content` to `channel_id`.
    async fn reply(&self, channel_id: ChannelId, content: &str) -> Result<(), HandlerError>;
}

/// Turns a stored prefix into the text substituted for the placeholder.
///
/// Word prefixes such as `bot` get a trailing space so that `botkick`
/// renders as `bot kick`. Empty and symbolic prefixes are used unchanged.
pub fn display_prefix(raw: &str) -> String {
    if is_alphabetic_word(raw) {
        format!("{raw} ")
    } else {
        raw.to_string()
    }
}

/// Looks the prefix up and applies [`display_prefix`].
pub async fn resolve_prefix(
    prefixes: &dyn PrefixLookup,
    guild_id: GuildId,
) -> Result<String, LookupError> {
    prefixes
        .lookup_prefix(guild_id)
        .await
        .map(|raw| display_prefix(&raw))
}
