//! What the gateway hands the framework for one message.

use serenity::model::Permissions;
use switchboard_common::{ChannelId, GuildId, RoleId, UserId};

/// A single command invocation, already stripped of its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Guild the message was sent in
    pub guild_id: GuildId,
    /// Channel the message was sent in
    pub channel_id: ChannelId,
    /// Author of the message
    pub user_id: UserId,
    /// Roles the author holds in the guild
    pub member_roles: Vec<RoleId>,
    /// Effective permissions of the bot in the channel
    pub bot_permissions: Permissions,
    /// Command name as typed, without prefix
    pub command_name: String,
    /// Everything after the command name
    pub raw_arguments: String,
}

impl Invocation {
    /// Creates an invocation with no roles and no bot permissions.
    pub fn new(
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
        command_name: impl Into<String>,
        raw_arguments: impl Into<String>,
    ) -> Self {
        Self {
            guild_id,
            channel_id,
            user_id,
            member_roles: Vec::new(),
            bot_permissions: Permissions::empty(),
            command_name: command_name.into(),
            raw_arguments: raw_arguments.into(),
        }
    }

    /// Splits message content after the prefix into name and arguments.
    ///
    /// Returns `None` when no command name is present.
    pub fn split_content(content: &str) -> Option<(&str, &str)> {
        let content = content.trim_start();
        if content.is_empty() {
            return None;
        }

        Some(match content.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (content, ""),
        })
    }

    /// Sets the member roles.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.member_roles = roles;
        self
    }

    /// Sets the bot's permissions.
    #[must_use]
    pub fn with_bot_permissions(mut self, permissions: Permissions) -> Self {
        self.bot_permissions = permissions;
        self
    }
}
