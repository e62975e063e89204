//! Serenity-backed implementations of the collaborators commands talk to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::builder::EditMember;
use serenity::http::Http;
use serenity::model::id as serenity_id;
use std::sync::Arc;
use switchboard_commands::{HandlerError, Responder};
use switchboard_common::{ChannelId, GuildId, UserId};
use tracing::debug;

/// Moderation actions performed on guild members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Moderation: Send + Sync {
    /// Removes `user_id` from the guild.
    async fn kick(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        reason: Option<String>,
    ) -> Result<(), HandlerError>;

    /// Prevents `user_id` from talking until `until`.
    async fn time_out(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: DateTime<Utc>,
    ) -> Result<(), HandlerError>;
}

/// Sends replies through the Discord REST API.
#[derive(Clone)]
pub struct SerenityResponder {
    http: Arc<Http>,
}

impl SerenityResponder {
    /// Creates a responder using `http`.
    pub const fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Responder for SerenityResponder {
    async fn reply(&self, channel_id: ChannelId, content: &str) -> Result<(), HandlerError> {
        serenity_id::ChannelId::new(channel_id.0)
            .say(self.http.as_ref(), content)
            .await?;
        Ok(())
    }
}

/// Applies moderation actions through the Discord REST API.
#[derive(Clone)]
pub struct DiscordModeration {
    http: Arc<Http>,
}

impl DiscordModeration {
    /// Creates a moderation backend using `http`.
    pub const fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Moderation for DiscordModeration {
    async fn kick(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        reason: Option<String>,
    ) -> Result<(), HandlerError> {
        debug!("Kicking user {} from guild {}", user_id, guild_id);
        self.http
            .kick_member(
                serenity_id::GuildId::new(guild_id.0),
                serenity_id::UserId::new(user_id.0),
                reason.as_deref(),
            )
            .await?;
        Ok(())
    }

    async fn time_out(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: DateTime<Utc>,
    ) -> Result<(), HandlerError> {
        debug!("Timing out user {} in guild {} until {}", user_id, guild_id, until);
        let builder = EditMember::new().disable_communication_until(until.to_rfc3339());
        serenity_id::GuildId::new(guild_id.0)
            .edit_member(self.http.as_ref(), serenity_id::UserId::new(user_id.0), builder)
            .await?;
        Ok(())
    }
}
