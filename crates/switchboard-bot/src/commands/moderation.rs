use crate::discord::Moderation;
use crate::kinds::{member, mention};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use switchboard_commands::{
    Argument, ArgumentOptions, Category, Command, CommandDefinition, CommandFiredEvent,
    CommandSpec, Flag, FlagOptions, HandlerError, Permissions, SpecError, TimeSpan, TimeUnit,
    Value, ValueKind,
};
use switchboard_common::{defuse_mentions, format_duration_human_readable, UserId};
use tracing::info;

/// Discord refuses timeouts longer than this.
const MAX_TIMEOUT_DAYS: i64 = 28;

fn reason_argument() -> Argument {
    Argument::with_options(
        "reason",
        ValueKind::Text,
        ArgumentOptions {
            takes_rest: true,
            ..ArgumentOptions::optional()
        },
    )
}

fn member_id(value: i64) -> Result<UserId, HandlerError> {
    crate::kinds::member_of(value).ok_or_else(|| format!("`{value}` is not a user id").into())
}

/// Kicks a member from the guild.
pub struct KickCommand {
    spec: CommandSpec,
    member: Argument,
    moderation: Arc<dyn Moderation>,
}

impl KickCommand {
    /// Creates the command.
    pub fn new(moderation: Arc<dyn Moderation>) -> Result<Self, SpecError> {
        let member = Argument::new("member", member());
        let spec = CommandSpec::new(CommandDefinition {
            category: Category::Administration,
            arguments: vec![member.clone(), reason_argument()],
            bot_required_permissions: Permissions::KICK_MEMBERS,
            administrator_level_required: 2,
            ..CommandDefinition::new("${prefix}kick", "Kicks a member from the server.")
        })?;

        Ok(Self {
            spec,
            member,
            moderation,
        })
    }
}

#[async_trait]
impl Command for KickCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        let target = member_id(event.parameters.require_argument(&self.member)?)?;
        let reason = event.parameters.argument::<String>("reason");

        self.moderation
            .kick(event.invocation.guild_id, target, reason.clone())
            .await?;
        info!(
            "User {} kicked {} from guild {}",
            event.invocation.user_id, target, event.invocation.guild_id
        );

        let reply = match reason {
            Some(reason) => format!("Kicked {}: {}", mention(target), defuse_mentions(&reason)),
            None => format!("Kicked {}.", mention(target)),
        };
        event.reply(reply).await
    }
}

/// Times a member out for a while.
pub struct MuteCommand {
    spec: CommandSpec,
    member: Flag,
    duration: Flag,
    moderation: Arc<dyn Moderation>,
}

impl MuteCommand {
    /// Creates the command.
    pub fn new(moderation: Arc<dyn Moderation>) -> Result<Self, SpecError> {
        let member = Flag::new("m", "member", member());
        let duration = Flag::with_options(
            "d",
            "duration",
            ValueKind::TimeSpan,
            FlagOptions {
                default_value: Some(Value::TimeSpan(TimeSpan::new(10, TimeUnit::Minutes))),
                ..FlagOptions::optional()
            },
        );

        let spec = CommandSpec::new(CommandDefinition {
            category: Category::Administration,
            flags: vec![member.clone(), duration.clone()],
            arguments: vec![reason_argument()],
            bot_required_permissions: Permissions::MODERATE_MEMBERS,
            administrator_level_required: 1,
            ..CommandDefinition::new("${prefix}mute", "Stops a member from talking for a while.")
        })?;

        Ok(Self {
            spec,
            member,
            duration,
            moderation,
        })
    }
}

#[async_trait]
impl Command for MuteCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        let target = member_id(event.parameters.require_flag(&self.member)?)?;
        let span: TimeSpan = event.parameters.require_flag(&self.duration)?;

        let duration = match span.to_duration() {
            Some(duration) if duration <= Duration::days(MAX_TIMEOUT_DAYS) => duration,
            _ => {
                return event
                    .reply(format!("I can mute someone for at most {MAX_TIMEOUT_DAYS} days."))
                    .await;
            }
        };

        self.moderation
            .time_out(event.invocation.guild_id, target, Utc::now() + duration)
            .await?;
        info!(
            "User {} muted {} in guild {} for {}",
            event.invocation.user_id, target, event.invocation.guild_id, span
        );

        event
            .reply(format!(
                "Muted {} for {}.",
                mention(target),
                format_duration_human_readable(duration)
            ))
            .await
    }
}
