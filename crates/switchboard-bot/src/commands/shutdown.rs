use async_trait::async_trait;
use std::sync::Arc;
use switchboard_commands::{
    Category, Command, CommandDefinition, CommandFiredEvent, CommandSpec, HandlerError, SpecError,
};
use tokio::sync::Notify;
use tracing::warn;

/// Disconnects the bot. Only bot administrators may run it.
pub struct ShutdownCommand {
    spec: CommandSpec,
    shutdown: Arc<Notify>,
}

impl ShutdownCommand {
    /// Creates the command.
    pub fn new(shutdown: Arc<Notify>) -> Result<Self, SpecError> {
        let spec = CommandSpec::new(CommandDefinition {
            category: Category::BotAdministrator,
            aliases: vec!["${prefix}poweroff".to_string(), "${prefix}turnoff".to_string()],
            bot_administrator_only: true,
            ..CommandDefinition::new("${prefix}shutdown", "Shuts the bot down.")
        })?;
        Ok(Self { spec, shutdown })
    }
}

#[async_trait]
impl Command for ShutdownCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        warn!("Shutdown requested by user {}", event.invocation.user_id);
        event.reply("Shutting down...").await?;
        self.shutdown.notify_one();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{config, Harness};
    use crate::discord::MockModeration;
    use std::time::Duration;
    use switchboard_commands::{CheckFailure, CommandError};
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_bot_administrator_can_shut_down() {
        let harness = Harness::new(config(), MockModeration::new());
        let replies = harness.run("turnoff", "").await;

        assert_eq!(replies, vec!["Shutting down...".to_string()]);
        assert!(timeout(Duration::from_secs(1), harness.shutdown.notified()).await.is_ok());
    }

    #[tokio::test]
    async fn test_others_are_refused() {
        let mut config = config();
        config.discord.bot_administrators.clear();
        let harness = Harness::new(config, MockModeration::new());

        let error = harness
            .dispatcher
            .dispatch(Harness::invocation("shutdown", ""), harness.responder.clone())
            .await
            .unwrap_err();

        assert!(matches!(error, CommandError::CheckFailed(CheckFailure::NotBotAdministrator)));
    }
}
