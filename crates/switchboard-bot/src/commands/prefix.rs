use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use switchboard_commands::{
    Argument, ArgumentOptions, Category, Command, CommandDefinition, CommandFiredEvent,
    CommandSpec, HandlerError, SpecError, ValueKind,
};
use switchboard_config::{ConfigError, GuildDirectory};

/// Shows, changes or resets the prefix of the guild.
pub struct PrefixCommand {
    spec: CommandSpec,
    directory: Arc<GuildDirectory>,
}

impl PrefixCommand {
    /// Creates the command.
    pub fn new(directory: Arc<GuildDirectory>) -> Result<Self, SpecError> {
        let spec = CommandSpec::new(CommandDefinition {
            category: Category::Settings,
            actions: BTreeMap::from([
                ("set".to_string(), "Uses a new prefix in this server.".to_string()),
                ("reset".to_string(), "Goes back to the configured prefix.".to_string()),
            ]),
            arguments: vec![Argument::with_options(
                "prefix",
                ValueKind::Text,
                ArgumentOptions::optional(),
            )],
            administrator_level_required: 3,
            ..CommandDefinition::new("${prefix}prefix", "Shows or changes the prefix of this server.")
        })?;
        Ok(Self { spec, directory })
    }
}

#[async_trait]
impl Command for PrefixCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        let guild_id = event.invocation.guild_id;

        let reply = match event.action.as_deref() {
            Some("set") => match event.parameters.argument::<String>("prefix") {
                Some(prefix) => match self.directory.set_prefix(guild_id, prefix.as_str()) {
                    Ok(()) => format!("The prefix is now `{prefix}`."),
                    Err(ConfigError::Validation { message, .. }) => {
                        format!("I can't use that prefix: {message}.")
                    }
                    Err(e) => return Err(e.into()),
                },
                None => format!(
                    "Which prefix should I use? The usage of this command is: `{}`.",
                    self.spec
                        .usage_with_prefix(guild_id, event.prefixes.as_ref())
                        .await?
                ),
            },
            Some("reset") => {
                self.directory.reset_prefix(guild_id);
                format!("The prefix is back to `{}`.", self.directory.prefix(guild_id))
            }
            _ => format!("The prefix is `{}`.", self.directory.prefix(guild_id)),
        };

        event.reply(reply).await
    }
}
