use crate::kinds::{member, member_of, mention};
use async_trait::async_trait;
use switchboard_commands::{
    Argument, Category, Command, CommandDefinition, CommandFiredEvent, CommandSpec, Flag,
    FlagOptions, HandlerError, SpecError, Value, ValueKind,
};
use switchboard_common::{defuse_mentions, UserId};

const DEFAULT_OBJECT: &str = "a large trout";

/// Slaps a member around a bit.
pub struct SlapCommand {
    spec: CommandSpec,
}

impl SlapCommand {
    /// Creates the command.
    pub fn new() -> Result<Self, SpecError> {
        let spec = CommandSpec::new(CommandDefinition {
            category: Category::Fun,
            flags: vec![Flag::with_options(
                "w",
                "with",
                ValueKind::Text,
                FlagOptions {
                    default_value: Some(Value::from(DEFAULT_OBJECT)),
                    ..FlagOptions::optional()
                },
            )],
            arguments: vec![Argument::new("member", member())],
            ..CommandDefinition::new("${prefix}slap", "Slaps a member around a bit.")
        })?;
        Ok(Self { spec })
    }
}

fn slap_message(author: UserId, target: UserId, object: &str) -> String {
    format!(
        "{} slaps {} around a bit with {}.",
        mention(author),
        mention(target),
        defuse_mentions(object)
    )
}

#[async_trait]
impl Command for SlapCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        let Some(target) = event.parameters.argument::<i64>("member").and_then(member_of) else {
            return Err("member argument did not resolve".into());
        };
        let object = event
            .parameters
            .flag::<String>("with")
            .unwrap_or_else(|| DEFAULT_OBJECT.to_string());

        event
            .reply(slap_message(event.invocation.user_id, target, &object))
            .await
    }
}
