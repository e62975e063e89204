use async_trait::async_trait;
use switchboard_commands::help::{render_category, render_command, render_overview};
use switchboard_commands::{
    Argument, ArgumentOptions, Category, Command, CommandDefinition, CommandFiredEvent,
    CommandSpec, HandlerError, SpecError, ValueKind,
};
use switchboard_common::defuse_mentions;

/// Lists categories, the commands of a category, or details of one command.
pub struct HelpCommand {
    spec: CommandSpec,
}

impl HelpCommand {
    /// Creates the command.
    pub fn new() -> Result<Self, SpecError> {
        let spec = CommandSpec::new(CommandDefinition {
            category: Category::Info,
            aliases: vec!["${prefix}commands".to_string()],
            arguments: vec![Argument::with_options(
                "topic",
                ValueKind::Text,
                ArgumentOptions {
                    takes_rest: true,
                    ..ArgumentOptions::optional()
                },
            )],
            ..CommandDefinition::new(
                "${prefix}help",
                "Shows the command categories, the commands in a category or how to use a command.",
            )
        })?;
        Ok(Self { spec })
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        let prefix = event.prefix().await?;

        let page = match event.parameters.argument::<String>("topic") {
            None => render_overview(&event.registry, &prefix),
            Some(topic) => {
                let unprefixed = topic.strip_prefix(prefix.trim_end()).unwrap_or(&topic).trim();
                let command = event
                    .registry
                    .find(&topic)
                    .or_else(|| event.registry.find(unprefixed));

                if let Some(category) = Category::from_name(&topic) {
                    render_category(&event.registry, category, &prefix)
                } else if let Some(command) = command {
                    render_command(&command, &prefix)
                } else {
                    format!(
                        "There is no command or category called `{}`.",
                        defuse_mentions(&topic)
                    )
                }
            }
        };

        event.reply(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{config, Harness};
    use crate::discord::MockModeration;

    #[tokio::test]
    async fn test_overview_lists_used_categories() {
        let harness = Harness::new(config(), MockModeration::new());
        let replies = harness.run("help", "").await;

        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("Administration"));
        assert!(replies[0].contains("Fun"));
        assert!(!replies[0].contains("Music"));
        assert!(replies[0].contains("bot help <category>"));
    }

    #[tokio::test]
    async fn test_category_page() {
        let harness = Harness::new(config(), MockModeration::new());
        let replies = harness.run("help", "fun").await;

        assert!(replies[0].contains("`bot slap <member> [-w <with> = a large trout]`"));
        assert!(replies[0].contains("bot paint"));
    }

    #[tokio::test]
    async fn test_command_page_accepts_prefixed_name() {
        let harness = Harness::new(config(), MockModeration::new());
        let replies = harness.run("commands", "bot shutdown").await;

        assert!(replies[0].contains("Usage: `bot shutdown`"));
        assert!(replies[0].contains("bot poweroff, bot turnoff"));
        assert!(replies[0].contains("Only bot administrators"));
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let harness = Harness::new(config(), MockModeration::new());
        let replies = harness.run("help", "nothing").await;

        assert_eq!(replies, vec!["There is no command or category called `nothing`.".to_string()]);
    }
}
