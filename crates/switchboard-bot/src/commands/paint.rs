use async_trait::async_trait;
use switchboard_commands::{
    Argument, ArgumentOptions, Category, Choices, Command, CommandDefinition, CommandFiredEvent,
    CommandSpec, Flag, HandlerError, SpecError, ValueKind,
};
use switchboard_common::defuse_mentions;

/// Colors the paint command knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red
    Red,
    /// Orange
    Orange,
    /// Yellow
    Yellow,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Purple
    Purple,
}

impl Choices for Color {
    const VARIANTS: &'static [Self] = &[
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Orange => "ORANGE",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Purple => "PURPLE",
        }
    }
}

impl Color {
    const fn square(self) -> &'static str {
        match self {
            Self::Red => "\u{1f7e5}",
            Self::Orange => "\u{1f7e7}",
            Self::Yellow => "\u{1f7e8}",
            Self::Green => "\u{1f7e9}",
            Self::Blue => "\u{1f7e6}",
            Self::Purple => "\u{1f7ea}",
        }
    }
}

/// Paints some text in a color.
pub struct PaintCommand {
    spec: CommandSpec,
}

impl PaintCommand {
    /// Creates the command.
    pub fn new() -> Result<Self, SpecError> {
        let spec = CommandSpec::new(CommandDefinition {
            category: Category::Fun,
            flags: vec![Flag::new("c", "color", ValueKind::choice::<Color>())],
            arguments: vec![Argument::with_options(
                "text",
                ValueKind::Text,
                ArgumentOptions {
                    takes_rest: true,
                    ..ArgumentOptions::default()
                },
            )],
            ..CommandDefinition::new("${prefix}paint", "Paints your text in the color of your choice.")
        })?;
        Ok(Self { spec })
    }
}

#[async_trait]
impl Command for PaintCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError> {
        let (Some(color), Some(text)) = (
            event.parameters.flag_choice::<Color>("color"),
            event.parameters.argument::<String>("text"),
        ) else {
            return Err("paint parameters did not resolve".into());
        };

        event
            .reply(format!("{} {}", color.square(), defuse_mentions(&text)))
            .await
    }
}
