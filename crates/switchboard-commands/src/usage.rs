//! Usage string synthesis.

use crate::argument::Argument;
use crate::flag::Flag;
use crate::parameter::Parameter;

const fn brackets(required: bool) -> (char, char) {
    if required {
        ('<', '>')
    } else {
        ('[', ']')
    }
}

fn render_argument(argument: &Argument) -> String {
    let (open, close) = brackets(argument.is_required());
    format!("{open}{}{close}", argument.name())
}

fn render_flag(flag: &Flag) -> String {
    let (open, close) = brackets(flag.is_required());
    let (value_open, value_close) = brackets(flag.requires_value());

    let mut rendered = format!(
        "{open}-{} {value_open}{}{value_close}",
        flag.short_name(),
        flag.long_name()
    );
    if let Some(default) = flag.default_value() {
        rendered.push_str(&format!(" = {default}"));
    }
    rendered.push(close);
    rendered
}

/// Renders `name`, then arguments, then flags, in declared order.
///
/// ```
/// use switchboard_commands::{synthesize, Argument, ArgumentOptions, Flag, ValueKind};
///
/// let arguments = [
///     Argument::new("a1", ValueKind::Text),
///     Argument::with_options("a2", ValueKind::Text, ArgumentOptions::optional()),
/// ];
/// let flags = [Flag::new("m", "member", ValueKind::Text)];
///
/// assert_eq!(synthesize("kick", &flags, &arguments), "kick <a1> [a2] <-m <member>>");
/// ```
pub fn synthesize(name: &str, flags: &[Flag], arguments: &[Argument]) -> String {
    let mut usage = name.to_string();

    for argument in arguments {
        usage.push(' ');
        usage.push_str(&render_argument(argument));
    }

    for flag in flags {
        usage.push(' ');
        usage.push_str(&render_flag(flag));
    }

    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::ArgumentOptions;
    use crate::flag::FlagOptions;
    use crate::kind::ValueKind;
    use crate::value::Value;

    #[test]
    fn test_name_only() {
        assert_eq!(synthesize("ping", &[], &[]), "ping");
    }

    #[test]
    fn test_required_and_optional_arguments() {
        let arguments = [
            Argument::new("a1", ValueKind::Text),
            Argument::with_options("a2", ValueKind::Text, ArgumentOptions::optional()),
        ];
        assert_eq!(synthesize("name", &[], &arguments), "name <a1> [a2]");
    }

    #[test]
    fn test_required_value_flag() {
        let flags = [Flag::new("m", "member", ValueKind::Text)];
        assert_eq!(synthesize("name", &flags, &[]), "name <-m <member>>");
    }

    #[test]
    fn test_optional_presence_flag_with_default() {
        let flags = [Flag::with_options(
            "p",
            "ping",
            ValueKind::Text,
            FlagOptions {
                required: false,
                requires_value: false,
                default_value: Some(Value::from("true")),
            },
        )];
        assert_eq!(synthesize("name", &flags, &[]), "name [-p [ping] = true]");
    }

    #[test]
    fn test_full_layout_preserves_order() {
        let arguments = [Argument::new("person", ValueKind::Text)];
        let flags = [
            Flag::with_options(
                "p",
                "ping",
                ValueKind::Text,
                FlagOptions {
                    required: false,
                    requires_value: false,
                    default_value: Some(Value::from("true")),
                },
            ),
            Flag::new("c", "channel", ValueKind::Text),
        ];

        assert_eq!(
            synthesize("${prefix}hello", &flags, &arguments),
            "${prefix}hello <person> [-p [ping] = true] <-c <channel>>"
        );
    }
}
