//! Resolution of tokens into typed flag and argument values.

use crate::argument::Argument;
use crate::error::CommandError;
use crate::flag::Flag;
use crate::parameter::Parameter;
use crate::spec::CommandSpec;
use crate::token::Tokens;
use crate::value::{Choices, FromValue, Value};
use std::collections::{HashMap, HashSet};

/// Values resolved for one invocation, keyed by flag long name or
/// argument name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParameters {
    flags: HashMap<String, Value>,
    present_flags: HashSet<String>,
    arguments: HashMap<String, Value>,
    positional: Vec<String>,
}

fn extract<T: FromValue>(name: &str, value: &Value) -> Result<T, CommandError> {
    T::from_value(value).ok_or_else(|| {
        CommandError::configuration_fault(format!(
            "`{name}` holds a {} value, which does not convert to {}",
            value.type_name(),
            std::any::type_name::<T>()
        ))
    })
}

fn require<T: FromValue, P: Parameter>(
    parameter: &P,
    value: Option<&Value>,
) -> Result<T, CommandError> {
    match value {
        Some(value) => extract(parameter.name(), value),
        None => extract(parameter.name(), parameter.require_default()?),
    }
}

impl ParsedParameters {
    /// Value of a flag, explicit or defaulted.
    pub fn flag<T: FromValue>(&self, long_name: &str) -> Option<T> {
        self.flags.get(long_name).and_then(T::from_value)
    }

    /// Value of an argument, explicit or defaulted.
    pub fn argument<T: FromValue>(&self, name: &str) -> Option<T> {
        self.arguments.get(name).and_then(T::from_value)
    }

    /// Choice flag converted to its typed constant.
    pub fn flag_choice<T: Choices>(&self, long_name: &str) -> Option<T> {
        self.flag::<crate::value::Choice>(long_name)
            .and_then(|choice| choice.to_variant())
    }

    /// Choice argument converted to its typed constant.
    pub fn argument_choice<T: Choices>(&self, name: &str) -> Option<T> {
        self.argument::<crate::value::Choice>(name)
            .and_then(|choice| choice.to_variant())
    }

    /// Whether the flag appeared in the input.
    pub fn is_present(&self, long_name: &str) -> bool {
        self.present_flags.contains(long_name)
    }

    /// Positional tokens left after removing a selected action.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Value of `flag`, falling back to its declared default.
    ///
    /// A missing default or a value of another type is a
    /// [`CommandError::ConfigurationFault`].
    pub fn require_flag<T: FromValue>(&self, flag: &Flag) -> Result<T, CommandError> {
        require(flag, self.flags.get(flag.long_name()))
    }

    /// Value of `argument`, falling back to its declared default.
    pub fn require_argument<T: FromValue>(&self, argument: &Argument) -> Result<T, CommandError> {
        require(argument, self.arguments.get(argument.name()))
    }
}

fn resolve_flags(
    spec: &CommandSpec,
    tokens: &Tokens,
    parsed: &mut ParsedParameters,
) -> Result<(), CommandError> {
    for (index, flag) in spec.flags().iter().enumerate() {
        let name = flag.long_name().to_string();

        match tokens.last_occurrence(index) {
            Some(occurrence) => {
                parsed.present_flags.insert(name.clone());

                match (&occurrence.value, flag.requires_value()) {
                    (Some(raw), _) => {
                        parsed.flags.insert(name, flag.resolve(raw)?);
                    }
                    (None, true) => {
                        return Err(CommandError::MissingRequiredValue { kind: Flag::KIND_LABEL, name });
                    }
                    (None, false) => {
                        if let Some(default) = flag.default_value() {
                            parsed.flags.insert(name, default.clone());
                        }
                    }
                }
            }
            None if flag.is_required() => {
                return Err(CommandError::MissingRequiredValue { kind: Flag::KIND_LABEL, name });
            }
            None => {
                if let Some(default) = flag.default_value() {
                    parsed.flags.insert(name, default.clone());
                }
            }
        }
    }

    Ok(())
}

fn resolve_arguments(
    spec: &CommandSpec,
    positional: &[String],
    parsed: &mut ParsedParameters,
) -> Result<(), CommandError> {
    for (index, argument) in spec.arguments().iter().enumerate() {
        let raw = if argument.takes_rest() {
            positional.get(index..).filter(|rest| !rest.is_empty()).map(|rest| rest.join(" "))
        } else {
            positional.get(index).cloned()
        };

        let name = argument.name().to_string();
        match raw {
            Some(raw) => {
                parsed.arguments.insert(name, argument.resolve(&raw)?);
            }
            None if argument.is_required() => {
                return Err(CommandError::MissingRequiredValue { kind: Argument::KIND_LABEL, name });
            }
            None => {
                if let Some(default) = argument.default_value() {
                    parsed.arguments.insert(name, default.clone());
                }
            }
        }
    }

    Ok(())
}

/// Resolves every flag, then every argument, against `positional`.
///
/// `positional` is the tokenizer's positional list with any selected action
/// already removed.
pub fn resolve(
    spec: &CommandSpec,
    tokens: &Tokens,
    positional: Vec<String>,
) -> Result<ParsedParameters, CommandError> {
    let mut parsed = ParsedParameters::default();

    resolve_flags(spec, tokens, &mut parsed)?;
    resolve_arguments(spec, &positional, &mut parsed)?;

    parsed.positional = positional;
    Ok(parsed)
}

/// Splits off the first positional token when it names a declared action.
pub fn select_action(spec: &CommandSpec, mut positional: Vec<String>) -> (Option<String>, Vec<String>) {
    let Some(first) = positional.first() else {
        return (None, positional);
    };

    let lowered = first.to_lowercase();
    if spec.actions().contains_key(&lowered) {
        positional.remove(0);
        (Some(lowered), positional)
    } else {
        (None, positional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::ArgumentOptions;
    use crate::flag::FlagOptions;
    use crate::kind::ValueKind;
    use crate::spec::CommandDefinition;
    use crate::token::tokenize;
    use crate::value::{TimeSpan, TimeUnit};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Blue,
    }

    impl Choices for Color {
        const VARIANTS: &'static [Self] = &[Self::Red, Self::Blue];

        fn name(self) -> &'static str {
            match self {
                Self::Red => "RED",
                Self::Blue => "BLUE",
            }
        }
    }

    fn mute() -> CommandSpec {
        CommandSpec::new(CommandDefinition {
            flags: vec![
                Flag::new("m", "member", ValueKind::Text),
                Flag::new("t", "time", ValueKind::TimeSpan),
                Flag::with_options(
                    "c",
                    "color",
                    ValueKind::choice::<Color>(),
                    FlagOptions {
                        default_value: Some(Value::choice(Color::Red)),
                        ..FlagOptions::optional()
                    },
                ),
                Flag::with_options("n", "note", ValueKind::Text, FlagOptions::optional()),
            ],
            arguments: vec![Argument::with_options(
                "reason",
                ValueKind::Text,
                ArgumentOptions {
                    takes_rest: true,
                    ..ArgumentOptions::optional()
                },
            )],
            ..CommandDefinition::new("${prefix}mute", "Mutes a member.")
        })
        .unwrap()
    }

    fn run(spec: &CommandSpec, raw: &str) -> Result<ParsedParameters, CommandError> {
        let tokens = tokenize(raw, spec.flags()).unwrap();
        let positional = tokens.positional.clone();
        resolve(spec, &tokens, positional)
    }

    #[test]
    fn test_present_and_valid_values() {
        let spec = mute();
        let parsed = run(&spec, "-m bob -t 10m -c blue being rude").unwrap();

        assert_eq!(parsed.flag::<String>("member").as_deref(), Some("bob"));
        assert_eq!(
            parsed.flag::<TimeSpan>("time"),
            Some(TimeSpan::new(10, TimeUnit::Minutes))
        );
        assert_eq!(parsed.flag_choice::<Color>("color"), Some(Color::Blue));
        assert_eq!(parsed.argument::<String>("reason").as_deref(), Some("being rude"));
        assert!(parsed.is_present("member"));
        assert!(!parsed.is_present("note"));
    }

    #[test]
    fn test_defaults_fill_absent_optional_flags() {
        let spec = mute();
        let parsed = run(&spec, "-m bob -t 1h").unwrap();

        assert_eq!(parsed.flag_choice::<Color>("color"), Some(Color::Red));
        assert_eq!(parsed.flag::<String>("note"), None);
        assert_eq!(parsed.argument::<String>("reason"), None);
    }

    #[test]
    fn test_invalid_value() {
        let spec = mute();
        match run(&spec, "-m bob -t soon").unwrap_err() {
            CommandError::InvalidValue { name, message } => {
                assert_eq!(name, "time");
                assert!(message.contains("`soon`"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_flag() {
        let spec = mute();
        match run(&spec, "-t 1h").unwrap_err() {
            CommandError::MissingRequiredValue { kind, name } => {
                assert_eq!(kind, "flag");
                assert_eq!(name, "member");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_value_flag_without_value() {
        let spec = mute();
        assert!(matches!(
            run(&spec, "-t 1h -m").unwrap_err(),
            CommandError::MissingRequiredValue { kind: "flag", .. }
        ));
    }

    #[test]
    fn test_require_flag_without_default_is_a_fault() {
        let spec = mute();
        let parsed = run(&spec, "-m bob -t 1h").unwrap();
        let note = spec.find_flag("note").unwrap();

        assert!(matches!(
            parsed.require_flag::<String>(note).unwrap_err(),
            CommandError::ConfigurationFault { .. }
        ));

        let color = spec.find_flag("color").unwrap();
        let choice: crate::value::Choice = parsed.require_flag(color).unwrap();
        assert_eq!(choice.name(), "RED");
    }

    #[test]
    fn test_require_flag_type_mismatch_is_a_fault() {
        let spec = mute();
        let parsed = run(&spec, "-m bob -t 1h").unwrap();
        let member = spec.find_flag("member").unwrap();

        assert!(matches!(
            parsed.require_flag::<i64>(member).unwrap_err(),
            CommandError::ConfigurationFault { .. }
        ));
    }

    #[test]
    fn test_required_argument_missing() {
        let spec = CommandSpec::new(CommandDefinition {
            arguments: vec![Argument::new("amount", ValueKind::integer())],
            ..CommandDefinition::new("roll", "")
        })
        .unwrap();

        assert!(matches!(
            run(&spec, "").unwrap_err(),
            CommandError::MissingRequiredValue { kind: "argument", .. }
        ));
        assert_eq!(run(&spec, "-3").unwrap().argument::<i64>("amount"), Some(-3));
    }

    #[test]
    fn test_select_action() {
        let spec = CommandSpec::new(CommandDefinition {
            actions: BTreeMap::from([("set".to_string(), "Sets it.".to_string())]),
            ..CommandDefinition::new("prefix", "")
        })
        .unwrap();

        let (action, rest) = select_action(&spec, vec!["SET".to_string(), "bot".to_string()]);
        assert_eq!(action.as_deref(), Some("set"));
        assert_eq!(rest, vec!["bot".to_string()]);

        let (action, rest) = select_action(&spec, vec!["bot".to_string()]);
        assert_eq!(action, None);
        assert_eq!(rest, vec!["bot".to_string()]);

        assert_eq!(select_action(&spec, Vec::new()), (None, Vec::new()));
    }

    #[test]
    fn test_actions_declared_in_mixed_case_are_selected() {
        let spec = CommandSpec::new(CommandDefinition {
            actions: BTreeMap::from([("Reset".to_string(), "Resets it.".to_string())]),
            ..CommandDefinition::new("prefix", "")
        })
        .unwrap();

        assert!(spec.actions().contains_key("reset"));
        let (action, rest) = select_action(&spec, vec!["reset".to_string()]);
        assert_eq!(action.as_deref(), Some("reset"));
        assert!(rest.is_empty());

        let (action, _) = select_action(&spec, vec!["RESET".to_string()]);
        assert_eq!(action.as_deref(), Some("reset"));
    }
}
