//! Command specifications.
//!
//! A [`CommandSpec`] is built once from a [`CommandDefinition`] and never
//! changes afterwards. Its usage string and minimum argument count are
//! derived at construction.

use crate::argument::Argument;
use crate::category::Category;
use crate::check::ExecutionCheck;
use crate::error::{LookupError, SpecError};
use crate::flag::Flag;
use crate::lookup::{resolve_prefix, PrefixLookup};
use crate::parameter::Parameter;
use crate::usage::synthesize;
use serenity::model::Permissions;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use switchboard_common::GuildId;
use tracing::warn;

/// Placeholder replaced by the guild's prefix in names, aliases and usage.
pub const PREFIX_PLACEHOLDER: &str = "${prefix}";

/// Highest administrator level a command may require.
pub const MAX_ADMINISTRATOR_LEVEL: u8 = 4;

/// Everything a command author declares.
#[derive(Debug, Clone)]
pub struct CommandDefinition {
    /// Name, usually `${prefix}name`
    pub name: String,
    /// One-line description
    pub description: String,
    /// Help category
    pub category: Category,
    /// Sub-action name to description
    pub actions: BTreeMap<String, String>,
    /// Alternative names, may contain the placeholder
    pub aliases: Vec<String>,
    /// Named flags in declared order
    pub flags: Vec<Flag>,
    /// Positional arguments in declared order
    pub arguments: Vec<Argument>,
    /// Permissions the bot needs to run the command
    pub bot_required_permissions: Permissions,
    /// Checks skipped for this command
    pub disabled_checks: BTreeSet<ExecutionCheck>,
    /// Administrator level required (0 to 4)
    pub administrator_level_required: u8,
    /// Only bot administrators may run the command
    pub bot_administrator_only: bool,
}

impl Default for CommandDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: Category::Other,
            actions: BTreeMap::new(),
            aliases: Vec::new(),
            flags: Vec::new(),
            arguments: Vec::new(),
            bot_required_permissions: Permissions::empty(),
            disabled_checks: BTreeSet::new(),
            administrator_level_required: 0,
            bot_administrator_only: false,
        }
    }
}

impl CommandDefinition {
    /// Starts a definition with a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// An immutable, validated command specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    name: String,
    description: String,
    category: Category,
    actions: BTreeMap<String, String>,
    aliases: Vec<String>,
    flags: Vec<Flag>,
    arguments: Vec<Argument>,
    bot_required_permissions: Permissions,
    disabled_checks: BTreeSet<ExecutionCheck>,
    administrator_level_required: u8,
    bot_administrator_only: bool,
    minimum_argument_count: usize,
    usage: String,
}

/// Replaces every placeholder in `template` with `prefix`.
pub fn apply_prefix(template: &str, prefix: &str) -> String {
    template.replace(PREFIX_PLACEHOLDER, prefix)
}

impl CommandSpec {
    /// Validates `definition` and derives usage and minimum argument count.
    pub fn new(definition: CommandDefinition) -> Result<Self, SpecError> {
        let CommandDefinition {
            name,
            description,
            category,
            actions,
            aliases,
            flags,
            arguments,
            bot_required_permissions,
            disabled_checks,
            administrator_level_required,
            bot_administrator_only,
        } = definition;

        if apply_prefix(&name, "").trim().is_empty() {
            return Err(SpecError::EmptyName);
        }

        if administrator_level_required > MAX_ADMINISTRATOR_LEVEL {
            return Err(SpecError::AdministratorLevelOutOfRange {
                command: name,
                level: administrator_level_required,
                max: MAX_ADMINISTRATOR_LEVEL,
            });
        }

        let mut flag_names = HashSet::new();
        for flag in &flags {
            let mut names = vec![flag.short_name()];
            if flag.long_name() != flag.short_name() {
                names.push(flag.long_name());
            }

            for flag_name in names {
                if !flag_names.insert(flag_name.to_string()) {
                    return Err(SpecError::DuplicateFlag {
                        command: name,
                        flag: flag_name.to_string(),
                    });
                }
            }
        }

        if let Some(position) = arguments.iter().position(Argument::takes_rest) {
            if position + 1 != arguments.len() {
                return Err(SpecError::RestNotLast {
                    command: name,
                    argument: arguments[position].name().to_string(),
                });
            }
        }

        if let Some(first_optional) = arguments.iter().position(|a| !a.is_required()) {
            if arguments[first_optional..].iter().any(|a| a.is_required()) {
                warn!(
                    "Command {} declares a required argument after an optional one",
                    name
                );
            }
        }

        let mut normalized_actions = BTreeMap::new();
        for (action, description) in actions {
            let key = action.to_lowercase();
            if normalized_actions.insert(key.clone(), description).is_some() {
                return Err(SpecError::DuplicateAction { command: name, action: key });
            }
        }
        let actions = normalized_actions;

        let minimum_argument_count = arguments.iter().filter(|a| a.is_required()).count();
        let usage = synthesize(&name, &flags, &arguments);

        Ok(Self {
            name,
            description,
            category,
            actions,
            aliases,
            flags,
            arguments,
            bot_required_permissions,
            disabled_checks,
            administrator_level_required,
            bot_administrator_only,
            minimum_argument_count,
            usage,
        })
    }

    /// Name as declared, placeholder included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Help category.
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Sub-actions and their descriptions.
    pub const fn actions(&self) -> &BTreeMap<String, String> {
        &self.actions
    }

    /// Aliases as declared.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Flags in declared order.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Arguments in declared order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Permissions the bot must hold.
    pub const fn bot_required_permissions(&self) -> Permissions {
        self.bot_required_permissions
    }

    /// Checks skipped for this command.
    pub const fn disabled_checks(&self) -> &BTreeSet<ExecutionCheck> {
        &self.disabled_checks
    }

    /// Administrator level required.
    pub const fn administrator_level_required(&self) -> u8 {
        self.administrator_level_required
    }

    /// Whether only bot administrators may run the command.
    pub const fn bot_administrator_only(&self) -> bool {
        self.bot_administrator_only
    }

    /// Number of required arguments.
    pub const fn minimum_argument_count(&self) -> usize {
        self.minimum_argument_count
    }

    /// Usage with the placeholder still in place.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether `check` runs for this command.
    ///
    /// [`ExecutionCheck::IsBotAdministrator`] always runs for
    /// bot-administrator-only commands.
    pub fn is_check_enabled(&self, check: ExecutionCheck) -> bool {
        if check == ExecutionCheck::IsBotAdministrator && self.bot_administrator_only {
            return true;
        }
        !self.disabled_checks.contains(&check)
    }

    /// Looks up a declared flag by short or long name.
    pub fn find_flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.matches(name))
    }

    /// Name with the placeholder removed.
    pub fn raw_name(&self) -> String {
        apply_prefix(&self.name, "")
    }

    /// Aliases with the placeholder removed.
    pub fn raw_aliases(&self) -> Vec<String> {
        self.aliases.iter().map(|alias| apply_prefix(alias, "")).collect()
    }

    /// Name rendered with an already resolved display prefix.
    pub fn name_for_prefix(&self, prefix: &str) -> String {
        apply_prefix(&self.name, prefix)
    }

    /// Usage rendered with an already resolved display prefix.
    pub fn usage_for_prefix(&self, prefix: &str) -> String {
        apply_prefix(&self.usage, prefix)
    }

    /// Aliases rendered with an already resolved display prefix.
    pub fn aliases_for_prefix(&self, prefix: &str) -> Vec<String> {
        self.aliases.iter().map(|alias| apply_prefix(alias, prefix)).collect()
    }

    /// Name with the guild's prefix substituted.
    pub async fn name_with_prefix(
        &self,
        guild_id: GuildId,
        prefixes: &dyn PrefixLookup,
    ) -> Result<String, LookupError> {
        let prefix = resolve_prefix(prefixes, guild_id).await?;
        Ok(self.name_for_prefix(&prefix))
    }

    /// Usage with the guild's prefix substituted.
    pub async fn usage_with_prefix(
        &self,
        guild_id: GuildId,
        prefixes: &dyn PrefixLookup,
    ) -> Result<String, LookupError> {
        let prefix = resolve_prefix(prefixes, guild_id).await?;
        Ok(self.usage_for_prefix(&prefix))
    }

    /// Every alias with the guild's prefix substituted, order preserved.
    pub async fn aliases_with_prefix(
        &self,
        guild_id: GuildId,
        prefixes: &dyn PrefixLookup,
    ) -> Result<Vec<String>, LookupError> {
        let prefix = resolve_prefix(prefixes, guild_id).await?;
        Ok(self.aliases_for_prefix(&prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::ArgumentOptions;
    use crate::flag::FlagOptions;
    use crate::kind::ValueKind;
    use crate::lookup::MockPrefixLookup;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn prefixes(prefix: &'static str) -> MockPrefixLookup {
        let mut prefixes = MockPrefixLookup::new();
        prefixes
            .expect_lookup_prefix()
            .returning(move |_| Ok(prefix.to_string()));
        prefixes
    }

    fn kick() -> CommandDefinition {
        CommandDefinition {
            category: Category::Administration,
            aliases: vec!["${prefix}boot".to_string()],
            flags: vec![
                Flag::new("m", "member", ValueKind::Text),
                Flag::with_options("r", "reason", ValueKind::Text, FlagOptions::optional()),
            ],
            bot_required_permissions: Permissions::KICK_MEMBERS,
            administrator_level_required: 2,
            ..CommandDefinition::new("${prefix}kick", "Kicks a member.")
        }
    }

    fn hash_of(spec: &CommandSpec) -> u64 {
        let mut hasher = DefaultHasher::new();
        spec.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_derived_fields() {
        let spec = CommandSpec::new(CommandDefinition {
            arguments: vec![
                Argument::new("a1", ValueKind::Text),
                Argument::with_options("a2", ValueKind::Text, ArgumentOptions::optional()),
            ],
            ..CommandDefinition::new("name", "")
        })
        .unwrap();

        assert_eq!(spec.usage(), "name <a1> [a2]");
        assert_eq!(spec.minimum_argument_count(), 1);
    }

    #[test]
    fn test_identically_built_specs_are_equal() {
        let first = CommandSpec::new(kick()).unwrap();
        let second = CommandSpec::new(kick()).unwrap();
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));

        let different = CommandSpec::new(CommandDefinition {
            administrator_level_required: 3,
            ..kick()
        })
        .unwrap();
        assert_ne!(first, different);
    }

    #[test]
    fn test_raw_names_strip_placeholder() {
        let spec = CommandSpec::new(kick()).unwrap();
        assert_eq!(spec.raw_name(), "kick");
        assert_eq!(spec.raw_aliases(), vec!["boot".to_string()]);
    }

    #[test]
    fn test_rejects_invalid_definitions() {
        assert_eq!(
            CommandSpec::new(CommandDefinition::new("${prefix}", "")).unwrap_err(),
            SpecError::EmptyName
        );

        let duplicate = CommandDefinition {
            flags: vec![
                Flag::new("m", "member", ValueKind::Text),
                Flag::new("m", "mode", ValueKind::Text),
            ],
            ..CommandDefinition::new("x", "")
        };
        assert!(matches!(
            CommandSpec::new(duplicate).unwrap_err(),
            SpecError::DuplicateFlag { .. }
        ));

        let rest_first = CommandDefinition {
            arguments: vec![
                Argument::with_options(
                    "reason",
                    ValueKind::Text,
                    ArgumentOptions { takes_rest: true, ..ArgumentOptions::default() },
                ),
                Argument::new("member", ValueKind::Text),
            ],
            ..CommandDefinition::new("x", "")
        };
        assert!(matches!(
            CommandSpec::new(rest_first).unwrap_err(),
            SpecError::RestNotLast { .. }
        ));

        let clashing_actions = CommandDefinition {
            actions: BTreeMap::from([
                ("Set".to_string(), "Sets it.".to_string()),
                ("set".to_string(), "Also sets it.".to_string()),
            ]),
            ..CommandDefinition::new("x", "")
        };
        assert_eq!(
            CommandSpec::new(clashing_actions).unwrap_err(),
            SpecError::DuplicateAction { command: "x".to_string(), action: "set".to_string() }
        );

        let too_high = CommandDefinition {
            administrator_level_required: 5,
            ..CommandDefinition::new("x", "")
        };
        assert!(matches!(
            CommandSpec::new(too_high).unwrap_err(),
            SpecError::AdministratorLevelOutOfRange { level: 5, .. }
        ));
    }

    #[test]
    fn test_bot_administrator_only_forces_check() {
        let spec = CommandSpec::new(CommandDefinition {
            bot_administrator_only: true,
            disabled_checks: BTreeSet::from([
                ExecutionCheck::IsBotAdministrator,
                ExecutionCheck::IsAdministrator,
            ]),
            ..CommandDefinition::new("${prefix}shutdown", "")
        })
        .unwrap();

        assert!(spec.is_check_enabled(ExecutionCheck::IsBotAdministrator));
        assert!(!spec.is_check_enabled(ExecutionCheck::IsAdministrator));
        assert!(spec.is_check_enabled(ExecutionCheck::BotHasRequiredPermissions));
    }

    #[tokio::test]
    async fn test_symbolic_prefix_substitution() {
        let spec = CommandSpec::new(kick()).unwrap();
        let prefixes = prefixes("!");

        assert_eq!(spec.name_with_prefix(GuildId(1), &prefixes).await.unwrap(), "!kick");
        assert_eq!(
            spec.usage_with_prefix(GuildId(1), &prefixes).await.unwrap(),
            "!kick <-m <member>> [-r <reason>]"
        );
        assert_eq!(
            spec.aliases_with_prefix(GuildId(1), &prefixes).await.unwrap(),
            vec!["!boot".to_string()]
        );
    }

    #[tokio::test]
    async fn test_word_prefix_gets_a_space() {
        let spec = CommandSpec::new(kick()).unwrap();
        let prefixes = prefixes("bot");

        assert_eq!(spec.name_with_prefix(GuildId(1), &prefixes).await.unwrap(), "bot kick");
        assert_eq!(
            spec.aliases_with_prefix(GuildId(1), &prefixes).await.unwrap(),
            vec!["bot boot".to_string()]
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let spec = CommandSpec::new(kick()).unwrap();
        let mut prefixes = MockPrefixLookup::new();
        prefixes
            .expect_lookup_prefix()
            .returning(|_| Err(LookupError::Backend("offline".to_string())));

        assert!(spec.name_with_prefix(GuildId(1), &prefixes).await.is_err());
    }
}
