//! Command registry for looking commands up by name or alias

use crate::category::Category;
use crate::error::RegistryError;
use crate::framework::Command;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Alias-aware table of commands.
///
/// Names are matched exactly after lower-casing, with the prefix
/// placeholder removed.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("names", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command` under its raw name and every raw alias.
    ///
    /// Nothing is registered when any of the names is already taken.
    pub fn register(&mut self, command: Arc<dyn Command>) -> Result<(), RegistryError> {
        let spec = command.spec();
        let mut names = vec![spec.raw_name().to_lowercase()];
        names.extend(spec.raw_aliases().iter().map(|alias| alias.to_lowercase()));

        for (position, name) in names.iter().enumerate() {
            let existing = self
                .index
                .get(name)
                .map(|&index| self.commands[index].spec().raw_name())
                .or_else(|| names[..position].contains(name).then(|| spec.raw_name()));

            if let Some(existing) = existing {
                return Err(RegistryError::Duplicate {
                    name: name.clone(),
                    existing,
                });
            }
        }

        debug!("Registering command {} ({} names)", spec.raw_name(), names.len());

        let index = self.commands.len();
        for name in names {
            self.index.insert(name, index);
        }
        self.commands.push(command);

        Ok(())
    }

    /// Registers every command, stopping at the first conflict.
    pub fn register_all(
        &mut self,
        commands: impl IntoIterator<Item = Arc<dyn Command>>,
    ) -> Result<(), RegistryError> {
        for command in commands {
            self.register(command)?;
        }
        Ok(())
    }

    /// Finds a command by name or alias, ignoring case.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.index
            .get(&name.to_lowercase())
            .map(|&index| Arc::clone(&self.commands[index]))
    }

    /// Every command in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.iter()
    }

    /// Commands of one category in registration order.
    pub fn by_category(&self, category: Category) -> Vec<Arc<dyn Command>> {
        self.commands
            .iter()
            .filter(|command| command.spec().category() == category)
            .cloned()
            .collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::framework::CommandFiredEvent;
    use crate::spec::{CommandDefinition, CommandSpec};
    use async_trait::async_trait;

    struct Named(CommandSpec);

    #[async_trait]
    impl Command for Named {
        fn spec(&self) -> &CommandSpec {
            &self.0
        }

        async fn on_command_fired(&self, _event: CommandFiredEvent) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    fn command(name: &str, aliases: &[&str], category: Category) -> Arc<dyn Command> {
        Arc::new(Named(
            CommandSpec::new(CommandDefinition {
                aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
                category,
                ..CommandDefinition::new(name, "")
            })
            .unwrap(),
        ))
    }

    #[test]
    fn test_find_by_name_and_alias() {
        let mut registry = CommandRegistry::new();
        registry
            .register(command("${prefix}shutdown", &["${prefix}poweroff", "${prefix}turnoff"], Category::BotAdministrator))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.find("shutdown").is_some());
        assert!(registry.find("POWEROFF").is_some());
        assert!(registry.find("turnoff").is_some());
        assert!(registry.find("shut").is_none());
    }

    #[test]
    fn test_duplicates_are_rejected_atomically() {
        let mut registry = CommandRegistry::new();
        registry.register(command("${prefix}kick", &[], Category::Administration)).unwrap();

        let error = registry
            .register(command("${prefix}boot", &["${prefix}kick"], Category::Administration))
            .unwrap_err();
        assert_eq!(
            error,
            RegistryError::Duplicate { name: "kick".to_string(), existing: "kick".to_string() }
        );
        assert!(registry.find("boot").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_alias_repeating_own_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        assert!(registry
            .register(command("${prefix}slap", &["${prefix}SLAP"], Category::Other))
            .is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_by_category_keeps_registration_order() {
        let mut registry = CommandRegistry::new();
        registry
            .register_all([
                command("${prefix}kick", &[], Category::Administration),
                command("${prefix}slap", &[], Category::Other),
                command("${prefix}mute", &[], Category::Administration),
            ])
            .unwrap();

        let names: Vec<_> = registry
            .by_category(Category::Administration)
            .iter()
            .map(|command| command.spec().raw_name())
            .collect();
        assert_eq!(names, vec!["kick", "mute"]);
    }
}
