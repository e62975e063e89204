//! Runtime validation of loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use switchboard_commands::spec::MAX_ADMINISTRATOR_LEVEL;

/// Longest prefix a guild may configure.
pub const MAX_PREFIX_LENGTH: usize = 16;

/// Validate a Discord token (basic check)
pub fn validate_discord_token(token: &str) -> Result<(), ConfigError> {
    if token.trim().is_empty() {
        return Err(ConfigError::validation("discord.token", "must not be empty"));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(ConfigError::validation("discord.token", "must not contain whitespace"));
    }
    Ok(())
}

/// Validate a command prefix
///
/// Prefixes are matched against the start of a message, so they must be
/// non-empty, short, and free of whitespace.
pub fn validate_prefix(field: &str, prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::validation(field, "prefix must not be empty"));
    }
    if prefix.chars().count() > MAX_PREFIX_LENGTH {
        return Err(ConfigError::validation(
            field,
            format!("prefix must be at most {MAX_PREFIX_LENGTH} characters"),
        ));
    }
    if prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::validation(field, "prefix must not contain whitespace"));
    }
    Ok(())
}

fn validate_snowflake(field: &str, id: &str) -> Result<(), ConfigError> {
    match id.parse::<u64>() {
        Ok(value) if value > 0 => Ok(()),
        _ => Err(ConfigError::validation(field, format!("`{id}` is not a Discord id"))),
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        validate_discord_token(&config.discord.token)?;
        validate_prefix("commands.default_prefix", &config.commands.default_prefix)?;

        if config.logging.level.trim().is_empty() {
            return Err(ConfigError::validation("logging.level", "must not be empty"));
        }

        for (guild_id, guild) in &config.guilds {
            let field = format!("guilds.{guild_id}");
            validate_snowflake(&field, guild_id)?;

            if let Some(prefix) = &guild.prefix {
                validate_prefix(&format!("{field}.prefix"), prefix)?;
            }

            for (role_id, level) in &guild.administrator_roles {
                let role_field = format!("{field}.administrator_roles.{role_id}");
                validate_snowflake(&role_field, role_id)?;
                if *level > MAX_ADMINISTRATOR_LEVEL {
                    return Err(ConfigError::validation(
                        role_field,
                        format!("level {level} is above the highest level {MAX_ADMINISTRATOR_LEVEL}"),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GuildConfig;
    use std::collections::BTreeMap;

    fn valid() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config
    }

    fn field_of(error: ConfigError) -> String {
        match error {
            ConfigError::Validation { field, .. } => field,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_default_with_token_is_valid() {
        assert!(ConfigValidator::validate(&valid()).is_ok());
    }

    #[test]
    fn test_empty_token() {
        let error = ConfigValidator::validate(&Config::default()).unwrap_err();
        assert_eq!(field_of(error), "discord.token");
    }

    #[test]
    fn test_validate_prefix() {
        assert!(validate_prefix("p", "!").is_ok());
        assert!(validate_prefix("p", "bot").is_ok());
        assert!(validate_prefix("p", "").is_err());
        assert!(validate_prefix("p", "a b").is_err());
        assert!(validate_prefix("p", &"x".repeat(MAX_PREFIX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_guild_keys_must_be_ids() {
        let mut config = valid();
        config.guilds.insert("general".to_string(), GuildConfig::default());
        assert_eq!(field_of(ConfigValidator::validate(&config).unwrap_err()), "guilds.general");
    }

    #[test]
    fn test_role_levels_are_bounded() {
        let mut config = valid();
        config.guilds.insert(
            "1".to_string(),
            GuildConfig {
                prefix: None,
                administrator_roles: BTreeMap::from([("2".to_string(), 5)]),
            },
        );
        assert_eq!(
            field_of(ConfigValidator::validate(&config).unwrap_err()),
            "guilds.1.administrator_roles.2"
        );
    }
}
