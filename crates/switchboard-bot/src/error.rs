//! Application-wide error types using thiserror.

use switchboard_commands::{RegistryError, SpecError};
use switchboard_common::SwitchboardError;
use switchboard_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error raised by shared infrastructure such as logging.
    #[error(transparent)]
    Common(#[from] SwitchboardError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// A built-in command has an invalid definition.
    #[error("Invalid command definition: {0}")]
    Spec(#[from] SpecError),

    /// Two built-in commands claim the same name.
    #[error("Command registration failed: {0}")]
    Registry(#[from] RegistryError),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
