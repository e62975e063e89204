//! Error types for command specification, parsing and dispatch

use crate::check::CheckFailure;
use switchboard_common::GuildId;
use thiserror::Error;

/// Error raised by a command body.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A parser rejected input its own validity check accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not parse `{raw}` as {expected}: {reason}")]
pub struct ParseError {
    /// The offending input
    pub raw: String,
    /// What the kind accepts
    pub expected: String,
    /// Why parsing failed
    pub reason: String,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(raw: impl Into<String>, expected: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            expected: expected.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of an external lookup collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Nothing is stored for the guild
    #[error("No configuration stored for guild {0}")]
    UnknownGuild(GuildId),

    /// The backing store failed
    #[error("Lookup backend error: {0}")]
    Backend(String),
}

/// A command definition that cannot be turned into a [`crate::CommandSpec`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The command has no name
    #[error("Command name must not be empty")]
    EmptyName,

    /// Two flags share a short or long name
    #[error("Command {command} declares flag name `{flag}` more than once")]
    DuplicateFlag {
        /// Command being built
        command: String,
        /// Repeated name
        flag: String,
    },

    /// The required administrator level is above the highest level
    #[error("Command {command} requires administrator level {level}, the highest level is {max}")]
    AdministratorLevelOutOfRange {
        /// Command being built
        command: String,
        /// Declared level
        level: u8,
        /// Highest supported level
        max: u8,
    },

    /// Two actions differ only in case
    #[error("Command {command} declares action `{action}` more than once")]
    DuplicateAction {
        /// Command being built
        command: String,
        /// Lower-cased action name
        action: String,
    },

    /// An argument other than the last one consumes the remaining tokens
    #[error("Argument `{argument}` of command {command} takes the rest but is not the last argument")]
    RestNotLast {
        /// Command being built
        command: String,
        /// Misplaced argument
        argument: String,
    },
}

/// A command could not be registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The name or alias already belongs to another command
    #[error("`{name}` is already registered by command {existing}")]
    Duplicate {
        /// Conflicting name or alias
        name: String,
        /// Raw name of the command that owns it
        existing: String,
    },
}

/// Raw argument text that cannot be split into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// A double quote was opened but never closed
    #[error("Unterminated quote starting at position {position}")]
    UnterminatedQuote {
        /// Byte offset of the opening quote
        position: usize,
    },
}

/// Everything that can stop a single invocation.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A flag or argument value was rejected by its kind
    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        /// Flag long name or argument name
        name: String,
        /// User-facing explanation from the kind
        message: String,
    },

    /// A required flag or argument was not supplied
    #[error("Missing required {kind} `{name}`")]
    MissingRequiredValue {
        /// `"flag"` or `"argument"`
        kind: &'static str,
        /// Flag long name or argument name
        name: String,
    },

    /// An execution check did not pass
    #[error("Execution check failed: {0}")]
    CheckFailed(#[from] CheckFailure),

    /// The raw argument text could not be tokenized
    #[error("Malformed input: {0}")]
    Malformed(#[from] TokenizeError),

    /// The command was declared inconsistently
    #[error("Command configuration fault: {message}")]
    ConfigurationFault {
        /// Description for the logs
        message: String,
    },

    /// A lookup collaborator failed
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// The command body failed
    #[error("Command failed: {0}")]
    Handler(#[source] HandlerError),

    /// No command is registered under the name
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
}

impl CommandError {
    /// Create a configuration fault
    pub fn configuration_fault(message: impl Into<String>) -> Self {
        Self::ConfigurationFault { message: message.into() }
    }

    /// Text sent back to the channel the command was invoked in.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidValue { message, .. } => message.clone(),
            Self::MissingRequiredValue { kind, name } => {
                format!("You need to specify the {kind} `{name}`.")
            }
            Self::CheckFailed(failure) => failure.user_message(),
            Self::Malformed(TokenizeError::UnterminatedQuote { .. }) => {
                "Your message has a quote that is never closed.".to_string()
            }
            Self::UnknownCommand(name) => format!("I don't know a command called `{name}`."),
            Self::ConfigurationFault { .. } | Self::Lookup(_) | Self::Handler(_) => {
                "Something went wrong on my side while running that command.".to_string()
            }
        }
    }

    /// Whether the error points at a bug or outage rather than user input.
    pub const fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationFault { .. } | Self::Lookup(_) | Self::Handler(_)
        )
    }
}

impl From<ParseError> for CommandError {
    fn from(error: ParseError) -> Self {
        Self::configuration_fault(error.to_string())
    }
}
