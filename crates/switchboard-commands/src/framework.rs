//! The command trait and the event handed to command bodies.

use crate::error::{HandlerError, LookupError};
use crate::invocation::Invocation;
use crate::lookup::{resolve_prefix, PrefixLookup, Responder};
use crate::parameters::ParsedParameters;
use crate::registry::CommandRegistry;
use crate::spec::CommandSpec;
use async_trait::async_trait;
use std::sync::Arc;

/// A command the dispatcher can run.
#[async_trait]
pub trait Command: Send + Sync {
    /// The command's immutable specification.
    fn spec(&self) -> &CommandSpec;

    /// Runs the command body with checked, parsed parameters.
    async fn on_command_fired(&self, event: CommandFiredEvent) -> Result<(), HandlerError>;
}

/// Everything a command body receives.
#[derive(Clone)]
pub struct CommandFiredEvent {
    /// The invocation being handled
    pub invocation: Invocation,
    /// Resolved flag and argument values
    pub parameters: ParsedParameters,
    /// Selected sub-action, lower-cased
    pub action: Option<String>,
    /// Channel to reply to
    pub responder: Arc<dyn Responder>,
    /// Every registered command, for help-style commands
    pub registry: Arc<CommandRegistry>,
    /// Guild prefix source
    pub prefixes: Arc<dyn PrefixLookup>,
}

impl std::fmt::Debug for CommandFiredEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandFiredEvent")
            .field("invocation", &self.invocation)
            .field("parameters", &self.parameters)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl CommandFiredEvent {
    /// Replies in the invoking channel.
    pub async fn reply(&self, content: impl AsRef<str> + Send) -> Result<(), HandlerError> {
        self.responder
            .reply(self.invocation.channel_id, content.as_ref())
            .await
    }

    /// Display prefix of the invoking guild.
    pub async fn prefix(&self) -> Result<String, LookupError> {
        resolve_prefix(self.prefixes.as_ref(), self.invocation.guild_id).await
    }
}
