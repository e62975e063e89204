//! Dispatching invocations to commands.

use crate::check::{evaluate, CheckContext};
use crate::error::CommandError;
use crate::framework::CommandFiredEvent;
use crate::invocation::Invocation;
use crate::lookup::{Authority, PrefixLookup, Responder};
use crate::parameters::{resolve, select_action};
use crate::registry::CommandRegistry;
use crate::token::tokenize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Runs checks, resolves parameters and invokes commands.
///
/// Shared across tasks; every call handles one invocation independently.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    prefixes: Arc<dyn PrefixLookup>,
    authority: Arc<dyn Authority>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(
        registry: Arc<CommandRegistry>,
        prefixes: Arc<dyn PrefixLookup>,
        authority: Arc<dyn Authority>,
    ) -> Self {
        Self {
            registry,
            prefixes,
            authority,
        }
    }

    /// The commands this dispatcher runs.
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Handles one invocation and returns what stopped it, if anything.
    ///
    /// The command body only runs when every enabled check passed and every
    /// declared flag and argument resolved. Defects are logged at error
    /// level whichever stage raised them.
    #[instrument(skip_all, fields(command = %invocation.command_name, guild = %invocation.guild_id))]
    pub async fn dispatch(
        &self,
        invocation: Invocation,
        responder: Arc<dyn Responder>,
    ) -> Result<(), CommandError> {
        let result = self.run(invocation, responder).await;

        if let Err(e) = &result {
            if e.is_defect() {
                error!("Command invocation failed: {}", e);
            } else {
                debug!("Command invocation rejected: {}", e);
            }
        }

        result
    }

    async fn run(
        &self,
        invocation: Invocation,
        responder: Arc<dyn Responder>,
    ) -> Result<(), CommandError> {
        let start_time = Instant::now();

        let command = self
            .registry
            .find(&invocation.command_name)
            .ok_or_else(|| CommandError::UnknownCommand(invocation.command_name.clone()))?;
        let spec = command.spec();

        let tokens = tokenize(&invocation.raw_arguments, spec.flags())?;
        let (action, positional) = select_action(spec, tokens.positional.clone());

        let context = CheckContext {
            spec,
            invocation: &invocation,
            positional_count: positional.len(),
            authority: self.authority.as_ref(),
            prefixes: self.prefixes.as_ref(),
        };
        evaluate(&context).await?;

        let parameters = resolve(spec, &tokens, positional)?;
        debug!("Resolved parameters for {}: {:?}", spec.raw_name(), parameters);

        let event = CommandFiredEvent {
            invocation,
            parameters,
            action,
            responder,
            registry: Arc::clone(&self.registry),
            prefixes: Arc::clone(&self.prefixes),
        };

        let result = command
            .on_command_fired(event)
            .await
            .map_err(CommandError::Handler);

        let elapsed = start_time.elapsed();
        match &result {
            Ok(()) => info!("Command {} completed in {:?}", spec.raw_name(), elapsed),
            Err(e) => warn!("Command {} failed after {:?}: {}", spec.raw_name(), elapsed, e),
        }

        result
    }

    /// Dispatches and reports any failure back to the invoking channel.
    ///
    /// Defects are shown to the user as a generic internal error. Unknown
    /// commands are ignored silently.
    pub async fn handle(
        &self,
        invocation: Invocation,
        responder: Arc<dyn Responder>,
    ) -> Result<(), CommandError> {
        let channel_id = invocation.channel_id;
        let result = self.dispatch(invocation, Arc::clone(&responder)).await;

        if let Err(e) = &result {
            if !matches!(e, CommandError::UnknownCommand(_)) {
                if let Err(reply_error) = responder.reply(channel_id, &e.user_message()).await {
                    warn!("Failed to report command error: {}", reply_error);
                }
            }
        }

        result
    }
}
