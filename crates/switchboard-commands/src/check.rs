//! Execution checks run before a command body.

use crate::error::CommandError;
use crate::invocation::Invocation;
use crate::lookup::{Authority, PrefixLookup};
use crate::spec::CommandSpec;
use serde::{Deserialize, Serialize};
use serenity::model::Permissions;
use thiserror::Error;
use tracing::{debug, warn};

/// Preconditions evaluated for every invocation, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionCheck {
    /// The invoker's administrator level reaches the required level
    IsAdministrator,
    /// The invoker administers the bot, for bot-administrator-only commands
    IsBotAdministrator,
    /// Enough positional tokens were supplied
    SurpassesMinimumArgumentCount,
    /// The bot holds every permission the command needs
    BotHasRequiredPermissions,
}

impl ExecutionCheck {
    /// Every check in evaluation order.
    pub const ALL: [Self; 4] = [
        Self::IsAdministrator,
        Self::IsBotAdministrator,
        Self::SurpassesMinimumArgumentCount,
        Self::BotHasRequiredPermissions,
    ];
}

fn permission_names(permissions: &Permissions) -> String {
    permissions.get_permission_names().join(", ")
}

/// Why a check stopped an invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// Administrator level too low
    #[error("administrator level {actual} is below the required level {required}")]
    NotAdministrator {
        /// Level the command needs
        required: u8,
        /// Level the invoker has
        actual: u8,
    },

    /// Invoker is not a bot administrator
    #[error("invoker is not a bot administrator")]
    NotBotAdministrator,

    /// Too few positional tokens
    #[error("{supplied} positional tokens supplied, {required} required")]
    NotEnoughArguments {
        /// Minimum argument count of the command
        required: usize,
        /// Positional tokens present
        supplied: usize,
        /// Usage shown to the invoker
        usage: String,
    },

    /// The bot lacks permissions
    #[error("bot is missing permissions: {}", permission_names(.missing))]
    MissingBotPermissions {
        /// Required permissions the bot does not hold
        missing: Permissions,
    },
}

impl CheckFailure {
    /// The check that produced this failure.
    pub const fn check(&self) -> ExecutionCheck {
        match self {
            Self::NotAdministrator { .. } => ExecutionCheck::IsAdministrator,
            Self::NotBotAdministrator => ExecutionCheck::IsBotAdministrator,
            Self::NotEnoughArguments { .. } => ExecutionCheck::SurpassesMinimumArgumentCount,
            Self::MissingBotPermissions { .. } => ExecutionCheck::BotHasRequiredPermissions,
        }
    }

    /// Text sent back to the invoker.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAdministrator { required, .. } => format!(
                "Sorry, you don't have high enough permissions. This command requires administrator level {required}."
            ),
            Self::NotBotAdministrator => "Sorry, you aren't a bot administrator.".to_string(),
            Self::NotEnoughArguments { usage, .. } => {
                format!("Huh? Could you repeat that? The usage of this command is: `{usage}`.")
            }
            Self::MissingBotPermissions { missing } => format!(
                "I can't run this command because I am missing these permissions: {}.",
                permission_names(missing)
            ),
        }
    }
}

/// Required permissions the bot does not hold. Administrator implies all.
pub fn missing_permissions(required: Permissions, granted: Permissions) -> Permissions {
    if granted.contains(Permissions::ADMINISTRATOR) {
        Permissions::empty()
    } else {
        required.difference(granted)
    }
}

/// Everything a check may look at.
pub struct CheckContext<'a> {
    /// Command being invoked
    pub spec: &'a CommandSpec,
    /// The invocation itself
    pub invocation: &'a Invocation,
    /// Positional tokens after tokenizing, excluding a selected action
    pub positional_count: usize,
    /// Source of administrator information
    pub authority: &'a dyn Authority,
    /// Source of guild prefixes, for usage in failure messages
    pub prefixes: &'a dyn PrefixLookup,
}

impl ExecutionCheck {
    /// Runs this check. Lookup failures are errors, not check failures.
    pub async fn run(self, context: &CheckContext<'_>) -> Result<(), CommandError> {
        let CheckContext { spec, invocation, .. } = context;

        match self {
            Self::IsAdministrator => {
                let required = spec.administrator_level_required();
                if required == 0 {
                    return Ok(());
                }

                let actual = context
                    .authority
                    .administrator_level(invocation.guild_id, invocation.user_id, &invocation.member_roles)
                    .await?;
                if actual < required {
                    return Err(CheckFailure::NotAdministrator { required, actual }.into());
                }
            }
            Self::IsBotAdministrator => {
                if !spec.bot_administrator_only() {
                    return Ok(());
                }

                if !context.authority.is_bot_administrator(invocation.user_id).await? {
                    return Err(CheckFailure::NotBotAdministrator.into());
                }
            }
            Self::SurpassesMinimumArgumentCount => {
                let required = spec.minimum_argument_count();
                if context.positional_count < required {
                    let usage = match spec.usage_with_prefix(invocation.guild_id, context.prefixes).await {
                        Ok(usage) => usage,
                        Err(e) => {
                            warn!("Could not resolve prefix for usage of {}: {}", spec.raw_name(), e);
                            spec.usage().to_string()
                        }
                    };

                    return Err(CheckFailure::NotEnoughArguments {
                        required,
                        supplied: context.positional_count,
                        usage,
                    }
                    .into());
                }
            }
            Self::BotHasRequiredPermissions => {
                let missing =
                    missing_permissions(spec.bot_required_permissions(), invocation.bot_permissions);
                if !missing.is_empty() {
                    return Err(CheckFailure::MissingBotPermissions { missing }.into());
                }
            }
        }

        Ok(())
    }
}

/// Runs every enabled check in order and stops at the first failure.
pub async fn evaluate(context: &CheckContext<'_>) -> Result<(), CommandError> {
    for check in ExecutionCheck::ALL {
        if !context.spec.is_check_enabled(check) {
            debug!("Skipping disabled check {:?} for {}", check, context.spec.raw_name());
            continue;
        }

        check.run(context).await?;
    }

    Ok(())
}
