//! # Switchboard Commands
//!
//! Declarative prefix commands for Discord bots.
//!
//! Commands are described once as a [`CommandSpec`]: name, aliases,
//! positional [`Argument`]s, named [`Flag`]s, required permissions and
//! execution checks. The [`Dispatcher`] tokenizes raw message text, runs the
//! enabled checks, validates and parses every declared parameter, and only
//! then invokes [`Command::on_command_fired`] with typed values. Usage
//! strings are synthesized from the declarations, with the guild's prefix
//! substituted at render time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod argument;
pub mod category;
pub mod check;
pub mod dispatch;
pub mod error;
pub mod flag;
pub mod framework;
pub mod help;
pub mod invocation;
pub mod kind;
pub mod lookup;
pub mod parameter;
pub mod parameters;
pub mod registry;
pub mod spec;
pub mod token;
pub mod usage;
pub mod value;

pub use argument::{Argument, ArgumentOptions};
pub use category::Category;
pub use check::{CheckFailure, ExecutionCheck};
pub use dispatch::Dispatcher;
pub use error::{
    CommandError, HandlerError, LookupError, ParseError, RegistryError, SpecError, TokenizeError,
};
pub use flag::{Flag, FlagOptions};
pub use framework::{Command, CommandFiredEvent};
pub use invocation::Invocation;
pub use kind::{ChoiceSet, CustomKind, ValueKind, ValueParser};
pub use lookup::{display_prefix, Authority, PrefixLookup, Responder};
pub use parameter::Parameter;
pub use parameters::ParsedParameters;
pub use registry::CommandRegistry;
pub use spec::{CommandDefinition, CommandSpec, PREFIX_PLACEHOLDER};
pub use token::{tokenize, Tokens};
pub use usage::synthesize;
pub use value::{Choice, Choices, FromValue, TimeSpan, TimeUnit, Value};

pub use serenity::model::Permissions;
