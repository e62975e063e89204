//! # Switchboard Bot
//!
//! Discord bot built on the Switchboard command framework.
//!
//! This is the binary crate that wires configuration, the guild directory and
//! the built-in commands to a serenity gateway client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod commands;
pub mod discord;
pub mod error;
pub mod kinds;

pub use bot::*;
pub use error::*;
