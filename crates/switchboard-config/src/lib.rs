//! # Switchboard Config
//!
//! Configuration management for Switchboard bots.
//!
//! This crate provides YAML/TOML loading with environment overrides,
//! validation, an atomically swappable cache, and the [`GuildDirectory`]
//! that serves guild prefixes and administrator levels to the command
//! framework.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod directory;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use directory::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
