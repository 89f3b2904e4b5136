//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the snapshot engine.

pub mod create;
pub mod list;

pub use create::{handle_create_command, CreateArgs};
pub use list::handle_list_command;
