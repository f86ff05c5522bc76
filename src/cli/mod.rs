//! Command-line interface for Sitewise.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AssetArgs, CanonicalArgs, CheckArgs, Cli, Commands, CompletionsArgs, DetectArgs, PathsArgs,
    ServerArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, SiteOptions};
