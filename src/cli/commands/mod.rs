//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command that needs a
//! [`Site`](crate::Site) builds it from the shared [`SiteOptions`], so the
//! global flags (`--project`, `--config`, `--env`, request flags) apply
//! uniformly.

pub mod asset;
pub mod canonical;
pub mod check;
pub mod completions;
pub mod detect;
pub mod dispatcher;
pub mod paths;
pub mod redirect;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, SiteOptions, EXIT_NO_CONFIG};
pub use redirect::EXIT_REDIRECT;
