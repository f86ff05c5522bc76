//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::context::ServerVars;

/// Sitewise - environment detection and URL/path resolution for web projects.
#[derive(Debug, Parser)]
#[command(name = "sitewise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .sitewise/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Force an environment (must be declared in the config)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Request simulation flags.
///
/// Each flag overrides the CGI variable of the same meaning read from the
/// process environment.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerArgs {
    /// Request host (HTTP_HOST)
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<String>,

    /// Server name (SERVER_NAME)
    #[arg(long, global = true, value_name = "NAME")]
    pub server_name: Option<String>,

    /// Request URI including query string (REQUEST_URI)
    #[arg(long, global = true, value_name = "URI")]
    pub uri: Option<String>,

    /// Treat the request as arriving over HTTPS (HTTPS=on)
    #[arg(long, global = true)]
    pub https: bool,

    /// Forwarded protocol from a proxy (HTTP_X_FORWARDED_PROTO)
    #[arg(long, global = true, value_name = "PROTO")]
    pub forwarded_proto: Option<String>,

    /// Server port (SERVER_PORT)
    #[arg(long, global = true, value_name = "PORT")]
    pub port: Option<String>,

    /// Document root (DOCUMENT_ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub document_root: Option<String>,

    /// Executing script path (SCRIPT_FILENAME)
    #[arg(long, global = true, value_name = "FILE")]
    pub script: Option<String>,
}

impl ServerArgs {
    /// Apply the flags on top of `base`.
    pub fn apply(&self, base: ServerVars) -> ServerVars {
        let mut vars = base;
        if let Some(host) = &self.host {
            vars = vars.with_host(host);
        }
        if let Some(name) = &self.server_name {
            vars = vars.with_server_name(name);
        }
        if let Some(uri) = &self.uri {
            vars = vars.with_request_uri(uri);
        }
        if self.https {
            vars = vars.with_https("on");
        }
        if let Some(proto) = &self.forwarded_proto {
            vars = vars.with_forwarded_proto(proto);
        }
        if let Some(port) = &self.port {
            vars = vars.with_server_port(port);
        }
        if let Some(root) = &self.document_root {
            vars = vars.with_document_root(root);
        }
        if let Some(script) = &self.script {
            vars = vars.with_script_filename(script);
        }
        vars
    }

    /// Server variables from the process environment with the flags applied.
    pub fn server_vars(&self) -> ServerVars {
        self.apply(ServerVars::from_process_env())
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the detected environment (default if no command specified)
    Detect(DetectArgs),

    /// Show all resolved URLs and paths
    Paths(PathsArgs),

    /// Print the URL of an asset
    Asset(AssetArgs),

    /// Print the canonical URL of a path or of the current request
    Canonical(CanonicalArgs),

    /// Exit 0 if a path lies inside the project, 1 otherwise
    Check(CheckArgs),

    /// Print the HTTPS redirect for the current request, if one is needed
    Redirect,

    /// Check configuration for values that can never match
    Validate,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Show the score of every environment
    #[arg(long)]
    pub scores: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `paths` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PathsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `asset` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AssetArgs {
    /// Asset path relative to its type directory
    pub path: String,

    /// Asset type (assets, css, js, images, uploads, docs, fonts, videos)
    #[arg(short = 't', long = "type", default_value = "assets")]
    pub asset_type: String,
}

/// Arguments for the `canonical` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CanonicalArgs {
    /// Path to canonicalize (defaults to the current request path)
    pub path: Option<String>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Path to check, relative paths are taken from the project root
    pub path: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["sitewise"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sitewise", "paths", "--json", "--env", "prod", "--host", "example.com", "--https",
        ])
        .unwrap();
        assert_eq!(cli.env.as_deref(), Some("prod"));
        assert_eq!(cli.server.host.as_deref(), Some("example.com"));
        assert!(cli.server.https);
        assert!(matches!(cli.command, Some(Commands::Paths(PathsArgs { json: true }))));
    }

    #[test]
    fn asset_type_defaults_to_assets() {
        let cli = Cli::try_parse_from(["sitewise", "asset", "logo.svg"]).unwrap();
        match cli.command {
            Some(Commands::Asset(args)) => {
                assert_eq!(args.path, "logo.svg");
                assert_eq!(args.asset_type, "assets");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn asset_type_flag() {
        let cli = Cli::try_parse_from(["sitewise", "asset", "app.css", "--type", "css"]).unwrap();
        match cli.command {
            Some(Commands::Asset(args)) => assert_eq!(args.asset_type, "css"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn server_args_override_base() {
        let args = ServerArgs {
            host: Some("flag.test".to_string()),
            https: true,
            port: Some("8443".to_string()),
            ..Default::default()
        };
        let base = ServerVars::new()
            .with_host("env.test")
            .with_request_uri("/from-env");
        let vars = args.apply(base);
        assert_eq!(vars.host(), Some("flag.test"));
        assert_eq!(vars.request_uri.as_deref(), Some("/from-env"));
        assert_eq!(vars.server_port.as_deref(), Some("8443"));
        assert!(vars.is_https());
    }
}
