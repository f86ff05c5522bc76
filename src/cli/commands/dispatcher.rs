//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`SiteOptions`] for building the [`Site`] a command works on
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, DetectArgs};
use crate::config::{find_project_root, load_config, SiteConfig};
use crate::context::ServerVars;
use crate::error::{Result, SitewiseError};
use crate::site::Site;
use crate::ui::UserInterface;

/// Exit code for a missing configuration.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Inputs for building a [`Site`]: where the project is, which config to
/// read, and what the request looks like.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Project root.
    pub project_root: PathBuf,
    /// Single config file replacing the project's `.sitewise/` layers.
    pub config: Option<PathBuf>,
    /// Forced environment.
    pub env: Option<String>,
    /// Request variables.
    pub vars: ServerVars,
}

impl SiteOptions {
    /// Options for a project with no overrides and an empty request.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config: None,
            env: None,
            vars: ServerVars::new(),
        }
    }

    /// Options from parsed CLI flags.
    ///
    /// Without `--project`, the root is found by walking up from `cwd`,
    /// falling back to `cwd` itself.
    pub fn from_cli(cli: &Cli, cwd: &Path) -> Self {
        let project_root = cli
            .project
            .clone()
            .or_else(|| find_project_root(cwd))
            .unwrap_or_else(|| cwd.to_path_buf());

        Self {
            project_root,
            config: cli.config.clone(),
            env: cli.env.clone(),
            vars: cli.server.server_vars(),
        }
    }

    /// Set the forced environment.
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Set the request variables.
    pub fn with_vars(mut self, vars: ServerVars) -> Self {
        self.vars = vars;
        self
    }

    /// Load the configuration only.
    pub fn load_config(&self) -> Result<SiteConfig> {
        load_config(&self.project_root, self.config.as_deref())
    }

    /// Build the site.
    pub fn load(&self) -> Result<Site> {
        Site::load(
            &self.project_root,
            self.config.as_deref(),
            self.vars.clone(),
            self.env.as_deref(),
        )
    }
}

/// Report a missing configuration on the UI.
///
/// Returns `Ok(None)` when the config is missing so the caller can exit
/// with [`EXIT_NO_CONFIG`]; other errors propagate.
pub fn or_report_missing<T>(result: Result<T>, ui: &mut dyn UserInterface) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SitewiseError::ConfigNotFound { path }) => {
            ui.error(&format!("No configuration found at {}", path.display()));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    options: SiteOptions,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(options: SiteOptions) -> Self {
        Self { options }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.options.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.options.clone();
        match &cli.command {
            Some(Commands::Detect(args)) => {
                super::detect::DetectCommand::new(options, args.clone()).execute(ui)
            }
            Some(Commands::Paths(args)) => {
                super::paths::PathsCommand::new(options, args.clone()).execute(ui)
            }
            Some(Commands::Asset(args)) => {
                super::asset::AssetCommand::new(options, args.clone()).execute(ui)
            }
            Some(Commands::Canonical(args)) => {
                super::canonical::CanonicalCommand::new(options, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(options, args.clone()).execute(ui)
            }
            Some(Commands::Redirect) => super::redirect::RedirectCommand::new(options).execute(ui),
            Some(Commands::Validate) => super::validate::ValidateCommand::new(options).execute(ui),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::detect::DetectCommand::new(options, DetectArgs::default()).execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(SiteOptions::new("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn options_prefer_project_flag() {
        let cli = Cli::parse_from(["sitewise", "--project", "/explicit"]);
        let options = SiteOptions::from_cli(&cli, Path::new("/elsewhere"));
        assert_eq!(options.project_root, PathBuf::from("/explicit"));
    }

    #[test]
    fn options_walk_up_to_config_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".sitewise")).unwrap();
        let nested = temp.path().join("public").join("blog");
        fs::create_dir_all(&nested).unwrap();

        let cli = Cli::parse_from(["sitewise"]);
        let options = SiteOptions::from_cli(&cli, &nested);
        assert_eq!(options.project_root, temp.path());
    }

    #[test]
    fn missing_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = or_report_missing(SiteOptions::new(temp.path()).load(), &mut ui).unwrap();
        assert!(result.is_none());
        assert!(ui.has_error("No configuration found"));
    }

    #[test]
    fn no_subcommand_runs_detect() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".sitewise");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            "environments:\n  local:\n    domain: localhost\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["sitewise"]);
        let dispatcher = CommandDispatcher::new(SiteOptions::new(temp.path()));
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("local"));
    }
}
