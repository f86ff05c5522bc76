//! Validate command implementation.
//!
//! The `sitewise validate` command reports configuration values that will
//! never match a request.

use crate::config::validate_config;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// The validate command implementation.
pub struct ValidateCommand {
    options: SiteOptions,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(options: SiteOptions) -> Self {
        Self { options }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = or_report_missing(self.options.load_config(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let errors = validate_config(&config);
        if errors.is_empty() {
            ui.success(&format!(
                "Configuration is valid ({} environments)",
                config.environments.len()
            ));
            return Ok(CommandResult::success());
        }

        for error in &errors {
            match &error.environment {
                Some(env) => ui.error(&format!("[{}] {}: {}", error.rule, env, error.message)),
                None => ui.error(&format!("[{}] {}", error.rule, error.message)),
            }
        }
        ui.message(&format!("{} issue(s) found", errors.len()));

        Ok(CommandResult::failure(1))
    }
}
