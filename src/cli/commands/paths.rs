//! Paths command implementation.
//!
//! The `sitewise paths` command shows every URL and filesystem path
//! resolved for the detected environment.

use crate::cli::args::PathsArgs;
use crate::error::{Result, SitewiseError};
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// The paths command implementation.
pub struct PathsCommand {
    options: SiteOptions,
    args: PathsArgs,
}

impl PathsCommand {
    /// Create a new paths command.
    pub fn new(options: SiteOptions, args: PathsArgs) -> Self {
        Self { options, args }
    }
}

impl Command for PathsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(site) = or_report_missing(self.options.load(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };
        let paths = site.paths();

        if self.args.json {
            let json =
                serde_json::to_string_pretty(paths).map_err(|e| SitewiseError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Paths for {}", site.environment()));
        for (key, value) in paths.entries() {
            ui.key_value(key, value);
        }

        Ok(CommandResult::success())
    }
}
