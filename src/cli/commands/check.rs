//! Check command implementation.
//!
//! The `sitewise check <path>` command exits 0 when the path exists inside
//! the project root and 1 otherwise.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// The check command implementation.
pub struct CheckCommand {
    options: SiteOptions,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(options: SiteOptions, args: CheckArgs) -> Self {
        Self { options, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(site) = or_report_missing(self.options.load(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };
        let path = &self.args.path;

        if site.paths().is_within_project(path) {
            ui.success(&format!("{} is inside the project", path.display()));
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!(
                "{} is outside {} or does not exist",
                path.display(),
                site.project_root().display()
            ));
            Ok(CommandResult::failure(1))
        }
    }
}
