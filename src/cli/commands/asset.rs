//! Asset command implementation.
//!
//! The `sitewise asset <path> --type <type>` command prints an asset URL.

use crate::cli::args::AssetArgs;
use crate::error::Result;
use crate::paths::AssetType;
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// The asset command implementation.
pub struct AssetCommand {
    options: SiteOptions,
    args: AssetArgs,
}

impl AssetCommand {
    /// Create a new asset command.
    pub fn new(options: SiteOptions, args: AssetArgs) -> Self {
        Self { options, args }
    }
}

impl Command for AssetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(site) = or_report_missing(self.options.load(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let asset_type = match self.args.asset_type.parse::<AssetType>() {
            Ok(t) => t,
            Err(_) => {
                ui.warning(&format!(
                    "Unknown asset type '{}', using '{}'",
                    self.args.asset_type,
                    AssetType::Assets
                ));
                AssetType::Assets
            }
        };

        ui.message(&site.paths().asset_for(&self.args.path, asset_type));
        Ok(CommandResult::success())
    }
}
