//! Canonical command implementation.
//!
//! The `sitewise canonical [path]` command prints the canonical URL of a
//! path, or of the current request when no path is given.

use crate::cli::args::CanonicalArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// The canonical command implementation.
pub struct CanonicalCommand {
    options: SiteOptions,
    args: CanonicalArgs,
}

impl CanonicalCommand {
    /// Create a new canonical command.
    pub fn new(options: SiteOptions, args: CanonicalArgs) -> Self {
        Self { options, args }
    }
}

impl Command for CanonicalCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(site) = or_report_missing(self.options.load(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        ui.message(&site.paths().canonical_url(self.args.path.as_deref()));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ServerVars;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".sitewise");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            "environments:\n  prod:\n    domain: example.com\n    protocol: https\n    subfolder: /blog\n",
        )
        .unwrap();
        temp
    }

    fn run(temp: &TempDir, uri: &str, path: Option<&str>) -> String {
        let options =
            SiteOptions::new(temp.path()).with_vars(ServerVars::new().with_request_uri(uri));
        let args = CanonicalArgs {
            path: path.map(String::from),
        };
        let mut ui = MockUI::new();
        CanonicalCommand::new(options, args).execute(&mut ui).unwrap();
        ui.messages()[0].clone()
    }

    #[test]
    fn canonical_of_current_request() {
        let temp = setup_project();
        assert_eq!(
            run(&temp, "/blog/posts/hello?utm=x", None),
            "https://example.com/blog/posts/hello/"
        );
    }

    #[test]
    fn canonical_of_explicit_path() {
        let temp = setup_project();
        assert_eq!(run(&temp, "/", Some("about")), "https://example.com/blog/about/");
        assert_eq!(run(&temp, "/", Some("/")), "https://example.com/blog/");
    }
}
