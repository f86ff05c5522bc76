//! Redirect command implementation.
//!
//! The `sitewise redirect` command prints the permanent redirect to HTTPS
//! when the request arrived over plain HTTP, and exits with
//! [`EXIT_REDIRECT`]. Over HTTPS it prints nothing.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// Exit code signalling that the caller should redirect.
pub const EXIT_REDIRECT: i32 = 3;

/// The redirect command implementation.
pub struct RedirectCommand {
    options: SiteOptions,
}

impl RedirectCommand {
    /// Create a new redirect command.
    pub fn new(options: SiteOptions) -> Self {
        Self { options }
    }
}

impl Command for RedirectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(site) = or_report_missing(self.options.load(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        match site.paths().force_https() {
            Some(redirect) => {
                ui.message(&redirect.to_string());
                Ok(CommandResult::failure(EXIT_REDIRECT))
            }
            None => {
                tracing::debug!("Request already uses HTTPS");
                Ok(CommandResult::success())
            }
        }
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
            "environments:\n  prod:\n    domain: example.com\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn plain_http_redirects() {
        let temp = setup_project();
        let vars = ServerVars::new()
            .with_host("example.com")
            .with_request_uri("/login?next=/account");
        let mut ui = MockUI::new();

        let result = RedirectCommand::new(SiteOptions::new(temp.path()).with_vars(vars))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 3);
        assert_eq!(
            ui.messages(),
            &["301 Moved Permanently\nLocation: https://example.com/login?next=/account"]
        );
    }

    #[test]
    fn https_prints_nothing() {
        let temp = setup_project();
        let vars = ServerVars::new()
            .with_host("example.com")
            .with_forwarded_proto("https");
        let mut ui = MockUI::new();

        let result = RedirectCommand::new(SiteOptions::new(temp.path()).with_vars(vars))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.messages().is_empty());
    }
}
