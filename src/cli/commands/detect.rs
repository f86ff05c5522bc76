//! Detect command implementation.
//!
//! The `sitewise detect` command shows which environment the request
//! belongs to and, optionally, how every environment scored.

use serde::Serialize;

use crate::cli::args::DetectArgs;
use crate::environment::{DetectionSource, EnvironmentDetector, ScoreBoard};
use crate::error::{Result, SitewiseError};
use crate::site::Site;
use crate::ui::UserInterface;

use super::dispatcher::{or_report_missing, Command, CommandResult, SiteOptions, EXIT_NO_CONFIG};

/// The detect command implementation.
pub struct DetectCommand {
    options: SiteOptions,
    args: DetectArgs,
}

#[derive(Serialize)]
struct DetectReport<'a> {
    environment: &'a str,
    source: &'a DetectionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<&'a ScoreBoard>,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(options: SiteOptions, args: DetectArgs) -> Self {
        Self { options, args }
    }

    /// Scores to display. An override skips scoring, so score here.
    fn scores(&self, site: &Site) -> ScoreBoard {
        let detection = site.detection();
        if !detection.scores.is_empty() {
            return detection.scores.clone();
        }
        EnvironmentDetector::new(&site.config().environments)
            .score_all_with_env(site.context(), &|key: &str| std::env::var(key).ok())
    }
}

impl Command for DetectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(site) = or_report_missing(self.options.load(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };
        let detection = site.detection();
        let show_scores = self.args.scores || ui.output_mode().shows_details();
        let scores = show_scores.then(|| self.scores(&site));

        if self.args.json {
            let report = DetectReport {
                environment: &detection.name,
                source: &detection.source,
                scores: scores.as_ref(),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| SitewiseError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&detection.name);
        if ui.output_mode().shows_status() {
            ui.key_value("source", &detection.source.to_string());
        }

        if let Some(scores) = scores {
            ui.show_header("Scores");
            for score in scores.iter() {
                ui.key_value(&score.name, &format!("{:.1}%", score.percentage));
                if ui.output_mode().shows_details() {
                    let b = &score.breakdown;
                    let custom = b
                        .custom
                        .map(|c| format!(" custom {}", c))
                        .unwrap_or_default();
                    ui.key_value(
                        "",
                        &format!(
                            "domain {} path {} protocol {} server {}{}",
                            b.domain, b.path, b.protocol, b.server, custom
                        ),
                    );
                }
            }
        }

        Ok(CommandResult::success())
    }
}
