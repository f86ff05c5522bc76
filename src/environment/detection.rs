//! Environment selection.
//!
//! Picks one environment per request. The priority chain is:
//!
//! 1. An explicit override naming a declared environment
//! 2. The highest weighted score (first-declared wins ties)
//! 3. Fallback to "development" when nothing is declared

use serde::Serialize;

use super::scorer::{score_environment, ScoreBoard};
use crate::config::schema::EnvironmentSet;
use crate::context::RequestContext;

/// Environment name used when no environments are declared.
pub const FALLBACK_ENVIRONMENT: &str = "development";

/// How the environment was determined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "score", rename_all = "snake_case")]
pub enum DetectionSource {
    /// Explicit override.
    Override,
    /// Won the scoring with this percentage.
    Scored(f64),
    /// Fallback to "development".
    Fallback,
}

impl std::fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Scored(score) => write!(f, "scored {:.1}%", score),
            Self::Fallback => write!(f, "default"),
        }
    }
}

/// Outcome of a detection call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// The selected environment name.
    pub name: String,
    /// How it was selected.
    pub source: DetectionSource,
    /// Scores of all candidates; empty when an override or fallback applied.
    pub scores: ScoreBoard,
}

impl Detection {
    fn fallback() -> Self {
        Self {
            name: FALLBACK_ENVIRONMENT.to_string(),
            source: DetectionSource::Fallback,
            scores: ScoreBoard::default(),
        }
    }
}

/// Scores declared environments against a request.
///
/// # Example
///
/// ```
/// use sitewise::config::{EnvironmentSet, EnvironmentSpec};
/// use sitewise::context::RequestContext;
/// use sitewise::environment::EnvironmentDetector;
///
/// let environments = EnvironmentSet::new()
///     .with("dev", EnvironmentSpec {
///         domain: Some("localhost".into()),
///         protocol: Some("http".into()),
///         ..Default::default()
///     })
///     .with("prod", EnvironmentSpec {
///         domain: Some("example.com".into()),
///         protocol: Some("https".into()),
///         ..Default::default()
///     });
///
/// let detector = EnvironmentDetector::new(&environments);
/// let ctx = RequestContext::new("example.com", "/", "https");
/// assert_eq!(detector.detect(&ctx, None).name, "prod");
/// ```
pub struct EnvironmentDetector<'a> {
    environments: &'a EnvironmentSet,
}

impl<'a> EnvironmentDetector<'a> {
    /// Create a detector over the declared environments.
    pub fn new(environments: &'a EnvironmentSet) -> Self {
        Self { environments }
    }

    /// Detect the environment, reading `env_var` rules from the process
    /// environment.
    pub fn detect(&self, ctx: &RequestContext, override_name: Option<&str>) -> Detection {
        self.detect_with_env(ctx, override_name, |key| std::env::var(key).ok())
    }

    /// Detect with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(
        &self,
        ctx: &RequestContext,
        override_name: Option<&str>,
        env_fn: F,
    ) -> Detection
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = override_name {
            if self.environments.contains(name) {
                tracing::debug!("Environment '{}' selected by override", name);
                return Detection {
                    name: name.to_string(),
                    source: DetectionSource::Override,
                    scores: ScoreBoard::default(),
                };
            }
            tracing::warn!(
                "Ignoring override '{}': no such environment (declared: {})",
                name,
                self.environments.names().join(", ")
            );
        }

        if self.environments.is_empty() {
            tracing::debug!("No environments declared, using '{}'", FALLBACK_ENVIRONMENT);
            return Detection::fallback();
        }

        let scores = self.score_all_with_env(ctx, &env_fn);

        match scores.best() {
            Some(best) => {
                tracing::debug!(
                    "Environment '{}' selected with {:.1}%",
                    best.name,
                    best.percentage
                );
                Detection {
                    name: best.name.clone(),
                    source: DetectionSource::Scored(best.percentage),
                    scores: scores.clone(),
                }
            }
            None => Detection::fallback(),
        }
    }

    /// Score every declared environment.
    pub fn score_all_with_env<F>(&self, ctx: &RequestContext, env_fn: &F) -> ScoreBoard
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut board = ScoreBoard::default();
        for (name, spec) in self.environments.iter() {
            let breakdown = score_environment(spec, ctx, env_fn);
            tracing::debug!(
                environment = name,
                domain = breakdown.domain,
                path = breakdown.path,
                protocol = breakdown.protocol,
                server = breakdown.server,
                custom = ?breakdown.custom,
                percentage = breakdown.percentage(),
                "Scored environment"
            );
            board.push(name, breakdown);
        }
        board
    }
}

/// Select an environment name.
///
/// Convenience wrapper around [`EnvironmentDetector::detect`].
pub fn detect(
    environments: &EnvironmentSet,
    ctx: &RequestContext,
    override_name: Option<&str>,
) -> String {
    EnvironmentDetector::new(environments)
        .detect(ctx, override_name)
        .name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CustomRule, EnvironmentSpec, RuleCondition};
    use std::collections::HashMap;

    fn make_env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn spec(domain: Option<&str>, protocol: Option<&str>) -> EnvironmentSpec {
        EnvironmentSpec {
            domain: domain.map(String::from),
            protocol: protocol.map(String::from),
            ..Default::default()
        }
    }

    fn dev_prod() -> EnvironmentSet {
        EnvironmentSet::new()
            .with("dev", spec(Some("localhost"), Some("http")))
            .with("prod", spec(Some("example.com"), Some("https")))
    }

    #[test]
    fn selects_dev_for_localhost() {
        let envs = dev_prod();
        let ctx = RequestContext::new("localhost", "/", "http");
        let detection = EnvironmentDetector::new(&envs).detect_with_env(&ctx, None, make_env(&[]));
        assert_eq!(detection.name, "dev");
        assert!(matches!(detection.source, DetectionSource::Scored(_)));
    }

    #[test]
    fn selects_prod_for_public_domain() {
        let envs = dev_prod();
        let ctx = RequestContext::new("example.com", "/", "https");
        let detection = EnvironmentDetector::new(&envs).detect_with_env(&ctx, None, make_env(&[]));
        assert_eq!(detection.name, "prod");
    }

    #[test]
    fn override_takes_precedence() {
        let envs = dev_prod();
        let ctx = RequestContext::new("localhost", "/", "http");
        let detection =
            EnvironmentDetector::new(&envs).detect_with_env(&ctx, Some("prod"), make_env(&[]));
        assert_eq!(detection.name, "prod");
        assert_eq!(detection.source, DetectionSource::Override);
        assert!(detection.scores.is_empty());
    }

    #[test]
    fn unknown_override_is_ignored() {
        let envs = dev_prod();
        let ctx = RequestContext::new("localhost", "/", "http");
        let detection =
            EnvironmentDetector::new(&envs).detect_with_env(&ctx, Some("qa"), make_env(&[]));
        assert_eq!(detection.name, "dev");
    }

    #[test]
    fn empty_set_falls_back_to_development() {
        let envs = EnvironmentSet::new();
        let ctx = RequestContext::new("example.com", "/", "https");
        let detection =
            EnvironmentDetector::new(&envs).detect_with_env(&ctx, Some("prod"), make_env(&[]));
        assert_eq!(detection.name, "development");
        assert_eq!(detection.source, DetectionSource::Fallback);
    }

    #[test]
    fn always_returns_declared_name() {
        let envs = EnvironmentSet::new()
            .with("alpha", spec(Some("a.example.com"), None))
            .with("beta", spec(Some("b.example.com"), None));
        for host in ["a.example.com", "b.example.com", "unrelated.org", "localhost"] {
            let ctx = RequestContext::new(host, "/", "http");
            let name = EnvironmentDetector::new(&envs)
                .detect_with_env(&ctx, None, make_env(&[]))
                .name;
            assert!(envs.contains(&name), "{} is not declared", name);
        }
    }

    #[test]
    fn tie_goes_to_first_declared() {
        let envs = EnvironmentSet::new()
            .with("second-alphabetically", EnvironmentSpec::default())
            .with("a-first-alphabetically", EnvironmentSpec::default());
        let ctx = RequestContext::new("example.com", "/", "https");
        let detection = EnvironmentDetector::new(&envs).detect_with_env(&ctx, None, make_env(&[]));
        assert_eq!(detection.name, "second-alphabetically");
    }

    #[test]
    fn exact_domain_outscores_wildcard() {
        let envs = EnvironmentSet::new()
            .with("wild", spec(Some("*.example.com"), None))
            .with("exact", spec(Some("shop.example.com"), None));
        let ctx = RequestContext::new("shop.example.com", "/", "https");
        let detection = EnvironmentDetector::new(&envs).detect_with_env(&ctx, None, make_env(&[]));
        assert_eq!(detection.name, "exact");
        assert!(
            detection.scores.get("exact").unwrap() > detection.scores.get("wild").unwrap()
        );
    }

    #[test]
    fn server_heuristics_pick_staging() {
        let staging = EnvironmentSpec {
            environment: Some("staging".to_string()),
            ..Default::default()
        };
        let production = EnvironmentSpec {
            environment: Some("production".to_string()),
            ..Default::default()
        };
        let envs = EnvironmentSet::new()
            .with("production", production)
            .with("staging", staging);
        let ctx = RequestContext::new("staging.example.com", "/", "https");
        let detection = EnvironmentDetector::new(&envs).detect_with_env(&ctx, None, make_env(&[]));
        assert_eq!(detection.name, "staging");
    }

    #[test]
    fn env_var_rule_steers_detection() {
        let canary = EnvironmentSpec {
            detection_rules: vec![CustomRule {
                condition: RuleCondition::EnvVar,
                value: "CANARY".to_string(),
                score: 50.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let envs = EnvironmentSet::new()
            .with("stable", EnvironmentSpec::default())
            .with("canary", canary);
        let ctx = RequestContext::new("example.com", "/", "https");

        let detector = EnvironmentDetector::new(&envs);
        // Without the variable the canary's extra criterion drags it down.
        assert_eq!(
            detector.detect_with_env(&ctx, None, make_env(&[])).name,
            "stable"
        );
        assert_eq!(
            detector
                .detect_with_env(&ctx, None, make_env(&[("CANARY", "1")]))
                .name,
            "canary"
        );
    }

    #[test]
    fn detect_function_returns_name() {
        let envs = dev_prod();
        let ctx = RequestContext::new("example.com", "/", "https");
        assert_eq!(detect(&envs, &ctx, None), "prod");
        assert_eq!(detect(&EnvironmentSet::new(), &ctx, None), "development");
    }

    #[test]
    fn source_display() {
        assert_eq!(DetectionSource::Override.to_string(), "override");
        assert_eq!(DetectionSource::Scored(72.5).to_string(), "scored 72.5%");
        assert_eq!(DetectionSource::Fallback.to_string(), "default");
    }
}
