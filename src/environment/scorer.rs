//! Weighted environment scoring.
//!
//! Each environment earns points from five independent criteria. The total
//! is expressed as a percentage of the points the environment could have
//! earned, so environments with custom rules are not favoured merely for
//! having more criteria.
//!
//! | Criterion        | Max | Unconfigured |
//! |------------------|-----|--------------|
//! | Domain           | 100 | 50           |
//! | Path / subfolder | 50  | 25           |
//! | Protocol         | 20  | 10           |
//! | Server heuristic | 30  | n/a          |
//! | Custom rules     | 50  | not counted  |

use serde::Serialize;

use super::rule;
use crate::config::schema::{CustomRule, EnvironmentSpec};
use crate::context::RequestContext;
use crate::paths::normalize_subfolder;

/// Path segments that end the application's base path.
pub const RESERVED_SEGMENTS: &[&str] = &["index.php", "public", "api", "admin"];

/// Hosts treated as the local machine.
pub const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1"];

/// Domain fragments that suggest a pre-production deployment.
pub const STAGING_MARKERS: &[&str] = &["staging", "test", "dev", "beta"];

/// Domain fragments that rule out production.
pub const NON_PRODUCTION_MARKERS: &[&str] = &["staging", "test", "dev", "beta", "demo"];

/// Upper bound on the custom rule contribution.
pub const CUSTOM_RULE_CAP: f64 = 50.0;

const DOMAIN_MAX: f64 = 100.0;
const PATH_MAX: f64 = 50.0;
const PROTOCOL_MAX: f64 = 20.0;
const SERVER_MAX: f64 = 30.0;

/// Points earned per criterion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub domain: f64,
    pub path: f64,
    pub protocol: f64,
    pub server: f64,
    /// `None` when the environment declares no custom rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<f64>,
}

impl ScoreBreakdown {
    /// Points earned.
    pub fn achieved(&self) -> f64 {
        self.domain + self.path + self.protocol + self.server + self.custom.unwrap_or(0.0)
    }

    /// Points available.
    pub fn maximum(&self) -> f64 {
        let base = DOMAIN_MAX + PATH_MAX + PROTOCOL_MAX + SERVER_MAX;
        if self.custom.is_some() {
            base + CUSTOM_RULE_CAP
        } else {
            base
        }
    }

    /// Earned points as a percentage of available points.
    pub fn percentage(&self) -> f64 {
        self.achieved() / self.maximum() * 100.0
    }
}

/// Score of a single environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentScore {
    pub name: String,
    pub percentage: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores for every candidate environment, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    entries: Vec<EnvironmentScore>,
}

impl ScoreBoard {
    /// Record a score.
    pub fn push(&mut self, name: impl Into<String>, breakdown: ScoreBreakdown) {
        self.entries.push(EnvironmentScore {
            name: name.into(),
            percentage: breakdown.percentage(),
            breakdown,
        });
    }

    /// Percentage for a named environment.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.percentage)
    }

    /// Iterate scores in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EnvironmentScore> {
        self.entries.iter()
    }

    /// Whether nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest-scoring entry. Ties go to the earliest entry.
    pub fn best(&self) -> Option<&EnvironmentScore> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(current) if current.percentage >= entry.percentage => Some(current),
            _ => Some(entry),
        })
    }
}

/// Score one environment against the context.
pub fn score_environment<F>(spec: &EnvironmentSpec, ctx: &RequestContext, env_fn: &F) -> ScoreBreakdown
where
    F: Fn(&str) -> Option<String>,
{
    ScoreBreakdown {
        domain: domain_score(spec.domain.as_deref(), ctx.domain()),
        path: path_score(spec.subfolder.as_deref(), ctx.path()),
        protocol: protocol_score(spec.protocol.as_deref(), ctx.protocol()),
        server: server_score(spec, ctx.domain(), ctx.protocol()),
        custom: custom_rule_score(&spec.detection_rules, ctx, env_fn),
    }
}

/// Domain criterion: exact 100, wildcard or pattern 80, unconfigured 50.
pub fn domain_score(configured: Option<&str>, domain: &str) -> f64 {
    let Some(configured) = configured.filter(|d| !d.is_empty()) else {
        return DOMAIN_MAX / 2.0;
    };

    if configured == domain {
        return DOMAIN_MAX;
    }

    if let Some(suffix) = configured.strip_prefix("*.") {
        return if domain.ends_with(suffix) { 80.0 } else { 0.0 };
    }

    match rule::compile_pattern(configured) {
        Some(re) if re.is_match(domain) => 80.0,
        _ => 0.0,
    }
}

/// Leading segments of `path` before the first reserved segment.
///
/// Returns `""` when there are none, otherwise `/seg/seg`.
///
/// ```
/// use sitewise::environment::scorer::extract_base_path;
///
/// assert_eq!(extract_base_path("/shop/public/index.php"), "/shop");
/// assert_eq!(extract_base_path("/api/users"), "");
/// ```
pub fn extract_base_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .take_while(|s| !RESERVED_SEGMENTS.contains(s))
        .collect();

    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Path criterion: exact 50, prefix 30, unconfigured 25.
pub fn path_score(subfolder: Option<&str>, request_path: &str) -> f64 {
    let Some(subfolder) = subfolder.filter(|s| !s.is_empty()) else {
        return PATH_MAX / 2.0;
    };

    let base = extract_base_path(request_path);
    let normalized = normalize_subfolder(subfolder);
    // "/" collapses to "", matching an empty base path.
    let wanted = normalized.trim_end_matches('/');

    if wanted == base {
        PATH_MAX
    } else if wanted.starts_with(base.as_str()) {
        30.0
    } else {
        0.0
    }
}

/// Protocol criterion: match 20, unconfigured 10.
pub fn protocol_score(configured: Option<&str>, protocol: &str) -> f64 {
    match configured.filter(|p| !p.is_empty()) {
        None => PROTOCOL_MAX / 2.0,
        Some(p) if p.eq_ignore_ascii_case(protocol) => PROTOCOL_MAX,
        Some(_) => 0.0,
    }
}

/// Server heuristics keyed on the environment's declared kind.
pub fn server_score(spec: &EnvironmentSpec, domain: &str, protocol: &str) -> f64 {
    let domain = domain.to_ascii_lowercase();
    let is_loopback = LOOPBACK_HOSTS.contains(&domain.as_str());
    let mut score: f64 = 0.0;

    if is_loopback && spec.is_kind("development") {
        score += 30.0;
    }

    if STAGING_MARKERS.iter().any(|m| domain.contains(m)) && spec.is_kind("staging") {
        score += 25.0;
    }

    if protocol.eq_ignore_ascii_case("https")
        && !is_loopback
        && !NON_PRODUCTION_MARKERS.iter().any(|m| domain.contains(m))
        && spec.is_kind("production")
    {
        score += 20.0;
    }

    score.min(SERVER_MAX)
}

/// Sum of matching rule scores, clamped to `0..=CUSTOM_RULE_CAP`.
///
/// Returns `None` when there are no rules, so the criterion is not counted.
pub fn custom_rule_score<F>(rules: &[CustomRule], ctx: &RequestContext, env_fn: &F) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    if rules.is_empty() {
        return None;
    }

    let total: f64 = rules
        .iter()
        .filter(|r| rule::evaluate(r, ctx, env_fn))
        .map(|r| r.score)
        .sum();

    Some(total.clamp(0.0, CUSTOM_RULE_CAP))
}
