//! Configuration schema definitions for Sitewise.
//!
//! This module contains the struct definitions that map to the
//! `.sitewise/config.yml` file format.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::format::deserialize_environments;

/// Default name of the process variable that forces an environment.
pub const DEFAULT_OVERRIDE_VAR: &str = "SITEWISE_ENV";

/// Root configuration structure for `.sitewise/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Application name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Process variable holding an explicit environment override
    pub override_var: String,

    /// Environment definitions, in declaration order
    #[serde(deserialize_with = "deserialize_environments")]
    pub environments: EnvironmentSet,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_name: None,
            override_var: DEFAULT_OVERRIDE_VAR.to_string(),
            environments: EnvironmentSet::default(),
        }
    }
}

/// A named deployment environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSpec {
    /// Declared kind (`development`, `staging`, `production`) used by the
    /// server heuristics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Literal host, `*.suffix` wildcard, or regular expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// URL subfolder the site is mounted under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,

    /// `http` or `https`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Explicit filesystem base path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,

    /// Additional weighted detection rules.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient_rules")]
    pub detection_rules: Vec<CustomRule>,

    /// Database credentials. Opaque to detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<serde_yaml::Value>,
}

impl EnvironmentSpec {
    /// Check whether the declared kind equals `kind`.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.environment.as_deref() == Some(kind)
    }
}

/// A declarative detection rule.
///
/// Malformed rules never fail to load: missing or non-string fields fall
/// back to `type: domain`, `condition: equals`, `value: ""`, `score: 10`,
/// and an unrecognised condition name parses as [`RuleCondition::Unknown`].
/// A list entry that is not a mapping becomes the default rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomRule {
    /// Context field the rule inspects.
    #[serde(rename = "type", deserialize_with = "lenient_field")]
    pub field: String,

    /// Comparison to apply.
    #[serde(deserialize_with = "lenient_condition")]
    pub condition: RuleCondition,

    /// Operand for the comparison.
    #[serde(deserialize_with = "lenient_string")]
    pub value: String,

    /// Weight added when the rule matches.
    #[serde(deserialize_with = "lenient_score")]
    pub score: f64,
}

impl Default for CustomRule {
    fn default() -> Self {
        Self {
            field: "domain".to_string(),
            condition: RuleCondition::Equals,
            value: String::new(),
            score: default_rule_score(),
        }
    }
}

fn default_rule_score() -> f64 {
    10.0
}

/// Comparison applied by a [`CustomRule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    /// Exact string equality.
    #[default]
    Equals,
    /// Substring match.
    Contains,
    /// Prefix match.
    StartsWith,
    /// Suffix match.
    EndsWith,
    /// Regular expression match.
    Regex,
    /// Process variable named by the rule value is set.
    EnvVar,
    /// Anything else; never matches.
    #[serde(other)]
    Unknown,
}

/// Read a rule list, replacing entries that are not mappings with the
/// default rule. Anything other than a sequence reads as no rules.
fn lenient_rules<'de, D>(deserializer: D) -> Result<Vec<CustomRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    let items = match value {
        serde_yaml::Value::Sequence(items) => items,
        serde_yaml::Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!("Ignoring detection_rules that is not a list: {:?}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(item).unwrap_or_else(|e| {
                tracing::warn!("Malformed detection rule, using defaults: {}", e);
                CustomRule::default()
            }),
            other => {
                tracing::warn!("Detection rule is not a mapping, using defaults: {:?}", other);
                CustomRule::default()
            }
        })
        .collect())
}

/// Rule field name; anything but a string reads as `domain`.
fn lenient_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(s) => s,
        _ => CustomRule::default().field,
    })
}

/// Rule condition; unknown names never match, non-strings read as `equals`.
fn lenient_condition<'de, D>(deserializer: D) -> Result<RuleCondition, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(_) => {
            serde_yaml::from_value(value).unwrap_or(RuleCondition::Unknown)
        }
        _ => RuleCondition::default(),
    })
}

/// Accept any YAML scalar as a string; other shapes read as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Accept a number or numeric string; anything else uses the default score.
fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::Number(n) => n.as_f64().unwrap_or_else(default_rule_score),
        serde_yaml::Value::String(s) => s.trim().parse().unwrap_or_else(|_| default_rule_score()),
        _ => default_rule_score(),
    })
}

/// Environments in declaration order.
///
/// Order matters: when two environments score identically, the one
/// declared first wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentSet {
    entries: Vec<(String, EnvironmentSpec)>,
}

impl EnvironmentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an environment.
    ///
    /// Re-inserting an existing name replaces its spec in place, keeping
    /// the original declaration position.
    pub fn insert(&mut self, name: impl Into<String>, spec: EnvironmentSpec) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, spec: EnvironmentSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Look up an environment by name.
    pub fn get(&self, name: &str) -> Option<&EnvironmentSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Check whether an environment is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate environments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvironmentSpec)> {
        self.entries.iter().map(|(n, spec)| (n.as_str(), spec))
    }

    /// Environment names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no environments are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, EnvironmentSpec)> for EnvironmentSet {
    fn from_iter<I: IntoIterator<Item = (N, EnvironmentSpec)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, spec) in iter {
            set.insert(name, spec);
        }
        set
    }
}

impl Serialize for EnvironmentSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, spec) in &self.entries {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnvironmentSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = EnvironmentSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of environment names to environment definitions")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(EnvironmentSet::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = EnvironmentSet::new();
                while let Some((name, spec)) = access.next_entry::<String, Option<EnvironmentSpec>>()? {
                    set.insert(name, spec.unwrap_or_default());
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}
