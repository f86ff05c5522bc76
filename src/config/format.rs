//! Environment list formats.
//!
//! Two shapes of the `environments` node are accepted:
//!
//! - **Native**: a mapping keyed by environment name.
//! - **Legacy indexed**: a sequence of entries, each carrying its own
//!   `name` and the older `url` / `folder` / `rules` keys.
//!
//! The shape is decided once, here, and normalized to an
//! [`EnvironmentSet`]. Nothing downstream inspects the raw shape.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::path::PathBuf;

use super::schema::{CustomRule, EnvironmentSet, EnvironmentSpec};

/// The on-disk shape of the `environments` node.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFormat {
    /// Mapping keyed by environment name.
    Native(EnvironmentSet),
    /// Sequence of self-named entries.
    LegacyIndexed(Vec<LegacyEnvironmentEntry>),
}

/// One entry of the legacy indexed format.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyEnvironmentEntry {
    /// Environment name; generated from the index when absent.
    pub name: Option<String>,
    /// Declared kind.
    pub environment: Option<String>,
    /// Domain (`url` in older files).
    #[serde(alias = "url")]
    pub domain: Option<String>,
    /// Subfolder (`folder` in older files).
    #[serde(alias = "folder")]
    pub subfolder: Option<String>,
    /// Protocol.
    pub protocol: Option<String>,
    /// Explicit base path.
    pub base_path: Option<PathBuf>,
    /// Detection rules (`rules` in older files).
    #[serde(alias = "rules")]
    pub detection_rules: Vec<CustomRule>,
    /// Database credentials.
    pub database: Option<Value>,
}

impl ConfigFormat {
    /// Decide the format from a raw `environments` value.
    pub fn from_value(value: Value) -> Result<Self, serde_yaml::Error> {
        match value {
            Value::Null => Ok(Self::Native(EnvironmentSet::new())),
            Value::Sequence(_) => Ok(Self::LegacyIndexed(serde_yaml::from_value(value)?)),
            other => Ok(Self::Native(serde_yaml::from_value(other)?)),
        }
    }

    /// Short name of the format, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Native(_) => "native",
            Self::LegacyIndexed(_) => "legacy-indexed",
        }
    }

    /// Normalize into an [`EnvironmentSet`].
    ///
    /// Legacy entries keep their sequence order. Unnamed entries become
    /// `env<index>`; a repeated name replaces the earlier entry in place.
    pub fn into_environments(self) -> EnvironmentSet {
        match self {
            Self::Native(set) => set,
            Self::LegacyIndexed(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| {
                    let name = entry
                        .name
                        .clone()
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| format!("env{}", index));
                    (name, entry.into_spec())
                })
                .collect(),
        }
    }
}

impl LegacyEnvironmentEntry {
    fn into_spec(self) -> EnvironmentSpec {
        EnvironmentSpec {
            environment: self.environment,
            domain: self.domain,
            subfolder: self.subfolder,
            protocol: self.protocol,
            base_path: self.base_path,
            detection_rules: self.detection_rules,
            database: self.database,
        }
    }
}

/// Serde adapter used by [`SiteConfig`](super::SiteConfig) for its
/// `environments` field.
pub(crate) fn deserialize_environments<'de, D>(deserializer: D) -> Result<EnvironmentSet, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let format = ConfigFormat::from_value(value).map_err(serde::de::Error::custom)?;
    tracing::debug!(format = format.kind(), "Loaded environment definitions");
    Ok(format.into_environments())
}
