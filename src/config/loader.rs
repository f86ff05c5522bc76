//! Configuration file discovery and loading.
//!
//! A project keeps its configuration in `.sitewise/config.yml`, with
//! optional machine-local overrides in `.sitewise/config.local.yml`.

use crate::config::merger::merge_configs;
use crate::config::schema::SiteConfig;
use crate::error::{Result, SitewiseError};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".sitewise";

/// Paths to configuration files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .sitewise/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .sitewise/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_config_path(project_root)),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if the project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Location of the primary project config, whether or not it exists.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

/// Find the project root by walking up from `start`.
///
/// A `.sitewise` directory marks the root; a `.git` directory is the
/// fallback marker.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SitewiseError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SitewiseError::Io(e)
        }
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SiteConfig> {
    let content = read_file(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`SiteConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SiteConfig> {
    let value = parse_value(content, source_path)?;
    serde_yaml::from_value(value).map_err(|e| SitewiseError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML into a raw value. Empty and comment-only documents read as
/// an empty mapping.
fn parse_value(content: &str, source_path: &Path) -> Result<serde_yaml::Value> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| SitewiseError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    if value.is_null() {
        Ok(serde_yaml::Value::Mapping(Default::default()))
    } else {
        Ok(value)
    }
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_file(path)?;
    parse_value(&content, path)
}

/// Load the project config with local overrides applied.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<SiteConfig> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_project_config() {
        return Err(SitewiseError::ConfigNotFound {
            path: project_config_path(project_root),
        });
    }

    let mut layers = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);

    serde_yaml::from_value(merged).map_err(|e| SitewiseError::ConfigParseError {
        path: project_config_path(project_root),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise loads and merges the project config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<SiteConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}
