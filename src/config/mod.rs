//! Configuration loading, parsing, and validation for Sitewise.
//!
//! - Schema definitions in [`schema`]
//! - Environment list formats and normalization in [`format`]
//! - File discovery and loading in [`loader`]
//! - Layered merging in [`merger`]
//! - Presence checks in [`validator`]
//!
//! # Example
//!
//! ```
//! use sitewise::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".sitewise");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(
//!     config_dir.join("config.yml"),
//!     "environments:\n  development:\n    domain: localhost\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert!(config.environments.contains("development"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.sitewise/config.yml`)
//! 2. Local overrides (`.sitewise/config.local.yml`)

pub mod format;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use format::{ConfigFormat, LegacyEnvironmentEntry};

pub use schema::{
    CustomRule, EnvironmentSet, EnvironmentSpec, RuleCondition, SiteConfig, DEFAULT_OVERRIDE_VAR,
};

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, project_config_path, ConfigPaths, CONFIG_DIR,
};

pub use merger::{deep_merge, merge_configs};

pub use validator::{validate, validate_config, ValidationError};
