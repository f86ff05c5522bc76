//! The site context object.
//!
//! A [`Site`] is built once per request (or CLI invocation) from the
//! project's configuration and the ambient server variables. It owns the
//! detection outcome and the resolved paths, and is passed by reference to
//! whatever needs them.

use std::path::{Path, PathBuf};

use crate::config::{load_config, EnvironmentSpec, SiteConfig};
use crate::context::{RequestContext, ServerVars};
use crate::environment::{Detection, EnvironmentDetector};
use crate::error::{Result, SitewiseError};
use crate::paths::{PathResolver, ResolvedPaths};

/// Configuration, request, detected environment and resolved paths.
///
/// # Example
///
/// ```
/// use sitewise::config::{EnvironmentSet, EnvironmentSpec, SiteConfig};
/// use sitewise::context::ServerVars;
/// use sitewise::Site;
///
/// let config = SiteConfig {
///     environments: EnvironmentSet::new().with("production", EnvironmentSpec {
///         domain: Some("example.com".into()),
///         protocol: Some("https".into()),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// let vars = ServerVars::new().with_host("example.com").with_https("on");
///
/// let site = Site::from_config("/srv/site", config, vars, None).unwrap();
/// assert_eq!(site.environment(), "production");
/// assert_eq!(site.paths().base_url(), "https://example.com/");
/// ```
#[derive(Debug, Clone)]
pub struct Site {
    project_root: PathBuf,
    config: SiteConfig,
    vars: ServerVars,
    context: RequestContext,
    detection: Detection,
    spec: EnvironmentSpec,
    paths: ResolvedPaths,
}

impl Site {
    /// Load configuration from the project and build the site.
    ///
    /// `config_override` names a single config file to use instead of the
    /// project's `.sitewise/` layers. `env_flag` forces an environment and
    /// must name a declared one.
    pub fn load(
        project_root: impl AsRef<Path>,
        config_override: Option<&Path>,
        vars: ServerVars,
        env_flag: Option<&str>,
    ) -> Result<Self> {
        let project_root = project_root.as_ref();
        let config = load_config(project_root, config_override)?;
        Self::from_config(project_root, config, vars, env_flag)
    }

    /// Build the site from an already loaded configuration, reading the
    /// override variable and `env_var` rules from the process environment.
    pub fn from_config(
        project_root: impl AsRef<Path>,
        config: SiteConfig,
        vars: ServerVars,
        env_flag: Option<&str>,
    ) -> Result<Self> {
        Self::from_config_with_env(project_root, config, vars, env_flag, |key| {
            std::env::var(key).ok()
        })
    }

    /// Build the site with a custom env var lookup (for testing).
    pub fn from_config_with_env<F>(
        project_root: impl AsRef<Path>,
        config: SiteConfig,
        vars: ServerVars,
        env_flag: Option<&str>,
        env_fn: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_root = project_root.as_ref().to_path_buf();

        if let Some(name) = env_flag {
            if !config.environments.contains(name) {
                return Err(SitewiseError::UnknownEnvironment {
                    name: name.to_string(),
                });
            }
        }

        let override_name = match env_flag {
            Some(name) => Some(name.to_string()),
            None => env_fn(&config.override_var).filter(|v| !v.trim().is_empty()),
        };

        let context = RequestContext::from_server(&vars);
        let detection = EnvironmentDetector::new(&config.environments).detect_with_env(
            &context,
            override_name.as_deref(),
            &env_fn,
        );

        let spec = config
            .environments
            .get(&detection.name)
            .cloned()
            .unwrap_or_default();
        let paths = PathResolver::new(&project_root, &vars).resolve(&detection.name, &spec);

        tracing::debug!(
            environment = %detection.name,
            source = %detection.source,
            "Site ready"
        );

        Ok(Self {
            project_root,
            config,
            vars,
            context,
            detection,
            spec,
            paths,
        })
    }

    /// Project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Loaded configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Server variables the site was built from.
    pub fn server_vars(&self) -> &ServerVars {
        &self.vars
    }

    /// Request context used for detection.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Full detection outcome, including scores.
    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// Name of the selected environment.
    pub fn environment(&self) -> &str {
        &self.detection.name
    }

    /// Spec of the selected environment; empty for the fallback.
    pub fn spec(&self) -> &EnvironmentSpec {
        &self.spec
    }

    /// Whether the selected environment is `name`, by key or declared kind.
    pub fn is(&self, name: &str) -> bool {
        self.detection.name.eq_ignore_ascii_case(name) || self.spec.is_kind(name)
    }

    /// Database settings of the selected environment.
    pub fn database(&self) -> Option<&serde_yaml::Value> {
        self.spec.database.as_ref()
    }

    /// Resolved URLs and paths.
    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }
}
