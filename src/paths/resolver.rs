//! URL and filesystem path resolution for a selected environment.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::asset::AssetType;
use super::normalize_subfolder;
use crate::config::schema::EnvironmentSpec;
use crate::context::ServerVars;

/// Host used when neither the environment nor the request names one.
pub const DEFAULT_HOST: &str = "localhost";

/// Derives [`ResolvedPaths`] from an environment and the ambient request.
///
/// # Example
///
/// ```
/// use sitewise::config::EnvironmentSpec;
/// use sitewise::context::ServerVars;
/// use sitewise::paths::PathResolver;
/// use std::path::Path;
///
/// let spec = EnvironmentSpec {
///     domain: Some("example.com".into()),
///     protocol: Some("https".into()),
///     subfolder: Some("shop".into()),
///     ..Default::default()
/// };
/// let vars = ServerVars::new();
/// let paths = PathResolver::new(Path::new("/srv/shop"), &vars).resolve("production", &spec);
///
/// assert_eq!(paths.base_url(), "https://example.com/shop/");
/// assert_eq!(paths.asset("app.js", "js"), "https://example.com/shop/js/app.js");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    project_root: &'a Path,
    vars: &'a ServerVars,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver for a project and request.
    pub fn new(project_root: &'a Path, vars: &'a ServerVars) -> Self {
        Self { project_root, vars }
    }

    /// Resolve every URL and path for the named environment.
    pub fn resolve(&self, environment: &str, spec: &EnvironmentSpec) -> ResolvedPaths {
        let domain = spec
            .domain
            .as_deref()
            .filter(|d| is_literal_host(d))
            .or(self.vars.host())
            .unwrap_or(DEFAULT_HOST)
            .to_string();

        let protocol = spec
            .protocol
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| self.vars.protocol().to_string());

        let subfolder = normalize_subfolder(spec.subfolder.as_deref().unwrap_or(""));
        let base_url = format!("{}://{}{}", protocol, domain, subfolder);
        let base_path = self.base_path(spec);

        let root = self.project_root.to_string_lossy();
        let root = root.trim_end_matches('/');
        let asset_urls = AssetType::ALL.map(|t| format!("{}{}/", base_url, t.dir_name()));
        let asset_paths = AssetType::ALL.map(|t| format!("{}/public/{}/", root, t.dir_name()));

        tracing::debug!(
            environment,
            base_url = %base_url,
            base_path = %base_path,
            "Resolved paths"
        );

        ResolvedPaths {
            environment: environment.to_string(),
            protocol,
            domain,
            subfolder,
            base_url,
            base_path,
            asset_urls,
            asset_paths,
            project_root: self.project_root.to_path_buf(),
            request: RequestLine {
                host: self.vars.host().map(String::from),
                uri: self
                    .vars
                    .request_uri
                    .clone()
                    .unwrap_or_else(|| "/".to_string()),
                path: self.vars.request_path().to_string(),
                is_https: self.vars.is_https(),
            },
        }
    }

    /// Filesystem base path.
    ///
    /// An explicit `base_path` wins. Otherwise, when the executing script
    /// lies under the document root, the script's directory with the
    /// document-root prefix removed (`/var/www` + `/var/www/app/x.php`
    /// gives `/app`). Falls back to the project root.
    fn base_path(&self, spec: &EnvironmentSpec) -> String {
        if let Some(explicit) = &spec.base_path {
            return strip_trailing_slash(&explicit.to_string_lossy());
        }

        let script_dir = self
            .vars
            .script_filename
            .as_deref()
            .and_then(|script| Path::new(script).parent());

        if let (Some(doc_root), Some(script_dir)) = (self.vars.document_root.as_deref(), script_dir)
        {
            let doc_root = Path::new(doc_root);
            if let Ok(relative) = script_dir.strip_prefix(doc_root) {
                return strip_trailing_slash(&format!("/{}", relative.to_string_lossy()));
            }
        }

        strip_trailing_slash(&self.project_root.to_string_lossy())
    }
}

/// Whether a configured domain can be used verbatim as a URL host.
///
/// Wildcards and regular expressions identify a family of hosts and are
/// only useful for scoring.
fn is_literal_host(domain: &str) -> bool {
    !domain.is_empty()
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

fn strip_trailing_slash(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Request details needed after resolution (canonical URLs, redirects).
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestLine {
    host: Option<String>,
    uri: String,
    path: String,
    is_https: bool,
}

/// URLs and paths for one environment.
///
/// Immutable once produced; pass it by reference to templates and routers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    environment: String,
    protocol: String,
    domain: String,
    subfolder: String,
    base_url: String,
    base_path: String,
    asset_urls: [String; 8],
    asset_paths: [String; 8],
    project_root: PathBuf,
    request: RequestLine,
}

impl ResolvedPaths {
    /// Environment these paths were resolved for.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// `http` or `https`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Host used in generated URLs.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Normalized subfolder, always starting and ending with `/`.
    pub fn subfolder(&self) -> &str {
        &self.subfolder
    }

    /// `protocol://domain/subfolder/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Filesystem base path, without trailing slash.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// URL of an asset directory, with trailing slash.
    pub fn url(&self, asset_type: AssetType) -> &str {
        &self.asset_urls[asset_type.index()]
    }

    /// Filesystem path of an asset directory, with trailing slash.
    pub fn path(&self, asset_type: AssetType) -> &str {
        &self.asset_paths[asset_type.index()]
    }

    /// URL of an asset; unknown type names fall back to `assets`.
    pub fn asset(&self, path: &str, asset_type: &str) -> String {
        self.asset_for(path, AssetType::parse_lenient(asset_type))
    }

    /// URL of an asset of a known type.
    pub fn asset_for(&self, path: &str, asset_type: AssetType) -> String {
        format!("{}{}", self.url(asset_type), path.trim_start_matches('/'))
    }

    /// Canonical URL for `path`, or for the current request when `None`.
    ///
    /// The current request path has the subfolder stripped first, since
    /// the base URL already carries it.
    pub fn canonical_url(&self, path: Option<&str>) -> String {
        let path = match path {
            Some(p) => canonical_path(p),
            None => canonical_path(&self.current_path()),
        };
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn current_path(&self) -> String {
        let mount = self.subfolder.trim_end_matches('/');
        let path = self.request.path.as_str();
        if mount.is_empty() {
            return path.to_string();
        }
        if path == mount {
            return "/".to_string();
        }
        match path.strip_prefix(self.subfolder.as_str()) {
            Some(rest) => format!("/{}", rest),
            None => path.to_string(),
        }
    }

    /// Whether `path` exists inside the project root.
    ///
    /// Relative paths are taken relative to the project root. Paths that
    /// cannot be resolved (for example because they do not exist) are
    /// reported as outside.
    pub fn is_within_project(&self, path: &Path) -> bool {
        let candidate = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        };

        match (
            std::fs::canonicalize(&self.project_root),
            std::fs::canonicalize(&candidate),
        ) {
            (Ok(root), Ok(target)) => target.starts_with(root),
            _ => false,
        }
    }

    /// Redirect to the HTTPS equivalent of the current request, if the
    /// request did not arrive over HTTPS.
    ///
    /// Emitting the response and halting is up to the caller.
    pub fn force_https(&self) -> Option<HttpsRedirect> {
        if self.request.is_https {
            return None;
        }
        let host = self.request.host.as_deref().unwrap_or(&self.domain);
        Some(HttpsRedirect {
            status: 301,
            location: format!("https://{}{}", host, self.request.uri),
        })
    }

    /// Every named value, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            ("environment", self.environment.as_str()),
            ("protocol", self.protocol.as_str()),
            ("domain", self.domain.as_str()),
            ("subfolder", self.subfolder.as_str()),
            ("base_url", self.base_url.as_str()),
        ];
        entries.extend(AssetType::ALL.iter().map(|t| (t.url_key(), self.url(*t))));
        entries.push(("base_path", self.base_path.as_str()));
        entries.extend(AssetType::ALL.iter().map(|t| (t.path_key(), self.path(*t))));
        entries
    }
}

impl Serialize for ResolvedPaths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ensure a path starts with `/` and, unless it is the root, ends with `/`.
///
/// ```
/// use sitewise::paths::canonical_path;
///
/// assert_eq!(canonical_path("/"), "/");
/// assert_eq!(canonical_path("/about"), "/about/");
/// assert_eq!(canonical_path("about/"), "/about/");
/// ```
pub fn canonical_path(path: &str) -> String {
    let mut out = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// A permanent redirect to HTTPS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpsRedirect {
    /// HTTP status code (always 301).
    pub status: u16,
    /// Target URL.
    pub location: String,
}

impl fmt::Display for HttpsRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Moved Permanently\nLocation: {}", self.status, self.location)
    }
}
