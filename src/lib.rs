//! Sitewise - environment detection and URL/path resolution for web projects.
//!
//! Sitewise decides which declared environment (development, staging,
//! production, or anything custom) a request belongs to, then derives the
//! base URL, filesystem paths and asset URLs for that environment.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`context`] - Request context and server variables
//! - [`environment`] - Environment scoring and selection
//! - [`error`] - Error types and result aliases
//! - [`paths`] - URL and filesystem path resolution
//! - [`site`] - The [`Site`] context object tying it all together
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use sitewise::config::parse_config;
//! use sitewise::context::ServerVars;
//! use sitewise::Site;
//! use std::path::Path;
//!
//! let yaml = r#"
//! environments:
//!   development:
//!     domain: localhost
//!     protocol: http
//!   production:
//!     domain: example.com
//!     protocol: https
//! "#;
//! let config = parse_config(yaml, Path::new("config.yml")).unwrap();
//! let vars = ServerVars::new().with_host("example.com").with_https("on");
//!
//! let site = Site::from_config("/srv/site", config, vars, None).unwrap();
//! assert_eq!(site.environment(), "production");
//! assert_eq!(site.paths().asset("app.css", "css"), "https://example.com/css/app.css");
//! ```
//!
//! For file-based config loading, see the integration tests.

pub mod cli;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod paths;
pub mod site;
pub mod ui;

pub use error::{Result, SitewiseError};
pub use site::Site;
