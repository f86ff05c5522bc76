//! CGI-style server variables.
//!
//! Web servers hand request metadata to scripts through variables such as
//! `HTTP_HOST` and `REQUEST_URI`. [`ServerVars`] collects the handful that
//! detection and path resolution care about.

/// Variable names read by [`ServerVars::from_lookup`].
pub const SERVER_VAR_NAMES: &[&str] = &[
    "HTTP_HOST",
    "SERVER_NAME",
    "REQUEST_URI",
    "HTTPS",
    "HTTP_X_FORWARDED_PROTO",
    "SERVER_PORT",
    "DOCUMENT_ROOT",
    "SCRIPT_FILENAME",
    "SCRIPT_NAME",
    "PHP_SELF",
];

/// Ambient request values supplied by the hosting server.
///
/// Every field is optional; consumers fall back to sensible defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerVars {
    /// `Host` header (`HTTP_HOST`), possibly including a port.
    pub http_host: Option<String>,
    /// Configured server name (`SERVER_NAME`).
    pub server_name: Option<String>,
    /// Full request URI including query string (`REQUEST_URI`).
    pub request_uri: Option<String>,
    /// HTTPS flag, `"on"` when TLS terminated at this server (`HTTPS`).
    pub https: Option<String>,
    /// Scheme reported by a reverse proxy (`HTTP_X_FORWARDED_PROTO`).
    pub forwarded_proto: Option<String>,
    /// Listening port (`SERVER_PORT`).
    pub server_port: Option<String>,
    /// Web server document root (`DOCUMENT_ROOT`).
    pub document_root: Option<String>,
    /// Absolute filesystem path of the executing script (`SCRIPT_FILENAME`).
    pub script_filename: Option<String>,
    /// URL path of the executing script (`SCRIPT_NAME`).
    pub script_name: Option<String>,
    /// URL path of the executing script including path info (`PHP_SELF`).
    pub php_self: Option<String>,
}

impl ServerVars {
    /// Create an empty set of server variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read server variables from the process environment.
    ///
    /// This is the CGI convention: the web server exports request metadata
    /// as environment variables before spawning the script.
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read server variables through a custom lookup (for testing).
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            http_host: get("HTTP_HOST"),
            server_name: get("SERVER_NAME"),
            request_uri: get("REQUEST_URI"),
            https: get("HTTPS"),
            forwarded_proto: get("HTTP_X_FORWARDED_PROTO"),
            server_port: get("SERVER_PORT"),
            document_root: get("DOCUMENT_ROOT"),
            script_filename: get("SCRIPT_FILENAME"),
            script_name: get("SCRIPT_NAME"),
            php_self: get("PHP_SELF"),
        }
    }

    /// Set the `Host` header.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.http_host = Some(host.into());
        self
    }

    /// Set the request URI.
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    /// Set the HTTPS flag.
    pub fn with_https(mut self, flag: impl Into<String>) -> Self {
        self.https = Some(flag.into());
        self
    }

    /// Set the proxy-forwarded scheme.
    pub fn with_forwarded_proto(mut self, proto: impl Into<String>) -> Self {
        self.forwarded_proto = Some(proto.into());
        self
    }

    /// Set the server port.
    pub fn with_server_port(mut self, port: impl Into<String>) -> Self {
        self.server_port = Some(port.into());
        self
    }

    /// Set the document root.
    pub fn with_document_root(mut self, root: impl Into<String>) -> Self {
        self.document_root = Some(root.into());
        self
    }

    /// Set the script filename.
    pub fn with_script_filename(mut self, path: impl Into<String>) -> Self {
        self.script_filename = Some(path.into());
        self
    }

    /// Set the server name.
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }

    /// Host as seen by the client: `HTTP_HOST`, else `SERVER_NAME`.
    pub fn host(&self) -> Option<&str> {
        self.http_host
            .as_deref()
            .or(self.server_name.as_deref())
    }

    /// Path component of the request URI, without query string or fragment.
    ///
    /// Defaults to `/` when no request URI is known.
    pub fn request_path(&self) -> &str {
        let uri = self.request_uri.as_deref().unwrap_or("/");
        let end = uri.find(['?', '#']).unwrap_or(uri.len());
        let path = &uri[..end];
        if path.is_empty() {
            "/"
        } else {
            path
        }
    }

    /// Whether the current request arrived over TLS.
    ///
    /// Checks, in order: `HTTPS == "on"`, `X-Forwarded-Proto == "https"`,
    /// and `SERVER_PORT == 443`.
    pub fn is_https(&self) -> bool {
        if self
            .https
            .as_deref()
            .is_some_and(|flag| flag.eq_ignore_ascii_case("on"))
        {
            return true;
        }
        if self
            .forwarded_proto
            .as_deref()
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
        {
            return true;
        }
        self.server_port
            .as_deref()
            .and_then(|port| port.trim().parse::<u16>().ok())
            == Some(443)
    }

    /// Detected scheme, `"https"` or `"http"`.
    pub fn protocol(&self) -> &'static str {
        if self.is_https() {
            "https"
        } else {
            "http"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_known_variables() {
        let vars = ServerVars::from_lookup(make_lookup(&[
            ("HTTP_HOST", "example.com"),
            ("REQUEST_URI", "/app/index.php?x=1"),
            ("DOCUMENT_ROOT", "/var/www"),
        ]));
        assert_eq!(vars.http_host.as_deref(), Some("example.com"));
        assert_eq!(vars.request_uri.as_deref(), Some("/app/index.php?x=1"));
        assert_eq!(vars.document_root.as_deref(), Some("/var/www"));
        assert!(vars.https.is_none());
    }

    #[test]
    fn from_lookup_treats_empty_as_absent() {
        let vars = ServerVars::from_lookup(make_lookup(&[("HTTPS", "")]));
        assert!(vars.https.is_none());
    }

    #[test]
    fn host_falls_back_to_server_name() {
        let vars = ServerVars::new().with_server_name("internal.local");
        assert_eq!(vars.host(), Some("internal.local"));

        let vars = vars.with_host("public.example.com");
        assert_eq!(vars.host(), Some("public.example.com"));
    }

    #[test]
    fn request_path_strips_query_and_fragment() {
        let vars = ServerVars::new().with_request_uri("/blog/post?id=4#top");
        assert_eq!(vars.request_path(), "/blog/post");
    }

    #[test]
    fn request_path_defaults_to_root() {
        assert_eq!(ServerVars::new().request_path(), "/");
        assert_eq!(
            ServerVars::new().with_request_uri("?q=1").request_path(),
            "/"
        );
    }

    #[test]
    fn https_flag_on() {
        assert!(ServerVars::new().with_https("on").is_https());
        assert!(ServerVars::new().with_https("ON").is_https());
        assert!(!ServerVars::new().with_https("off").is_https());
    }

    #[test]
    fn forwarded_proto_https() {
        let vars = ServerVars::new().with_forwarded_proto("https");
        assert!(vars.is_https());
        assert_eq!(vars.protocol(), "https");
    }

    #[test]
    fn port_443_is_https() {
        assert!(ServerVars::new().with_server_port("443").is_https());
        assert!(!ServerVars::new().with_server_port("8080").is_https());
        assert!(!ServerVars::new().with_server_port("junk").is_https());
    }

    #[test]
    fn defaults_to_http() {
        assert_eq!(ServerVars::new().protocol(), "http");
    }
}
