//! Immutable request snapshot used for environment scoring.

use std::collections::BTreeMap;

use super::server_vars::ServerVars;

/// Snapshot of the ambient request values that detection scores against.
///
/// Built once per detection call and never mutated afterwards. Custom
/// detection rules address values by field name through [`field`](Self::field);
/// client-defined fields can be attached with [`with_field`](Self::with_field).
///
/// # Example
///
/// ```
/// use sitewise::context::RequestContext;
///
/// let ctx = RequestContext::new("example.com", "/shop/", "https")
///     .with_field("region", "eu");
/// assert_eq!(ctx.field("domain"), "example.com");
/// assert_eq!(ctx.field("region"), "eu");
/// assert_eq!(ctx.field("missing"), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    domain: String,
    path: String,
    protocol: String,
    server_name: String,
    document_root: String,
    script_name: String,
    php_self: String,
    extra: BTreeMap<String, String>,
}

impl RequestContext {
    /// Create a context from the three values every scorer needs.
    pub fn new(
        domain: impl Into<String>,
        path: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            path: path.into(),
            protocol: protocol.into(),
            server_name: String::new(),
            document_root: String::new(),
            script_name: String::new(),
            php_self: String::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Extract a context from server variables.
    ///
    /// Domain comes from the host header, then the server name, then
    /// `localhost`. The path is the request URI without its query string.
    pub fn from_server(vars: &ServerVars) -> Self {
        let script_name = vars.script_name.clone().unwrap_or_default();
        Self {
            domain: vars.host().unwrap_or("localhost").to_string(),
            path: vars.request_path().to_string(),
            protocol: vars.protocol().to_string(),
            server_name: vars.server_name.clone().unwrap_or_default(),
            document_root: vars.document_root.clone().unwrap_or_default(),
            php_self: vars.php_self.clone().unwrap_or_else(|| script_name.clone()),
            script_name,
            extra: BTreeMap::new(),
        }
    }

    /// Set the server name.
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Set the document root.
    pub fn with_document_root(mut self, root: impl Into<String>) -> Self {
        self.document_root = root.into();
        self
    }

    /// Set the script name.
    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = name.into();
        self
    }

    /// Attach a client-defined field addressable by custom rules.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Requested host.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Request path without query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request scheme (`http` or `https`).
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Server name.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Look up a context value by field name.
    ///
    /// Unknown fields read as the empty string.
    pub fn field(&self, name: &str) -> &str {
        match name {
            "domain" => &self.domain,
            "path" => &self.path,
            "protocol" => &self.protocol,
            "server_name" => &self.server_name,
            "document_root" => &self.document_root,
            "script_name" => &self.script_name,
            "php_self" => &self.php_self,
            other => self.extra.get(other).map(String::as_str).unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_server_uses_host_header() {
        let vars = ServerVars::new()
            .with_host("shop.example.com")
            .with_server_name("web01")
            .with_request_uri("/store/public/index.php?page=2")
            .with_https("on");
        let ctx = RequestContext::from_server(&vars);
        assert_eq!(ctx.domain(), "shop.example.com");
        assert_eq!(ctx.path(), "/store/public/index.php");
        assert_eq!(ctx.protocol(), "https");
        assert_eq!(ctx.server_name(), "web01");
    }

    #[test]
    fn from_server_defaults_to_localhost() {
        let ctx = RequestContext::from_server(&ServerVars::new());
        assert_eq!(ctx.domain(), "localhost");
        assert_eq!(ctx.path(), "/");
        assert_eq!(ctx.protocol(), "http");
    }

    #[test]
    fn php_self_falls_back_to_script_name() {
        let vars = ServerVars {
            script_name: Some("/index.php".to_string()),
            ..ServerVars::default()
        };
        let ctx = RequestContext::from_server(&vars);
        assert_eq!(ctx.field("php_self"), "/index.php");
        assert_eq!(ctx.field("script_name"), "/index.php");
    }

    #[test]
    fn field_reads_builtin_and_extra_values() {
        let ctx = RequestContext::new("localhost", "/", "http")
            .with_document_root("/var/www")
            .with_field("tenant", "acme");
        assert_eq!(ctx.field("document_root"), "/var/www");
        assert_eq!(ctx.field("tenant"), "acme");
        assert_eq!(ctx.field("nope"), "");
    }
}
