//! Request context extraction.
//!
//! Detection and path resolution never read ambient process state directly.
//! A [`ServerVars`] collaborator captures the CGI-style server variables as
//! plain values, and [`RequestContext`] is the immutable snapshot the scorer
//! evaluates against.

pub mod request;
pub mod server_vars;

pub use request::RequestContext;
pub use server_vars::ServerVars;
