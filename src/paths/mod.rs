//! URL and filesystem path resolution.
//!
//! Once an environment is selected, [`PathResolver`] turns its spec and
//! the ambient request into a [`ResolvedPaths`] value: a base URL, a
//! filesystem base path, and one URL and path per [`AssetType`].

pub mod asset;
pub mod resolver;

pub use asset::AssetType;
pub use resolver::{canonical_path, HttpsRedirect, PathResolver, ResolvedPaths, DEFAULT_HOST};

/// Normalize a subfolder so it starts and ends with a single `/`.
///
/// An empty subfolder is the site root.
///
/// ```
/// use sitewise::paths::normalize_subfolder;
///
/// assert_eq!(normalize_subfolder(""), "/");
/// assert_eq!(normalize_subfolder("app"), "/app/");
/// assert_eq!(normalize_subfolder("/app/v2/"), "/app/v2/");
/// ```
pub fn normalize_subfolder(subfolder: &str) -> String {
    let trimmed = subfolder.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_forms() {
        assert_eq!(normalize_subfolder(""), "/");
        assert_eq!(normalize_subfolder("/"), "/");
        assert_eq!(normalize_subfolder("//"), "/");
        assert_eq!(normalize_subfolder("  "), "/");
    }

    #[test]
    fn adds_missing_slashes() {
        assert_eq!(normalize_subfolder("app"), "/app/");
        assert_eq!(normalize_subfolder("/app"), "/app/");
        assert_eq!(normalize_subfolder("app/"), "/app/");
        assert_eq!(normalize_subfolder("//app//"), "/app/");
    }

    #[test]
    fn idempotent() {
        for input in ["", "app", "/a/b/", "x//", "/"] {
            let once = normalize_subfolder(input);
            assert_eq!(normalize_subfolder(&once), once);
        }
    }
}
