//! Asset categories.

use std::fmt;
use std::str::FromStr;

/// Kind of static asset, each served from its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetType {
    /// Generic assets (`assets/`).
    #[default]
    Assets,
    /// Stylesheets (`css/`).
    Css,
    /// Scripts (`js/`).
    Js,
    /// Images (`images/`).
    Images,
    /// User uploads (`uploads/`).
    Uploads,
    /// Documents (`docs/`).
    Docs,
    /// Web fonts (`fonts/`).
    Fonts,
    /// Video files (`videos/`).
    Videos,
}

impl AssetType {
    /// Every asset type, in display order.
    pub const ALL: [AssetType; 8] = [
        AssetType::Assets,
        AssetType::Css,
        AssetType::Js,
        AssetType::Images,
        AssetType::Uploads,
        AssetType::Docs,
        AssetType::Fonts,
        AssetType::Videos,
    ];

    /// Directory name under the site root and `public/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::Css => "css",
            Self::Js => "js",
            Self::Images => "images",
            Self::Uploads => "uploads",
            Self::Docs => "docs",
            Self::Fonts => "fonts",
            Self::Videos => "videos",
        }
    }

    /// Key of this type's URL in resolved output.
    pub fn url_key(self) -> &'static str {
        match self {
            Self::Assets => "assets_url",
            Self::Css => "css_url",
            Self::Js => "js_url",
            Self::Images => "images_url",
            Self::Uploads => "uploads_url",
            Self::Docs => "docs_url",
            Self::Fonts => "fonts_url",
            Self::Videos => "videos_url",
        }
    }

    /// Key of this type's filesystem path in resolved output.
    pub fn path_key(self) -> &'static str {
        match self {
            Self::Assets => "assets_path",
            Self::Css => "css_path",
            Self::Js => "js_path",
            Self::Images => "images_path",
            Self::Uploads => "uploads_path",
            Self::Docs => "docs_path",
            Self::Fonts => "fonts_path",
            Self::Videos => "videos_path",
        }
    }

    /// Parse a type name, falling back to [`AssetType::Assets`].
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.dir_name() == lower)
            .ok_or_else(|| format!("unknown asset type: {}", s))
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!("css".parse::<AssetType>().unwrap(), AssetType::Css);
        assert_eq!("Images".parse::<AssetType>().unwrap(), AssetType::Images);
        assert!("scss".parse::<AssetType>().is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_assets() {
        assert_eq!(AssetType::parse_lenient("scss"), AssetType::Assets);
        assert_eq!(AssetType::parse_lenient("fonts"), AssetType::Fonts);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, t) in AssetType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn keys_follow_dir_name() {
        for t in AssetType::ALL {
            assert_eq!(t.url_key(), format!("{}_url", t.dir_name()));
            assert_eq!(t.path_key(), format!("{}_path", t.dir_name()));
            assert_eq!(t.to_string(), t.dir_name());
        }
    }
}
