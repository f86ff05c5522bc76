//! Visual theme and styling.

use console::Style;

/// Sitewise's visual theme.
#[derive(Debug, Clone)]
pub struct SitewiseTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for key labels in key-value displays.
    pub key: Style,
    /// Style for values in key-value displays.
    pub value: Style,
}

impl Default for SitewiseTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SitewiseTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().cyan(),
            value: Style::new(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
            value: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("◆"), self.highlight.apply_to(title))
    }

    /// Format a key-value line with the key padded to `width`.
    pub fn format_key_value(&self, key: &str, value: &str, width: usize) -> String {
        format!(
            "{} {}",
            self.key.apply_to(format!("{:<width$}", key, width = width)),
            self.value.apply_to(value)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = SitewiseTheme::plain().format_success("Valid");
        assert_eq!(msg, "✓ Valid");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = SitewiseTheme::plain().format_warning("Careful");
        assert_eq!(msg, "⚠ Careful");
    }

    #[test]
    fn theme_formats_error() {
        let msg = SitewiseTheme::plain().format_error("Failed");
        assert_eq!(msg, "✗ Failed");
    }

    #[test]
    fn theme_formats_header() {
        let msg = SitewiseTheme::plain().format_header("Paths");
        assert_eq!(msg, "◆ Paths");
    }

    #[test]
    fn key_value_is_padded() {
        let line = SitewiseTheme::plain().format_key_value("css_url", "http://x/css/", 10);
        assert_eq!(line, "css_url    http://x/css/");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = SitewiseTheme::default();
        let new = SitewiseTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
