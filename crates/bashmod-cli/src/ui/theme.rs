//! UI Theme - Design system constants

use crossterm::style::Color;

/// Default theme for bashmod output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Status icons
    pub icons: Icons,
    /// Column widths
    pub layout: Layout,
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Module ids (primary content)
    pub module_id: Color,
    /// Version strings
    pub version: Color,
    /// Descriptions, labels and other secondary info
    pub secondary: Color,
    /// Section titles
    pub header: Color,
    /// Success states
    pub success: Color,
    /// Warning states
    pub warning: Color,
    /// Error states
    pub error: Color,
    /// In-progress items
    pub active: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            module_id: Color::Cyan,
            version: Color::White,
            secondary: Color::DarkGrey,
            header: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            active: Color::Blue,
        }
    }
}

/// Status icons for different states
#[derive(Debug, Clone)]
pub struct Icons {
    /// Active/in-progress state (●)
    pub active: &'static str,
    /// Success/completed state (✓)
    pub success: &'static str,
    /// Error/failed state (✗)
    pub error: &'static str,
    /// Warning state (⚠)
    pub warning: &'static str,
    /// Info/Tip state (ℹ)
    pub info: &'static str,
    /// Newer catalog version available (↑)
    pub update: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            active: "●",
            success: "✓",
            error: "✗",
            warning: "⚠",
            info: "ℹ",
            update: "↑",
        }
    }
}

/// Column widths for catalog rows
#[derive(Debug, Clone)]
pub struct Layout {
    /// Width allocated for the module id column
    pub id_width: usize,
    /// Width allocated for the version column
    pub version_width: usize,
    /// Width allocated for the source label column
    pub source_width: usize,
    /// Label width in key/value blocks (`info`, `status`)
    pub label_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            id_width: 20,
            version_width: 10,
            source_width: 24,
            label_width: 14,
        }
    }
}

/// Pad `text` to `width` columns, cutting it with an ellipsis when too long.
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let cut: String = text.chars().take(width - 1).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_short_text() {
        assert_eq!(fit("git", 6), "git   ");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn test_fit_truncates_long_text() {
        assert_eq!(fit("git-tools-extended", 8), "git-too…");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit("ab", 2), "ab");
    }

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.icons.success, "✓");
        assert_eq!(theme.icons.update, "↑");
        assert!(theme.layout.id_width > theme.layout.version_width);
    }
}
