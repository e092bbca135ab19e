//! Theming for the mentor widget

mod mentor_dark;

pub use mentor_dark::MENTOR_DARK;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A color theme for the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Hint cards
    pub hint_unlocked: Color,
    pub hint_locked: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::mentor_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_mentor_dark() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Mentor Dark");
    }

    #[test]
    fn theme_survives_config_json() {
        let theme = Theme::mentor_dark();
        let json = serde_json::to_string(&theme).unwrap();
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }
}
