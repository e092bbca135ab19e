//! Mentor Dark theme: indigo-violet accents over a slate background

use ratatui::style::Color;

use super::Theme;

/// Mentor Dark color palette
pub const MENTOR_DARK: Theme = Theme {
    name: String::new(),

    // Background colors
    bg_primary: Color::Rgb(17, 24, 39),   // #111827
    bg_secondary: Color::Rgb(31, 41, 55), // #1f2937
    bg_tertiary: Color::Rgb(55, 65, 81),  // #374151

    // Foreground colors
    fg_primary: Color::Rgb(229, 231, 235),   // #e5e7eb
    fg_secondary: Color::Rgb(243, 244, 246), // #f3f4f6
    fg_muted: Color::Rgb(156, 163, 175),     // #9ca3af

    // Accent colors
    accent_primary: Color::Rgb(102, 126, 234),   // #667eea
    accent_secondary: Color::Rgb(118, 75, 162), // #764ba2

    // Semantic colors
    success: Color::Rgb(16, 185, 129), // #10b981
    warning: Color::Rgb(245, 158, 11), // #f59e0b
    error: Color::Rgb(239, 68, 68),    // #ef4444
    info: Color::Rgb(59, 130, 246),    // #3b82f6

    // Hint cards
    hint_unlocked: Color::Rgb(165, 180, 252), // #a5b4fc
    hint_locked: Color::Rgb(107, 114, 128),   // #6b7280

    // UI elements
    border: Color::Rgb(55, 65, 81),            // #374151
    border_focused: Color::Rgb(102, 126, 234), // #667eea
    selection: Color::Rgb(49, 46, 129),        // #312e81
    cursor: Color::Rgb(243, 244, 246),         // #f3f4f6
};

// String::from is not const
impl Theme {
    pub fn mentor_dark() -> Self {
        Theme { name: "Mentor Dark".to_string(), ..MENTOR_DARK }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentor_dark_has_correct_name() {
        assert_eq!(Theme::mentor_dark().name, "Mentor Dark");
    }

    #[test]
    fn semantic_colors_match_toasts() {
        let theme = Theme::mentor_dark();
        assert_eq!(theme.success, Color::Rgb(16, 185, 129));
        assert_eq!(theme.info, Color::Rgb(59, 130, 246));
    }
}
