//! Theme definitions for the terminal front end
//!
//! Provides three built-in themes: Gruvbox, Nord, and Transparent.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub menu_bg: Color,
    pub input_bg: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Gruvbox dark theme (default)
    pub fn gruvbox() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),        // #282828
            fg: Color::Rgb(235, 219, 178),     // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116), // #928374

            accent: Color::Rgb(254, 128, 25), // #fe8019

            success: Color::Rgb(184, 187, 38), // #b8bb26
            warning: Color::Rgb(250, 189, 47), // #fabd2f

            border: Color::Rgb(80, 73, 69),            // #504945
            border_focused: Color::Rgb(168, 153, 132), // #a89984
            selection_bg: Color::Rgb(80, 73, 69),      // #504945
            selection_fg: Color::Rgb(235, 219, 178),   // #ebdbb2
            menu_bg: Color::Rgb(60, 56, 54),           // #3c3836
            input_bg: Color::Rgb(50, 48, 47),          // #32302f
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            // Polar Night / Snow Storm
            bg: Color::Rgb(46, 52, 64),     // #2e3440
            fg: Color::Rgb(236, 239, 244),  // #eceff4
            fg_dim: Color::Rgb(76, 86, 106), // #4c566a

            // Frost
            accent: Color::Rgb(136, 192, 208), // #88c0d0

            // Aurora
            success: Color::Rgb(163, 190, 140), // #a3be8c
            warning: Color::Rgb(235, 203, 139), // #ebcb8b

            border: Color::Rgb(59, 66, 82),            // #3b4252
            border_focused: Color::Rgb(136, 192, 208), // #88c0d0
            selection_bg: Color::Rgb(76, 86, 106),     // #4c566a
            selection_fg: Color::Rgb(236, 239, 244),   // #eceff4
            menu_bg: Color::Rgb(59, 66, 82),           // #3b4252
            input_bg: Color::Rgb(67, 76, 94),          // #434c5e
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            accent: Color::Cyan,

            success: Color::Green,
            warning: Color::Yellow,

            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            menu_bg: Color::Reset,
            input_bg: Color::Reset,
        }
    }

    // Style helpers for common UI patterns

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Block background
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Dropdown menu entry
    pub fn menu_item(&self) -> Style {
        Style::default().fg(self.fg).bg(self.menu_bg)
    }

    /// Greyed-out menu entry
    pub fn menu_disabled(&self) -> Style {
        Style::default()
            .fg(self.fg_dim)
            .bg(self.menu_bg)
            .add_modifier(Modifier::DIM)
    }

    /// Menu hint text next to a label
    pub fn menu_hint(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.menu_bg)
    }

    /// Text field contents
    pub fn input(&self) -> Style {
        Style::default().fg(self.fg).bg(self.input_bg)
    }

    /// Text field with keyboard focus
    pub fn input_focused(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Session indicator once logged in
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Session indicator while a login is pending
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let gruvbox = Theme::from_name(ThemeName::Gruvbox);
        assert_eq!(gruvbox.bg, Color::Rgb(40, 40, 40));

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert_eq!(transparent.bg, Color::Reset);
    }
}
