//! Color themes.
//!
//! A theme is a TOML document with a `name` and a `[colors]` table of hex
//! colors. Two themes are built in (`catppuccin-mocha`, the default, and
//! `catppuccin-latte`); any other file with the same keys can be loaded with
//! [`Theme::from_file`].
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#181825"        # optional
//! tab_active = "#cba6f7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! status_todo = "#9399b2"
//! status_in_progress = "#fab387"
//! status_done = "#a6e3a1"
//! priority_low = "#94e2d5"
//! priority_medium = "#f9e2af"
//! priority_high = "#f38ba8"
//! notify_success = "#a6e3a1"
//! notify_error = "#f38ba8"
//! modal_border = "#89b4fa"
//! ```

use crate::domain::{Priority, Result, TaskStatus, TaskdeckError};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,
    /// Active tab title.
    pub tab_active: String,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary info, placeholders.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub status_todo: String,
    pub status_in_progress: String,
    pub status_done: String,

    pub priority_low: String,
    pub priority_medium: String,
    pub priority_high: String,

    pub notify_success: String,
    pub notify_error: String,

    pub modal_border: String,
}

impl Theme {
    /// Loads a built-in theme by name; `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Theme`] if the file cannot be read or is not a
    /// valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            TaskdeckError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| TaskdeckError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Converts a hex color (`#rrggbb` or `rrggbb`) to a terminal color.
    ///
    /// Anything unparsable becomes [`Color::Reset`], leaving the terminal's
    /// own color in place.
    #[must_use]
    pub fn color(hex: &str) -> Color {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Color::Reset;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
            _ => Color::Reset,
        }
    }

    #[must_use]
    pub fn fg(hex: &str) -> Style {
        Style::default().fg(Self::color(hex))
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Self::fg(&self.colors.text_normal)
    }

    #[must_use]
    pub fn dim(&self) -> Style {
        Self::fg(&self.colors.text_dim)
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Self::fg(&self.colors.border)
    }

    #[must_use]
    pub fn selection(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.selection_fg))
            .bg(Self::color(&self.colors.selection_bg))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn match_highlight(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.match_highlight_fg))
            .bg(Self::color(&self.colors.match_highlight_bg))
    }

    #[must_use]
    pub fn header(&self) -> Style {
        let style = Self::fg(&self.colors.header_fg).add_modifier(Modifier::BOLD);
        match &self.colors.header_bg {
            Some(bg) => style.bg(Self::color(bg)),
            None => style,
        }
    }

    #[must_use]
    pub fn status(&self, status: TaskStatus) -> Style {
        Self::fg(match status {
            TaskStatus::Todo => &self.colors.status_todo,
            TaskStatus::InProgress => &self.colors.status_in_progress,
            TaskStatus::Done => &self.colors.status_done,
        })
    }

    #[must_use]
    pub fn priority(&self, priority: Priority) -> Style {
        Self::fg(match priority {
            Priority::Low => &self.colors.priority_low,
            Priority::Medium => &self.colors.priority_medium,
            Priority::High => &self.colors.priority_high,
        })
        .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    /// The built-in `catppuccin-mocha` theme.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme file fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("bundled catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        assert_eq!(latte.name, "catppuccin-latte");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_colors_convert_to_rgb() {
        assert_eq!(Theme::color("#cdd6f4"), Color::Rgb(0xcd, 0xd6, 0xf4));
        assert_eq!(Theme::color("1e1e2e"), Color::Rgb(0x1e, 0x1e, 0x2e));
        assert_eq!(Theme::color("#zzz"), Color::Reset);
        assert_eq!(Theme::color("#gg0000"), Color::Reset);
    }

    #[test]
    fn loads_theme_file() {
        let builtin = include_str!("../../themes/catppuccin-latte.toml");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(builtin.replace("catppuccin-latte", "custom").as_bytes())
            .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");

        let err = Theme::from_file(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, TaskdeckError::Theme(_)));
    }
}
