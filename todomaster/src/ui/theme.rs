//! Theme and styling for the TUI.
//!
//! Two palettes, light and dark, switched at runtime with `t`. Every style
//! helper hangs off [`Palette`] so a single redraw repaints the whole screen.

use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use todomaster_core::{DueStatus, Priority};

/// Colour scheme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light backgrounds, dark text (startup default).
    #[default]
    Light,
    /// Dark backgrounds, light text.
    Dark,
}

/// A theme name other than `light` or `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}, expected light or dark")]
pub struct UnknownTheme(String);

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label shown at the bottom of the sidebar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light Mode",
            Self::Dark => "Dark Mode",
        }
    }

    /// Colours for this theme.
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Named colours of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Task panel background.
    pub bg_primary: Color,
    /// Sidebar and dialog background.
    pub bg_secondary: Color,
    /// Status bar background.
    pub bg_tertiary: Color,
    /// Focus and selection colour.
    pub accent: Color,
    /// Main text.
    pub text_primary: Color,
    /// Metadata and hints.
    pub text_secondary: Color,
    /// Low priority, confirmations.
    pub success: Color,
    /// Medium priority, due today.
    pub warning: Color,
    /// High priority, overdue, errors.
    pub danger: Color,
    /// Unfocused panel borders.
    pub border: Color,
}

/// Light palette.
pub const LIGHT: Palette = Palette {
    bg_primary: Color::Rgb(0xf8, 0xfa, 0xfc),
    bg_secondary: Color::Rgb(0xff, 0xff, 0xff),
    bg_tertiary: Color::Rgb(0xf1, 0xf5, 0xf9),
    accent: Color::Rgb(0x3b, 0x82, 0xf6),
    text_primary: Color::Rgb(0x0f, 0x17, 0x2a),
    text_secondary: Color::Rgb(0x64, 0x74, 0x8b),
    success: Color::Rgb(0x10, 0xb9, 0x81),
    warning: Color::Rgb(0xf5, 0x9e, 0x0b),
    danger: Color::Rgb(0xef, 0x44, 0x44),
    border: Color::Rgb(0xe2, 0xe8, 0xf0),
};

/// Dark palette.
pub const DARK: Palette = Palette {
    bg_primary: Color::Rgb(0x0f, 0x17, 0x2a),
    bg_secondary: Color::Rgb(0x1e, 0x29, 0x3b),
    bg_tertiary: Color::Rgb(0x33, 0x41, 0x55),
    accent: Color::Rgb(0x60, 0xa5, 0xfa),
    text_primary: Color::Rgb(0xf8, 0xfa, 0xfc),
    text_secondary: Color::Rgb(0x94, 0xa3, 0xb8),
    success: Color::Rgb(0x10, 0xb9, 0x81),
    warning: Color::Rgb(0xf5, 0x9e, 0x0b),
    danger: Color::Rgb(0xef, 0x44, 0x44),
    border: Color::Rgb(0x33, 0x41, 0x55),
};

impl Palette {
    /// Background and text of the task panel.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_primary)
    }

    /// Background and text of the sidebar and dialogs.
    #[must_use]
    pub fn surface(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_secondary)
    }

    /// Normal text style.
    #[must_use]
    pub fn normal(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Dimmed text style (metadata, hints).
    #[must_use]
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Bold text style.
    #[must_use]
    pub fn bold(&self) -> Style {
        self.normal().add_modifier(Modifier::BOLD)
    }

    /// Highlighted text style (focused panel borders).
    #[must_use]
    pub fn highlighted(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Border of a panel, accented when focused.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.highlighted()
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Selected item style (in lists).
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg_secondary)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Text of a completed task.
    #[must_use]
    pub fn completed(&self) -> Style {
        self.dimmed().add_modifier(Modifier::CROSSED_OUT)
    }

    /// Marker color for a priority: danger, warning, success from High to Low.
    #[must_use]
    pub const fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.danger,
            Priority::Medium => self.warning,
            Priority::Low => self.success,
        }
    }

    /// Style for a due label.
    #[must_use]
    pub fn due(&self, status: DueStatus) -> Style {
        match status {
            DueStatus::Overdue(_) => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
            DueStatus::Today => Style::default().fg(self.warning).add_modifier(Modifier::BOLD),
            DueStatus::Upcoming(_) => self.dimmed(),
        }
    }

    /// Style for warning text in the status bar and dialogs.
    #[must_use]
    pub fn warning(&self) -> Style {
        Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
    }

    /// Style for confirmation text in the status bar.
    #[must_use]
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for the status bar background.
    #[must_use]
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_tertiary)
    }

    /// Style for panel titles (bold accent).
    #[must_use]
    pub fn panel_title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for open-task count badges.
    #[must_use]
    pub fn count_badge(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
    }
}
