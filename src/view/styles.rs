//! Colour palette for the explore page.
//!
//! A [`Palette`] is derived from the configured [`Theme`] and a
//! [`ColorConfig`]. With colours disabled every style falls back to
//! modifiers only, so focus and hover stay distinguishable.

use crate::config::Theme;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colours on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colours off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

const GREEN: Color = Color::Rgb(0x4C, 0xAF, 0x50);
const LIGHT_TEXT: Color = Color::Rgb(0x21, 0x25, 0x29);
const LIGHT_MUTED: Color = Color::Rgb(0x6C, 0x75, 0x7D);
const LIGHT_BORDER: Color = Color::Rgb(0xCE, 0xD4, 0xDA);
const DARK_TEXT: Color = Color::Rgb(0xE6, 0xED, 0xF3);
const DARK_MUTED: Color = Color::Rgb(0x8B, 0x94, 0x9E);
const DARK_BORDER: Color = Color::Rgb(0x30, 0x36, 0x3D);
const RED: Color = Color::Rgb(0xDC, 0x35, 0x45);

/// Styles used by every explore widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page title.
    pub title: Style,
    /// Body text.
    pub text: Style,
    /// Secondary text (authors, dates, hints).
    pub muted: Style,
    /// Tags and the load-more footer.
    pub accent: Style,
    /// Unfocused borders.
    pub border: Style,
    /// Border of the keyboard-focused card or field.
    pub focus_border: Style,
    /// Title of the card under the mouse.
    pub hover_title: Style,
    /// Unselected chip.
    pub chip: Style,
    /// Selected chip.
    pub chip_selected: Style,
    /// Error messages.
    pub error: Style,
}

impl Palette {
    /// Palette for `theme`, honouring `colors`.
    pub fn new(theme: Theme, colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self::monochrome();
        }

        let (text, muted, border) = match theme {
            Theme::Light => (LIGHT_TEXT, LIGHT_MUTED, LIGHT_BORDER),
            Theme::Dark => (DARK_TEXT, DARK_MUTED, DARK_BORDER),
        };

        Self {
            title: Style::default().fg(text).add_modifier(Modifier::BOLD),
            text: Style::default().fg(text),
            muted: Style::default().fg(muted),
            accent: Style::default().fg(GREEN),
            border: Style::default().fg(border),
            focus_border: Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
            hover_title: Style::default().fg(text).add_modifier(Modifier::BOLD),
            chip: Style::default().fg(muted),
            chip_selected: Style::default()
                .fg(Color::White)
                .bg(GREEN)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(RED),
        }
    }

    fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            text: Style::default(),
            muted: Style::default().add_modifier(Modifier::DIM),
            accent: Style::default().add_modifier(Modifier::UNDERLINED),
            border: Style::default(),
            focus_border: Style::default().add_modifier(Modifier::BOLD),
            hover_title: Style::default().add_modifier(Modifier::BOLD),
            chip: Style::default(),
            chip_selected: Style::default().add_modifier(Modifier::REVERSED),
            error: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Theme::default(), ColorConfig::enabled())
    }
}

// ===== Tests =====
