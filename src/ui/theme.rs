//! Colour palette and text styles for both presentation modes.
//!
//! A [`Theme`] is built from the active [`ThemeMode`] and handed to every
//! widget that draws; nothing reads the mode from a global.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: Color,
    surface: Color,
    foreground: Color,
    muted: Color,
    gold: Color,
    rose: Color,
    danger: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(0x0A, 0x0A, 0x0A),
    surface: Color::Rgb(0x1A, 0x1A, 0x2E),
    foreground: Color::Rgb(0xE8, 0xE8, 0xE8),
    muted: Color::Rgb(0x8A, 0x8A, 0x8A),
    gold: Color::Rgb(0xC9, 0xA9, 0x6E),
    rose: Color::Rgb(0xB7, 0x6E, 0x79),
    danger: Color::Rgb(0xF8, 0x71, 0x71),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(0xFA, 0xF8, 0xF5),
    surface: Color::Rgb(0xF0, 0xEB, 0xE3),
    foreground: Color::Rgb(0x1A, 0x1A, 0x2E),
    muted: Color::Rgb(0x6B, 0x6B, 0x6B),
    gold: Color::Rgb(0xA8, 0x84, 0x4A),
    rose: Color::Rgb(0x9E, 0x55, 0x60),
    danger: Color::Rgb(0xC0, 0x39, 0x2B),
};

/// Central theme — change colours here and they propagate everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    mode: ThemeMode,
    palette: Palette,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let palette = match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        };
        Self { mode, palette }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Glyph for the theme toggle.
    pub fn toggle_icon(&self) -> &'static str {
        match self.mode {
            ThemeMode::Dark => "☾",
            ThemeMode::Light => "☀",
        }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn base_style(&self) -> Style {
        Style::default()
            .bg(self.palette.background)
            .fg(self.palette.foreground)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.palette.foreground)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.palette.gold)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.palette.foreground)
            .add_modifier(Modifier::BOLD)
    }

    pub fn eyebrow_style(&self) -> Style {
        Style::default()
            .fg(self.palette.gold)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn price_style(&self) -> Style {
        Style::default()
            .fg(self.palette.gold)
            .add_modifier(Modifier::BOLD)
    }

    // ── glass cards ────────────────────────────────────────────
    pub fn card_style(&self) -> Style {
        Style::default()
            .bg(self.palette.surface)
            .fg(self.palette.foreground)
    }

    pub fn card_border_style(&self, hovered: bool) -> Style {
        if hovered {
            Style::default()
                .fg(self.palette.gold)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.muted)
        }
    }

    // ── buttons ────────────────────────────────────────────────
    pub fn button_style(&self, hovered: bool) -> Style {
        let bg = if hovered {
            self.palette.rose
        } else {
            self.palette.gold
        };
        Style::default()
            .bg(bg)
            .fg(self.palette.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger_style(&self) -> Style {
        Style::default().fg(self.palette.danger)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_style(&self, scrolled: bool) -> Style {
        if scrolled {
            Style::default()
                .bg(self.palette.surface)
                .fg(self.palette.foreground)
        } else {
            self.base_style()
        }
    }

    pub fn nav_link_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.palette.gold)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            self.muted_style()
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.palette.gold)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.gold)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.palette.surface)
            .fg(self.palette.gold)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .bg(self.palette.surface)
            .fg(self.palette.muted)
    }

    pub fn progress_style(&self) -> Style {
        Style::default().fg(self.palette.gold)
    }

    pub fn progress_track_style(&self) -> Style {
        Style::default().fg(self.palette.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_use_distinct_palettes() {
        let dark = Theme::new(ThemeMode::Dark);
        let light = Theme::new(ThemeMode::Light);
        assert_ne!(dark.base_style(), light.base_style());
        assert_eq!(dark.toggle_icon(), "☾");
        assert_eq!(light.mode(), ThemeMode::Light);
    }
}
