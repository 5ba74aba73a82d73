//! Top navigation bar and the document scroll-progress bar under it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use super::layout::{nav_link_rects, NavLayout, Section};
use super::theme::Theme;

const BRAND: &str = "AUREA";

pub struct Navbar<'a> {
    pub theme: &'a Theme,
    /// Section at the top of the viewport.
    pub current: Section,
    /// Page has moved past the top; the bar gets a solid background.
    pub scrolled: bool,
    /// Lines in the bag.
    pub bag_count: usize,
}

impl<'a> Widget for Navbar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = self.theme;
        if area.height == 0 {
            return;
        }
        buf.set_style(area, t.nav_style(self.scrolled));
        let nav = NavLayout::from_area(area);

        let brand = Line::from(Span::styled(
            format!(" {BRAND}"),
            t.title_style().add_modifier(Modifier::ITALIC),
        ));
        buf.set_line(nav.brand.x, nav.brand.y, &brand, nav.brand.width);

        for (section, rect) in nav_link_rects(nav.links) {
            let line = Line::from(Span::styled(
                format!(" {} ", section.label()),
                t.nav_link_style(section == self.current),
            ));
            buf.set_line(rect.x, rect.y, &line, rect.width);
        }

        let badge = Line::from(vec![
            Span::styled(" ◈ Bag ", t.text_style()),
            Span::styled(self.bag_count.to_string(), t.price_style()),
        ]);
        buf.set_line(nav.cart_badge.x, nav.cart_badge.y, &badge, nav.cart_badge.width);

        let toggle = Line::from(Span::styled(format!(" {} ", t.toggle_icon()), t.accent_style()));
        buf.set_line(nav.theme_toggle.x, nav.theme_toggle.y, &toggle, nav.theme_toggle.width);
    }
}

/// One-row bar filled in proportion to the document scroll progress.
pub struct ScrollProgressBar<'a> {
    pub theme: &'a Theme,
    /// In `[0, 1]`.
    pub progress: f64,
}

/// Cells filled for `progress` across `width`.
pub fn filled_cells(progress: f64, width: u16) -> u16 {
    let p = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p * f64::from(width)).round() as u16
}

impl<'a> Widget for ScrollProgressBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let filled = filled_cells(self.progress, area.width);
        let line = Line::from(vec![
            Span::styled("━".repeat(usize::from(filled)), self.theme.progress_style()),
            Span::styled(
                "─".repeat(usize::from(area.width - filled)),
                self.theme.progress_track_style(),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;

    #[test]
    fn progress_fills_proportionally() {
        assert_eq!(filled_cells(0.0, 80), 0);
        assert_eq!(filled_cells(0.5, 80), 40);
        assert_eq!(filled_cells(1.0, 80), 80);
        assert_eq!(filled_cells(3.0, 80), 80);
        assert_eq!(filled_cells(f64::NAN, 80), 0);
    }

    #[test]
    fn badge_shows_line_count() {
        let theme = Theme::new(ThemeMode::Dark);
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        Navbar {
            theme: &theme,
            current: Section::Featured,
            scrolled: false,
            bag_count: 2,
        }
        .render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 0u16)].symbol().to_string()).collect();
        assert!(row.contains("AUREA"));
        assert!(row.contains("Bag 2"));
        assert!(row.contains("Collections"));
    }
}
