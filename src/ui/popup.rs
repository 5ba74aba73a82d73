//! Popup overlay widget for the settings menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for SettingsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Settings ")
            .title_style(t.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .style(t.base_style());

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = if i == self.state.settings_selected {
                (" ▸ ", t.selected_style())
            } else {
                ("   ", t.text_style())
            };

            let (value, value_style) = match item {
                SettingsItem::Toggle { get, .. } => {
                    if get(self.state) {
                        ("[ON]".to_string(), t.accent_style().add_modifier(Modifier::BOLD))
                    } else {
                        ("[OFF]".to_string(), t.muted_style())
                    }
                }
                SettingsItem::Cycle { value, .. } => (value(self.state), t.accent_style()),
            };

            // Label left, value right-aligned to the inner edge.
            let label_col = format!("{prefix}{:<22}", item.label());
            let value_width = usize::from(inner.width)
                .saturating_sub(label_col.chars().count() + 1)
                .max(1);
            lines.push(Line::from(vec![
                Span::styled(label_col, style),
                Span::styled(format!("{value:>value_width$} "), value_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            t.muted_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn popup_lists_every_setting_with_its_value() {
        let area = Rect::new(0, 0, 80, 24);
        let state = AppState::new(AppConfig::default(), area, Instant::now());
        let mut buf = Buffer::empty(area);
        SettingsPopup { state: &state }.render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        for item in SETTINGS_ITEMS {
            assert!(screen.contains(item.label()), "{}", item.label());
        }
        assert!(screen.contains("[OFF]"));
        assert!(screen.contains("$50,000"));
    }

    #[test]
    fn centered_rect_is_clamped() {
        let r = centered_fixed(44, 11, Rect::new(0, 0, 30, 8));
        assert_eq!(r, Rect::new(0, 0, 30, 8));
    }
}
