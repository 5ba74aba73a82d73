//! Slide-in bag panel: lines with quantity controls, totals and the magnetic
//! checkout button.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::state::CartPanel;
use crate::core::cart::{CartLedger, CartLine, Totals};
use crate::core::catalog::format_price;

use super::layout::{
    cart_footer_fits, cart_inner, cart_line_rects, cart_totals_rect, checkout_button_rect,
    CartLineLayout,
};
use super::theme::Theme;

pub struct CartPanelView<'a> {
    pub theme: &'a Theme,
    pub ledger: &'a CartLedger,
    pub panel: &'a CartPanel,
}

/// Shipping cell text: zero is shown as "Free".
pub fn shipping_label(totals: &Totals) -> String {
    if totals.shipping == 0 {
        "Free".to_string()
    } else {
        format_price(totals.shipping)
    }
}

/// `left` and `right` on one row, `right` flush to `width`.
fn spread<'s>(left: Span<'s>, right: Span<'s>, width: u16) -> Line<'s> {
    let gap = usize::from(width).saturating_sub(left.width() + right.width());
    Line::from(vec![left, Span::raw(" ".repeat(gap)), right])
}

impl<'a> Widget for CartPanelView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = self.theme;
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" Your Bag ({} items) ", self.ledger.len()))
            .title_style(t.title_style())
            .title_bottom(Line::from(Span::styled(" Esc ", t.muted_style())).right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .style(t.base_style());
        block.render(area, buf);

        if self.ledger.is_empty() {
            let inner = cart_inner(area);
            let mid = inner.y + inner.height / 2;
            let empty = Paragraph::new(vec![
                Line::from(Span::styled("◈", t.accent_style())),
                Line::raw(""),
                Line::from(Span::styled("Your bag is empty", t.muted_style())),
            ])
            .alignment(Alignment::Center);
            empty.render(
                Rect::new(inner.x, mid.saturating_sub(1), inner.width, 3).intersection(inner),
                buf,
            );
            return;
        }

        let lines = self.ledger.lines();
        for (index, rect) in cart_line_rects(area, lines.len(), self.panel.selected) {
            if let Some(line) = lines.get(index) {
                self.render_line(line, index == self.panel.selected, rect, buf);
            }
        }

        if cart_footer_fits(area) {
            self.render_totals(cart_totals_rect(area), buf);
            self.render_checkout(checkout_button_rect(area), buf, area);
        }
    }
}

impl<'a> CartPanelView<'a> {
    fn render_line(&self, line: &CartLine, selected: bool, rect: Rect, buf: &mut Buffer) {
        let t = self.theme;
        let l = CartLineLayout::from_rect(rect);

        let name_style = if selected {
            t.selected_style()
        } else {
            t.heading_style()
        };
        let marker = if selected { "▸ " } else { "  " };
        let name = Line::from(Span::styled(format!("{marker}{}", line.name), name_style));
        buf.set_line(rect.x, rect.y, &name, rect.width.saturating_sub(l.remove.width + 1));
        buf.set_line(
            l.remove.x,
            l.remove.y,
            &Line::from(Span::styled(" ✕ ", t.danger_style())),
            l.remove.width,
        );

        let detail = Line::from(vec![
            Span::raw("  "),
            Span::styled(line.selected_material.label(), t.accent_style()),
            Span::styled(format!(" · {}", format_price(line.unit_price)), t.muted_style()),
        ]);
        buf.set_line(rect.x, rect.y + 1, &detail, rect.width);

        let controls = spread(
            Span::styled(format!("[-] {:^4} [+]", line.quantity), t.text_style()),
            Span::styled(format_price(line.line_total()), t.price_style()),
            rect.width,
        );
        buf.set_line(rect.x, l.minus.y, &controls, rect.width);
    }

    fn render_totals(&self, rect: Rect, buf: &mut Buffer) {
        let t = self.theme;
        let totals = self.ledger.compute_totals();
        let rows = [
            Line::from(Span::styled("─".repeat(usize::from(rect.width)), t.muted_style())),
            spread(
                Span::styled("Subtotal", t.muted_style()),
                Span::styled(format_price(totals.subtotal), t.muted_style()),
                rect.width,
            ),
            spread(
                Span::styled("Shipping", t.muted_style()),
                Span::styled(shipping_label(&totals), t.muted_style()),
                rect.width,
            ),
            spread(
                Span::styled("Total", t.heading_style()),
                Span::styled(format_price(totals.total), t.price_style()),
                rect.width,
            ),
        ];
        for (i, row) in rows.iter().enumerate() {
            if (i as u16) < rect.height {
                buf.set_line(rect.x, rect.y + i as u16, row, rect.width);
            }
        }
    }

    fn render_checkout(&self, rect: Rect, buf: &mut Buffer, panel: Rect) {
        let t = self.theme;
        let pull = self.panel.checkout.output();
        let button = displace(rect, pull.x, pull.y, drift_limit(rect).intersection(panel));
        let hovered = self.panel.checkout.is_hovered();

        Paragraph::new(Line::from("Proceed to Checkout"))
            .alignment(Alignment::Center)
            .style(t.button_style(hovered))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.button_style(hovered)),
            )
            .render(button, buf);
    }
}

/// Area the checkout button may drift in: a few cells around its rest rect.
fn drift_limit(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_sub(2),
        rect.y.saturating_sub(1),
        rect.width + 4,
        rect.height + 1,
    )
}

/// `rect` moved by a rounded (`dx`, `dy`) and kept inside `limit`.
pub fn displace(rect: Rect, dx: f64, dy: f64, limit: Rect) -> Rect {
    let shift = |pos: u16, len: u16, d: f64, lo: u16, hi: u16| -> u16 {
        let d = if d.is_finite() { d.round() } else { 0.0 };
        let max = f64::from(hi.saturating_sub(len).max(lo));
        (f64::from(pos) + d).clamp(f64::from(lo), max) as u16
    };
    Rect {
        x: shift(rect.x, rect.width, dx, limit.x, limit.x + limit.width),
        y: shift(rect.y, rect.height, dy, limit.y, limit.y + limit.height),
        ..rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ThemeMode};
    use crate::core::cart::ShippingPolicy;
    use crate::core::catalog;

    fn render(ledger: &CartLedger) -> (Rect, Buffer) {
        let theme = Theme::new(ThemeMode::Dark);
        let area = Rect::new(0, 0, 46, 30);
        let mut buf = Buffer::empty(area);
        let panel = CartPanel::mount(&AppConfig::default());
        CartPanelView {
            theme: &theme,
            ledger,
            panel: &panel,
        }
        .render(area, &mut buf);
        (area, buf)
    }

    fn text(buf: &Buffer, area: Rect) -> String {
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn free_shipping_reads_free() {
        let free = Totals {
            subtotal: 60_000,
            shipping: 0,
            total: 60_000,
        };
        assert_eq!(shipping_label(&free), "Free");
        let paid = Totals {
            subtotal: 100,
            shipping: 500,
            total: 600,
        };
        assert_eq!(shipping_label(&paid), "$500");
    }

    #[test]
    fn renders_lines_and_totals() {
        let mut ledger = CartLedger::new(ShippingPolicy::default());
        ledger.add_or_seed(catalog::demo_cart_lines());
        let (area, buf) = render(&ledger);
        let screen = text(&buf, area);
        assert!(screen.contains("Your Bag (2 items)"));
        assert!(screen.contains("Eternal Solitaire"));
        assert!(screen.contains("Midnight Pendant"));
        assert!(screen.contains("$20,900"));
        assert!(screen.contains("$21,400"));
        assert!(screen.contains("Proceed to Checkout"));
    }

    #[test]
    fn empty_bag_has_no_totals() {
        let ledger = CartLedger::new(ShippingPolicy::default());
        let (area, buf) = render(&ledger);
        let screen = text(&buf, area);
        assert!(screen.contains("Your bag is empty"));
        assert!(!screen.contains("Subtotal"));
        assert!(!screen.contains("Checkout"));
    }

    #[test]
    fn short_panels_drop_the_footer() {
        let theme = Theme::new(ThemeMode::Dark);
        let panel = CartPanel::mount(&AppConfig::default());
        let mut ledger = CartLedger::new(ShippingPolicy::default());
        ledger.add_or_seed(catalog::demo_cart_lines());

        for height in 0..=12 {
            for width in [5, 20, 46] {
                let area = Rect::new(0, 0, width, height);
                let mut buf = Buffer::empty(area);
                CartPanelView {
                    theme: &theme,
                    ledger: &ledger,
                    panel: &panel,
                }
                .render(area, &mut buf);

                let screen = text(&buf, area);
                if height < 9 {
                    assert!(!screen.contains("Total"), "{width}x{height}");
                }
                if height >= 9 && width == 46 {
                    assert!(screen.contains("Proceed to Checkout"), "{width}x{height}");
                }
            }
        }

        let empty = CartLedger::new(ShippingPolicy::default());
        for height in 0..=4 {
            let area = Rect::new(0, 0, 46, height);
            let mut buf = Buffer::empty(area);
            CartPanelView {
                theme: &theme,
                ledger: &empty,
                panel: &panel,
            }
            .render(area, &mut buf);
        }
    }

    #[test]
    fn displacement_is_clamped() {
        let rect = Rect::new(10, 10, 20, 3);
        let limit = Rect::new(8, 9, 24, 4);
        assert_eq!(displace(rect, 0.4, -0.4, limit), rect);
        let far = displace(rect, 50.0, 50.0, limit);
        assert_eq!((far.x, far.y), (12, 10));
        let back = displace(rect, -50.0, -50.0, limit);
        assert_eq!((back.x, back.y), (8, 9));
    }
}
