//! Layout helpers — screen regions, page sections and the bounds of every
//! interactive element.
//!
//! Rendering and input handling both go through these functions, so the
//! rectangle a card is drawn in is exactly the one the pointer is tested
//! against.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::motion::Parallax;
use crate::core::pointer::ElementBounds;

/// Width of the slide-in bag panel.
pub const CART_PANEL_WIDTH: u16 = 46;
/// Rows between the bag panel's bottom edge and its checkout button.
const CHECKOUT_BOTTOM_MARGIN: u16 = 4;

// ───────────────────────────────────────── screen ────────────

/// Primary screen layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub nav_area: Rect,
    pub progress_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
    /// Present while the bag is open.
    pub cart_area: Option<Rect>,
}

impl AppLayout {
    pub fn from_area(area: Rect, cart_open: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // navbar
                Constraint::Length(1), // scroll progress
                Constraint::Min(3),    // page
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let (page_area, cart_area) = if cart_open {
            let panel_w = CART_PANEL_WIDTH.min(rows[2].width);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(panel_w)])
                .split(rows[2]);
            (cols[0], Some(cols[1]))
        } else {
            (rows[2], None)
        };

        Self {
            nav_area: rows[0],
            progress_area: rows[1],
            page_area,
            status_area: rows[3],
            cart_area,
        }
    }
}

/// Clickable pieces of the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLayout {
    pub brand: Rect,
    pub links: Rect,
    pub cart_badge: Rect,
    pub theme_toggle: Rect,
}

impl NavLayout {
    pub fn from_area(area: Rect) -> Self {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12), // brand
                Constraint::Min(0),     // section links
                Constraint::Length(10), // bag badge
                Constraint::Length(4),  // theme toggle
            ])
            .split(area);
        Self {
            brand: cols[0],
            links: cols[1],
            cart_badge: cols[2],
            theme_toggle: cols[3],
        }
    }
}

/// Sections reachable from the navbar, in display order.
pub const NAV_LINKS: &[Section] = &[
    Section::Featured,
    Section::Categories,
    Section::Lookbook,
    Section::About,
];

/// Clickable rect of each navbar link, left to right.  Links that don't fit
/// are dropped.
pub fn nav_link_rects(links: Rect) -> Vec<(Section, Rect)> {
    let mut out = Vec::new();
    let mut x = links.x;
    let end = links.x.saturating_add(links.width);
    for &section in NAV_LINKS {
        let w = section.label().chars().count() as u16 + 2;
        if x.saturating_add(w) > end {
            break;
        }
        out.push((section, Rect::new(x, links.y, w, 1)));
        x = x.saturating_add(w + 1);
    }
    out
}

// ───────────────────────────────────────── bag panel ─────────

/// Rows per bag line: name, material and price, quantity controls.
pub const CART_LINE_HEIGHT: u16 = 3;

/// Inside of the panel's border.
pub fn cart_inner(cart_area: Rect) -> Rect {
    Rect::new(
        cart_area.x.saturating_add(1),
        cart_area.y.saturating_add(1),
        cart_area.width.saturating_sub(2),
        cart_area.height.saturating_sub(2),
    )
}

/// Subtotal / shipping / total block just above the checkout button.
pub fn cart_totals_rect(cart_area: Rect) -> Rect {
    let inner = cart_inner(cart_area);
    let checkout = checkout_button_rect(cart_area);
    Rect::new(
        inner.x.saturating_add(1),
        checkout.y.saturating_sub(4).max(inner.y),
        inner.width.saturating_sub(2),
        4,
    )
}

/// The panel is tall enough for the totals block and the checkout button.
/// When it is not, neither is drawn nor hit-tested.
pub fn cart_footer_fits(cart_area: Rect) -> bool {
    let inner = cart_inner(cart_area);
    let checkout = checkout_button_rect(cart_area);
    checkout.width > 0
        && checkout.y >= inner.y.saturating_add(4)
        && checkout.y.saturating_add(checkout.height) <= inner.y.saturating_add(inner.height)
}

/// Area the bag lines scroll in.
pub fn cart_list_rect(cart_area: Rect) -> Rect {
    let inner = cart_inner(cart_area);
    let top = inner.y.saturating_add(1);
    let bottom = cart_totals_rect(cart_area).y.saturating_sub(1);
    Rect::new(
        inner.x.saturating_add(1),
        top,
        inner.width.saturating_sub(2),
        bottom.saturating_sub(top),
    )
}

/// Visible bag lines as `(line index, rect)`, windowed so `selected` stays
/// on screen.
pub fn cart_line_rects(cart_area: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let list = cart_list_rect(cart_area);
    let visible = usize::from(list.height / CART_LINE_HEIGHT);
    if visible == 0 {
        return Vec::new();
    }
    let first = selected.saturating_sub(visible - 1);
    (first..count.min(first + visible))
        .enumerate()
        .map(|(slot, index)| {
            let y = list.y + slot as u16 * CART_LINE_HEIGHT;
            (index, Rect::new(list.x, y, list.width, CART_LINE_HEIGHT))
        })
        .collect()
}

/// Buttons inside one bag line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineLayout {
    pub area: Rect,
    pub remove: Rect,
    pub minus: Rect,
    pub quantity: Rect,
    pub plus: Rect,
}

impl CartLineLayout {
    pub fn from_rect(area: Rect) -> Self {
        let controls_y = area.y.saturating_add(2);
        Self {
            area,
            remove: Rect::new(area.x.saturating_add(area.width.saturating_sub(3)), area.y, 3, 1),
            minus: Rect::new(area.x, controls_y, 3, 1),
            quantity: Rect::new(area.x.saturating_add(4), controls_y, 4, 1),
            plus: Rect::new(area.x.saturating_add(9), controls_y, 3, 1),
        }
    }
}

// ───────────────────────────────────────── page ──────────────

/// Sections of the storefront page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Categories,
    Featured,
    Lookbook,
    About,
    Footer,
}

impl Section {
    pub const ALL: &[Section] = &[
        Section::Hero,
        Section::Categories,
        Section::Featured,
        Section::Lookbook,
        Section::About,
        Section::Footer,
    ];

    /// Height in rows.
    pub fn height(self) -> u16 {
        match self {
            Section::Hero => 13,
            Section::Categories => 13,
            Section::Featured => 16,
            Section::Lookbook => 11,
            Section::About => 12,
            Section::Footer => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Categories => "Categories",
            Section::Featured => "Collections",
            Section::Lookbook => "Lookbook",
            Section::About => "About",
            Section::Footer => "Contact",
        }
    }

    pub fn index(self) -> usize {
        Section::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// First document row of the section.
    pub fn offset(self) -> usize {
        Section::ALL
            .iter()
            .take_while(|s| **s != self)
            .map(|s| usize::from(s.height()))
            .sum()
    }

    /// Section containing document row `row` (the last one past the end).
    pub fn at_row(row: f64) -> Section {
        Section::ALL
            .iter()
            .copied()
            .find(|s| row < (s.offset() + usize::from(s.height())) as f64)
            .unwrap_or(Section::Footer)
    }
}

/// Total page height in rows.
pub fn document_height() -> usize {
    Section::ALL.iter().map(|s| usize::from(s.height())).sum()
}

/// Top of `section` relative to the viewport top, for scroll position `scroll`.
pub fn section_top(section: Section, scroll: f64) -> f64 {
    section.offset() as f64 - scroll
}

/// Screen bounds of a rect given in a section's local coordinates.
pub fn section_bounds(page: Rect, section: Section, scroll: f64, local: Rect) -> ElementBounds {
    ElementBounds::new(
        f64::from(page.x) + f64::from(local.x),
        f64::from(page.y) + section_top(section, scroll) + f64::from(local.y),
        f64::from(local.width),
        f64::from(local.height),
    )
}

/// Screen bounds of a rect already in screen coordinates.
pub fn rect_bounds(rect: Rect) -> ElementBounds {
    ElementBounds::new(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    )
}

// ── section-local element rects ────────────────────────────────

/// "Explore Collection" call to action in the hero.
pub fn hero_cta_rect(width: u16) -> Rect {
    let w = 24.min(width);
    Rect::new(width.saturating_sub(w) / 2, 8, w, 3)
}

/// Evenly spaced cards across a section.
fn card_row(width: u16, count: u16, y: u16, height: u16) -> Vec<Rect> {
    const MARGIN: u16 = 2;
    const GAP: u16 = 2;
    let usable = width.saturating_sub(2 * MARGIN + GAP * count.saturating_sub(1));
    let card_w = usable / count.max(1);
    (0..count)
        .map(|i| Rect::new(MARGIN + i * (card_w + GAP), y, card_w, height))
        .collect()
}

/// The four category tilt cards.
pub fn category_card_rects(width: u16) -> Vec<Rect> {
    card_row(width, 4, 3, 9)
}

/// Vertical parallax of each featured card, in rows, from section progress
/// 0 to 1.
pub const FEATURED_PARALLAX: [Parallax; 3] = [
    Parallax::new(2.0, -2.0),
    Parallax::new(1.0, -3.0),
    Parallax::new(3.0, -1.0),
];
const FEATURED_CARD_TOP: f64 = 3.0;

/// The three featured product cards, displaced by the section's progress.
pub fn featured_card_rects(width: u16, progress: f64) -> Vec<Rect> {
    card_row(width, 3, 0, 10)
        .into_iter()
        .zip(FEATURED_PARALLAX)
        .map(|(r, parallax)| {
            let y = (FEATURED_CARD_TOP + parallax.at(progress)).round().max(0.0);
            Rect { y: y as u16, ..r }
        })
        .collect()
}

/// Checkout button inside the bag panel (screen coordinates).
pub fn checkout_button_rect(cart_area: Rect) -> Rect {
    let y = cart_area
        .y
        .saturating_add(cart_area.height.saturating_sub(CHECKOUT_BOTTOM_MARGIN));
    Rect::new(
        cart_area.x.saturating_add(3),
        y,
        cart_area.width.saturating_sub(6),
        3,
    )
}

/// Does the cell at (`col`, `row`) fall inside `area`?
pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_panel_takes_the_right_edge() {
        let area = Rect::new(0, 0, 120, 40);
        let closed = AppLayout::from_area(area, false);
        assert_eq!(closed.page_area.width, 120);
        assert_eq!(closed.page_area.height, 37);
        assert!(closed.cart_area.is_none());

        let open = AppLayout::from_area(area, true);
        let cart = open.cart_area.unwrap();
        assert_eq!(cart.width, CART_PANEL_WIDTH);
        assert_eq!(open.page_area.width + cart.width, 120);
        assert_eq!(cart.x, open.page_area.width);
    }

    #[test]
    fn sections_stack_without_gaps() {
        let mut expected = 0;
        for &s in Section::ALL {
            assert_eq!(s.offset(), expected);
            expected += usize::from(s.height());
        }
        assert_eq!(document_height(), expected);
        assert_eq!(Section::at_row(0.0), Section::Hero);
        assert_eq!(Section::at_row(13.0), Section::Categories);
        assert_eq!(Section::at_row(1e9), Section::Footer);
    }

    #[test]
    fn cards_fit_inside_the_section() {
        for width in [40u16, 80, 120, 200] {
            for r in category_card_rects(width)
                .into_iter()
                .chain(featured_card_rects(width, 0.5))
            {
                assert!(r.x + r.width <= width, "width {width}: {r:?}");
            }
        }
        let cards = category_card_rects(80);
        assert_eq!(cards.len(), 4);
        assert!(cards.windows(2).all(|w| w[0].x + w[0].width < w[1].x));
    }

    #[test]
    fn featured_cards_drift_with_progress() {
        let start = featured_card_rects(100, 0.0);
        let end = featured_card_rects(100, 1.0);
        assert_eq!(start.iter().map(|r| r.y).collect::<Vec<_>>(), vec![5, 4, 6]);
        assert_eq!(end.iter().map(|r| r.y).collect::<Vec<_>>(), vec![1, 0, 2]);
        let mid = featured_card_rects(100, 0.5);
        assert_eq!(mid[0].y, 3);
        for r in start.iter().chain(&end) {
            assert!(r.y + r.height <= Section::Featured.height());
        }
    }

    #[test]
    fn section_bounds_follow_scroll() {
        let page = Rect::new(0, 2, 100, 30);
        let local = Rect::new(10, 3, 20, 9);
        let b = section_bounds(page, Section::Categories, 5.0, local);
        assert_eq!(b.left, 10.0);
        assert_eq!(b.top, 2.0 + 13.0 - 5.0 + 3.0);
        assert_eq!(b.width, 20.0);
    }

    #[test]
    fn nav_links_drop_what_does_not_fit() {
        let wide = nav_link_rects(Rect::new(12, 0, 80, 1));
        assert_eq!(wide.len(), NAV_LINKS.len());
        assert_eq!(wide[0].0, Section::Featured);
        assert_eq!(wide[0].1.x, 12);
        assert!(wide.windows(2).all(|w| w[0].1.x + w[0].1.width < w[1].1.x));

        let narrow = nav_link_rects(Rect::new(12, 0, 14, 1));
        assert_eq!(narrow.len(), 1);
    }

    #[test]
    fn bag_lines_window_around_selection() {
        let panel = Rect::new(74, 2, 46, 37);
        let list = cart_list_rect(panel);
        let visible = usize::from(list.height / CART_LINE_HEIGHT);
        assert!(visible >= 2);

        let all = cart_line_rects(panel, 2, 0);
        assert_eq!(all.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1]);

        let many = cart_line_rects(panel, visible + 5, visible + 2);
        assert_eq!(many.len(), visible);
        assert_eq!(many.last().map(|(i, _)| *i), Some(visible + 2));
        for (_, r) in &many {
            assert!(r.y + r.height <= cart_totals_rect(panel).y);
        }
    }

    #[test]
    fn bag_line_buttons_do_not_overlap() {
        let line = CartLineLayout::from_rect(Rect::new(76, 4, 42, 3));
        assert!(line.minus.x + line.minus.width <= line.quantity.x);
        assert!(line.quantity.x + line.quantity.width <= line.plus.x);
        assert_eq!(line.remove.x + line.remove.width, 76 + 42);
        assert_eq!(line.minus.y, 6);
    }

    #[test]
    fn checkout_sits_at_panel_bottom() {
        let panel = Rect::new(74, 2, 46, 37);
        let b = checkout_button_rect(panel);
        assert_eq!(b.y + b.height, panel.y + panel.height - 1);
        assert!(point_in_rect(panel, b.x, b.y));
    }
}
