//! The scrolling storefront page.
//!
//! The whole document is drawn into an off-screen buffer one section at a
//! time, then the rows under the viewport are copied to the frame.  Sections
//! stay blank until their visibility latch fires, then slide up into place.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::state::AppState;
use crate::core::catalog::{self, format_price, Category, LOOKBOOK};
use crate::core::motion::{ease_out_cubic, float_offset, spin_angle, Parallax};
use crate::core::pointer::TiltAngles;

use super::cart_panel::displace;
use super::gem::GemViewer;
use super::layout::{self, document_height, Section};
use super::theme::Theme;

/// Duration of the reveal slide, seconds.
const REVEAL_SECS: f64 = 0.8;
/// Rows a section rises while it reveals.
const REVEAL_SLIDE_ROWS: f64 = 3.0;
/// Drift of the about-section columns across the section's progress.
const ABOUT_PARALLAX: Parallax = Parallax::new(1.0, -1.0);

const ABOUT_VALUES: [(&str, &str); 3] = [
    (
        "Uncompromising Quality",
        "Each gemstone is hand-selected by our master jewelers.",
    ),
    (
        "Crafted with Passion",
        "Traditional techniques meet modern innovation in every piece.",
    ),
    (
        "Legacy of Excellence",
        "Over 130 years of jewelry for your most cherished moments.",
    ),
];

pub struct Storefront<'a> {
    pub state: &'a AppState,
    /// Copyright year for the footer.
    pub year: i32,
}

impl<'a> Widget for Storefront<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        buf.set_style(area, theme.base_style());
        if area.width == 0 || area.height == 0 {
            return;
        }

        let doc_area = Rect::new(0, 0, area.width, document_height() as u16);
        let mut doc = Buffer::empty(doc_area);
        doc.set_style(doc_area, theme.base_style());

        for &section in Section::ALL {
            let rect = Rect::new(0, section.offset() as u16, area.width, section.height());
            self.render_section(section, rect, &mut doc);
        }

        let scroll = self.state.page_scroll() as i32;
        blit(&doc, buf, area, i32::from(area.x), i32::from(area.y) - scroll);
    }
}

// ───────────────────────────────────────── sections ──────────

impl<'a> Storefront<'a> {
    fn render_section(&self, section: Section, rect: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let Some(revealed_at) = self.state.reveal(section).revealed_at else {
            placeholder(theme, rect, buf);
            return;
        };

        let p = reveal_progress(self.state.elapsed - revealed_at);
        let slide = (((1.0 - p) * REVEAL_SLIDE_ROWS).round() as u16).min(rect.height);
        let content = Rect {
            y: rect.y + slide,
            height: rect.height - slide,
            ..rect
        };

        match section {
            Section::Hero => self.render_hero(content, buf),
            Section::Categories => self.render_categories(content, buf),
            Section::Featured => self.render_featured(content, buf),
            Section::Lookbook => self.render_lookbook(content, buf),
            Section::About => self.render_about(content, buf),
            Section::Footer => self.render_footer(content, buf),
        }

        if p < 0.6 {
            buf.set_style(rect, Style::default().add_modifier(Modifier::DIM));
        }
    }

    fn render_hero(&self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        let elapsed = self.state.elapsed;

        if area.width >= 60 {
            for x in [area.x + 4, area.x + area.width - 11] {
                GemViewer {
                    angle: spin_angle(elapsed, 0.5),
                    float: float_offset(elapsed, 1.5, 0.5) + 0.5,
                    style: t.accent_style(),
                }
                .render(local(area, Rect::new(x - area.x, 2, 7, 5)), buf);
            }
        }

        put(buf, area, 1, Line::from(Span::styled("✦ Est. 1895", t.eyebrow_style())));
        put(buf, area, 3, Line::from(Span::styled("Timeless", t.title_style())));
        put(buf, area, 4, Line::from(Span::styled("Elegance", t.heading_style())));
        put(
            buf,
            area,
            6,
            Line::from(Span::styled(
                "Handcrafted jewelry where artistry meets eternal beauty",
                t.muted_style(),
            )),
        );

        let rest = local(area, layout::hero_cta_rect(area.width));
        let pull = self.state.hero_cta.output();
        let limit = Rect::new(
            rest.x.saturating_sub(4),
            rest.y.saturating_sub(1),
            rest.width + 8,
            rest.height + 2,
        )
        .intersection(area);
        let hovered = self.state.hero_cta.is_hovered();
        button(t, "Explore Collection ›", hovered)
            .render(displace(rest, pull.x, pull.y, limit).intersection(area), buf);

        let mut stats = Vec::new();
        for (value, label) in [
            ("130+", "Years of Excellence"),
            ("50K+", "Happy Clients"),
            ("100%", "Handcrafted"),
        ] {
            if !stats.is_empty() {
                stats.push(Span::raw("    "));
            }
            stats.push(Span::styled(value, t.price_style()));
            stats.push(Span::styled(format!(" {label}"), t.muted_style()));
        }
        put(buf, area, 11, Line::from(stats));

        let cue = if float_offset(elapsed, 3.0, 1.0) > 0.0 { "↓" } else { " " };
        put(
            buf,
            area,
            12,
            Line::from(Span::styled(format!("SCROLL {cue}"), t.muted_style())),
        );
    }

    fn render_categories(&self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        heading(t, buf, area, "Explore", "Shop by Category");

        let max_deg = self.state.config.tilt.max_angle_deg;
        let cards = layout::category_card_rects(area.width);
        for ((category, rect), model) in Category::ALL
            .iter()
            .zip(cards)
            .zip(&self.state.category_cards)
        {
            let card = local(area, rect);
            let hovered = model.is_hovered();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(t.card_border_style(hovered))
                .style(t.card_style());
            let inner = block.inner(card);
            block.render(card, buf);

            let (dx, dy) = tilt_shift(model.output(), max_deg);
            let face = category_face(t, *category, inner.width, inner.height);
            blit(
                &face,
                buf,
                inner,
                i32::from(inner.x) + i32::from(dx),
                i32::from(inner.y) + i32::from(dy),
            );
        }
    }

    fn render_featured(&self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        let elapsed = self.state.elapsed;
        heading(t, buf, area, "Curated Selection", "Featured Collection");

        let progress = self.state.featured_progress.progress();
        let cards = layout::featured_card_rects(area.width, progress);
        for (i, (product, rect)) in catalog::featured().zip(cards).enumerate() {
            let card = local(area, rect);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(t.card_border_style(false))
                .style(t.card_style());
            let inner = block.inner(card);
            block.render(card, buf);

            GemViewer {
                angle: spin_angle(elapsed, product.category.spin_speed()),
                // Offset phases so the stones don't bob in lockstep.
                float: float_offset(elapsed + i as f64, 1.5, 0.5) + 0.5,
                style: t.accent_style(),
            }
            .render(Rect { height: 5, ..inner }.intersection(inner), buf);

            let materials: Vec<&str> = product.materials.iter().map(|m| m.label()).collect();
            put(buf, inner, 5, Line::from(Span::styled(product.name, t.heading_style())));
            put(
                buf,
                inner,
                6,
                Line::from(Span::styled(materials.join(" · "), t.muted_style())),
            );
            put(
                buf,
                inner,
                7,
                Line::from(Span::styled(format_price(product.price), t.price_style())),
            );
        }
    }

    fn render_lookbook(&self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        heading(t, buf, area, "Editorial", "The Lookbook");

        let row = local(area, Rect::new(2, 3, area.width.saturating_sub(4), 7));
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1); 3])
            .spacing(2)
            .split(row);

        for (look, col) in LOOKBOOK.iter().zip(cols.iter()) {
            let pieces: Vec<_> = look.products.iter().filter_map(|id| catalog::product(id)).collect();
            let mut lines: Vec<Line> = pieces
                .iter()
                .map(|p| {
                    Line::from(vec![
                        Span::styled("· ", t.accent_style()),
                        Span::styled(p.name, t.text_style()),
                    ])
                })
                .collect();
            let total: u64 = pieces.iter().map(|p| p.price).sum();
            lines.push(Line::from(vec![
                Span::styled("The look ", t.muted_style()),
                Span::styled(format_price(total), t.price_style()),
            ]));

            Paragraph::new(lines)
                .block(
                    Block::default()
                        .title(format!(" {} ", look.title))
                        .title_style(t.title_style())
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(t.card_border_style(false))
                        .style(t.card_style()),
                )
                .render(*col, buf);
        }
    }

    fn render_about(&self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        heading(t, buf, area, "Our Story", "A Legacy of Brilliance");
        put(
            buf,
            area,
            2,
            Line::from(Span::styled(
                "Since 1895, every piece has been made by hand in our atelier.",
                t.muted_style(),
            )),
        );

        let drift = ABOUT_PARALLAX.at(self.state.about_progress.progress()).round() as i32;
        let top = (5 + drift).max(0) as u16;
        let row = local(area, Rect::new(2, top, area.width.saturating_sub(4), 6));
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1); 3])
            .spacing(3)
            .split(row);

        for ((title, description), col) in ABOUT_VALUES.iter().zip(cols.iter()) {
            Paragraph::new(vec![
                Line::from(Span::styled(*title, t.title_style())),
                Line::raw(""),
                Line::from(Span::styled(*description, t.muted_style())),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(*col, buf);
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let t = &self.state.theme;
        put(
            buf,
            area,
            0,
            Line::from(Span::styled("─".repeat(usize::from(area.width)), t.muted_style())),
        );
        put(
            buf,
            area,
            1,
            Line::from(vec![
                Span::styled("AUREA", t.title_style()),
                Span::styled(" · Fine jewelry since 1895", t.muted_style()),
            ]),
        );
        let links: Vec<&str> = layout::NAV_LINKS.iter().map(|s| s.label()).collect();
        put(
            buf,
            area,
            2,
            Line::from(Span::styled(links.join("  ·  "), t.muted_style())),
        );
        put(
            buf,
            area,
            3,
            Line::from(Span::styled(
                format!("© {} Aurea. All rights reserved.", self.year),
                t.muted_style(),
            )),
        );
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Eased reveal progress `age` seconds after the latch fired.
pub fn reveal_progress(age: f64) -> f64 {
    ease_out_cubic(age / REVEAL_SECS)
}

/// Cells a tilted card's face leans toward the pointer: up to two columns
/// and one row.
pub fn tilt_shift(angles: TiltAngles, max_deg: f64) -> (i16, i16) {
    if max_deg.is_nan() || max_deg <= 0.0 {
        return (0, 0);
    }
    let dx = (angles.rotate_y / max_deg * 2.0).round().clamp(-2.0, 2.0);
    let dy = (-angles.rotate_x / max_deg).round().clamp(-1.0, 1.0);
    (dx as i16, dy as i16)
}

/// A section-local rect placed inside `area`, clipped to it.
fn local(area: Rect, r: Rect) -> Rect {
    Rect::new(area.x + r.x, area.y + r.y, r.width, r.height).intersection(area)
}

/// Centred single line at `row` of `area`, skipped when out of range.
fn put(buf: &mut Buffer, area: Rect, row: u16, line: Line) {
    if row >= area.height {
        return;
    }
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, area.y + row, area.width, 1), buf);
}

fn heading(t: &Theme, buf: &mut Buffer, area: Rect, eyebrow: &str, title: &str) {
    put(buf, area, 0, Line::from(Span::styled(eyebrow.to_uppercase(), t.eyebrow_style())));
    put(buf, area, 1, Line::from(Span::styled(title.to_string(), t.heading_style())));
}

fn placeholder(t: &Theme, rect: Rect, buf: &mut Buffer) {
    put(
        buf,
        rect,
        rect.height / 2,
        Line::from(Span::styled("· · ·", t.muted_style())),
    );
}

fn button<'t>(t: &Theme, label: &'t str, hovered: bool) -> Paragraph<'t> {
    Paragraph::new(Line::from(label))
        .alignment(Alignment::Center)
        .style(t.button_style(hovered))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(t.button_style(hovered)),
        )
}

/// Category card contents, drawn at the origin so they can be shifted.
fn category_face(t: &Theme, category: Category, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut face = Buffer::empty(area);
    face.set_style(area, t.card_style());

    let icon = match category {
        Category::Rings => "◯",
        Category::Necklaces => "⌣",
        Category::Earrings => "• •",
        Category::Bracelets => "◎",
    };
    Paragraph::new(vec![
        Line::from(Span::styled(icon, t.accent_style())),
        Line::raw(""),
        Line::from(Span::styled(category.label(), t.heading_style())),
        Line::from(Span::styled(category.blurb(), t.muted_style())),
        Line::raw(""),
        Line::from(Span::styled(
            format!("{} pieces →", category.piece_count()),
            t.accent_style(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(area, &mut face);
    face
}

/// Copy `src` into `dst` with its origin at (`x`, `y`), keeping only cells
/// that land inside `clip`.
fn blit(src: &Buffer, dst: &mut Buffer, clip: Rect, x: i32, y: i32) {
    let s = src.area;
    for sy in s.y..s.y + s.height {
        let ty = y + i32::from(sy - s.y);
        if ty < i32::from(clip.y) || ty >= i32::from(clip.y + clip.height) {
            continue;
        }
        for sx in s.x..s.x + s.width {
            let tx = x + i32::from(sx - s.x);
            if tx < i32::from(clip.x) || tx >= i32::from(clip.x + clip.width) {
                continue;
            }
            if let (Some(cell), Some(target)) = (src.cell((sx, sy)), dst.cell_mut((tx as u16, ty as u16))) {
                *target = cell.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::config::AppConfig;

    fn screen(buf: &Buffer) -> String {
        let a = buf.area;
        (a.y..a.y + a.height)
            .map(|y| {
                (a.x..a.x + a.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn reveal_eases_in_over_its_duration() {
        assert_eq!(reveal_progress(0.0), 0.0);
        assert!(reveal_progress(0.4) > 0.5);
        assert_eq!(reveal_progress(REVEAL_SECS), 1.0);
        assert_eq!(reveal_progress(10.0), 1.0);
    }

    #[test]
    fn tilt_leans_toward_the_pointer() {
        let right_top = TiltAngles {
            rotate_x: 15.0,
            rotate_y: 15.0,
        };
        assert_eq!(tilt_shift(right_top, 15.0), (2, -1));
        let rest = TiltAngles {
            rotate_x: 0.0,
            rotate_y: 0.0,
        };
        assert_eq!(tilt_shift(rest, 15.0), (0, 0));
        assert_eq!(tilt_shift(right_top, 0.0), (0, 0));
    }

    #[test]
    fn blit_clips_to_target() {
        let src_area = Rect::new(0, 0, 3, 3);
        let mut src = Buffer::empty(src_area);
        src.set_string(0, 0, "abc", Style::default());
        src.set_string(0, 2, "xyz", Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 5, 5));
        blit(&src, &mut dst, Rect::new(1, 1, 3, 3), 2, 0);
        assert_eq!(dst[(2u16, 0u16)].symbol(), " ");
        assert_eq!(dst[(2u16, 2u16)].symbol(), "x");
        assert_eq!(dst[(3u16, 2u16)].symbol(), "y");
        assert_eq!(dst[(4u16, 2u16)].symbol(), " ");
    }

    #[test]
    fn page_shows_rows_under_the_viewport() {
        let start = Instant::now();
        let area = Rect::new(0, 0, 100, 30);
        let mut state = AppState::new(AppConfig::default(), area, start);
        // Let the hero finish its reveal.
        state.advance_frame(start + Duration::from_secs(2));

        let page = state.layout().page_area;
        let mut buf = Buffer::empty(page);
        Storefront {
            state: &state,
            year: 2026,
        }
        .render(page, &mut buf);
        let top = screen(&buf);
        assert!(top.contains("Timeless"));
        assert!(top.contains("Explore Collection"));
        assert!(!top.contains("All rights reserved"));

        state.scroll.set_target(state.scroll.max_target());
        state.advance_frame(start + Duration::from_secs(4));
        state.advance_frame(start + Duration::from_secs(6));
        let mut buf = Buffer::empty(page);
        Storefront {
            state: &state,
            year: 2026,
        }
        .render(page, &mut buf);
        let bottom = screen(&buf);
        assert!(bottom.contains("© 2026 Aurea"));
        assert!(!bottom.contains("Timeless"));
    }

    #[test]
    fn unrevealed_sections_are_placeholders() {
        let area = Rect::new(0, 0, 100, 20);
        let state = AppState::new(AppConfig::default(), area, Instant::now());
        assert!(state.reveal(Section::Lookbook).revealed_at.is_none());

        let doc_area = Rect::new(0, 0, 100, document_height() as u16);
        let mut doc = Buffer::empty(doc_area);
        let front = Storefront {
            state: &state,
            year: 2026,
        };
        let rect = Rect::new(
            0,
            Section::Lookbook.offset() as u16,
            100,
            Section::Lookbook.height(),
        );
        front.render_section(Section::Lookbook, rect, &mut doc);
        let text = screen(&doc);
        assert!(text.contains("· · ·"));
        assert!(!text.contains("The Lookbook"));
    }
}
