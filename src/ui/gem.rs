//! Spinning gem viewer — a small faceted stone whose frame is picked from
//! its spin angle, bobbing on a float offset.

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Facet frames, one turn of the stone.
const GEM_FRAMES: &[[&str; 4]] = &[
    ["  ▁▁▁  ", " ╱╲ ╱╲ ", " ╲ ╳ ╱ ", "  ╲│╱  "],
    ["  ▁▁▁  ", " ╱ ╲╱╲ ", " ╲ ╱╳╱ ", "  ╲│╱  "],
    ["  ▁▁▁  ", " ╱╲╱ ╲ ", " ╲╳╱ ╱ ", "  ╲│╱  "],
];

pub const GEM_WIDTH: u16 = 7;
pub const GEM_HEIGHT: u16 = 4;

/// Frame shown at `angle` radians.
pub fn frame_index(angle: f64) -> usize {
    let turns = (angle / TAU).rem_euclid(1.0);
    let idx = (turns * GEM_FRAMES.len() as f64) as usize;
    idx.min(GEM_FRAMES.len() - 1)
}

/// A gem drawn centred horizontally at the top of its area.
pub struct GemViewer {
    /// Spin angle in radians.
    pub angle: f64,
    /// Vertical float in rows; rounded when drawn.
    pub float: f64,
    pub style: Style,
}

impl Widget for GemViewer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < GEM_WIDTH || area.height < GEM_HEIGHT {
            return;
        }
        let frame = GEM_FRAMES[frame_index(self.angle)];
        let x = area.x + (area.width - GEM_WIDTH) / 2;
        let slack = area.height - GEM_HEIGHT;
        let y = area.y + (self.float.round().max(0.0) as u16).min(slack);

        for (i, row) in frame.iter().enumerate() {
            // The crown catches the light.
            let style = if i == 0 {
                self.style.add_modifier(Modifier::BOLD)
            } else {
                self.style
            };
            let line = Line::from(Span::styled(*row, style));
            buf.set_line(x, y + i as u16, &line, GEM_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_turn_visits_every_frame() {
        let seen: Vec<usize> = (0..12)
            .map(|i| frame_index(f64::from(i) * TAU / 12.0))
            .collect();
        assert_eq!(seen[0], 0);
        for f in 0..GEM_FRAMES.len() {
            assert!(seen.contains(&f));
        }
        assert_eq!(frame_index(TAU), 0);
        assert_eq!(frame_index(-0.01), GEM_FRAMES.len() - 1);
    }

    #[test]
    fn frames_share_one_size() {
        for frame in GEM_FRAMES {
            for row in frame {
                assert_eq!(row.chars().count(), usize::from(GEM_WIDTH));
            }
        }
    }

    #[test]
    fn float_stays_inside_the_area() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        GemViewer {
            angle: 0.0,
            float: 9.0,
            style: Style::default(),
        }
        .render(area, &mut buf);
        assert_eq!(buf[(3u16, 4u16)].symbol(), "╲");
    }
}
