//! Row-level smooth page scroll with exponential ease-out.
//!
//! Scroll input moves a whole-row *target* immediately.  The displacement
//! between the old and new target is injected as an offset that decays
//! toward zero every frame, so the page glides instead of jumping.

/// Reference frame rate the `speed` factor is expressed in.
const REFERENCE_FPS: f64 = 60.0;
/// Offsets smaller than this are considered settled.
const SETTLE_ROWS: f64 = 0.05;

/// Row-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Logical scroll position (first document row at the viewport top).
    target: usize,
    /// Largest valid target.
    max_target: usize,
    /// Displacement of the displayed position from the target.  Positive =
    /// display still above the target (scrolling down).
    row_offset: f64,
    /// Damping: `offset *= (1 - speed)` per reference frame.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            target: 0,
            max_target: 0,
            row_offset: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Update the scrollable range; the target is clamped into it.
    pub fn set_max_target(&mut self, max_target: usize) {
        self.max_target = max_target;
        if self.target > max_target {
            self.set_target(max_target);
        }
    }

    /// Jump the logical position, keeping the display continuous.
    pub fn set_target(&mut self, target: usize) {
        let target = target.min(self.max_target);
        if target != self.target {
            let delta = target as f64 - self.target as f64;
            self.row_offset += delta;
            self.target = target;
        }
    }

    /// Move the target by `delta` rows.
    pub fn scroll_by(&mut self, delta: i64) {
        let next = (self.target as i64).saturating_add(delta).max(0) as usize;
        self.set_target(next);
    }

    /// Decay the offset toward zero.  Call once per frame.
    pub fn tick(&mut self, dt: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        self.row_offset *= (1.0 - self.speed).powf(dt * REFERENCE_FPS);
        if self.row_offset.abs() < SETTLE_ROWS {
            self.row_offset = 0.0;
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    #[cfg(test)]
    pub fn max_target(&self) -> usize {
        self.max_target
    }

    /// Displayed scroll position in (fractional) rows.
    pub fn position(&self) -> f64 {
        (self.target as f64 - self.row_offset).max(0.0)
    }

    /// True while the display hasn't caught up with the target.
    pub fn is_animating(&self) -> bool {
        self.row_offset != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_moves_now_display_follows() {
        let mut s = SmoothScroll::new(0.3);
        s.set_max_target(100);
        s.scroll_by(10);
        assert_eq!(s.target(), 10);
        assert_eq!(s.position(), 0.0);
        assert!(s.is_animating());

        let mut last = s.position();
        for _ in 0..120 {
            s.tick(1.0 / 60.0);
            assert!(s.position() >= last);
            last = s.position();
        }
        assert!(!s.is_animating());
        assert_eq!(s.position(), 10.0);
    }

    #[test]
    fn target_is_clamped_to_range() {
        let mut s = SmoothScroll::new(0.3);
        s.set_max_target(5);
        s.scroll_by(50);
        assert_eq!(s.target(), 5);
        s.scroll_by(-500);
        assert_eq!(s.target(), 0);
        s.set_max_target(3);
        assert_eq!(s.target(), 0);
    }

    #[test]
    fn shrinking_range_pulls_target_back() {
        let mut s = SmoothScroll::new(0.3);
        s.set_max_target(40);
        s.set_target(40);
        s.set_max_target(12);
        assert_eq!(s.target(), 12);
    }
}
