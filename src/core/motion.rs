//! Frame clock and the small procedural-animation helpers driven by it.
//!
//! Visuals that "just move" (gem spin, float, parallax, reveal slides) are
//! pure functions of elapsed time or progress; only the clock holds state.

use std::time::{Duration, Instant};

/// Linear map of `value` from the `from` range onto the `to` range, clamped
/// to the ends of `to`.  A zero-width `from` range yields `to.0`.
pub fn map_range(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span == 0.0 || !span.is_finite() || !value.is_finite() {
        return to.0;
    }
    let t = ((value - from.0) / span).clamp(0.0, 1.0);
    to.0 + t * (to.1 - to.0)
}

/// Cubic ease-out on `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    1.0 - (1.0 - t).powi(3)
}

// ───────────────────────────────────────── clock ─────────────

/// Timing of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub dt: f64,
}

/// Monotonic per-frame clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
            frames: 0,
        }
    }

    /// Advance to `now`.  A `now` earlier than the last frame counts as a
    /// zero-length frame.
    pub fn advance(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        if now > self.last {
            self.last = now;
        }
        self.frames += 1;
        FrameTime {
            elapsed: self.last.duration_since(self.start).as_secs_f64(),
            dt: dt.as_secs_f64(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.last.duration_since(self.start)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

// ───────────────────────────────────────── procedural ────────

/// Rotation angle (radians, wrapped to `[0, 2π)`) after `elapsed` seconds
/// at `speed` radians per second.
pub fn spin_angle(elapsed: f64, speed: f64) -> f64 {
    (elapsed * speed).rem_euclid(std::f64::consts::TAU)
}

/// Vertical float: a sine bob of `amplitude` at `speed` radians per second.
pub fn float_offset(elapsed: f64, speed: f64, amplitude: f64) -> f64 {
    (elapsed * speed).sin() * amplitude
}

/// Scroll-linked displacement: progress 0 sits at `from`, 1 at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub from: f64,
    pub to: f64,
}

impl Parallax {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn at(&self, progress: f64) -> f64 {
        map_range(progress, (0.0, 1.0), (self.from, self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_clamps_and_inverts() {
        assert_eq!(map_range(0.5, (0.0, 1.0), (100.0, -100.0)), 0.0);
        assert_eq!(map_range(2.0, (0.0, 1.0), (100.0, -100.0)), -100.0);
        assert_eq!(map_range(-1.0, (0.0, 1.0), (50.0, -150.0)), 50.0);
        assert_eq!(map_range(1.0, (1.0, 1.0), (3.0, 9.0)), 3.0);
        assert_eq!(map_range(f64::NAN, (0.0, 1.0), (3.0, 9.0)), 3.0);
    }

    #[test]
    fn ease_out_hits_both_ends() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
        assert_eq!(ease_out_cubic(7.0), 1.0);
    }

    #[test]
    fn clock_reports_deltas() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);
        let f1 = clock.advance(t0 + Duration::from_millis(16));
        assert!((f1.dt - 0.016).abs() < 1e-9);
        let f2 = clock.advance(t0 + Duration::from_millis(48));
        assert!((f2.dt - 0.032).abs() < 1e-9);
        assert!((f2.elapsed - 0.048).abs() < 1e-9);
        // Going backwards is a zero-length frame.
        let f3 = clock.advance(t0);
        assert_eq!(f3.dt, 0.0);
        assert!((f3.elapsed - 0.048).abs() < 1e-9);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn spin_wraps() {
        let a = spin_angle(100.0, 0.5);
        assert!((0.0..std::f64::consts::TAU).contains(&a));
        assert_eq!(spin_angle(0.0, 0.5), 0.0);
    }

    #[test]
    fn parallax_spans_its_range() {
        let p = Parallax::new(150.0, -50.0);
        assert_eq!(p.at(0.0), 150.0);
        assert_eq!(p.at(1.0), -50.0);
        assert_eq!(p.at(0.5), 50.0);
    }
}
