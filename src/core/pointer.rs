//! Pointer-reactive transforms — the shared primitive behind the magnetic
//! button and the tilting glass card.
//!
//! Pointer events only move the *target*: a normalized offset in
//! `[-0.5, 0.5]²` relative to the element's centre.  Once per frame
//! [`PointerFollower::sample`] advances a damped spring toward that target,
//! so the smoothed value stays continuous however fast the pointer moves.
//! Consumers turn the smoothed offset into something visible through an
//! [`OffsetMapping`].

use super::motion::map_range;

/// Largest frame delta integrated in one `sample` call (seconds).  Longer
/// stalls (suspended terminal, debugger) are treated as this long.
const MAX_FRAME_DT: f64 = 0.1;
/// Integration sub-step (seconds).
const SUBSTEP_DT: f64 = 1.0 / 240.0;
/// Below these the spring snaps to rest.
const REST_DELTA: f64 = 5e-4;
const REST_SPEED: f64 = 5e-3;

// ───────────────────────────────────────── geometry ──────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds of an interactive element, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
            || !self.left.is_finite()
            || !self.top.is_finite()
    }

    /// Pointer position relative to the centre, as a fraction of the size.
    /// Degenerate bounds give `(0, 0)`.
    pub fn normalized_offset(&self, x: f64, y: f64) -> Vec2 {
        if self.is_degenerate() || !x.is_finite() || !y.is_finite() {
            return Vec2::ZERO;
        }
        let c = self.center();
        Vec2::new((x - c.x) / self.width, (y - c.y) / self.height)
    }
}

// ───────────────────────────────────────── spring ────────────

/// Spring tuning for the follower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    /// Snappy, slightly bouncy pull used by magnetic buttons.
    pub const MAGNETIC: SpringConfig = SpringConfig {
        stiffness: 350.0,
        damping: 15.0,
        mass: 0.5,
    };
    /// Softer, better-damped follow used by tilt cards.
    pub const TILT: SpringConfig = SpringConfig {
        stiffness: 300.0,
        damping: 20.0,
        mass: 0.5,
    };

    fn mass(&self) -> f64 {
        if self.mass.is_finite() && self.mass > 1e-3 {
            self.mass
        } else {
            1.0
        }
    }
}

/// Spring-smoothed follower of a 2D target.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerFollower {
    spring: SpringConfig,
    target: Vec2,
    position: Vec2,
    velocity: Vec2,
}

impl PointerFollower {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            spring,
            target: Vec2::ZERO,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    /// Aim at the pointer's normalized offset inside `bounds`.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, bounds: ElementBounds) {
        self.target = bounds.normalized_offset(x, y);
    }

    /// Release the target back to rest.
    pub fn on_pointer_leave(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Advance the spring by `dt` seconds.
    pub fn sample(&mut self, dt: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let mut remaining = dt.min(MAX_FRAME_DT);
        let k = self.spring.stiffness.max(0.0);
        let c = self.spring.damping.max(0.0);
        let m = self.spring.mass();

        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_DT);
            // Semi-implicit Euler: velocity first, then position.
            let ax = (-k * (self.position.x - self.target.x) - c * self.velocity.x) / m;
            let ay = (-k * (self.position.y - self.target.y) - c * self.velocity.y) / m;
            self.velocity.x += ax * h;
            self.velocity.y += ay * h;
            self.position.x += self.velocity.x * h;
            self.position.y += self.velocity.y * h;
            remaining -= h;
        }

        if self.is_near_rest() {
            self.position = self.target;
            self.velocity = Vec2::ZERO;
        }
    }

    fn is_near_rest(&self) -> bool {
        (self.position.x - self.target.x).abs() < REST_DELTA
            && (self.position.y - self.target.y).abs() < REST_DELTA
            && self.velocity.x.abs() < REST_SPEED
            && self.velocity.y.abs() < REST_SPEED
    }

    /// `true` once the follower sits on its target with no velocity.
    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == Vec2::ZERO
    }

    #[cfg(test)]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Current smoothed offset.
    pub fn value(&self) -> Vec2 {
        self.position
    }

    pub fn set_spring(&mut self, spring: SpringConfig) {
        self.spring = spring;
    }
}

// ───────────────────────────────────────── mappings ──────────

/// Turns a smoothed offset into a consumer-specific visual output.
pub trait OffsetMapping {
    type Output;

    fn map(&self, offset: Vec2, bounds: ElementBounds) -> Self::Output;
}

/// Pulls an element toward the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticPull {
    pub strength: f64,
}

impl Default for MagneticPull {
    fn default() -> Self {
        Self { strength: 0.3 }
    }
}

impl OffsetMapping for MagneticPull {
    /// Translation in the same units as the bounds.
    type Output = Vec2;

    fn map(&self, offset: Vec2, bounds: ElementBounds) -> Vec2 {
        // offset × size is the pointer's distance from the centre.
        Vec2::new(
            offset.x * bounds.width * self.strength,
            offset.y * bounds.height * self.strength,
        )
    }
}

/// Rotation pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltAngles {
    /// Rotation about the horizontal axis (driven by vertical offset).
    pub rotate_x: f64,
    /// Rotation about the vertical axis (driven by horizontal offset).
    pub rotate_y: f64,
}

/// 3D tilt toward the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub max_angle_deg: f64,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            max_angle_deg: 15.0,
        }
    }
}

impl OffsetMapping for Tilt {
    type Output = TiltAngles;

    fn map(&self, offset: Vec2, _bounds: ElementBounds) -> TiltAngles {
        let a = self.max_angle_deg;
        TiltAngles {
            rotate_x: map_range(offset.y, (-0.5, 0.5), (a, -a)),
            rotate_y: map_range(offset.x, (-0.5, 0.5), (-a, a)),
        }
    }
}

// ───────────────────────────────────────── model ─────────────

/// A follower bound to one element and one output mapping.
#[derive(Debug, Clone)]
pub struct PointerModel<M> {
    follower: PointerFollower,
    mapping: M,
    bounds: ElementBounds,
    hovered: bool,
}

impl<M: OffsetMapping> PointerModel<M> {
    pub fn new(mapping: M, spring: SpringConfig) -> Self {
        Self {
            follower: PointerFollower::new(spring),
            mapping,
            bounds: ElementBounds::default(),
            hovered: false,
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, bounds: ElementBounds) {
        self.bounds = bounds;
        self.hovered = true;
        self.follower.on_pointer_move(x, y, bounds);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovered = false;
        self.follower.on_pointer_leave();
    }

    /// Route a pointer position: moves inside `bounds` track the pointer, the
    /// first position outside releases it.
    pub fn track(&mut self, x: f64, y: f64, bounds: ElementBounds) {
        if bounds.contains(x, y) {
            self.on_pointer_move(x, y, bounds);
        } else if self.hovered {
            self.on_pointer_leave();
        }
    }

    pub fn sample(&mut self, dt: f64) {
        self.follower.sample(dt);
    }

    pub fn output(&self) -> M::Output {
        self.mapping.map(self.follower.value(), self.bounds)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[cfg(test)]
    pub fn follower(&self) -> &PointerFollower {
        &self.follower
    }

    pub fn set_mapping(&mut self, mapping: M) {
        self.mapping = mapping;
    }

    pub fn set_spring(&mut self, spring: SpringConfig) {
        self.follower.set_spring(spring);
    }
}
