//! Scroll progress and one-shot viewport visibility.
//!
//! All inputs are in the same vertical unit (terminal rows here).  Every
//! function is total: degenerate geometry yields 0, never NaN.

/// Scroll geometry of the whole document at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// Vertical span of a tracked element, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSpan {
    pub top: f64,
    pub height: f64,
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fraction of the scrollable distance already scrolled.
pub fn document_progress(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if !(scrollable > 0.0) || !scrollable.is_finite() {
        return 0.0;
    }
    unit(scroll_top / scrollable)
}

/// Progress of an element's transit through the viewport: 0 while its top
/// is at (or below) the bottom edge, 1 once its bottom has left the top.
/// `element_top` is relative to the viewport top.
pub fn element_progress(viewport_height: f64, element_top: f64, element_height: f64) -> f64 {
    let travel = viewport_height + element_height;
    if !(travel > 0.0) || !travel.is_finite() {
        return 0.0;
    }
    unit((viewport_height - element_top) / travel)
}

/// Fraction of the element currently inside the viewport.
/// `element_top` is relative to the viewport top.
pub fn visible_fraction(viewport_height: f64, element_top: f64, element_height: f64) -> f64 {
    if !(element_height > 0.0) || !element_height.is_finite() {
        return 0.0;
    }
    let top = element_top.max(0.0);
    let bottom = (element_top + element_height).min(viewport_height);
    unit((bottom - top) / element_height)
}

// ───────────────────────────────────────── tracker ───────────

/// What a [`ScrollProgress`] follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    Document,
    Element(ElementSpan),
}

/// Cached progress for one target; recompute on every scroll change.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollProgress {
    target: ScrollTarget,
    progress: f64,
}

impl ScrollProgress {
    pub fn document() -> Self {
        Self {
            target: ScrollTarget::Document,
            progress: 0.0,
        }
    }

    pub fn element(span: ElementSpan) -> Self {
        Self {
            target: ScrollTarget::Element(span),
            progress: 0.0,
        }
    }

    pub fn compute_progress(&mut self, m: ScrollMetrics) -> f64 {
        self.progress = match self.target {
            ScrollTarget::Document => {
                document_progress(m.scroll_top, m.scroll_height, m.viewport_height)
            }
            ScrollTarget::Element(span) => {
                element_progress(m.viewport_height, span.top - m.scroll_top, span.height)
            }
        };
        self.progress
    }

    /// Last computed value.
    pub fn progress(&self) -> f64 {
        self.progress
    }
}

// ───────────────────────────────────────── latch ─────────────

/// One-way "has entered the viewport" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityLatch {
    entered: bool,
}

impl VisibilityLatch {
    /// Latch once `fraction >= threshold`.  After latching, observations are
    /// ignored.  Returns the latch state.
    pub fn check_visibility(&mut self, fraction: f64, threshold: f64) -> bool {
        if !self.entered && fraction >= threshold {
            self.entered = true;
        }
        self.entered
    }

    pub fn has_entered_view(&self) -> bool {
        self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_progress_is_clamped() {
        assert_eq!(document_progress(0.0, 200.0, 50.0), 0.0);
        assert_eq!(document_progress(75.0, 200.0, 50.0), 0.5);
        assert_eq!(document_progress(150.0, 200.0, 50.0), 1.0);
        assert_eq!(document_progress(400.0, 200.0, 50.0), 1.0);
        assert_eq!(document_progress(-10.0, 200.0, 50.0), 0.0);
    }

    #[test]
    fn short_document_has_no_progress() {
        assert_eq!(document_progress(10.0, 40.0, 40.0), 0.0);
        assert_eq!(document_progress(10.0, 20.0, 40.0), 0.0);
    }

    #[test]
    fn element_transit_runs_zero_to_one() {
        // Top at the bottom edge: just entering.
        assert_eq!(element_progress(40.0, 40.0, 20.0), 0.0);
        // Fully past the top edge.
        assert_eq!(element_progress(40.0, -20.0, 20.0), 1.0);
        assert_eq!(element_progress(40.0, 10.0, 20.0), 0.5);
        assert_eq!(element_progress(40.0, 90.0, 20.0), 0.0);
    }

    #[test]
    fn progress_is_never_nan() {
        let cases = [
            (f64::NAN, 10.0, 5.0),
            (1.0, f64::NAN, 5.0),
            (1.0, f64::INFINITY, 5.0),
            (0.0, 0.0, 0.0),
            (f64::INFINITY, 10.0, 5.0),
        ];
        for (a, b, c) in cases {
            let d = document_progress(a, b, c);
            let e = element_progress(c, a, b);
            let v = visible_fraction(c, a, b);
            for p in [d, e, v] {
                assert!(!p.is_nan() && (0.0..=1.0).contains(&p), "{a} {b} {c} -> {p}");
            }
        }
    }

    #[test]
    fn visible_fraction_counts_overlap() {
        assert_eq!(visible_fraction(40.0, 0.0, 20.0), 1.0);
        assert_eq!(visible_fraction(40.0, 30.0, 20.0), 0.5);
        assert_eq!(visible_fraction(40.0, -15.0, 20.0), 0.25);
        assert_eq!(visible_fraction(40.0, 50.0, 20.0), 0.0);
        assert_eq!(visible_fraction(40.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn tracker_uses_element_position_relative_to_viewport() {
        let mut p = ScrollProgress::element(ElementSpan {
            top: 100.0,
            height: 20.0,
        });
        let m = ScrollMetrics {
            scroll_top: 90.0,
            scroll_height: 300.0,
            viewport_height: 40.0,
        };
        assert_eq!(p.compute_progress(m), 0.5);
        assert_eq!(p.progress(), 0.5);

        let mut doc = ScrollProgress::document();
        assert_eq!(doc.compute_progress(m), 90.0 / 260.0);
    }

    #[test]
    fn latch_never_resets() {
        let mut latch = VisibilityLatch::default();
        assert!(!latch.check_visibility(0.1, 0.2));
        assert!(latch.check_visibility(0.2, 0.2));
        for f in [0.0, 0.05, 0.19, f64::NAN] {
            assert!(latch.check_visibility(f, 0.2));
        }
        assert!(latch.has_entered_view());
    }
}
