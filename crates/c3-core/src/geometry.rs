#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are in CSS pixels (`f64`), origin at the top-left of the
//! containing node.

use std::fmt;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Measured size of a rendered node.
///
/// Defaults to zero in both axes, which is also the value reported before
/// the first successful measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl Dimensions {
    /// The unmeasured value.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create new dimensions. Negative or non-finite inputs are clamped to 0.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Whether the height carries a usable measurement.
    #[inline]
    pub fn has_height(&self) -> bool {
        self.height > 0.0
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// A circular clip region.
///
/// Renders as the CSS basic shape `circle(<r>px at <x>px <y>px)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipCircle {
    /// Radius of the visible disc. Never negative.
    pub radius: f64,
    /// Centre of the disc.
    pub center: Point,
}

impl ClipCircle {
    /// Create a clip circle. A negative radius is clamped to 0.
    #[inline]
    pub fn new(radius: f64, center: Point) -> Self {
        Self {
            radius: radius.max(0.0),
            center,
        }
    }

    /// Check whether a point is visible through the clip.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

impl fmt::Display for ClipCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "circle({}px at {}px {}px)",
            round2(self.radius),
            round2(self.center.x),
            round2(self.center.y)
        )
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_default_is_zero() {
        assert_eq!(Dimensions::default(), Dimensions::ZERO);
        assert!(!Dimensions::default().has_height());
    }

    #[test]
    fn dimensions_clamp_bad_input() {
        let d = Dimensions::new(-4.0, f64::NAN);
        assert_eq!(d, Dimensions::ZERO);
    }

    #[test]
    fn clip_circle_css() {
        let c = ClipCircle::new(30.0, Point::new(40.0, 40.0));
        assert_eq!(c.to_string(), "circle(30px at 40px 40px)");

        let c = ClipCircle::new(1200.456, Point::new(40.0, 40.0));
        assert_eq!(c.to_string(), "circle(1200.46px at 40px 40px)");
    }

    #[test]
    fn clip_circle_contains() {
        let c = ClipCircle::new(30.0, Point::new(40.0, 40.0));
        assert!(c.contains(Point::new(40.0, 69.0)));
        assert!(!c.contains(Point::new(40.0, 71.0)));
    }

    #[test]
    fn clip_circle_negative_radius() {
        let c = ClipCircle::new(-1.0, Point::default());
        assert_eq!(c.radius, 0.0);
    }
}
