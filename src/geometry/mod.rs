//! Euclidean geometry primitives.
//!
//! This module provides the plain 2D/3D types the projective layer is built
//! from:
//! - [`Point2`] and [`Point3`] - double-precision points
//! - [`LineSeg`] - a directed segment stored as origin + displacement
//! - [`Orientation`] - the turn sense of three points
//!
//! ## Equality
//!
//! Scalar equality throughout the crate is "rounds to the same value at five
//! fractional digits" ([`approx_eq`]). This is the only tolerance the core
//! applies; algebra-level arithmetic drops exact zeros and nothing else.

mod line;
mod point;

pub use line::LineSeg;
pub use point::{Point2, Point3};

/// Scale at which scalars are compared: five fractional digits.
const EQ_SCALE: f64 = 1e5;

/// Equality at five fractional digits: true when both values round to the
/// same multiple of 1e-5.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a * EQ_SCALE).round() == (b * EQ_SCALE).round()
}

/// Orientation of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Counter-clockwise (left turn)
    CounterClockwise,
    /// Clockwise (right turn)
    Clockwise,
    /// Collinear (no turn)
    Collinear,
}

/// Determine the orientation of three points.
pub fn orientation(p1: Point2, p2: Point2, p3: Point2) -> Orientation {
    let cross = (p2 - p1).cross(&(p3 - p2));
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}
