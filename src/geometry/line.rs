//! Line segment type.
//!
//! A [`LineSeg`] is stored as an origin plus a non-zero displacement rather
//! than as an endpoint pair; the endpoint is always `origin + displacement`.
//! Construction rejects zero displacements, so a `LineSeg` in hand is never
//! degenerate.

use super::Point2;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed line segment: origin `p` plus displacement `d` with `d ≠ 0`.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSeg {
    /// Origin point.
    pub p: Point2,
    /// Displacement to the endpoint. Never the zero vector.
    pub d: Point2,
}

impl LineSeg {
    /// Create a segment from an origin and displacement.
    ///
    /// Fails with [`Error::DegenerateSegment`] when the displacement is zero.
    pub fn new(p: Point2, d: Point2) -> Result<Self> {
        if d.x == 0.0 && d.y == 0.0 {
            return Err(Error::DegenerateSegment(p));
        }
        Ok(Self { p, d })
    }

    /// Create a segment from two endpoints.
    pub fn from_points(a: Point2, b: Point2) -> Result<Self> {
        Self::new(a, b - a)
    }

    /// Build the chain of segments connecting consecutive points.
    ///
    /// Fails with [`Error::EmptyPointList`] for fewer than two points and
    /// propagates [`Error::DegenerateSegment`] for repeated points.
    pub fn chain(points: &[Point2]) -> Result<Vec<LineSeg>> {
        if points.len() < 2 {
            return Err(Error::EmptyPointList);
        }
        points
            .windows(2)
            .map(|w| Self::from_points(w[0], w[1]))
            .collect()
    }

    /// The endpoint `p + d`.
    #[inline]
    pub fn endpoint(&self) -> Point2 {
        self.p + self.d
    }

    /// The midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Point2 {
        self.p + self.d * 0.5
    }

    /// The segment traversed in the opposite direction: origin `p + d`,
    /// displacement `−d`.
    #[inline]
    pub fn flip(&self) -> LineSeg {
        LineSeg {
            p: self.endpoint(),
            d: -self.d,
        }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.d.length()
    }

    /// Squared length of the segment.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.d.length_squared()
    }

    /// Unit direction of the segment.
    #[inline]
    pub fn direction(&self) -> Point2 {
        self.d.normalize()
    }
}

impl fmt::Debug for LineSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineSeg({:?} -> {:?})", self.p, self.endpoint())
    }
}
