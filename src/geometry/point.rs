//! 2D and 3D point types.
//!
//! Points double as displacement vectors: addition, subtraction and scaling
//! are defined component-wise, and a [`Point3`] projects to a [`Point2`] by
//! dropping its z coordinate.

use super::approx_eq;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D point (or displacement) with double-precision coordinates.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Create a new 2D point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Squared euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared length of this point taken as a displacement.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length of this point taken as a displacement.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Scale this displacement to unit length.
    #[inline]
    pub fn normalize(&self) -> Point2 {
        let len = self.length();
        Point2::new(self.x / len, self.y / len)
    }

    /// Perpendicular displacement (rotated 90° counter-clockwise).
    #[inline]
    pub fn perp(&self) -> Point2 {
        Point2::new(-self.y, self.x)
    }

    /// 2D cross product (z component of the 3D cross).
    #[inline]
    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Equality at five fractional digits on both coordinates.
    #[inline]
    pub fn coincides_with(&self, other: &Point2) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }

    /// Total lexicographic order on `(x, y)`, used to make contour assembly
    /// independent of fragment input order.
    pub fn lex_cmp(&self, other: &Point2) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Add for Point2 {
    type Output = Point2;

    #[inline]
    fn add(self, other: Point2) -> Point2 {
        Point2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    #[inline]
    fn sub(self, other: Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    #[inline]
    fn mul(self, factor: f64) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Point2 {
    type Output = Point2;

    #[inline]
    fn neg(self) -> Point2 {
        Point2::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A 3D point with double-precision coordinates.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Create a new 3D point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Project to 2D by dropping the z coordinate.
    #[inline]
    pub fn to_2d(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// The z coordinate (layer height axis).
    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Add for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;

    #[inline]
    fn mul(self, factor: f64) -> Point3 {
        Point3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl fmt::Debug for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}
