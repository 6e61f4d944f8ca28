//! Projective geometry layer over the Cl(2,0,1) algebra.
//!
//! This module wraps raw multivectors in typed projective primitives and
//! implements the incidence operations the slicer is built on:
//! - [`PPoint2`] - a projective point (grade-2 bivector)
//! - [`PLine2`] - an oriented projective line (grade-1 vector)
//! - [`meet`] / [`join`] - line ∧ line → point, point ∨ point → line
//! - [`Intersection`] - the classifier for segment/segment incidence
//! - [`line_between`] - angular ordering of three lines about a pencil
//!
//! ## Encoding
//!
//! A euclidean point `(x, y)` embeds as `y·e01 − x·e02 + e12`; a point is
//! *ideal* (at infinity) when its `e12` coefficient is zero, and otherwise
//! canonicalizes to `e12 = 1`. A segment from `(x1, y1)` to `(x2, y2)`
//! embeds as the line
//! `(y1·x2 − x1·y2)·e0 + (y2 − y1)·e1 + (x1 − x2)·e2`,
//! whose `(e1, e2)` part is the right-hand normal of the direction of
//! travel. Orientation is meaningful: [`PLine2::flip`] reverses it.

use crate::algebra::{GVec, E0, E01, E02, E1, E12, E2};
use crate::geometry::{approx_eq, LineSeg, Point2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A projective point: a grade-2 multivector over `{e01, e02, e12}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PPoint2(pub GVec);

/// An oriented projective line: a grade-1 multivector over `{e0, e1, e2}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PLine2(pub GVec);

/// Rotation sense for [`line_between`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Result of intersecting two line segments (or two projective lines).
///
/// Producers map every algebraic outcome to exactly one variant; consumers
/// that enumerate a subset must treat the rest as a broken invariant
/// (`Error::InsaneIntersection`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Intersection {
    /// The segments properly cross at the carried point.
    IntersectsAt(Point2),
    /// The underlying lines cross, but outside at least one segment.
    NoIntersection,
    /// Distinct parallel lines with the same orientation.
    Parallel,
    /// Distinct parallel lines with opposite orientation.
    AntiParallel,
    /// Same projective line, segments disjoint (or touching at one point).
    Collinear,
    /// Same projective line, segments overlapping along the carried span.
    LCollinear(Point2, Point2),
    /// The crossing lands exactly on the second segment's origin.
    HitStart,
    /// The crossing lands exactly on the second segment's endpoint.
    HitEnd,
}

impl PPoint2 {
    /// Embed a euclidean point.
    pub fn from_point(p: Point2) -> Self {
        Self(GVec::from_pairs(&[(E01, p.y), (E02, -p.x), (E12, 1.0)]))
    }

    /// True when this point lies at infinity (`e12` coefficient is zero).
    #[inline]
    pub fn is_ideal(&self) -> bool {
        self.0.coeff(E12) == 0.0
    }

    /// Scale so the `e12` coefficient is 1. The caller must ensure the
    /// point is not ideal.
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        Self(self.0.div_scalar(self.0.coeff(E12)))
    }

    /// Project back to euclidean coordinates; `None` for ideal points.
    pub fn to_point(&self) -> Option<Point2> {
        if self.is_ideal() {
            return None;
        }
        let c = self.canonicalize();
        Some(Point2::new(-c.0.coeff(E02), c.0.coeff(E01)))
    }
}

impl PLine2 {
    /// Embed the oriented line through a segment.
    pub fn from_seg(seg: &LineSeg) -> Self {
        let a = seg.p;
        let b = seg.endpoint();
        Self(GVec::from_pairs(&[
            (E0, a.y * b.x - a.x * b.y),
            (E1, b.y - a.y),
            (E2, a.x - b.x),
        ]))
    }

    /// Scale so the euclidean normal `(e1, e2)` has unit length. Lines with
    /// a zero normal (the ideal line) are returned unchanged.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let e1 = self.0.coeff(E1);
        let e2 = self.0.coeff(E2);
        let norm = (e1 * e1 + e2 * e2).sqrt();
        if norm == 0.0 {
            return *self;
        }
        Self(self.0.div_scalar(norm))
    }

    /// The same geometric line with reversed orientation: all three grade-1
    /// coefficients negated.
    #[must_use]
    pub fn flip(&self) -> Self {
        Self(-self.0)
    }

    /// Shift the line a signed distance `d` along its perpendicular by
    /// adding `d·e0` to the normalized multivector.
    #[must_use]
    pub fn translate_perp(&self, d: f64) -> Self {
        Self(self.normalize().0.add_val(E0, d))
    }
}

/// The perpendicular bisector of a segment: the line through the midpoint
/// whose normal is the segment's direction of travel.
pub fn perpendicular_bisector(seg: &LineSeg) -> PLine2 {
    let m = seg.midpoint();
    let d = seg.d;
    PLine2(GVec::from_pairs(&[
        (E0, -(d.x * m.x + d.y * m.y)),
        (E1, d.x),
        (E2, d.y),
    ]))
}

/// Meet of two lines: their intersection as a projective point.
pub fn meet(l1: &PLine2, l2: &PLine2) -> PPoint2 {
    PPoint2(l1.0.wedge(&l2.0))
}

/// Join of two points: the line through both, via dual-meet-dual.
pub fn join(p1: &PPoint2, p2: &PPoint2) -> PLine2 {
    PLine2(p1.0.dual().wedge(&p2.0.dual()).dual())
}

/// Euclidean intersection point of two lines known to cross.
///
/// The caller guards against parallel and coincident inputs (see
/// [`plines_intersect_at`]); on such inputs the result is unusable.
pub fn intersect_plines(l1: &PLine2, l2: &PLine2) -> Point2 {
    let p = meet(l1, l2).canonicalize();
    Point2::new(-p.0.coeff(E02), p.0.coeff(E01))
}

/// Classify the incidence of two projective lines.
///
/// An empty meet means the same projective line; a normalized inner product
/// of ±1 (at five digits) means parallel lines; anything else crosses.
pub fn plines_intersect_at(l1: &PLine2, l2: &PLine2) -> Intersection {
    if meet(l1, l2).0.is_empty() {
        return Intersection::Collinear;
    }
    let (cos, _) = l1.normalize().0.dot(&l2.normalize().0).scalarize();
    if approx_eq(cos, 1.0) {
        Intersection::Parallel
    } else if approx_eq(cos, -1.0) {
        Intersection::AntiParallel
    } else {
        Intersection::IntersectsAt(intersect_plines(l1, l2))
    }
}

/// Segment containment test: the sum of squared distances from `p` to both
/// endpoints does not exceed the segment's squared length.
fn on_segment(seg: &LineSeg, p: Point2) -> bool {
    p.distance_squared(&seg.p) + p.distance_squared(&seg.endpoint()) <= seg.length_squared()
}

/// Intersect two segments, refining the projective answer to segment level.
///
/// A crossing that lands exactly on an endpoint of `seg2` is promoted to
/// [`Intersection::HitStart`] / [`Intersection::HitEnd`] (provided it lies
/// on `seg1`); collinear segments are refined to their overlap span.
pub fn line_intersection(seg1: &LineSeg, seg2: &LineSeg) -> Intersection {
    let pl1 = PLine2::from_seg(seg1);
    let pl2 = PLine2::from_seg(seg2);
    match plines_intersect_at(&pl1, &pl2) {
        Intersection::Collinear => collinear_overlap(seg1, seg2),
        Intersection::Parallel => Intersection::Parallel,
        Intersection::AntiParallel => Intersection::AntiParallel,
        Intersection::IntersectsAt(p) => {
            if !on_segment(seg1, p) {
                return Intersection::NoIntersection;
            }
            if p == seg2.p {
                Intersection::HitStart
            } else if p == seg2.endpoint() {
                Intersection::HitEnd
            } else if on_segment(seg2, p) {
                Intersection::IntersectsAt(p)
            } else {
                Intersection::NoIntersection
            }
        }
        other => other,
    }
}

/// Overlap span of two segments on the same projective line.
fn collinear_overlap(seg1: &LineSeg, seg2: &LineSeg) -> Intersection {
    let len2 = seg1.length_squared();
    let t0 = (seg2.p - seg1.p).dot(&seg1.d) / len2;
    let t1 = (seg2.endpoint() - seg1.p).dot(&seg1.d) / len2;
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);
    if lo < hi {
        Intersection::LCollinear(seg1.p + seg1.d * lo, seg1.p + seg1.d * hi)
    } else {
        Intersection::Collinear
    }
}

/// Counter-clockwise angle swept rotating line `a` onto line `b`, in
/// `[0, 2π)`. Scale-invariant in both arguments.
fn ccw_angle(a: &PLine2, b: &PLine2) -> f64 {
    let sin = meet(a, b).0.coeff(E12);
    let (cos, _) = a.0.dot(&b.0).scalarize();
    let t = sin.atan2(cos);
    if t < 0.0 {
        t + TAU
    } else {
        t
    }
}

/// True iff, rotating `l1` toward `l2` in the sense `dir`, the sweep
/// crosses `l3` first.
pub fn line_between(l1: &PLine2, dir: Rotation, l2: &PLine2, l3: &PLine2) -> bool {
    match dir {
        Rotation::CounterClockwise => ccw_angle(l1, l3) < ccw_angle(l1, l2),
        Rotation::Clockwise => cw_angle(l1, l3) < cw_angle(l1, l2),
    }
}

fn cw_angle(a: &PLine2, b: &PLine2) -> f64 {
    let t = ccw_angle(a, b);
    if t == 0.0 {
        0.0
    } else {
        TAU - t
    }
}

/// Fold a chain of segments, merging each pair of consecutive segments that
/// lie on the same projective line and share an endpoint. Orientation is
/// preserved.
pub fn combine_consecutive_lines(segs: &[LineSeg]) -> Vec<LineSeg> {
    let mut out: Vec<LineSeg> = Vec::with_capacity(segs.len());
    for seg in segs {
        if let Some(last) = out.last_mut() {
            let same_line = meet(&PLine2::from_seg(last), &PLine2::from_seg(seg))
                .0
                .is_empty();
            if same_line && last.endpoint().coincides_with(&seg.p) {
                last.d = last.d + seg.d;
                continue;
            }
        }
        out.push(*seg);
    }
    out
}
