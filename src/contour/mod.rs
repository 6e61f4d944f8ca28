//! Closed contours and their nesting structure.
//!
//! This module provides:
//! - [`Contour`] - a closed, oriented polygon bounding a region of a layer
//! - [`ContourTree`] - the containment forest over a layer's contours
//! - [`contour_contains_contour`] - the ray-parity containment test
//!
//! A contour produced by the assembler (see [`assemble_contours`]) stores
//! its vertices so that the interior lies to the right of every directed
//! edge. Points are held in an arena addressed by index; cyclic
//! navigation uses modular `prev`/`next` rather than linked nodes.

mod assemble;
mod probe;

pub use assemble::assemble_contours;
pub use probe::inner_contour_point;

use crate::geometry::{LineSeg, Point2};
use crate::pga::{line_intersection, Intersection};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A closed oriented polygon: an ordered cyclic point sequence of length
/// ≥ 3, implicitly closed from the last point back to the first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<Point2>,
}

impl Contour {
    /// Build a contour, dropping consecutive coincident points (including a
    /// repeated closing point). Fails with [`Error::EmptyPointList`] when
    /// fewer than three distinct vertices remain.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        let mut distinct: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if distinct.last().is_some_and(|last| last.coincides_with(&p)) {
                continue;
            }
            distinct.push(p);
        }
        while distinct.len() > 1 && distinct[0].coincides_with(&distinct[distinct.len() - 1]) {
            distinct.pop();
        }
        if distinct.len() < 3 {
            return Err(Error::EmptyPointList);
        }
        Ok(Self { points: distinct })
    }

    /// The vertices in storage order.
    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices (= number of edges).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a contour holds at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the vertex after `i`, cyclically.
    #[inline]
    pub fn next(&self, i: usize) -> usize {
        (i + 1) % self.points.len()
    }

    /// Index of the vertex before `i`, cyclically.
    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        (i + self.points.len() - 1) % self.points.len()
    }

    /// The directed edge from vertex `i` to its cyclic successor.
    ///
    /// Construction cannot fail: consecutive vertices are distinct.
    pub fn edge(&self, i: usize) -> LineSeg {
        let a = self.points[i];
        let b = self.points[self.next(i)];
        LineSeg { p: a, d: b - a }
    }

    /// Iterate over all directed edges.
    pub fn edges(&self) -> impl Iterator<Item = LineSeg> + '_ {
        (0..self.points.len()).map(|i| self.edge(i))
    }

    /// Reverse the traversal order (flips which side is the interior).
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// True when the two contours trace the same cyclic point sequence,
    /// in either orientation and from any starting vertex.
    pub fn coincides_with(&self, other: &Contour) -> bool {
        let n = self.len();
        if n != other.len() {
            return false;
        }
        let theirs = other.points();
        for offset in 0..n {
            let forward = (0..n).all(|i| self.points[i].coincides_with(&theirs[(offset + i) % n]));
            let backward =
                (0..n).all(|i| self.points[i].coincides_with(&theirs[(offset + n - i) % n]));
            if forward || backward {
                return true;
            }
        }
        false
    }
}

/// One node of the containment forest: a contour and the contours nested
/// immediately inside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourTree {
    pub contour: Contour,
    pub children: Vec<ContourTree>,
}

/// A far reference point guaranteed to lie outside the given geometry:
/// one unit below/left of its bounding box, clamped to `(−1, −1)` so
/// positive-quadrant geometry always probes toward the canonical corner.
pub(crate) fn far_exterior<'a, I>(points: I) -> Point2
where
    I: IntoIterator<Item = &'a Point2>,
{
    let mut x = -1.0f64;
    let mut y = -1.0f64;
    for p in points {
        x = x.min(p.x - 1.0);
        y = y.min(p.y - 1.0);
    }
    Point2::new(x, y)
}

/// Count how many of `edges` a probe segment crosses.
///
/// Crossings landing exactly on a shared vertex are counted once: a hit on
/// an edge's start counts, a hit on an edge's end does not (the vertex is
/// the next edge's start). A probe collinear with an edge has no usable
/// parity and is a broken invariant.
pub(crate) fn count_crossings<I>(from: Point2, to: Point2, edges: I) -> Result<usize>
where
    I: IntoIterator<Item = LineSeg>,
{
    let probe = LineSeg::from_points(from, to)?;
    let mut count = 0;
    for edge in edges {
        match line_intersection(&probe, &edge) {
            Intersection::IntersectsAt(_) | Intersection::HitStart => count += 1,
            Intersection::HitEnd
            | Intersection::NoIntersection
            | Intersection::Parallel
            | Intersection::AntiParallel
            | Intersection::Collinear => {}
            Intersection::LCollinear(_, _) => {
                return Err(Error::InsaneIntersection(
                    "probe segment collinear with a contour edge".into(),
                ))
            }
        }
    }
    Ok(count)
}

/// Ray-parity containment: `parent` contains `child` iff a probe from an
/// interior sample of `child` to a far exterior point crosses `parent`'s
/// boundary an odd number of times. A contour does not contain itself.
pub fn contour_contains_contour(parent: &Contour, child: &Contour) -> Result<bool> {
    if parent.coincides_with(child) {
        return Ok(false);
    }
    let sample_depth = child.edge(0).length() / 100.0;
    let q = inner_contour_point(child, 0, sample_depth)?;
    let ext = far_exterior(parent.points().iter().chain(child.points()));
    let crossings = count_crossings(q, ext, parent.edges())?;
    Ok(crossings % 2 == 1)
}

/// Build the containment forest over a layer's contours.
///
/// Roots are the contours no other contour contains; each node's children
/// are the contours it contains directly (no intervening sibling).
pub fn build_contour_tree(contours: Vec<Contour>) -> Result<Vec<ContourTree>> {
    let n = contours.len();
    let mut contains = vec![vec![false; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                contains[i][j] = contour_contains_contour(&contours[i], &contours[j])?;
            }
        }
    }

    fn attach(members: &[usize], contains: &[Vec<bool>], contours: &[Contour]) -> Vec<ContourTree> {
        let roots: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| !members.iter().any(|&j| j != i && contains[j][i]))
            .collect();
        roots
            .iter()
            .map(|&r| {
                let inside: Vec<usize> = members
                    .iter()
                    .copied()
                    .filter(|&i| i != r && contains[r][i])
                    .collect();
                ContourTree {
                    contour: contours[r].clone(),
                    children: attach(&inside, contains, contours),
                }
            })
            .collect()
    }

    let all: Vec<usize> = (0..n).collect();
    Ok(attach(&all, &contains, &contours))
}
