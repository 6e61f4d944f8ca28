//! Interior probe: a sample point guaranteed to lie inside a contour.
//!
//! Given one edge of a contour, the probe walks out from the edge midpoint
//! along the perpendicular bisector, choosing the side by a two-level
//! parity test that works whether or not the contour's winding has been
//! normalized yet. The same test drives winding normalization itself.

use super::{count_crossings, far_exterior, Contour};
use crate::geometry::{LineSeg, Point2};
use crate::pga::{line_between, perpendicular_bisector, PLine2, Rotation};
use crate::Result;

/// A point inside `contour`, at distance `delta` from the midpoint of edge
/// `edge_index` along that edge's perpendicular bisector.
///
/// The side is decided by two independent parities:
/// 1. which rotational half the exterior reference and the bisector fall
///    into about the edge's midpoint pencil (`same_side`), and
/// 2. how many of the remaining edges a probe from the midpoint to the
///    exterior reference crosses.
///
/// An even crossing count means the reference side of the edge is
/// exterior, so the bisector direction is kept only when it points away
/// from the reference; an odd count means the reverse.
pub fn inner_contour_point(contour: &Contour, edge_index: usize, delta: f64) -> Result<Point2> {
    let mut edge = contour.edge(edge_index);
    let mid = edge.midpoint();
    let ext = far_exterior(contour.points());
    let l0 = PLine2::from_seg(&LineSeg::from_points(mid, ext)?);

    // Halves of the edge, both emanating from the midpoint.
    let halves = |e: &LineSeg| -> Result<(PLine2, PLine2)> {
        let h1 = PLine2::from_seg(&LineSeg::from_points(mid, e.p)?);
        let h2 = PLine2::from_seg(&LineSeg::from_points(mid, e.endpoint())?);
        Ok((h1, h2))
    };

    // Fix a consistent notion of "outside" for the rotation tests: flip the
    // edge when the reference falls in the clockwise sweep from h1 to h2.
    let (mut h1, mut h2) = halves(&edge)?;
    if line_between(&h1, Rotation::Clockwise, &h2, &l0) {
        edge = edge.flip();
        (h1, h2) = halves(&edge)?;
    }

    let bisector = perpendicular_bisector(&edge);
    let same_side = line_between(&h1, Rotation::Clockwise, &l0, &h2)
        == line_between(&h1, Rotation::Clockwise, &bisector, &h2);

    let crossings = count_crossings(
        mid,
        ext,
        contour
            .edges()
            .enumerate()
            .filter(|(i, _)| *i != edge_index)
            .map(|(_, e)| e),
    )?;

    let flip_sign = if crossings % 2 == 0 {
        same_side
    } else {
        !same_side
    };
    let along = Point2::new(-edge.d.y, edge.d.x).normalize();
    Ok(if flip_sign {
        mid - along * delta
    } else {
        mid + along * delta
    })
}
