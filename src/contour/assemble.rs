//! Loop extraction and winding normalization.
//!
//! Stitches the unordered point pairs produced by slicing into closed
//! loops, then orients each loop so the interior lies to the right of
//! every directed edge.

use super::{count_crossings, far_exterior, Contour};
use crate::geometry::{orientation, Orientation, Point2};
use crate::slice::Fragment;
use crate::{Error, Result};
use log::warn;

/// Stitch unordered fragments into oriented closed contours.
///
/// Fragments are first sorted lexicographically so the result does not
/// depend on input order. A fragment connects forward when its start
/// matches the working loop's end, or backward (reversed on insertion)
/// when its end does. Loops shorter than three vertices arise from
/// degenerate slices and are dropped with a warning; a loop that cannot
/// be closed at all fails the layer with [`Error::UnclosedLoop`].
pub fn assemble_contours(mut fragments: Vec<Fragment>) -> Result<Vec<Contour>> {
    fragments.sort_by(|(a1, b1), (a2, b2)| a1.lex_cmp(a2).then(b1.lex_cmp(b2)));

    let mut contours = Vec::new();
    let mut remaining = fragments;
    while !remaining.is_empty() {
        let (start, first_end) = remaining.remove(0);
        let mut points = vec![start];
        let mut end = first_end;
        while !end.coincides_with(&start) {
            points.push(end);
            end = match take_connecting(&mut remaining, end) {
                Some(next_end) => next_end,
                None => {
                    return Err(Error::UnclosedLoop {
                        at: end,
                        remaining: remaining.len(),
                    })
                }
            };
        }
        if points.len() < 3 {
            warn!("dropping {}-vertex loop at {:?}", points.len(), start);
            continue;
        }
        let mut contour = match Contour::new(points) {
            Ok(contour) => contour,
            Err(Error::EmptyPointList) => {
                warn!("dropping loop at {start:?}: too few distinct vertices");
                continue;
            }
            Err(err) => return Err(err),
        };
        if !interior_is_right(&contour)? {
            contour.reverse();
        }
        contours.push(contour);
    }
    Ok(contours)
}

/// Remove and resolve a fragment connecting to `end`: forward fragments
/// continue from their start, backward fragments are reversed on insertion.
fn take_connecting(remaining: &mut Vec<Fragment>, end: Point2) -> Option<Point2> {
    if let Some(idx) = remaining.iter().position(|(a, _)| a.coincides_with(&end)) {
        let (_, b) = remaining.remove(idx);
        return Some(b);
    }
    if let Some(idx) = remaining.iter().position(|(_, b)| b.coincides_with(&end)) {
        let (a, _) = remaining.remove(idx);
        return Some(a);
    }
    None
}

/// Decide whether a loop's interior lies to the right of its stored edges.
///
/// Two-level parity test on the first edge: the orientation of the turn
/// from the edge onto the far exterior reference, and how many of the
/// remaining edges a probe from the edge midpoint to that reference
/// crosses. An even crossing count means the reference side is exterior;
/// odd means the probe starts into the interior.
fn interior_is_right(contour: &Contour) -> Result<bool> {
    let first = contour.edge(0);
    let mid = first.midpoint();
    let ext = far_exterior(contour.points());
    let crossings = count_crossings(
        mid,
        ext,
        contour.edges().enumerate().filter(|(i, _)| *i != 0).map(|(_, e)| e),
    )?;
    match orientation(first.p, first.endpoint(), ext) {
        // Reference to the right of the first edge: it is the interior
        // side exactly when the probe starts inward.
        Orientation::Clockwise => Ok(crossings % 2 == 1),
        // Reference to the left: the interior must face away from it.
        Orientation::CounterClockwise => Ok(crossings % 2 == 0),
        Orientation::Collinear => Err(Error::InsaneIntersection(
            "exterior reference collinear with the first contour edge".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::contour_contains_contour;

    fn pair(ax: f64, ay: f64, bx: f64, by: f64) -> Fragment {
        (Point2::new(ax, ay), Point2::new(bx, by))
    }

    fn unit_square_fragments() -> Vec<Fragment> {
        vec![
            pair(0.0, 0.0, 1.0, 0.0),
            pair(1.0, 0.0, 1.0, 1.0),
            pair(1.0, 1.0, 0.0, 1.0),
            pair(0.0, 1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_square_assembles_to_one_contour() {
        let contours = assemble_contours(unit_square_fragments()).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
    }

    #[test]
    fn test_result_is_input_order_independent() {
        let mut shuffled = unit_square_fragments();
        shuffled.reverse();
        shuffled.swap(0, 2);
        let a = assemble_contours(unit_square_fragments()).unwrap();
        let b = assemble_contours(shuffled).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_backward_fragments_connect() {
        // Two fragments stored against the traversal direction.
        let fragments = vec![
            pair(0.0, 0.0, 1.0, 0.0),
            pair(1.0, 1.0, 1.0, 0.0),
            pair(0.0, 1.0, 1.0, 1.0),
            pair(0.0, 1.0, 0.0, 0.0),
        ];
        let contours = assemble_contours(fragments).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
    }

    #[test]
    fn test_interior_lies_to_the_right() {
        let contours = assemble_contours(unit_square_fragments()).unwrap();
        let contour = &contours[0];
        // For every directed edge, the interior sample (the centroid here,
        // since the square is convex) must sit on the right-hand side.
        let centroid = Point2::new(0.5, 0.5);
        for edge in contour.edges() {
            assert_eq!(
                orientation(edge.p, edge.endpoint(), centroid),
                Orientation::Clockwise,
                "interior is not right of {edge:?}"
            );
        }
    }

    #[test]
    fn test_winding_parity_invariant() {
        // After assembly a probe from the first edge's midpoint to the far
        // exterior crosses the remaining edges an odd number of times.
        let contours = assemble_contours(unit_square_fragments()).unwrap();
        let contour = &contours[0];
        let mid = contour.edge(0).midpoint();
        let ext = far_exterior(contour.points());
        let crossings = count_crossings(
            mid,
            ext,
            contour
                .edges()
                .enumerate()
                .filter(|(i, _)| *i != 0)
                .map(|(_, e)| e),
        )
        .unwrap();
        let first = contour.edge(0);
        let side = orientation(first.p, first.endpoint(), ext);
        // Interior-right orientation: the probe starts into the interior
        // (odd crossings) exactly when the reference sits on the right.
        assert_eq!(crossings % 2 == 1, side == Orientation::Clockwise);
    }

    #[test]
    fn test_two_disjoint_loops() {
        let mut fragments = unit_square_fragments();
        fragments.extend([
            pair(3.0, 0.0, 4.0, 0.0),
            pair(4.0, 0.0, 4.0, 1.0),
            pair(4.0, 1.0, 3.0, 1.0),
            pair(3.0, 1.0, 3.0, 0.0),
        ]);
        let contours = assemble_contours(fragments).unwrap();
        assert_eq!(contours.len(), 2);
        assert!(!contour_contains_contour(&contours[0], &contours[1]).unwrap());
    }

    #[test]
    fn test_unclosed_loop_fails() {
        let fragments = vec![
            pair(0.0, 0.0, 1.0, 0.0),
            pair(1.0, 0.0, 1.0, 1.0),
            pair(1.0, 1.0, 0.0, 1.0),
        ];
        let err = assemble_contours(fragments);
        assert!(matches!(err, Err(Error::UnclosedLoop { .. })));
    }

    #[test]
    fn test_triangle_slice_feeds_assembly() {
        // A shrunk-square containment scenario end to end.
        let contours = assemble_contours(unit_square_fragments()).unwrap();
        let shrunk = assemble_contours(vec![
            pair(0.25, 0.25, 0.75, 0.25),
            pair(0.75, 0.25, 0.75, 0.75),
            pair(0.75, 0.75, 0.25, 0.75),
            pair(0.25, 0.75, 0.25, 0.25),
        ])
        .unwrap();
        assert!(contour_contains_contour(&contours[0], &shrunk[0]).unwrap());
        assert!(!contour_contains_contour(&contours[0], &contours[0].clone()).unwrap());
    }
}
