//! Triangle/plane slicing.
//!
//! Intersects triangles with a horizontal plane `z = v` and emits the 2D
//! line fragments the contour assembler stitches into loops. Each triangle
//! contributes at most one fragment per plane:
//!
//! - an edge lying exactly in the plane is returned as-is (projected),
//! - two distinct edge crossings are interpolated and returned as a pair,
//! - everything else (vertex grazes, fully coplanar triangles) is
//!   degenerate and dropped.

use crate::geometry::{Point2, Point3};
use crate::mesh::Triangle;
use log::warn;

/// An unordered directed point pair: one fragment of a layer outline.
pub type Fragment = (Point2, Point2);

/// Interpolate the crossing of one edge with the plane `z = v`.
///
/// Edges parallel to the plane are never evaluated as point crossings.
fn edge_crossing(p: &Point3, q: &Point3, v: f64) -> Option<Point2> {
    if p.z == q.z {
        return None;
    }
    let t = (v - p.z) / (q.z - p.z);
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some((*p + (*q - *p) * t).to_2d())
}

/// Slice one triangle against the plane `z = v`.
///
/// Returns `None` for triangles the plane misses or meets degenerately
/// (a single grazed vertex, or a fully coplanar triangle).
pub fn slice_triangle(tri: &Triangle, v: f64) -> Option<Fragment> {
    // Edges lying exactly in the plane.
    let flat: Vec<&(Point3, Point3)> = tri
        .edges()
        .iter()
        .filter(|(p, q)| p.z == v && q.z == v)
        .collect();
    match flat.len() {
        1 => {
            let (p, q) = flat[0];
            return Some((p.to_2d(), q.to_2d()));
        }
        3 => {
            warn!("dropping coplanar triangle at z = {v}");
            return None;
        }
        _ => {}
    }

    // Point crossings, deduplicated at the five-digit tolerance.
    let mut points: Vec<Point2> = Vec::with_capacity(3);
    for (p, q) in tri.edges() {
        if let Some(hit) = edge_crossing(p, q, v) {
            if !points.iter().any(|seen| seen.coincides_with(&hit)) {
                points.push(hit);
            }
        }
    }
    match points.len() {
        2 => Some((points[0], points[1])),
        0 => None,
        n => {
            warn!("dropping degenerate {n}-point triangle slice at z = {v}");
            None
        }
    }
}

/// Slice every triangle against the plane `z = v`, collecting fragments.
pub fn slice_at_z(triangles: &[Triangle], v: f64) -> Vec<Fragment> {
    triangles
        .iter()
        .filter_map(|tri| slice_triangle(tri, v))
        .collect()
}
