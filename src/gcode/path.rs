//! Path emission: contours and infill as raw command streams.

use super::{GCode, RawPath};
use crate::contour::Contour;
use crate::geometry::{LineSeg, Point2};
use crate::{Error, Result};

fn raw_extrude(a: Point2, b: Point2, width: f64, height: f64) -> GCode {
    GCode::RawExtrude2 {
        start: a,
        stop: b,
        path: RawPath {
            length: a.distance(&b),
            width,
            height,
        },
    }
}

/// Emit one raw extrusion per contour edge, including the closing edge
/// back to the first vertex.
pub fn contour_path(contour: &Contour, width: f64, height: f64) -> Vec<GCode> {
    let pts = contour.points();
    (0..pts.len())
        .map(|i| raw_extrude(pts[i], pts[(i + 1) % pts.len()], width, height))
        .collect()
}

/// Emit infill: each group is a connected sub-path whose segments are
/// extruded in order, with connecting extrusions between consecutive
/// segments; groups are linked by non-extruding travel moves.
///
/// Groups must be non-empty; callers pre-filter.
pub fn infill_path(groups: &[Vec<LineSeg>], width: f64, height: f64) -> Result<Vec<GCode>> {
    let mut out = Vec::new();
    let mut prev_end: Option<Point2> = None;
    for group in groups {
        let first = group.first().ok_or(Error::EmptyPointList)?;
        if let Some(from) = prev_end {
            out.push(GCode::Move2 {
                start: from,
                stop: first.p,
            });
        }
        out.push(raw_extrude(first.p, first.endpoint(), width, height));
        let mut cursor = first.endpoint();
        for seg in &group[1..] {
            if !cursor.coincides_with(&seg.p) {
                out.push(raw_extrude(cursor, seg.p, width, height));
            }
            out.push(raw_extrude(seg.p, seg.endpoint(), width, height));
            cursor = seg.endpoint();
        }
        prev_end = Some(cursor);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_contour() -> Contour {
        Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap()
    }

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> LineSeg {
        LineSeg::from_points(Point2::new(ax, ay), Point2::new(bx, by)).unwrap()
    }

    #[test]
    fn test_contour_path_closes_loop() {
        let cmds = contour_path(&square_contour(), 0.4, 0.2);
        assert_eq!(cmds.len(), 4);
        for cmd in &cmds {
            match cmd {
                GCode::RawExtrude2 { path, .. } => {
                    assert_abs_diff_eq!(path.length, 10.0);
                    assert_eq!(path.width, 0.4);
                    assert_eq!(path.height, 0.2);
                }
                other => panic!("expected raw extrude, got {other:?}"),
            }
        }
        // The last command returns to the first vertex.
        match cmds.last().unwrap() {
            GCode::RawExtrude2 { stop, .. } => assert_eq!(*stop, Point2::new(0.0, 0.0)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_infill_travels_between_groups() {
        let groups = vec![
            vec![seg(0.0, 0.0, 5.0, 0.0), seg(5.0, 1.0, 0.0, 1.0)],
            vec![seg(0.0, 4.0, 5.0, 4.0)],
        ];
        let cmds = infill_path(&groups, 0.4, 0.2).unwrap();
        // Group 1: extrude, connector, extrude; then travel; group 2: extrude.
        assert_eq!(cmds.len(), 5);
        assert!(matches!(cmds[0], GCode::RawExtrude2 { .. }));
        assert!(matches!(cmds[1], GCode::RawExtrude2 { .. }));
        assert!(matches!(cmds[2], GCode::RawExtrude2 { .. }));
        assert!(matches!(cmds[3], GCode::Move2 { .. }));
        assert!(matches!(cmds[4], GCode::RawExtrude2 { .. }));
    }

    #[test]
    fn test_infill_skips_connector_for_touching_segments() {
        let groups = vec![vec![seg(0.0, 0.0, 5.0, 0.0), seg(5.0, 0.0, 5.0, 5.0)]];
        let cmds = infill_path(&groups, 0.4, 0.2).unwrap();
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn test_infill_rejects_empty_group() {
        let groups = vec![vec![seg(0.0, 0.0, 1.0, 0.0)], vec![]];
        assert!(matches!(
            infill_path(&groups, 0.4, 0.2),
            Err(Error::EmptyPointList)
        ));
    }
}
