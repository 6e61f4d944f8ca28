//! Per-layer drivers: mesh in, wall commands out.
//!
//! These tie the stages together for the common case:
//! slice → assemble → nest → plan → (cook, render elsewhere).

use crate::contour::{assemble_contours, build_contour_tree, ContourTree};
use crate::gcode::{contour_path, GCode};
use crate::mesh::{Triangle, TriangleMesh};
use crate::slice::slice_at_z;
use crate::Result;
use log::warn;
use serde::{Deserialize, Serialize};

/// One sliced layer: its plane height and nested contours.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub z: f64,
    pub trees: Vec<ContourTree>,
}

/// Slice the triangles at one plane and build the containment forest.
pub fn slice_layer(triangles: &[Triangle], z: f64) -> Result<Vec<ContourTree>> {
    let fragments = slice_at_z(triangles, z);
    let contours = assemble_contours(fragments)?;
    build_contour_tree(contours)
}

/// Slice a mesh at every plane. A layer whose loops fail to close is
/// skipped with a warning; the remaining layers are still produced.
pub fn slice_mesh(mesh: &TriangleMesh, planes: &[f64]) -> Vec<Layer> {
    planes
        .iter()
        .filter_map(|&z| match slice_layer(&mesh.triangles, z) {
            Ok(trees) => Some(Layer { z, trees }),
            Err(err) => {
                warn!("skipping layer at z = {z}: {err}");
                None
            }
        })
        .collect()
}

/// Emit the raw wall commands for one layer's contour forest: a layer
/// marker, then each root contour as an outer wall and every nested
/// contour as an inner wall.
pub fn plan_layer_walls(
    layer_index: i32,
    trees: &[ContourTree],
    width: f64,
    height: f64,
) -> Vec<GCode> {
    fn walk(node: &ContourTree, depth: usize, width: f64, height: f64, out: &mut Vec<GCode>) {
        out.push(if depth == 0 {
            GCode::OuterWallStart
        } else {
            GCode::InnerWallStart
        });
        out.extend(contour_path(&node.contour, width, height));
        for child in &node.children {
            walk(child, depth + 1, width, height, out);
        }
    }

    let mut out = vec![GCode::LayerStart { index: layer_index }];
    for tree in trees {
        walk(tree, 0, width, height, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::{cook_gcode, Extruder, ExtruderState, GCodeWriter};
    use crate::geometry::Point3;

    /// An axis-aligned open-top box shell: four side walls from z=0 to z=1,
    /// built as two triangles per face.
    fn box_walls(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Triangle> {
        let mut tris = Vec::new();
        let corners = [
            (Point3::new(x0, y0, 0.0), Point3::new(x1, y0, 0.0)),
            (Point3::new(x1, y0, 0.0), Point3::new(x1, y1, 0.0)),
            (Point3::new(x1, y1, 0.0), Point3::new(x0, y1, 0.0)),
            (Point3::new(x0, y1, 0.0), Point3::new(x0, y0, 0.0)),
        ];
        for (a, b) in corners {
            let a_top = Point3::new(a.x, a.y, 1.0);
            let b_top = Point3::new(b.x, b.y, 1.0);
            tris.push(Triangle::new(a, b, b_top));
            tris.push(Triangle::new(a, b_top, a_top));
        }
        tris
    }

    #[test]
    fn test_slice_layer_builds_one_root() {
        let trees = slice_layer(&box_walls(0.0, 0.0, 10.0, 10.0), 0.5).unwrap();
        assert_eq!(trees.len(), 1);
        // Two triangles per face leave a midpoint vertex on every side.
        assert_eq!(trees[0].contour.len(), 8);
        assert!(trees[0].children.is_empty());
    }

    #[test]
    fn test_slice_layer_nests_hole() {
        let mut tris = box_walls(0.0, 0.0, 10.0, 10.0);
        tris.extend(box_walls(3.0, 3.0, 7.0, 7.0));
        let trees = slice_layer(&tris, 0.5).unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].children.len(), 1);
        assert_eq!(trees[0].children[0].contour.len(), 8);
    }

    #[test]
    fn test_slice_mesh_spans_planes() {
        let mesh = TriangleMesh::new(box_walls(0.0, 0.0, 5.0, 5.0));
        let layers = slice_mesh(&mesh, &[0.25, 0.5, 0.75]);
        assert_eq!(layers.len(), 3);
        assert!(layers.iter().all(|l| l.trees.len() == 1));
    }

    #[test]
    fn test_plan_cook_render_end_to_end() {
        let trees = slice_layer(&box_walls(0.0, 0.0, 10.0, 10.0), 0.5).unwrap();
        let raw = plan_layer_walls(0, &trees, 0.4, 0.2);
        assert_eq!(raw[0], GCode::LayerStart { index: 0 });
        assert_eq!(raw[1], GCode::OuterWallStart);

        let mut state = ExtruderState::new();
        let cooked = cook_gcode(&Extruder::default(), &mut state, raw);
        assert!(state.position() > 0.0);

        let mut writer = GCodeWriter::new();
        let text = writer.render_all(&cooked).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ";LAYER:0");
        assert_eq!(lines[1], ";TYPE:WALL-OUTER");
        assert!(lines[2..].iter().all(|l| l.starts_with("G1 ")));
        assert!(lines[2..].iter().all(|l| l.contains('E')));
    }
}
