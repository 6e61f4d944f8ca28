//! # Lamina
//!
//! The geometric core of an FDM slicer, built on 2D projective geometric
//! algebra (Cl(2,0,1)).
//!
//! The crate takes a triangulated surface mesh and slicing planes,
//! produces closed nested contours per plane, and emits the machine
//! commands that draw them:
//! - Triangle/plane intersection into line fragments
//! - Fragment stitching into oriented closed contours
//! - Containment forests (which contour is a hole of which)
//! - Interior probing along perpendicular bisectors
//! - Extrusion planning: path volume to cumulative filament feed
//! - G-code text emission
//!
//! Mesh file parsing, layer-height selection, infill pattern generation
//! and the CLI are external collaborators; this crate is a pure library.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lamina::{cook_gcode, plan_layer_walls, slice_layer};
//! use lamina::{Extruder, ExtruderState, GCodeWriter};
//!
//! let trees = slice_layer(&triangles, 0.2)?;
//! let raw = plan_layer_walls(0, &trees, 0.4, 0.2);
//! let mut state = ExtruderState::new();
//! let cooked = cook_gcode(&Extruder::default(), &mut state, raw);
//! let text = GCodeWriter::new().render_all(&cooked)?;
//! ```

pub mod algebra;
pub mod contour;
pub mod gcode;
pub mod geometry;
pub mod mesh;
pub mod pga;
pub mod pipeline;
pub mod skeleton;
pub mod slice;

// Re-export commonly used types
pub use algebra::GVec;
pub use contour::{
    assemble_contours, build_contour_tree, contour_contains_contour, inner_contour_point, Contour,
    ContourTree,
};
pub use gcode::{
    contour_path, cook_gcode, infill_path, Extruder, ExtruderState, GCode, GCodeWriter, RawPath,
};
pub use geometry::{approx_eq, orientation, LineSeg, Orientation, Point2, Point3};
pub use mesh::{Triangle, TriangleMesh};
pub use pga::{
    combine_consecutive_lines, intersect_plines, join, line_between, line_intersection, meet,
    perpendicular_bisector, plines_intersect_at, Intersection, PLine2, PPoint2, Rotation,
};
pub use pipeline::{plan_layer_walls, slice_layer, slice_mesh, Layer};
pub use skeleton::{Arcable, ENode, INode, Motorcycle, Pointable, Spine};
pub use slice::{slice_at_z, slice_triangle, Fragment};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for slicing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("degenerate segment: zero displacement at {0:?}")]
    DegenerateSegment(geometry::Point2),

    #[error("cannot build a segment chain from fewer than two points")]
    EmptyPointList,

    #[error("unclosed loop: open end at {at:?}, {remaining} fragments unconsumed")]
    UnclosedLoop {
        at: geometry::Point2,
        remaining: usize,
    },

    #[error("unexpected intersection result: {0}")]
    InsaneIntersection(String),

    #[error("G-code encoding error: {0}")]
    Encoding(String),
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
