//! G-code command model.
//!
//! Commands exist in two states: *raw* extrusions carry the geometry of the
//! path they draw (length, width, height), while *cooked* extrusions carry
//! the absolute cumulative filament position `E` the printer needs. The
//! cooking pass (see [`cook::cook_gcode`]) converts the former to the
//! latter; the writer (see [`writer::GCodeWriter`]) renders only cooked
//! streams.

pub mod cook;
pub mod path;
pub mod writer;

pub use cook::cook_gcode;
pub use path::{contour_path, infill_path};
pub use writer::GCodeWriter;

use crate::geometry::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Cross-section metrics of one raw extrusion segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPath {
    /// Path length (mm).
    pub length: f64,
    /// Extrusion width (mm).
    pub width: f64,
    /// Layer height (mm).
    pub height: f64,
}

/// A single machine command, raw or cooked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GCode {
    /// Travel without extruding (2D).
    Move2 { start: Point2, stop: Point2 },
    /// Travel without extruding (3D).
    Move3 { start: Point3, stop: Point3 },
    /// An extrusion whose filament feed has not been computed yet.
    RawExtrude2 {
        start: Point2,
        stop: Point2,
        path: RawPath,
    },
    /// A raw extrusion with a z component.
    RawExtrude3 {
        start: Point3,
        stop: Point3,
        path: RawPath,
    },
    /// A cooked extrusion: `e_pos` is the cumulative filament position
    /// after this command.
    Extrude2 {
        start: Point2,
        stop: Point2,
        e_pos: f64,
    },
    /// A cooked extrusion with a z component.
    Extrude3 {
        start: Point3,
        stop: Point3,
        e_pos: f64,
    },
    /// A feed-rate override wrapping a travel move.
    FeedRate { rate: f64, inner: Box<GCode> },
    /// Marker: start of layer `index` (negative for raft layers).
    LayerStart { index: i32 },
    /// Marker: inner wall paths follow.
    InnerWallStart,
    /// Marker: outer wall paths follow.
    OuterWallStart,
    /// Marker: support paths follow.
    SupportStart,
    /// Marker: infill paths follow.
    InfillStart,
}

/// The filament parameters of one extruder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extruder {
    /// Filament diameter (mm).
    pub filament_diameter: f64,
}

impl Default for Extruder {
    fn default() -> Self {
        Self {
            filament_diameter: 1.75,
        }
    }
}

/// Cumulative filament position of a print job.
///
/// One handle per job, owned by the caller and threaded through the
/// planner; only the cooking step writes it (read at entry, write at
/// exit), which keeps the core reentrant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtruderState {
    e: f64,
}

impl ExtruderState {
    /// A fresh state at printer start: `E = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current cumulative filament position.
    #[inline]
    pub fn position(&self) -> f64 {
        self.e
    }

    pub(crate) fn set_position(&mut self, e: f64) {
        self.e = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extruder_default_diameter() {
        assert_eq!(Extruder::default().filament_diameter, 1.75);
    }

    #[test]
    fn test_state_starts_at_zero() {
        assert_eq!(ExtruderState::new().position(), 0.0);
    }
}
