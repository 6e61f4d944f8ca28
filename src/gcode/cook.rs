//! Cooking: raw extrusions to absolute filament positions.
//!
//! Per-command feed increments are independent, so they are computed with
//! a parallel map over `⌈N / threads⌉`-sized chunks; only the prefix sum
//! that turns increments into cumulative positions, and the final write to
//! [`ExtruderState`], are sequential. Output order matches input order and
//! the resulting `E` series is non-decreasing.

use super::{Extruder, ExtruderState, GCode};
use log::debug;
use rayon::prelude::*;

impl Extruder {
    /// Filament advanced by one command: the printed cross-section over the
    /// filament cross-section, zero for travels, markers and anything
    /// already cooked.
    pub fn filament_delta(&self, command: &GCode) -> f64 {
        match command {
            GCode::RawExtrude2 { path, .. } | GCode::RawExtrude3 { path, .. } => {
                (path.width * path.height * path.length * 2.0)
                    / (std::f64::consts::PI * self.filament_diameter)
            }
            _ => 0.0,
        }
    }
}

fn with_e_pos(command: GCode, e_pos: f64) -> GCode {
    match command {
        GCode::RawExtrude2 { start, stop, .. } => GCode::Extrude2 { start, stop, e_pos },
        GCode::RawExtrude3 { start, stop, .. } => GCode::Extrude3 { start, stop, e_pos },
        other => other,
    }
}

/// Cook a command stream: replace every raw extrusion with its cooked
/// form carrying the cumulative filament position.
///
/// The state handle is read once at entry and written once at exit;
/// already-cooked extrusions pass through unchanged and advance nothing
/// (cooking is idempotent).
pub fn cook_gcode(
    extruder: &Extruder,
    state: &mut ExtruderState,
    commands: Vec<GCode>,
) -> Vec<GCode> {
    if commands.is_empty() {
        return commands;
    }
    let chunk = commands
        .len()
        .div_ceil(rayon::current_num_threads().max(1));
    let deltas: Vec<f64> = commands
        .par_chunks(chunk)
        .flat_map_iter(|part| part.iter().map(|cmd| extruder.filament_delta(cmd)))
        .collect();

    let mut e = state.position();
    let cooked: Vec<GCode> = commands
        .into_iter()
        .zip(deltas)
        .map(|(cmd, delta)| {
            e += delta;
            with_e_pos(cmd, e)
        })
        .collect();
    debug!("cooked {} commands, filament position {e}", cooked.len());
    state.set_position(e);
    cooked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::Contour;
    use crate::gcode::path::contour_path;
    use crate::geometry::{Point2, Point3};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn raw(len: f64) -> GCode {
        GCode::RawExtrude2 {
            start: Point2::zero(),
            stop: Point2::new(len, 0.0),
            path: crate::gcode::RawPath {
                length: len,
                width: 0.4,
                height: 0.2,
            },
        }
    }

    #[test]
    fn test_volume_law() {
        let extruder = Extruder::default();
        let delta = extruder.filament_delta(&raw(10.0));
        assert_relative_eq!(
            delta * PI * 1.75,
            2.0 * 10.0 * 0.4 * 0.2,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_travel_and_markers_advance_nothing() {
        let extruder = Extruder::default();
        let travel = GCode::Move2 {
            start: Point2::zero(),
            stop: Point2::new(5.0, 5.0),
        };
        assert_eq!(extruder.filament_delta(&travel), 0.0);
        assert_eq!(
            extruder.filament_delta(&GCode::LayerStart { index: 3 }),
            0.0
        );
        assert_eq!(extruder.filament_delta(&GCode::InfillStart), 0.0);
    }

    #[test]
    fn test_cook_square_perimeter() {
        let contour = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap();
        let extruder = Extruder::default();
        let mut state = ExtruderState::new();
        let cooked = cook_gcode(&extruder, &mut state, contour_path(&contour, 0.4, 0.2));

        assert_eq!(cooked.len(), 4);
        let per_edge = (0.4 * 0.2 * 10.0 * 2.0) / (PI * 1.75);
        assert_relative_eq!(state.position(), 4.0 * per_edge, max_relative = 1e-9);
        match cooked.last().unwrap() {
            GCode::Extrude2 { e_pos, .. } => {
                assert_relative_eq!(*e_pos, state.position(), max_relative = 1e-12);
            }
            other => panic!("expected cooked extrude, got {other:?}"),
        }
    }

    #[test]
    fn test_e_series_monotone() {
        let cmds = vec![
            raw(1.0),
            GCode::Move2 {
                start: Point2::zero(),
                stop: Point2::new(1.0, 1.0),
            },
            raw(2.0),
            GCode::LayerStart { index: 1 },
            raw(0.5),
        ];
        let mut state = ExtruderState::new();
        let cooked = cook_gcode(&Extruder::default(), &mut state, cmds);
        let mut last = 0.0;
        for cmd in &cooked {
            if let GCode::Extrude2 { e_pos, .. } = cmd {
                assert!(*e_pos >= last);
                last = *e_pos;
            }
        }
        assert_eq!(state.position(), last);
    }

    #[test]
    fn test_cooking_resumes_from_state() {
        let mut state = ExtruderState::new();
        let extruder = Extruder::default();
        cook_gcode(&extruder, &mut state, vec![raw(10.0)]);
        let first = state.position();
        let second = cook_gcode(&extruder, &mut state, vec![raw(10.0)]);
        match &second[0] {
            GCode::Extrude2 { e_pos, .. } => {
                assert_relative_eq!(*e_pos, 2.0 * first, max_relative = 1e-12);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_cooking_is_idempotent() {
        let extruder = Extruder::default();
        let mut state = ExtruderState::new();
        let once = cook_gcode(&extruder, &mut state, vec![raw(3.0), raw(4.0)]);
        let e_after_once = state.position();
        let twice = cook_gcode(&extruder, &mut state, once.clone());
        assert_eq!(once, twice);
        assert_eq!(state.position(), e_after_once);
    }

    #[test]
    fn test_parallel_matches_sequential_prefix_sum() {
        let extruder = Extruder::default();
        let cmds: Vec<GCode> = (1..=257).map(|i| raw(i as f64 * 0.1)).collect();

        let mut expected = Vec::with_capacity(cmds.len());
        let mut e = 0.0;
        for cmd in &cmds {
            e += extruder.filament_delta(cmd);
            expected.push(e);
        }

        let mut state = ExtruderState::new();
        let cooked = cook_gcode(&extruder, &mut state, cmds);
        for (cmd, want) in cooked.iter().zip(expected) {
            match cmd {
                GCode::Extrude2 { e_pos, .. } => assert_eq!(*e_pos, want),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_raw_extrude3_cooks() {
        let cmd = GCode::RawExtrude3 {
            start: Point3::new(0.0, 0.0, 0.2),
            stop: Point3::new(5.0, 0.0, 0.2),
            path: crate::gcode::RawPath {
                length: 5.0,
                width: 0.4,
                height: 0.2,
            },
        };
        let mut state = ExtruderState::new();
        let cooked = cook_gcode(&Extruder::default(), &mut state, vec![cmd]);
        assert!(matches!(cooked[0], GCode::Extrude3 { .. }));
        assert!(state.position() > 0.0);
    }
}
