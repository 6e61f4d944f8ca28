//! Text rendering of cooked command streams.
//!
//! Each command renders to one ASCII line. Numbers are fixed-point with
//! five fractional digits, stripped of trailing zeros and a dangling
//! decimal point; an axis token is emitted only when its value differs
//! from the prior position at the five-digit tolerance. Motion lines keep
//! a trailing space after every token.

use super::GCode;
use crate::geometry::{approx_eq, Point3};
use crate::{Error, Result};

/// Format a scalar: `toFixed(5)`, strip trailing zeros, strip a dangling
/// point; exact zero (including a rounded-away negative) prints as `0`.
fn fmt_num(value: f64) -> String {
    let mut s = format!("{value:.5}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".into();
    }
    s
}

/// Renders cooked commands, tracking the prior position so unchanged axes
/// are elided.
#[derive(Clone, Debug, Default)]
pub struct GCodeWriter {
    position: Point3,
}

impl GCodeWriter {
    /// A writer positioned at the origin (printer start).
    pub fn new() -> Self {
        Self::default()
    }

    /// The position after the last rendered motion command.
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Render one command to its G-code line.
    ///
    /// Raw extrusions and feed rates around anything but a 2D travel are
    /// encoding errors.
    pub fn render(&mut self, command: &GCode) -> Result<String> {
        self.render_with_feed(command, None)
    }

    /// Render a whole stream, one line per command, joined with newlines.
    pub fn render_all(&mut self, commands: &[GCode]) -> Result<String> {
        let lines: Vec<String> = commands
            .iter()
            .map(|cmd| self.render(cmd))
            .collect::<Result<_>>()?;
        Ok(lines.join("\n"))
    }

    fn render_with_feed(&mut self, command: &GCode, feed: Option<f64>) -> Result<String> {
        match command {
            GCode::Move2 { stop, .. } => {
                Ok(self.motion_line("G0", feed, stop.x, stop.y, None, None))
            }
            GCode::Move3 { stop, .. } => {
                Ok(self.motion_line("G0", feed, stop.x, stop.y, Some(stop.z), None))
            }
            GCode::Extrude2 { stop, e_pos, .. } => {
                Ok(self.motion_line("G1", feed, stop.x, stop.y, None, Some(*e_pos)))
            }
            GCode::Extrude3 { stop, e_pos, .. } => {
                Ok(self.motion_line("G1", feed, stop.x, stop.y, Some(stop.z), Some(*e_pos)))
            }
            GCode::FeedRate { rate, inner } => match inner.as_ref() {
                GCode::Move2 { .. } => self.render_with_feed(inner, Some(*rate)),
                other => Err(Error::Encoding(format!(
                    "feed rate may only wrap a 2D travel, found {other:?}"
                ))),
            },
            GCode::RawExtrude2 { .. } | GCode::RawExtrude3 { .. } => Err(Error::Encoding(
                "raw extrude reached the writer; cook the stream first".into(),
            )),
            GCode::LayerStart { index } => Ok(format!(";LAYER:{index}")),
            GCode::InnerWallStart => Ok(";TYPE:WALL-INNER".into()),
            GCode::OuterWallStart => Ok(";TYPE:WALL-OUTER".into()),
            GCode::SupportStart => Ok(";TYPE:SUPPORT".into()),
            GCode::InfillStart => Ok(";TYPE:FILL".into()),
        }
    }

    fn motion_line(
        &mut self,
        opcode: &str,
        feed: Option<f64>,
        x: f64,
        y: f64,
        z: Option<f64>,
        e: Option<f64>,
    ) -> String {
        let mut line = String::from(opcode);
        line.push(' ');
        if let Some(f) = feed {
            line.push_str(&format!("F{} ", fmt_num(f)));
        }
        if !approx_eq(x, self.position.x) {
            line.push_str(&format!("X{} ", fmt_num(x)));
        }
        if !approx_eq(y, self.position.y) {
            line.push_str(&format!("Y{} ", fmt_num(y)));
        }
        if let Some(z) = z {
            if !approx_eq(z, self.position.z) {
                line.push_str(&format!("Z{} ", fmt_num(z)));
            }
            self.position.z = z;
        }
        if let Some(e) = e {
            line.push_str(&format!("E{} ", fmt_num(e)));
        }
        self.position.x = x;
        self.position.y = y;
        line
    }
}
