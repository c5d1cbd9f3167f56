//! Brush strategy: what a stroke does to the volume at each rasterized cell.
//!
//! The controller drives every brush through the same three hooks. A hook the
//! brush does not override does nothing.

use std::path::Path;

use voxpaint_volume::{Color, GridCoord, VoxelVolume};

use crate::error::BrushError;
use crate::plane::PaintPlane;

mod fill;
mod line;
mod pixel;

pub use fill::FillBrush;
pub use line::LineBrush;
pub use pixel::PixelBrush;

/// What a brush hook may touch during a stroke.
#[derive(Debug)]
pub struct StrokeTarget<'a> {
    /// The volume being painted.
    pub volume: &'a mut VoxelVolume,
    /// The color to write; `None` clears cells.
    pub color: Option<Color>,
    /// The plane captured at stroke start.
    pub plane: &'a PaintPlane,
}

/// A painting tool.
pub trait Brush: Send + Sync + std::fmt::Debug {
    /// Display name, also the stem of the brush's record file.
    fn name(&self) -> &'static str;

    /// Keyboard shortcut that selects the brush.
    fn key_binding(&self) -> char;

    /// Called once when a stroke begins, at the start cell.
    fn paint_start(&mut self, _target: &mut StrokeTarget<'_>, _coord: GridCoord) {}

    /// Called once per rasterized cell while the stroke is active.
    fn paint_loop(&mut self, _target: &mut StrokeTarget<'_>, _coord: GridCoord) {}

    /// Called once when the stroke ends, at the final cell.
    fn paint_end(&mut self, _target: &mut StrokeTarget<'_>, _coord: GridCoord) {}

    /// Writes the brush's settings to its record in `dir`.
    fn save_record(&self, dir: &Path) -> Result<(), BrushError>;
}
