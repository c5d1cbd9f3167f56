use std::path::Path;

use serde::{Deserialize, Serialize};

use voxpaint_volume::GridCoord;

use super::{Brush, StrokeTarget};
use crate::error::BrushError;
use crate::rasterizer::grid_line;
use crate::registry::{PersistedBrush, save_brush};

/// Draws a straight line of cells from where the stroke started to where it
/// ended. Nothing is written until release.
///
/// The anchor lives only for the duration of one stroke and is not persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineBrush {
    #[serde(skip)]
    anchor: Option<GridCoord>,
}

impl LineBrush {
    /// The start cell of the stroke in progress.
    pub fn anchor(&self) -> Option<GridCoord> {
        self.anchor
    }
}

impl PersistedBrush for LineBrush {
    const NAME: &'static str = "LineBrush";
}

impl Brush for LineBrush {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn key_binding(&self) -> char {
        'L'
    }

    fn paint_start(&mut self, _target: &mut StrokeTarget<'_>, coord: GridCoord) {
        self.anchor = Some(coord);
    }

    fn paint_end(&mut self, target: &mut StrokeTarget<'_>, coord: GridCoord) {
        let start = self.anchor.take().unwrap_or(coord);
        for cell in grid_line(start, coord) {
            target.volume.set(cell, target.color);
        }
    }

    fn save_record(&self, dir: &Path) -> Result<(), BrushError> {
        save_brush(dir, self)
    }
}
