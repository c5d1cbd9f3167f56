use std::path::Path;

use serde::{Deserialize, Serialize};

use voxpaint_volume::GridCoord;

use super::{Brush, StrokeTarget};
use crate::error::BrushError;
use crate::registry::{PersistedBrush, save_brush};

/// Writes the paint color (or clears) at every cell the stroke passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBrush;

impl PersistedBrush for PixelBrush {
    const NAME: &'static str = "PixelBrush";
}

impl Brush for PixelBrush {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn key_binding(&self) -> char {
        'E'
    }

    fn paint_loop(&mut self, target: &mut StrokeTarget<'_>, coord: GridCoord) {
        target.volume.set(coord, target.color);
    }

    fn save_record(&self, dir: &Path) -> Result<(), BrushError> {
        save_brush(dir, self)
    }
}
