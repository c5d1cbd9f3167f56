use std::collections::VecDeque;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use voxpaint_volume::{GridCoord, VoxelVolume, offset_coord};

use super::{Brush, StrokeTarget};
use crate::error::BrushError;
use crate::registry::{PersistedBrush, save_brush};

const NEIGHBORS: [GridCoord; 6] = [
    GridCoord::X,
    GridCoord::NEG_X,
    GridCoord::Y,
    GridCoord::NEG_Y,
    GridCoord::Z,
    GridCoord::NEG_Z,
];

/// Recolors (or clears) the face-connected region of cells that share the
/// seed cell's color.
///
/// The fill runs once, on stroke start. The seed is the start cell when it is
/// occupied, otherwise the surface cell directly behind it along the plane
/// normal. An empty seed, or a seed already holding the paint color, makes the
/// stroke a no-op. At most `max_cells` cells are written, nearest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillBrush {
    /// Upper bound on the number of cells one fill may write.
    pub max_cells: usize,
    /// Restrict the region to the seed's layer perpendicular to the plane normal.
    pub planar: bool,
}

impl Default for FillBrush {
    fn default() -> Self {
        Self {
            max_cells: 4096,
            planar: false,
        }
    }
}

impl FillBrush {
    /// Collects the region connected to `seed` in breadth-first order.
    pub fn region(
        &self,
        volume: &VoxelVolume,
        seed: GridCoord,
        layer_normal: Option<GridCoord>,
    ) -> Vec<GridCoord> {
        let Some(color) = volume.get(seed) else {
            return Vec::new();
        };

        let mut region = Vec::new();
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([seed]);
        seen.insert(seed);

        while let Some(cell) = queue.pop_front() {
            if region.len() >= self.max_cells {
                break;
            }
            region.push(cell);
            for offset in NEIGHBORS {
                if layer_normal.is_some_and(|n| offset.dot(n) != 0) {
                    continue;
                }
                let Some(next) = offset_coord(cell, offset) else {
                    continue;
                };
                if volume.get(next) == Some(color) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        region
    }
}

impl PersistedBrush for FillBrush {
    const NAME: &'static str = "FillBrush";
}

impl Brush for FillBrush {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn key_binding(&self) -> char {
        'F'
    }

    fn paint_start(&mut self, target: &mut StrokeTarget<'_>, coord: GridCoord) {
        let normal = target.plane.grid_normal();
        let seed = if target.volume.is_occupied(coord) {
            Some(coord)
        } else {
            offset_coord(coord, -normal)
        };
        let Some(seed) = seed else {
            return;
        };
        let Some(seed_color) = target.volume.get(seed) else {
            return;
        };
        if Some(seed_color) == target.color {
            return;
        }

        let layer = self.planar.then_some(normal);
        let region = self.region(target.volume, seed, layer);
        tracing::debug!(?seed, cells = region.len(), "flood fill");
        for cell in region {
            target.volume.set(cell, target.color);
        }
    }

    fn save_record(&self, dir: &Path) -> Result<(), BrushError> {
        save_brush(dir, self)
    }
}
