//! The sparse voxel volume: source of truth for occupancy and color.
//!
//! A coordinate is present in the map if and only if its cell is occupied.
//! [`VoxelVolume::set`] is the only mutation path; it suppresses no-op writes
//! and keeps the volume from ever becoming empty by re-filling the origin.

use glam::{IVec3, Vec3};
use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::coord::{GridCoord, VolumeFrame};
use crate::events::{ChangeFeed, ChangeReceiver};
use crate::pattern::FillPattern;

/// The cell that receives the fill color when the last occupied cell is cleared.
pub const ORIGIN: GridCoord = IVec3::ZERO;

/// Sparse mapping from grid coordinate to color, with a grid-to-world frame.
#[derive(Debug)]
pub struct VoxelVolume {
    frame: VolumeFrame,
    cells: FxHashMap<GridCoord, Color>,
    fill_color: Color,
    feed: ChangeFeed,
    version: u64,
}

impl VoxelVolume {
    /// Creates a volume holding only the origin cell, set to `fill_color`.
    pub fn new(frame: VolumeFrame, fill_color: Color) -> Self {
        Self::with_pattern(frame, fill_color, &FillPattern::Single)
    }

    /// Creates a volume whose cells covered by `pattern` hold `fill_color`.
    ///
    /// An empty pattern still yields the origin cell.
    pub fn with_pattern(frame: VolumeFrame, fill_color: Color, pattern: &FillPattern) -> Self {
        let mut cells: FxHashMap<GridCoord, Color> = pattern
            .cells()
            .into_iter()
            .map(|coord| (coord, fill_color))
            .collect();
        if cells.is_empty() {
            cells.insert(ORIGIN, fill_color);
        }
        tracing::debug!(cells = cells.len(), ?pattern, "created voxel volume");

        Self {
            frame,
            cells,
            fill_color,
            feed: ChangeFeed::new(),
            version: 0,
        }
    }

    /// Returns the grid-to-world frame.
    pub fn frame(&self) -> &VolumeFrame {
        &self.frame
    }

    /// Returns the color written at the origin when the volume would become empty.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Returns the color of `coord`, or `None` if the cell is empty.
    pub fn get(&self, coord: GridCoord) -> Option<Color> {
        self.cells.get(&coord).copied()
    }

    /// Returns `true` if `coord` is occupied.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Writes `value` at `coord`: `Some` adds or recolors the cell, `None` clears it.
    ///
    /// Returns `true` if the stored value changed. Writes that leave the value
    /// unchanged notify nobody. Clearing the last occupied cell writes the fill
    /// color at [`ORIGIN`] first (notifying it), then notifies `coord`; when the
    /// cleared cell is the origin itself the write becomes "set origin to the
    /// fill color".
    pub fn set(&mut self, coord: GridCoord, value: Option<Color>) -> bool {
        let old = self.get(coord);
        let clears_last_cell = value.is_none() && old.is_some() && self.cells.len() == 1;
        let value = if clears_last_cell && coord == ORIGIN {
            Some(self.fill_color)
        } else {
            value
        };

        if old == value {
            return false;
        }

        match value {
            Some(color) => {
                self.cells.insert(coord, color);
            }
            None => {
                self.cells.remove(&coord);
            }
        }

        if self.cells.is_empty() {
            self.cells.insert(ORIGIN, self.fill_color);
            self.commit(ORIGIN);
        }
        self.commit(coord);
        true
    }

    /// Sets `coord` to `color`. Shorthand for `set(coord, Some(color))`.
    pub fn paint(&mut self, coord: GridCoord, color: Color) -> bool {
        self.set(coord, Some(color))
    }

    /// Clears `coord`. Shorthand for `set(coord, None)`.
    pub fn clear(&mut self, coord: GridCoord) -> bool {
        self.set(coord, None)
    }

    /// Returns the number of occupied cells (always at least one).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a volume keeps at least one occupied cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates occupied cells and their colors in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, Color)> + '_ {
        self.cells.iter().map(|(coord, color)| (*coord, *color))
    }

    /// Iterates occupied coordinates in unspecified order.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells.keys().copied()
    }

    /// Returns the inclusive `(min, max)` corners of the occupied cells.
    pub fn bounds(&self) -> (GridCoord, GridCoord) {
        self.cells.keys().fold(
            (IVec3::splat(i32::MAX), IVec3::splat(i32::MIN)),
            |(min, max), c| (min.min(*c), max.max(*c)),
        )
    }

    /// Returns a counter incremented on every value-changing write.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscribes to change notifications.
    ///
    /// Only writes made after this call are delivered. Subscribers must not
    /// write to this volume while handling a notification.
    pub fn subscribe(&mut self) -> ChangeReceiver {
        self.feed.subscribe()
    }

    /// Maps a world position to the cell containing it.
    pub fn to_key(&self, world: Vec3) -> GridCoord {
        self.frame.to_key(world)
    }

    /// Returns the world position of a cell's center.
    pub fn from_key(&self, coord: GridCoord) -> Vec3 {
        self.frame.from_key(coord)
    }

    fn commit(&mut self, coord: GridCoord) {
        self.version += 1;
        tracing::trace!(%coord, version = self.version, "voxel changed");
        self.feed.notify(coord);
    }
}
