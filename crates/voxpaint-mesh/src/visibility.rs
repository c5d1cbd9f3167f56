//! Visible face detection: a face is visible when the neighbor across it is
//! empty or past the edge of the grid. Cells with all six neighbors occupied
//! contribute nothing.

use voxpaint_volume::{GridCoord, VoxelVolume};

use crate::face_direction::FaceDirection;

/// Bitmask indicating which of a cell's six faces are visible.
///
/// Bit `i` corresponds to the [`FaceDirection`] with discriminant `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleFaces(pub u8);

impl VisibleFaces {
    /// No faces visible.
    pub const NONE: Self = Self(0);
    /// All six faces visible.
    pub const ALL: Self = Self(0b0011_1111);

    /// Returns `true` if the face in the given direction is visible.
    pub fn is_visible(self, direction: FaceDirection) -> bool {
        self.0 & (1 << direction as u8) != 0
    }

    /// Marks the face in the given direction as visible.
    pub fn set_visible(&mut self, direction: FaceDirection) {
        self.0 |= 1 << direction as u8;
    }

    /// Returns the number of visible faces (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if no face is visible.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the visible directions in [`FaceDirection::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = FaceDirection> {
        FaceDirection::ALL
            .into_iter()
            .filter(move |dir| self.is_visible(*dir))
    }
}

/// Returns the visible faces of `coord` (empty for unoccupied cells).
pub fn visible_faces(volume: &VoxelVolume, coord: GridCoord) -> VisibleFaces {
    if !volume.is_occupied(coord) {
        return VisibleFaces::NONE;
    }
    let mut faces = VisibleFaces::NONE;
    for dir in FaceDirection::ALL {
        if dir.neighbor(coord).is_none_or(|n| !volume.is_occupied(n)) {
            faces.set_visible(dir);
        }
    }
    faces
}

/// Returns every occupied cell with at least one visible face.
///
/// Cells are ordered by `(z, y, x)` so the synthesized mesh is deterministic
/// regardless of hash-map iteration order.
pub fn compute_visible_faces(volume: &VoxelVolume) -> Vec<(GridCoord, VisibleFaces)> {
    let mut visible: Vec<_> = volume
        .coords()
        .map(|coord| (coord, visible_faces(volume, coord)))
        .filter(|(_, faces)| !faces.is_empty())
        .collect();
    visible.sort_unstable_by_key(|(c, _)| (c.z, c.y, c.x));
    visible
}

/// Counts the total number of visible faces.
pub fn count_visible_faces(faces: &[(GridCoord, VisibleFaces)]) -> u32 {
    faces.iter().map(|(_, vf)| vf.count()).sum()
}
