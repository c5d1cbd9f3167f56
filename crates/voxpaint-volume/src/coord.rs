//! Grid coordinates and the affine frame mapping grid space to world space.

use glam::{Affine3A, IVec3, Quat, Vec3};

/// Integer coordinate of one voxel cell in a volume's local grid.
///
/// Cell `c` is centered on the grid-space point `c` and spans `c ± 0.5`.
pub type GridCoord = IVec3;

/// Returns `coord + offset`, or `None` if any axis leaves the `i32` range.
///
/// Cells past the edge of the grid cannot be stored, so callers treat them
/// as empty.
pub fn offset_coord(coord: GridCoord, offset: IVec3) -> Option<GridCoord> {
    Some(IVec3::new(
        coord.x.checked_add(offset.x)?,
        coord.y.checked_add(offset.y)?,
        coord.z.checked_add(offset.z)?,
    ))
}

/// Affine transform from a volume's grid space to world space.
///
/// The inverse is cached at construction so that [`to_key`](Self::to_key) is a
/// single transform plus rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeFrame {
    to_world: Affine3A,
    to_grid: Affine3A,
}

impl VolumeFrame {
    /// Grid space and world space coincide.
    pub const IDENTITY: Self = Self {
        to_world: Affine3A::IDENTITY,
        to_grid: Affine3A::IDENTITY,
    };

    /// Creates a frame from a grid-to-world transform.
    ///
    /// # Panics
    ///
    /// Panics if `to_world` is not invertible (e.g. a zero scale axis). A volume
    /// without a usable frame cannot map between grid and world space at all.
    pub fn new(to_world: Affine3A) -> Self {
        let det = to_world.matrix3.determinant();
        assert!(
            det.is_finite() && det.abs() > f32::EPSILON,
            "volume frame must be invertible (determinant {det})"
        );
        Self {
            to_world,
            to_grid: to_world.inverse(),
        }
    }

    /// Creates a frame from cell size, orientation, and grid origin position.
    pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self::new(Affine3A::from_scale_rotation_translation(
            scale,
            rotation,
            translation,
        ))
    }

    /// Creates an unscaled, unrotated frame whose grid origin sits at `translation`.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(Affine3A::from_translation(translation))
    }

    /// Returns the grid-to-world transform.
    pub fn to_world(&self) -> Affine3A {
        self.to_world
    }

    /// Maps a world position to the cell containing it: inverse transform,
    /// then round each axis to the nearest integer (halves away from zero).
    pub fn to_key(&self, world: Vec3) -> GridCoord {
        self.to_grid_point(world).round().as_ivec3()
    }

    /// Returns the world position of the center of cell `coord`.
    pub fn from_key(&self, coord: GridCoord) -> Vec3 {
        self.to_world.transform_point3(coord.as_vec3())
    }

    /// Maps a world position into continuous grid space (no rounding).
    pub fn to_grid_point(&self, world: Vec3) -> Vec3 {
        self.to_grid.transform_point3(world)
    }

    /// Maps a world direction into grid space.
    pub fn to_grid_vector(&self, world: Vec3) -> Vec3 {
        self.to_grid.transform_vector3(world)
    }

    /// Maps a grid-space point into world space.
    pub fn to_world_point(&self, grid: Vec3) -> Vec3 {
        self.to_world.transform_point3(grid)
    }

    /// Applies the frame's linear part (scale and rotation) to a grid-space direction.
    pub fn transform_vector(&self, grid: Vec3) -> Vec3 {
        self.to_world.transform_vector3(grid)
    }

    /// Maps a grid-space surface normal to a unit world-space normal.
    ///
    /// Uses the inverse transpose so normals stay perpendicular under
    /// non-uniform scale.
    pub fn transform_normal(&self, grid: Vec3) -> Vec3 {
        self.to_grid
            .matrix3
            .transpose()
            .mul_vec3(grid)
            .normalize_or_zero()
    }

    /// Returns half the world-space size of one cell along each grid axis.
    pub fn cell_half_extents(&self) -> Vec3 {
        let m = self.to_world.matrix3;
        Vec3::new(m.x_axis.length(), m.y_axis.length(), m.z_axis.length()) * 0.5
    }
}

impl Default for VolumeFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A world-space ray with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Creates a ray from `origin` through `target`.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Returns the point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
