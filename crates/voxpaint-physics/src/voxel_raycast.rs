//! Voxel picking with the DDA (Amanatides & Woo) grid traversal.
//!
//! The world-space ray is mapped into the volume's grid space, where cell `c`
//! spans `c ± 0.5`. Because the frame is affine, the ray parameter is the same
//! in both spaces, so hit distances come out in world units.

use glam::{IVec3, Vec3};

use voxpaint_volume::{GridCoord, Ray, VoxelVolume};

/// Result of a successful voxel pick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelHit {
    /// The occupied cell that was hit.
    pub cell: GridCoord,
    /// Grid-space normal of the entry face. Zero when the ray starts inside
    /// the hit cell.
    pub normal: IVec3,
    /// World-space point where the ray enters the cell.
    pub point: Vec3,
    /// Distance from the ray origin to `point`, in world units.
    pub distance: f32,
}

impl VoxelHit {
    /// Returns `true` if the hit has a well-defined entry face.
    pub fn has_face(&self) -> bool {
        self.normal != IVec3::ZERO
    }
}

/// Casts `ray` through the grid of `volume` and returns the first occupied cell
/// within `max_distance`.
///
/// A non-finite or negative `max_distance` picks nothing. The march also stops
/// at the edge of the `i32` grid.
pub fn pick_volume(volume: &VoxelVolume, ray: &Ray, max_distance: f32) -> Option<VoxelHit> {
    if !max_distance.is_finite() || max_distance < 0.0 {
        return None;
    }
    let frame = volume.frame();
    let dir = frame.to_grid_vector(ray.direction);
    if dir == Vec3::ZERO {
        return None;
    }

    // Shift so cell boundaries fall on integers.
    let start = frame.to_grid_point(ray.origin) + Vec3::splat(0.5);
    let mut voxel = start.floor().as_ivec3();
    let sub = start - start.floor();

    let step = IVec3::new(step_sign(dir.x), step_sign(dir.y), step_sign(dir.z));
    let t_delta = Vec3::new(
        safe_inv(dir.x.abs()),
        safe_inv(dir.y.abs()),
        safe_inv(dir.z.abs()),
    );
    let mut t_max = Vec3::new(
        initial_t_max(sub.x, dir.x, t_delta.x),
        initial_t_max(sub.y, dir.y, t_delta.y),
        initial_t_max(sub.z, dir.z, t_delta.z),
    );

    let mut normal = IVec3::ZERO;
    let mut t = 0.0_f32;

    loop {
        if volume.is_occupied(voxel) {
            return Some(VoxelHit {
                cell: voxel,
                normal,
                point: ray.at(t),
                distance: t,
            });
        }

        if t_max.x < t_max.y && t_max.x < t_max.z {
            t = t_max.x;
            t_max.x += t_delta.x;
            voxel.x = voxel.x.checked_add(step.x)?;
            normal = IVec3::new(-step.x, 0, 0);
        } else if t_max.y < t_max.z {
            t = t_max.y;
            t_max.y += t_delta.y;
            voxel.y = voxel.y.checked_add(step.y)?;
            normal = IVec3::new(0, -step.y, 0);
        } else {
            t = t_max.z;
            t_max.z += t_delta.z;
            voxel.z = voxel.z.checked_add(step.z)?;
            normal = IVec3::new(0, 0, -step.z);
        }

        if t > max_distance {
            return None;
        }
    }
}

fn step_sign(x: f32) -> i32 {
    if x >= 0.0 { 1 } else { -1 }
}

/// 1 / x, clamped to `f32::MAX` when x ≈ 0.
fn safe_inv(x: f32) -> f32 {
    if x < f32::EPSILON { f32::MAX } else { 1.0 / x }
}

/// Parametric distance to the first cell boundary along one axis.
fn initial_t_max(sub: f32, dir_component: f32, t_delta: f32) -> f32 {
    if dir_component > 0.0 {
        (1.0 - sub) * t_delta
    } else if dir_component < 0.0 {
        sub * t_delta
    } else {
        f32::MAX
    }
}
