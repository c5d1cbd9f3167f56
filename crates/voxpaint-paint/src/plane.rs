//! The plane a stroke is constrained to.

use glam::{IVec3, Vec3};

use voxpaint_volume::{GridCoord, Ray, VolumeFrame};

const PARALLEL_EPSILON: f32 = 1e-6;

/// A world-space plane captured when a stroke begins.
///
/// The plane passes through the center of the cell `offset` cells out from
/// the picked surface cell and faces along the picked face's normal, so the
/// whole stroke stays on one layer of cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintPlane {
    point: Vec3,
    normal: Vec3,
    grid_normal: IVec3,
}

impl PaintPlane {
    /// Builds the plane for a stroke started on face `grid_normal` of `cell`.
    pub fn through_cell(
        frame: &VolumeFrame,
        cell: GridCoord,
        grid_normal: IVec3,
        offset_cells: i32,
    ) -> Self {
        let offset = grid_normal.as_vec3() * offset_cells as f32;
        Self {
            point: frame.to_world_point(cell.as_vec3() + offset),
            normal: frame.transform_normal(grid_normal.as_vec3()),
            grid_normal,
        }
    }

    /// A point on the plane.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Unit world-space normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The face normal in grid space.
    pub fn grid_normal(&self) -> IVec3 {
        self.grid_normal
    }

    /// Intersects `ray` with the plane.
    ///
    /// Returns `None` for rays parallel to the plane or pointing away from it.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect_within(ray, f32::INFINITY)
    }

    /// Like [`intersect`](Self::intersect), but also `None` when the plane is
    /// more than `max_distance` world units along the ray.
    pub fn intersect_within(&self, ray: &Ray, max_distance: f32) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        (t >= 0.0 && t <= max_distance).then(|| ray.at(t))
    }

    /// Returns `true` if `coord` lies on the same layer of cells as the plane.
    pub fn contains_cell(&self, frame: &VolumeFrame, coord: GridCoord) -> bool {
        let layer = frame.to_key(self.point).as_i64vec3();
        (coord.as_i64vec3() - layer).dot(self.grid_normal.as_i64vec3()) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_is_offset_from_surface_cell() {
        let plane = PaintPlane::through_cell(&VolumeFrame::IDENTITY, IVec3::ZERO, IVec3::Y, 1);
        assert_eq!(plane.point(), Vec3::Y);
        assert_eq!(plane.normal(), Vec3::Y);

        let flush = PaintPlane::through_cell(&VolumeFrame::IDENTITY, IVec3::ZERO, IVec3::Y, 0);
        assert_eq!(flush.point(), Vec3::ZERO);
    }

    #[test]
    fn test_intersect_hits_plane() {
        let plane = PaintPlane::through_cell(&VolumeFrame::IDENTITY, IVec3::ZERO, IVec3::Y, 1);
        let ray = Ray::new(Vec3::new(3.0, 5.0, -2.0), Vec3::NEG_Y);
        assert_eq!(plane.intersect(&ray), Some(Vec3::new(3.0, 1.0, -2.0)));
    }

    #[test]
    fn test_parallel_and_receding_rays_miss() {
        let plane = PaintPlane::through_cell(&VolumeFrame::IDENTITY, IVec3::ZERO, IVec3::Y, 1);
        let parallel = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        let receding = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(plane.intersect(&parallel).is_none());
        assert!(plane.intersect(&receding).is_none());
    }

    #[test]
    fn test_intersect_within_rejects_far_hits() {
        let plane = PaintPlane::through_cell(&VolumeFrame::IDENTITY, IVec3::ZERO, IVec3::Y, 1);
        let down = Ray::new(Vec3::new(0.0, 11.0, 0.0), Vec3::NEG_Y);
        assert_eq!(plane.intersect_within(&down, 10.0), Some(Vec3::Y));
        assert!(plane.intersect_within(&down, 9.9).is_none());

        let grazing = Ray::new(Vec3::new(0.0, 11.0, 0.0), Vec3::new(1.0, -2e-6, 0.0));
        assert!(plane.intersect(&grazing).is_some());
        assert!(plane.intersect_within(&grazing, 256.0).is_none());
    }

    #[test]
    fn test_plane_at_grid_edge_does_not_overflow() {
        let frame = VolumeFrame::IDENTITY;
        let edge = IVec3::new(i32::MAX, 0, 0);
        let plane = PaintPlane::through_cell(&frame, edge, IVec3::X, 1);
        assert!(plane.point().x > 2.0e9);
        assert!(plane.contains_cell(&frame, edge));
        assert!(!plane.contains_cell(&frame, IVec3::new(i32::MIN, 0, 0)));
    }

    #[test]
    fn test_contains_cell_checks_layer() {
        let frame = VolumeFrame::IDENTITY;
        let plane = PaintPlane::through_cell(&frame, IVec3::new(2, 0, 0), IVec3::X, 1);
        assert!(plane.contains_cell(&frame, IVec3::new(3, 7, -4)));
        assert!(!plane.contains_cell(&frame, IVec3::new(2, 0, 0)));
    }
}
