//! Stroke rasterization: continuous pointer motion to a dense, ordered run of
//! grid coordinates.
//!
//! Segments are walked in the volume's grid space. The step count is the
//! longest axis of the segment rounded up, so consecutive samples are at most
//! one cell apart on every axis and no cell along the path is skipped.
//! Consecutive duplicates collapse to one emission.

use glam::Vec3;

use voxpaint_volume::{GridCoord, VolumeFrame};

/// Rasterizes the world-space segment `p0..=p1` into grid coordinates.
///
/// A zero-length segment yields its endpoint once.
pub fn rasterize_segment(frame: &VolumeFrame, p0: Vec3, p1: Vec3) -> Vec<GridCoord> {
    let mut out = Vec::new();
    let mut last = None;
    walk(frame.to_grid_point(p0), frame.to_grid_point(p1), &mut last, &mut out);
    out
}

/// Returns the dense cell line from `a` to `b`, both included.
pub fn grid_line(a: GridCoord, b: GridCoord) -> Vec<GridCoord> {
    let mut out = Vec::new();
    let mut last = None;
    walk(a.as_vec3(), b.as_vec3(), &mut last, &mut out);
    out
}

fn walk(g0: Vec3, g1: Vec3, last: &mut Option<GridCoord>, out: &mut Vec<GridCoord>) {
    let delta = g1 - g0;
    let longest = delta.abs().max_element();
    let steps = if longest > 0.0 {
        (longest.ceil() as u32).max(1)
    } else {
        0
    };

    let mut emit = |p: Vec3| {
        let coord = p.round().as_ivec3();
        if *last != Some(coord) {
            out.push(coord);
            *last = Some(coord);
        }
    };

    if steps == 0 {
        emit(g1);
        return;
    }
    let step = delta / steps as f32;
    for i in 0..steps {
        emit(g0 + step * i as f32);
    }
    emit(g1);
}

/// Incremental rasterizer for one stroke.
///
/// Remembers the previous sample and the last emitted coordinate so that a
/// segment's start cell, already emitted as the previous segment's end, is
/// never applied twice across ticks.
#[derive(Clone, Debug, Default)]
pub struct StrokeRasterizer {
    last_point: Option<Vec3>,
    last_emitted: Option<GridCoord>,
}

impl StrokeRasterizer {
    /// Creates an idle rasterizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a stroke at `world`, emitting its cell.
    pub fn begin(&mut self, frame: &VolumeFrame, world: Vec3) -> Vec<GridCoord> {
        self.reset();
        self.advance(frame, world)
    }

    /// Extends the stroke to `world` and returns the newly covered cells.
    ///
    /// Without a prior sample this behaves like [`begin`](Self::begin).
    pub fn advance(&mut self, frame: &VolumeFrame, world: Vec3) -> Vec<GridCoord> {
        let g1 = frame.to_grid_point(world);
        let g0 = self.last_point.unwrap_or(g1);
        let mut out = Vec::new();
        walk(g0, g1, &mut self.last_emitted, &mut out);
        self.last_point = Some(g1);
        out
    }

    /// Forgets the current stroke.
    pub fn reset(&mut self) {
        self.last_point = None;
        self.last_emitted = None;
    }

    /// The most recently emitted coordinate.
    pub fn last_emitted(&self) -> Option<GridCoord> {
        self.last_emitted
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Quat};

    use super::*;

    fn xs(coords: &[GridCoord]) -> Vec<i32> {
        coords.iter().map(|c| c.x).collect()
    }

    #[test]
    fn test_segment_is_dense_along_axis() {
        let coords = rasterize_segment(
            &VolumeFrame::IDENTITY,
            Vec3::ZERO,
            Vec3::new(3.2, 0.0, 0.0),
        );
        assert_eq!(xs(&coords), vec![0, 1, 2, 3]);
        assert!(coords.iter().all(|c| c.y == 0 && c.z == 0));
    }

    #[test]
    fn test_zero_length_segment_emits_endpoint_once() {
        let p = Vec3::new(1.2, -0.7, 4.4);
        let coords = rasterize_segment(&VolumeFrame::IDENTITY, p, p);
        assert_eq!(coords, vec![IVec3::new(1, -1, 4)]);
    }

    #[test]
    fn test_sub_cell_motion_collapses() {
        let coords = rasterize_segment(
            &VolumeFrame::IDENTITY,
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.3, 0.0, 0.0),
        );
        assert_eq!(coords, vec![IVec3::ZERO]);
    }

    #[test]
    fn test_diagonal_steps_are_adjacent() {
        let coords = rasterize_segment(
            &VolumeFrame::IDENTITY,
            Vec3::new(-2.0, 0.0, 1.0),
            Vec3::new(5.0, 3.0, -6.0),
        );
        assert_eq!(coords.first(), Some(&IVec3::new(-2, 0, 1)));
        assert_eq!(coords.last(), Some(&IVec3::new(5, 3, -6)));
        for pair in coords.windows(2) {
            let d = (pair[1] - pair[0]).abs();
            assert!(d.max_element() <= 1, "gap between {} and {}", pair[0], pair[1]);
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_scaled_frame_keeps_density() {
        let frame = VolumeFrame::from_scale_rotation_translation(
            Vec3::splat(0.25),
            Quat::IDENTITY,
            Vec3::ZERO,
        );
        let coords = rasterize_segment(&frame, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(xs(&coords), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_grid_line_includes_both_ends() {
        let line = grid_line(IVec3::new(0, 0, 0), IVec3::new(0, 4, 0));
        assert_eq!(line.len(), 5);
        assert_eq!(line[4], IVec3::new(0, 4, 0));
        assert_eq!(grid_line(IVec3::ONE, IVec3::ONE), vec![IVec3::ONE]);
    }

    #[test]
    fn test_incremental_segments_do_not_repeat_shared_endpoint() {
        let frame = VolumeFrame::IDENTITY;
        let mut raster = StrokeRasterizer::new();

        let mut all = raster.begin(&frame, Vec3::ZERO);
        assert_eq!(all, vec![IVec3::ZERO]);
        all.extend(raster.advance(&frame, Vec3::new(2.0, 0.0, 0.0)));
        all.extend(raster.advance(&frame, Vec3::new(2.0, 0.0, 0.0)));
        all.extend(raster.advance(&frame, Vec3::new(4.0, 0.0, 0.0)));

        assert_eq!(xs(&all), vec![0, 1, 2, 3, 4]);
        assert_eq!(raster.last_emitted(), Some(IVec3::new(4, 0, 0)));
    }

    #[test]
    fn test_reset_allows_reemitting() {
        let frame = VolumeFrame::IDENTITY;
        let mut raster = StrokeRasterizer::new();
        raster.begin(&frame, Vec3::ZERO);
        raster.reset();
        assert_eq!(raster.begin(&frame, Vec3::ZERO), vec![IVec3::ZERO]);
    }
}
