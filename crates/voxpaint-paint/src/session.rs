//! Everything the painting tool carries between ticks.

use std::path::Path;

use voxpaint_volume::VoxelVolume;

use crate::color::PaintColor;
use crate::controller::{PaintController, PointerSample, StrokeReport};
use crate::registry::BrushRegistry;

/// Brushes, paint color and stroke state of one painting user.
///
/// Brush selection is locked while a stroke is active so the brush that saw
/// the start hook also sees the end hook.
#[derive(Debug)]
pub struct PaintSession {
    /// Available brushes and the current selection.
    pub brushes: BrushRegistry,
    /// Current paint color and erase flag.
    pub color: PaintColor,
    controller: PaintController,
}

impl PaintSession {
    /// Creates an idle session.
    pub fn new(brushes: BrushRegistry, color: PaintColor, surface_offset_cells: i32) -> Self {
        Self {
            brushes,
            color,
            controller: PaintController::new(surface_offset_cells),
        }
    }

    /// Creates a session with brush records loaded from `brush_dir`.
    pub fn load(brush_dir: &Path, color: PaintColor, surface_offset_cells: i32) -> Self {
        Self::new(BrushRegistry::load(brush_dir), color, surface_offset_cells)
    }

    /// Feeds one pointer sample to the active brush. See [`PaintController::tick`].
    pub fn tick(
        &mut self,
        sample: &PointerSample,
        volume: Option<&mut VoxelVolume>,
    ) -> StrokeReport {
        let color = self.color.resolve();
        self.controller
            .tick(sample, volume, self.brushes.active_mut(), color)
    }

    /// Returns `true` while a stroke is in progress.
    pub fn is_painting(&self) -> bool {
        self.controller.is_active()
    }

    /// The stroke controller.
    pub fn controller(&self) -> &PaintController {
        &self.controller
    }

    /// Sets how far along the pointer ray strokes may reach. See
    /// [`PaintController::set_reach`].
    pub fn set_reach(&mut self, reach: f32) {
        self.controller.set_reach(reach);
    }

    /// Drops the stroke in progress. See [`PaintController::abandon`].
    pub fn abandon_stroke(&mut self) {
        self.controller.abandon();
    }

    /// Selects the brush bound to `key`, unless a stroke is active.
    pub fn select_brush_by_key(&mut self, key: char) -> bool {
        !self.is_painting() && self.brushes.select_by_key(key)
    }

    /// Selects the brush named `name`, unless a stroke is active.
    pub fn select_brush_by_name(&mut self, name: &str) -> bool {
        !self.is_painting() && self.brushes.select_by_name(name)
    }

    /// Selects the next brush, unless a stroke is active.
    pub fn cycle_brush(&mut self) -> bool {
        if self.is_painting() {
            return false;
        }
        self.brushes.cycle_next();
        true
    }
}

impl Default for PaintSession {
    fn default() -> Self {
        Self::new(BrushRegistry::with_defaults(), PaintColor::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Vec3};
    use voxpaint_volume::{Color, Ray, VolumeFrame};

    use super::*;
    use crate::controller::SurfaceHit;

    fn sample(held: bool) -> PointerSample {
        PointerSample {
            ray: Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y),
            hit: Some(SurfaceHit {
                cell: IVec3::ZERO,
                normal: IVec3::Y,
            }),
            button_held: held,
            surface_modifier: false,
        }
    }

    #[test]
    fn test_session_paints_with_active_brush_and_color() {
        let mut volume = VoxelVolume::new(VolumeFrame::IDENTITY, Color::WHITE);
        let mut session = PaintSession::new(
            BrushRegistry::with_defaults(),
            PaintColor::hsv(0.0, 1.0, 1.0),
            1,
        );

        session.tick(&sample(true), Some(&mut volume));
        assert!(session.is_painting());
        session.tick(&sample(false), Some(&mut volume));

        assert_eq!(volume.get(IVec3::Y), Some(Color::RED));
    }

    #[test]
    fn test_brush_locked_during_stroke() {
        let mut volume = VoxelVolume::new(VolumeFrame::IDENTITY, Color::WHITE);
        let mut session = PaintSession::default();

        session.tick(&sample(true), Some(&mut volume));
        assert!(!session.select_brush_by_key('L'));
        assert!(!session.cycle_brush());
        assert_eq!(session.brushes.active().name(), "PixelBrush");

        session.tick(&sample(false), Some(&mut volume));
        assert!(session.select_brush_by_key('L'));
        assert_eq!(session.brushes.active().name(), "LineBrush");
    }

    #[test]
    fn test_line_brush_stroke_through_session() {
        let mut volume = VoxelVolume::new(VolumeFrame::IDENTITY, Color::WHITE);
        let mut session = PaintSession::default();
        assert!(session.select_brush_by_name("LineBrush"));

        let mut s = sample(true);
        session.tick(&s, Some(&mut volume));
        s.ray.origin.x = 3.0;
        session.tick(&s, Some(&mut volume));
        assert_eq!(volume.len(), 1);
        s.button_held = false;
        session.tick(&s, Some(&mut volume));

        for x in 0..=3 {
            assert!(volume.is_occupied(IVec3::new(x, 1, 0)));
        }
    }
}
