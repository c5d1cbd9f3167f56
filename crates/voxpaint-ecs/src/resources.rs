//! Global resources for the painting loop.

use bevy_ecs::prelude::*;
use glam::Vec3;

use voxpaint_paint::{DEFAULT_REACH, PaintSession};
use voxpaint_volume::Ray;

/// Pointer state for the current tick, written by the input collaborator.
#[derive(Resource, Clone, Debug)]
pub struct PointerInput {
    /// World-space ray under the pointer.
    pub ray: Ray,
    /// Paint button held.
    pub button_held: bool,
    /// Paint on the surface layer instead of the layer above it.
    pub surface_modifier: bool,
    /// Brush shortcut pressed this tick. Consumed by [`brush_input_system`](crate::brush_input_system).
    pub brush_key: Option<char>,
    /// Request to select the next brush. Consumed like `brush_key`.
    pub cycle_brush: bool,
    /// Request to flip erase mode. Consumed like `brush_key`.
    pub toggle_erase: bool,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            ray: Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            button_held: false,
            surface_modifier: false,
            brush_key: None,
            cycle_brush: false,
            toggle_erase: false,
        }
    }
}

/// The painting user: brushes, color, stroke state and stroke target.
#[derive(Resource, Debug)]
pub struct Painter {
    /// Brush selection, paint color and stroke controller.
    pub session: PaintSession,
    /// Entity being painted by the active stroke.
    pub target: Option<Entity>,
    /// Maximum picking distance along the pointer ray, in world units.
    pub pick_distance: f32,
}

impl Painter {
    /// Creates an idle painter.
    ///
    /// `pick_distance` also bounds how far along the ray a stroke may move in
    /// one tick. Non-finite or non-positive values fall back to
    /// [`DEFAULT_REACH`].
    pub fn new(mut session: PaintSession, pick_distance: f32) -> Self {
        session.set_reach(pick_distance);
        let pick_distance = session.controller().reach();
        Self {
            session,
            target: None,
            pick_distance,
        }
    }
}


/// Running counters, for logging.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Strokes started.
    pub strokes: u64,
    /// Cells passed to brush loop hooks.
    pub cells_painted: u64,
    /// Mesh rebuilds across all objects.
    pub mesh_rebuilds: u64,
    /// Colliders created by incremental sync.
    pub colliders_added: u64,
    /// Colliders destroyed by incremental sync.
    pub colliders_removed: u64,
}
