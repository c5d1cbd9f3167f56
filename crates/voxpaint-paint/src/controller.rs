//! The stroke state machine.
//!
//! `Idle -> Active` on a press over a picked surface: the paint plane is
//! captured and the brush's start hook runs. While the button stays held,
//! each tick rasterizes from the previous plane position to the current one
//! and runs the loop hook per cell. Releasing runs the end hook once and
//! returns to `Idle`.

use glam::{IVec3, Vec3};

use voxpaint_volume::{Color, GridCoord, Ray, VoxelVolume};

use crate::brush::{Brush, StrokeTarget};
use crate::plane::PaintPlane;
use crate::rasterizer::StrokeRasterizer;

/// The surface cell under the pointer, in the target volume's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceHit {
    /// The occupied cell hit by the pointer ray.
    pub cell: GridCoord,
    /// Grid-space normal of the face that was hit.
    pub normal: IVec3,
}

/// One tick of pointer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// World-space pointer ray.
    pub ray: Ray,
    /// Surface under the pointer, if any.
    pub hit: Option<SurfaceHit>,
    /// Whether the paint button is down this tick.
    pub button_held: bool,
    /// Paint on the surface layer instead of the layer above it.
    pub surface_modifier: bool,
}

/// What a tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrokeReport {
    /// Cell passed to the start hook.
    pub started: Option<GridCoord>,
    /// Cells passed to the loop hook, in order.
    pub painted: Vec<GridCoord>,
    /// Cell passed to the end hook.
    pub ended: Option<GridCoord>,
}

impl StrokeReport {
    /// Returns `true` if no hook ran.
    pub fn is_empty(&self) -> bool {
        self.started.is_none() && self.painted.is_empty() && self.ended.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StrokeState {
    Idle,
    Active { plane: PaintPlane, position: Vec3 },
}

/// Default reach along the pointer ray, in world units.
pub const DEFAULT_REACH: f32 = 256.0;

/// Drives a brush from pointer samples.
///
/// Plane positions farther than the controller's reach along the pointer ray
/// are ignored like rays that miss the plane, so one tick never rasterizes an
/// unbounded segment.
#[derive(Clone, Debug)]
pub struct PaintController {
    state: StrokeState,
    was_held: bool,
    rasterizer: StrokeRasterizer,
    surface_offset_cells: i32,
    reach: f32,
}

impl PaintController {
    /// Creates an idle controller painting `surface_offset_cells` above the
    /// picked surface when no modifier is held.
    pub fn new(surface_offset_cells: i32) -> Self {
        Self {
            state: StrokeState::Idle,
            was_held: false,
            rasterizer: StrokeRasterizer::new(),
            surface_offset_cells,
            reach: DEFAULT_REACH,
        }
    }

    /// Sets the reach and returns the controller. See [`set_reach`](Self::set_reach).
    pub fn with_reach(mut self, reach: f32) -> Self {
        self.set_reach(reach);
        self
    }

    /// Sets how far along the pointer ray, in world units, a plane position
    /// may lie. Non-finite or non-positive values fall back to [`DEFAULT_REACH`].
    pub fn set_reach(&mut self, reach: f32) {
        self.reach = if reach.is_finite() && reach > 0.0 {
            reach
        } else {
            DEFAULT_REACH
        };
    }

    /// The current reach in world units.
    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// Returns `true` while a stroke is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    /// The plane of the stroke in progress.
    pub fn plane(&self) -> Option<&PaintPlane> {
        match &self.state {
            StrokeState::Active { plane, .. } => Some(plane),
            StrokeState::Idle => None,
        }
    }

    /// The current world-space position on the stroke plane.
    pub fn position(&self) -> Option<Vec3> {
        match self.state {
            StrokeState::Active { position, .. } => Some(position),
            StrokeState::Idle => None,
        }
    }

    /// Advances the stroke by one tick.
    ///
    /// `volume` is the stroke's target: the picked volume on the press tick
    /// and the same volume for every later tick of the stroke. Ticks without
    /// a target still track the button so a press is only recognised on its
    /// first tick; an active stroke whose target is gone is abandoned.
    pub fn tick(
        &mut self,
        sample: &PointerSample,
        volume: Option<&mut VoxelVolume>,
        brush: &mut dyn Brush,
        color: Option<Color>,
    ) -> StrokeReport {
        let pressed = sample.button_held && !self.was_held;
        self.was_held = sample.button_held;
        let mut report = StrokeReport::default();

        match self.state {
            StrokeState::Idle => {
                if !pressed {
                    return report;
                }
                let Some(hit) = sample.hit.filter(|h| h.normal != IVec3::ZERO) else {
                    return report;
                };
                let Some(volume) = volume else {
                    return report;
                };
                let frame = *volume.frame();
                let offset = if sample.surface_modifier {
                    0
                } else {
                    self.surface_offset_cells
                };
                let plane = PaintPlane::through_cell(&frame, hit.cell, hit.normal, offset);
                let position = plane
                    .intersect_within(&sample.ray, self.reach)
                    .unwrap_or(plane.point());
                let coord = frame.to_key(position);

                let mut target = StrokeTarget {
                    volume,
                    color,
                    plane: &plane,
                };
                tracing::debug!(brush = brush.name(), ?coord, "stroke started");
                brush.paint_start(&mut target, coord);
                report.started = Some(coord);

                for cell in self.rasterizer.begin(&frame, position) {
                    brush.paint_loop(&mut target, cell);
                    report.painted.push(cell);
                }
                self.state = StrokeState::Active { plane, position };
            }
            StrokeState::Active { plane, position } => {
                let Some(volume) = volume else {
                    self.abandon();
                    return report;
                };
                let frame = *volume.frame();
                let position = plane
                    .intersect_within(&sample.ray, self.reach)
                    .unwrap_or(position);
                let mut target = StrokeTarget {
                    volume,
                    color,
                    plane: &plane,
                };

                for cell in self.rasterizer.advance(&frame, position) {
                    brush.paint_loop(&mut target, cell);
                    report.painted.push(cell);
                }

                if sample.button_held {
                    self.state = StrokeState::Active { plane, position };
                } else {
                    let coord = frame.to_key(position);
                    brush.paint_end(&mut target, coord);
                    report.ended = Some(coord);
                    tracing::debug!(brush = brush.name(), ?coord, "stroke ended");
                    self.state = StrokeState::Idle;
                    self.rasterizer.reset();
                }
            }
        }

        report
    }

    /// Drops the stroke in progress without running the end hook.
    ///
    /// For when the target volume disappears mid-stroke.
    pub fn abandon(&mut self) {
        if self.is_active() {
            tracing::warn!("stroke abandoned: target volume is gone");
        }
        self.state = StrokeState::Idle;
        self.rasterizer.reset();
    }
}

impl Default for PaintController {
    fn default() -> Self {
        Self::new(1)
    }
}
