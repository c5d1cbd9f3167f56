//! Systems driving the paint, collider and mesh updates.

use bevy_ecs::prelude::*;

use voxpaint_paint::{PointerSample, SurfaceHit};
use voxpaint_physics::{PhysicsWorld, VoxelHit, pick_volume};
use voxpaint_volume::Ray;

use crate::components::{Volume, VolumeColliders, VolumeMesh};
use crate::resources::{PaintStats, Painter, PointerInput};

/// Returns the closest volume hit along `ray` across all voxel objects.
pub fn nearest_hit<'a>(
    volumes: impl IntoIterator<Item = (Entity, &'a Volume)>,
    ray: &Ray,
    max_distance: f32,
) -> Option<(Entity, VoxelHit)> {
    volumes
        .into_iter()
        .filter_map(|(entity, volume)| {
            pick_volume(&volume.0, ray, max_distance).map(|hit| (entity, hit))
        })
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

/// Applies brush selection and erase toggles requested this tick.
pub fn brush_input_system(mut input: ResMut<PointerInput>, mut painter: ResMut<Painter>) {
    if let Some(key) = input.brush_key.take() {
        if painter.session.select_brush_by_key(key) {
            tracing::info!(brush = painter.session.brushes.active().name(), "brush selected");
        } else {
            tracing::debug!(%key, "brush key ignored");
        }
    }
    if std::mem::take(&mut input.cycle_brush) && painter.session.cycle_brush() {
        tracing::info!(brush = painter.session.brushes.active().name(), "brush selected");
    }
    if std::mem::take(&mut input.toggle_erase) {
        painter.session.color.toggle_erase();
        tracing::info!(erase = painter.session.color.erase, "erase toggled");
    }
}

/// Simulation tick: feeds the pointer to the painter.
///
/// While idle the pointer ray picks the nearest voxel object; a press there
/// starts a stroke on that object. During a stroke every tick goes to the same
/// object, whatever is under the pointer.
pub fn paint_system(
    input: Res<PointerInput>,
    mut painter: ResMut<Painter>,
    mut volumes: Query<(Entity, &mut Volume)>,
    mut stats: ResMut<PaintStats>,
) {
    let painter = &mut *painter;
    let mut sample = PointerSample {
        ray: input.ray,
        hit: None,
        button_held: input.button_held,
        surface_modifier: input.surface_modifier,
    };

    let target = if painter.session.is_painting() {
        painter.target
    } else {
        nearest_hit(volumes.iter(), &input.ray, painter.pick_distance).map(|(entity, hit)| {
            sample.hit = Some(SurfaceHit {
                cell: hit.cell,
                normal: hit.normal,
            });
            entity
        })
    };

    let report = match target.and_then(|entity| volumes.get_mut(entity).ok()) {
        Some((entity, mut volume)) => {
            let report = painter.session.tick(&sample, Some(&mut volume.0));
            painter.target = painter.session.is_painting().then_some(entity);
            report
        }
        None => {
            painter.target = None;
            painter.session.tick(&sample, None)
        }
    };

    if report.started.is_some() {
        stats.strokes += 1;
    }
    stats.cells_painted += report.painted.len() as u64;
}

/// Applies this tick's volume edits to the physics colliders.
pub fn collider_sync_system(
    mut physics: ResMut<PhysicsWorld>,
    mut objects: Query<(&Volume, &mut VolumeColliders)>,
    mut stats: ResMut<PaintStats>,
) {
    for (volume, mut colliders) in &mut objects {
        let (added, removed) = colliders.0.sync(&volume.0, &mut physics);
        stats.colliders_added += added as u64;
        stats.colliders_removed += removed as u64;
    }
}

/// Presentation tick: rebuilds each dirty mesh once.
pub fn mesh_rebuild_system(
    mut objects: Query<(&Volume, &mut VolumeMesh)>,
    mut stats: ResMut<PaintStats>,
) {
    for (volume, mut mesh) in &mut objects {
        if mesh.0.update(&volume.0) {
            stats.mesh_rebuilds += 1;
        }
    }
}
