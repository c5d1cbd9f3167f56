//! World factory and voxel object lifecycle.

use bevy_ecs::prelude::*;

use voxpaint_mesh::MeshSynthesizer;
use voxpaint_paint::PaintSession;
use voxpaint_physics::{ColliderSynchronizer, PhysicsWorld};
use voxpaint_volume::VoxelVolume;

use crate::components::{Volume, VolumeColliders, VolumeMesh};
use crate::resources::{PaintStats, Painter, PointerInput};

/// Creates a world with the physics, pointer, painter and stats resources.
pub fn create_world(session: PaintSession, pick_distance: f32, fixed_hz: f32) -> World {
    let mut world = World::new();
    world.insert_resource(PhysicsWorld::with_fixed_hz(fixed_hz));
    world.insert_resource(PointerInput::default());
    world.insert_resource(Painter::new(session, pick_distance));
    world.insert_resource(PaintStats::default());
    world
}

/// Spawns a voxel object and builds its mesh.
///
/// With `collider_friction` set, one collider per occupied cell is also
/// registered in the world's [`PhysicsWorld`].
///
/// # Panics
///
/// Panics if colliders are requested and the world has no [`PhysicsWorld`].
pub fn spawn_voxel_object(
    world: &mut World,
    mut volume: VoxelVolume,
    collider_friction: Option<f32>,
) -> Entity {
    let mesh = VolumeMesh(MeshSynthesizer::new(&mut volume));
    let colliders = collider_friction.map(|friction| {
        let mut physics = world.resource_mut::<PhysicsWorld>();
        VolumeColliders(ColliderSynchronizer::new(&mut volume, &mut physics, friction))
    });

    let cells = volume.len();
    let mut entity = world.spawn((Volume(volume), mesh));
    if let Some(colliders) = colliders {
        entity.insert(colliders);
    }
    let id = entity.id();
    tracing::info!(?id, cells, colliders = collider_friction.is_some(), "spawned voxel object");
    id
}

/// Despawns a voxel object, removing its colliders from the physics world.
///
/// Returns `false` if the entity does not exist.
pub fn despawn_voxel_object(world: &mut World, entity: Entity) -> bool {
    if !world.entities().contains(entity) {
        return false;
    }
    if let Some(mut colliders) = world.entity_mut(entity).take::<VolumeColliders>() {
        let mut physics = world.resource_mut::<PhysicsWorld>();
        colliders.0.detach(&mut physics);
    }
    world.despawn(entity)
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Vec3};
    use voxpaint_paint::{BrushRegistry, PaintColor};
    use voxpaint_volume::{Color, FillPattern, Ray, VolumeFrame};

    use super::*;
    use crate::schedule::build_schedules;

    const DT: f64 = 1.0 / 60.0;

    fn red_session() -> PaintSession {
        PaintSession::new(BrushRegistry::with_defaults(), PaintColor::hsv(0.0, 1.0, 1.0), 1)
    }

    fn cube(half_extent: i32, position: Vec3) -> VoxelVolume {
        VoxelVolume::with_pattern(
            VolumeFrame::from_translation(position),
            Color::WHITE,
            &FillPattern::Cube { half_extent },
        )
    }

    fn point_down(world: &mut World, x: f32, z: f32, held: bool) {
        let mut input = world.resource_mut::<PointerInput>();
        input.ray = Ray::new(Vec3::new(x, 20.0, z), Vec3::NEG_Y);
        input.button_held = held;
    }

    #[test]
    fn test_create_world_has_all_resources() {
        let world = create_world(PaintSession::default(), 256.0, 60.0);
        assert!(world.contains_resource::<PhysicsWorld>());
        assert!(world.contains_resource::<PointerInput>());
        assert!(world.contains_resource::<Painter>());
        assert!(world.contains_resource::<PaintStats>());
    }

    #[test]
    fn test_spawn_builds_mesh_and_colliders() {
        let mut world = create_world(PaintSession::default(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(1, Vec3::ZERO), Some(0.7));

        assert_eq!(world.resource::<PhysicsWorld>().collider_set.len(), 27);
        let mesh = world.get::<VolumeMesh>(entity).unwrap();
        assert_eq!(mesh.handle().read().face_count(), 54);
        assert!(world.get::<VolumeColliders>(entity).is_some());
    }

    #[test]
    fn test_spawn_without_colliders() {
        let mut world = create_world(PaintSession::default(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(1, Vec3::ZERO), None);
        assert!(world.get::<VolumeColliders>(entity).is_none());
        assert_eq!(world.resource::<PhysicsWorld>().collider_set.len(), 0);
    }

    #[test]
    #[should_panic]
    fn test_colliders_without_physics_world_panic() {
        let mut world = World::new();
        spawn_voxel_object(&mut world, cube(0, Vec3::ZERO), Some(0.7));
    }

    #[test]
    fn test_stroke_updates_volume_colliders_and_mesh() {
        let mut world = create_world(red_session(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(2, Vec3::ZERO), Some(0.7));
        let mesh = world.get::<VolumeMesh>(entity).unwrap().handle().clone();
        let mut schedules = build_schedules(60.0);

        point_down(&mut world, 0.0, 0.0, true);
        schedules.run(&mut world, DT);
        assert_eq!(world.resource::<Painter>().target, Some(entity));

        point_down(&mut world, 2.0, 0.0, true);
        schedules.run(&mut world, DT);
        point_down(&mut world, 2.0, 0.0, false);
        schedules.run(&mut world, DT);

        let volume = &world.get::<Volume>(entity).unwrap().0;
        for x in 0..=2 {
            assert_eq!(volume.get(IVec3::new(x, 3, 0)), Some(Color::RED));
        }
        assert_eq!(volume.len(), 125 + 3);

        assert_eq!(world.resource::<PhysicsWorld>().collider_set.len(), 128);
        // 1x3 bar on top of the cube: 3 hidden top faces, 11 new faces.
        assert_eq!(mesh.read().face_count(), 150 - 3 + 11);

        let stats = world.resource::<PaintStats>();
        assert_eq!(stats.strokes, 1);
        assert_eq!(stats.cells_painted, 3);
        assert_eq!(stats.colliders_added, 3);
        assert!(world.resource::<Painter>().target.is_none());
    }

    #[test]
    fn test_mesh_rebuilds_once_per_frame() {
        let mut world = create_world(red_session(), 256.0, 60.0);
        spawn_voxel_object(&mut world, cube(2, Vec3::ZERO), None);
        let mut schedules = build_schedules(60.0);

        point_down(&mut world, -2.0, 0.0, true);
        schedules.run(&mut world, DT);
        point_down(&mut world, 2.0, 0.0, true);
        schedules.run(&mut world, DT);
        schedules.run(&mut world, DT);

        // Press frame and drag frame each rebuild once; the idle frame does not.
        assert_eq!(world.resource::<PaintStats>().mesh_rebuilds, 2);
    }

    #[test]
    fn test_nearest_object_is_painted() {
        let mut world = create_world(red_session(), 256.0, 60.0);
        let low = spawn_voxel_object(&mut world, cube(0, Vec3::ZERO), None);
        let high = spawn_voxel_object(&mut world, cube(0, Vec3::new(0.0, 5.0, 0.0)), None);
        let mut schedules = build_schedules(60.0);

        point_down(&mut world, 0.0, 0.0, true);
        schedules.run(&mut world, DT);
        assert_eq!(world.resource::<Painter>().target, Some(high));
        point_down(&mut world, 0.0, 0.0, false);
        schedules.run(&mut world, DT);

        assert_eq!(world.get::<Volume>(high).unwrap().0.len(), 2);
        assert_eq!(world.get::<Volume>(low).unwrap().0.len(), 1);
    }

    #[test]
    fn test_stroke_survives_pointer_leaving_object() {
        let mut world = create_world(red_session(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(0, Vec3::ZERO), None);
        let mut schedules = build_schedules(60.0);

        point_down(&mut world, 0.0, 0.0, true);
        schedules.run(&mut world, DT);
        point_down(&mut world, 4.0, 0.0, true);
        schedules.run(&mut world, DT);
        point_down(&mut world, 4.0, 0.0, false);
        schedules.run(&mut world, DT);

        let volume = &world.get::<Volume>(entity).unwrap().0;
        assert!(volume.is_occupied(IVec3::new(4, 1, 0)));
        assert_eq!(volume.len(), 1 + 5);
    }

    #[test]
    fn test_brush_input_system_applies_requests() {
        let mut world = create_world(PaintSession::default(), 256.0, 60.0);
        let mut schedules = build_schedules(60.0);
        {
            let mut input = world.resource_mut::<PointerInput>();
            input.brush_key = Some('f');
            input.toggle_erase = true;
        }
        schedules.run(&mut world, DT);

        let painter = world.resource::<Painter>();
        assert_eq!(painter.session.brushes.active().name(), "FillBrush");
        assert!(painter.session.color.erase);
        let input = world.resource::<PointerInput>();
        assert!(input.brush_key.is_none());
        assert!(!input.toggle_erase);
    }

    #[test]
    fn test_grazing_drag_is_bounded_by_pick_distance() {
        let mut world = create_world(red_session(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(2, Vec3::ZERO), Some(0.7));
        let mut schedules = build_schedules(60.0);

        point_down(&mut world, 0.0, 0.0, true);
        schedules.run(&mut world, DT);
        world.resource_mut::<PointerInput>().ray =
            Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::new(1.0, -2e-6, 0.0));
        schedules.run(&mut world, DT);

        assert_eq!(world.get::<Volume>(entity).unwrap().0.len(), 125 + 1);
        assert_eq!(world.resource::<PhysicsWorld>().collider_set.len(), 126);
    }

    #[test]
    fn test_despawn_removes_colliders() {
        let mut world = create_world(PaintSession::default(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(1, Vec3::ZERO), Some(0.7));

        assert!(despawn_voxel_object(&mut world, entity));
        assert_eq!(world.resource::<PhysicsWorld>().collider_set.len(), 0);
        assert!(!despawn_voxel_object(&mut world, entity));
    }

    #[test]
    fn test_despawn_mid_stroke_abandons() {
        let mut world = create_world(red_session(), 256.0, 60.0);
        let entity = spawn_voxel_object(&mut world, cube(0, Vec3::ZERO), None);
        let mut schedules = build_schedules(60.0);

        point_down(&mut world, 0.0, 0.0, true);
        schedules.run(&mut world, DT);
        despawn_voxel_object(&mut world, entity);
        schedules.run(&mut world, DT);

        let painter = world.resource::<Painter>();
        assert!(!painter.session.is_painting());
        assert!(painter.target.is_none());
    }
}
