//! ECS integration: voxel objects as entities, the painting and physics
//! resources, and the schedules that split the simulation tick (painting)
//! from the presentation tick (mesh rebuilds).

mod components;
mod resources;
mod schedule;
mod systems;
mod world;

pub use components::{Volume, VolumeColliders, VolumeMesh};
pub use resources::{PaintStats, Painter, PointerInput};
pub use schedule::{VoxpaintSchedule, VoxpaintSchedules, build_schedules};
pub use systems::{
    brush_input_system, collider_sync_system, mesh_rebuild_system, nearest_hit, paint_system,
};
pub use world::{create_world, despawn_voxel_object, spawn_voxel_object};
