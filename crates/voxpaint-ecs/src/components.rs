//! Components of a voxel object entity.

use bevy_ecs::prelude::*;

use voxpaint_mesh::{MeshHandle, MeshSynthesizer};
use voxpaint_physics::ColliderSynchronizer;
use voxpaint_volume::VoxelVolume;

/// The voxel data of an object. Every voxel object has one.
#[derive(Component, Debug)]
pub struct Volume(pub VoxelVolume);

/// Keeps the object's render mesh in sync with its [`Volume`].
#[derive(Component, Debug)]
pub struct VolumeMesh(pub MeshSynthesizer);

impl VolumeMesh {
    /// The identity-stable mesh handle a renderer binds to.
    pub fn handle(&self) -> &MeshHandle {
        self.0.mesh()
    }
}

/// Keeps one physics collider per occupied cell of the object's [`Volume`].
///
/// Optional: objects without it are paintable but not collidable.
#[derive(Component, Debug)]
pub struct VolumeColliders(pub ColliderSynchronizer);
