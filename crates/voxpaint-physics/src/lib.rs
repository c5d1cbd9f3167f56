//! Physics integration for voxel volumes: the Rapier world, per-cell collider
//! synchronization, and DDA picking against volume grids.
//!
//! Wraps the Rapier 3D physics engine behind a single [`PhysicsWorld`] resource
//! that owns all simulation state and exposes a minimal API.

use bevy_ecs::prelude::*;
use rapier3d::prelude::*;

pub mod collider_sync;
pub mod voxel_raycast;

pub use collider_sync::{ColliderSynchronizer, pack_coord, unpack_coord};
pub use voxel_raycast::{VoxelHit, pick_volume};

/// Default fixed simulation rate in Hz.
pub const DEFAULT_FIXED_HZ: f32 = 60.0;

/// Central physics simulation resource owning all Rapier state.
///
/// Insert into the ECS world at startup. Voxel objects register their cell
/// colliders here through a [`ColliderSynchronizer`].
#[derive(Resource)]
pub struct PhysicsWorld {
    /// World-space gravity vector.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection.
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates a physics world with gravity `(0, -9.81, 0)` stepping at
    /// [`DEFAULT_FIXED_HZ`].
    pub fn new() -> Self {
        Self::with_fixed_hz(DEFAULT_FIXED_HZ)
    }

    /// Creates a physics world whose timestep is `1 / hz` seconds.
    ///
    /// Non-positive rates fall back to [`DEFAULT_FIXED_HZ`].
    pub fn with_fixed_hz(hz: f32) -> Self {
        let hz = if hz > 0.0 { hz } else { DEFAULT_FIXED_HZ };
        let integration_parameters = IntegrationParameters {
            dt: 1.0 / hz,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Returns the fixed timestep in seconds.
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Removes a free-standing collider.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        )
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// ECS system that steps the physics simulation once per invocation.
///
/// Intended for the fixed-rate schedule.
pub fn physics_step_system(mut physics: ResMut<PhysicsWorld>) {
    physics.step();
}
