//! Per-cell collider synchronization.
//!
//! Every occupied cell of a volume owns exactly one static cuboid collider,
//! sized to one cell of the volume's frame and centered on the cell's world
//! position. The synchronizer keeps that mapping in bijection with the
//! volume's occupied set by replaying change notifications: a coordinate
//! that became occupied gains a collider, one that became empty loses it, and
//! recolours leave the collider untouched.

use glam::Vec3;
use rapier3d::prelude::*;
use rustc_hash::FxHashMap;

use voxpaint_volume::{ChangeReceiver, GridCoord, VolumeFrame, VoxelVolume};

use crate::PhysicsWorld;

/// Packs a cell coordinate into collider `user_data`.
pub fn pack_coord(coord: GridCoord) -> u128 {
    (coord.x as u32 as u128) | ((coord.y as u32 as u128) << 32) | ((coord.z as u32 as u128) << 64)
}

/// Recovers a cell coordinate from collider `user_data` written by [`pack_coord`].
pub fn unpack_coord(data: u128) -> GridCoord {
    GridCoord::new(
        data as u32 as i32,
        (data >> 32) as u32 as i32,
        (data >> 64) as u32 as i32,
    )
}

/// Keeps one Rapier collider per occupied cell of a single volume.
#[derive(Debug)]
pub struct ColliderSynchronizer {
    changes: ChangeReceiver,
    colliders: FxHashMap<GridCoord, ColliderHandle>,
    friction: f32,
}

impl ColliderSynchronizer {
    /// Subscribes to `volume` and creates colliders for all currently occupied cells.
    pub fn new(volume: &mut VoxelVolume, physics: &mut PhysicsWorld, friction: f32) -> Self {
        let changes = volume.subscribe();
        let mut sync = Self {
            changes,
            colliders: FxHashMap::default(),
            friction,
        };
        let frame = *volume.frame();
        for coord in volume.coords() {
            sync.add(physics, &frame, coord);
        }
        tracing::debug!(colliders = sync.len(), "created voxel colliders");
        sync
    }

    /// Applies every pending change notification.
    ///
    /// Each notified coordinate is checked on its own: presence in the
    /// collider map is compared with occupancy in the volume and only a
    /// transition adds or removes a collider. Returns `(added, removed)`.
    pub fn sync(&mut self, volume: &VoxelVolume, physics: &mut PhysicsWorld) -> (usize, usize) {
        let frame = *volume.frame();
        let mut added = 0;
        let mut removed = 0;

        let pending: Vec<GridCoord> = self.changes.drain().collect();
        for coord in pending {
            match (self.colliders.contains_key(&coord), volume.is_occupied(coord)) {
                (false, true) => {
                    self.add(physics, &frame, coord);
                    added += 1;
                }
                (true, false) => {
                    self.remove(physics, coord);
                    removed += 1;
                }
                _ => {}
            }
        }

        if added + removed > 0 {
            tracing::debug!(added, removed, total = self.len(), "synced voxel colliders");
        }
        (added, removed)
    }

    /// Returns the number of colliders owned.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` if no collider is owned.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Returns `true` if `coord` has a collider.
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.colliders.contains_key(&coord)
    }

    /// Returns the collider of `coord`, if any.
    pub fn handle(&self, coord: GridCoord) -> Option<ColliderHandle> {
        self.colliders.get(&coord).copied()
    }

    /// Iterates the coordinates that currently own a collider.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.colliders.keys().copied()
    }

    /// Removes every owned collider from `physics`.
    pub fn detach(&mut self, physics: &mut PhysicsWorld) {
        for (_, handle) in self.colliders.drain() {
            physics.remove_collider(handle);
        }
        // Anything still queued refers to colliders that no longer exist.
        self.changes.drain().for_each(drop);
    }

    fn add(&mut self, physics: &mut PhysicsWorld, frame: &VolumeFrame, coord: GridCoord) {
        let collider = cell_collider(frame, coord, self.friction);
        let handle = physics.collider_set.insert(collider);
        self.colliders.insert(coord, handle);
    }

    fn remove(&mut self, physics: &mut PhysicsWorld, coord: GridCoord) {
        if let Some(handle) = self.colliders.remove(&coord) {
            physics.remove_collider(handle);
        }
    }
}

/// Builds the static cuboid collider for one cell.
fn cell_collider(frame: &VolumeFrame, coord: GridCoord, friction: f32) -> Collider {
    let half = frame.cell_half_extents();
    let center = frame.from_key(coord);
    let (_, rotation, _) = frame.to_world().to_scale_rotation_translation();
    let axis: Vec3 = rotation.to_scaled_axis();

    ColliderBuilder::cuboid(half.x, half.y, half.z)
        .translation(Vector::new(center.x, center.y, center.z))
        .rotation(Vector::new(axis.x, axis.y, axis.z))
        .friction(friction)
        .restitution(0.0)
        .user_data(pack_coord(coord))
        .build()
}
