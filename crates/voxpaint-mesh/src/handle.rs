//! Identity-stable shared mesh resource.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::voxel_mesh::VoxelMesh;

/// Shared handle to a volume's current mesh.
///
/// Clones refer to the same mesh. Rebuilds replace the contents in place, so a
/// renderer or physics shape holding a clone observes every update without
/// re-binding.
#[derive(Clone, Debug, Default)]
pub struct MeshHandle(Arc<RwLock<VoxelMesh>>);

impl MeshHandle {
    /// Wraps `mesh` in a new handle.
    pub fn new(mesh: VoxelMesh) -> Self {
        Self(Arc::new(RwLock::new(mesh)))
    }

    /// Locks the mesh for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, VoxelMesh> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the mesh contents, keeping this handle's identity.
    pub fn replace(&self, mesh: VoxelMesh) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = mesh;
    }

    /// Returns `true` if both handles refer to the same mesh resource.
    pub fn same_resource(&self, other: &MeshHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns an opaque identifier, stable for the lifetime of the resource.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;
    use voxpaint_volume::{Color, VolumeFrame};

    use super::*;
    use crate::FaceDirection;

    #[test]
    fn test_replace_is_visible_through_clones() {
        let handle = MeshHandle::new(VoxelMesh::new());
        let bound = handle.clone();

        let mut mesh = VoxelMesh::new();
        mesh.push_face(&VolumeFrame::IDENTITY, IVec3::ZERO, FaceDirection::PosX, Color::WHITE);
        handle.replace(mesh);

        assert_eq!(bound.read().face_count(), 1);
        assert!(bound.same_resource(&handle));
        assert_eq!(bound.id(), handle.id());
    }

    #[test]
    fn test_distinct_handles_differ() {
        let a = MeshHandle::default();
        let b = MeshHandle::default();
        assert!(!a.same_resource(&b));
        assert_ne!(a.id(), b.id());
    }
}
