//! Dirty-flag driven mesh rebuilds.
//!
//! The synthesizer subscribes to its volume's change feed. Notifications only
//! mark it dirty; the next [`MeshSynthesizer::update`] (one per presentation
//! tick) regenerates the whole mesh once, however many writes arrived.

use voxpaint_volume::{ChangeReceiver, VoxelVolume};

use crate::handle::MeshHandle;
use crate::visibility::{compute_visible_faces, count_visible_faces};
use crate::voxel_mesh::VoxelMesh;

/// Builds the complete visible-surface mesh for `volume`.
pub fn synthesize(volume: &VoxelVolume) -> VoxelMesh {
    let visible = compute_visible_faces(volume);
    let mut mesh = VoxelMesh::with_face_capacity(count_visible_faces(&visible) as usize);
    let frame = volume.frame();

    for (coord, faces) in visible {
        let Some(color) = volume.get(coord) else {
            continue;
        };
        for dir in faces.iter() {
            mesh.push_face(frame, coord, dir, color);
        }
    }

    mesh
}

/// Keeps a [`MeshHandle`] in sync with a volume.
#[derive(Debug)]
pub struct MeshSynthesizer {
    changes: ChangeReceiver,
    dirty: bool,
    mesh: MeshHandle,
    rebuilds: u64,
}

impl MeshSynthesizer {
    /// Subscribes to `volume` and builds its initial mesh.
    pub fn new(volume: &mut VoxelVolume) -> Self {
        let changes = volume.subscribe();
        let mut synthesizer = Self {
            changes,
            dirty: false,
            mesh: MeshHandle::default(),
            rebuilds: 0,
        };
        synthesizer.rebuild(volume);
        synthesizer
    }

    /// Returns the shared mesh handle. Its identity never changes.
    pub fn mesh(&self) -> &MeshHandle {
        &self.mesh
    }

    /// Drains pending notifications into the dirty flag.
    ///
    /// Returns the number of notifications consumed.
    pub fn collect_changes(&mut self) -> usize {
        let count = self.changes.drain().count();
        if count > 0 {
            self.dirty = true;
        }
        count
    }

    /// Returns `true` if a rebuild is due.
    pub fn is_dirty(&self) -> bool {
        self.dirty || !self.changes.is_empty()
    }

    /// Rebuilds the mesh if any change arrived since the last rebuild.
    ///
    /// Returns `true` if a rebuild happened.
    pub fn update(&mut self, volume: &VoxelVolume) -> bool {
        self.collect_changes();
        if !self.dirty {
            return false;
        }
        self.rebuild(volume);
        true
    }

    /// Unconditionally regenerates the mesh and clears the dirty flag.
    pub fn rebuild(&mut self, volume: &VoxelVolume) {
        let mesh = synthesize(volume);
        tracing::debug!(
            cells = volume.len(),
            faces = mesh.face_count(),
            vertices = mesh.vertices.len(),
            "rebuilt voxel mesh"
        );
        self.mesh.replace(mesh);
        self.dirty = false;
        self.rebuilds += 1;
    }

    /// Returns how many times the mesh has been built.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Quat, Vec3};
    use voxpaint_volume::{Color, FillPattern, VolumeFrame};

    use super::*;
    use crate::FaceDirection;

    fn single() -> VoxelVolume {
        VoxelVolume::new(VolumeFrame::IDENTITY, Color::WHITE)
    }

    #[test]
    fn test_isolated_cell_has_six_quads() {
        let mesh = synthesize(&single());
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for dir in FaceDirection::ALL {
            assert_eq!(mesh.count_faces_for_direction(dir), 1);
        }
    }

    #[test]
    fn test_shared_face_is_omitted() {
        let mut volume = single();
        volume.paint(IVec3::Y, Color::RED);
        let mesh = synthesize(&volume);

        assert_eq!(mesh.face_count(), 10);
        assert!(!mesh.has_face(IVec3::ZERO, FaceDirection::PosY));
        assert!(!mesh.has_face(IVec3::Y, FaceDirection::NegY));
        assert!(mesh.has_face(IVec3::Y, FaceDirection::PosY));
    }

    #[test]
    fn test_faces_carry_cell_color() {
        let mut volume = single();
        volume.paint(IVec3::X * 3, Color::BLUE);
        let mesh = synthesize(&volume);

        let blue = Color::BLUE.to_array();
        let blue_vertices = mesh.vertices.iter().filter(|v| v.color == blue).count();
        assert_eq!(blue_vertices, 24);
    }

    #[test]
    fn test_solid_cube_only_meshes_shell() {
        let volume = VoxelVolume::with_pattern(
            VolumeFrame::IDENTITY,
            Color::WHITE,
            &FillPattern::Cube { half_extent: 2 },
        );
        let mesh = synthesize(&volume);
        // 5x5 faces on each of six sides.
        assert_eq!(mesh.face_count(), 150);
        assert!(mesh.faces.iter().all(|f| f.coord.abs().max_element() == 2));
    }

    #[test]
    fn test_scaled_rotated_frame_is_inherited() {
        let frame = VolumeFrame::from_scale_rotation_translation(
            Vec3::splat(0.5),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let volume = VoxelVolume::new(frame, Color::WHITE);
        let mesh = synthesize(&volume);

        for v in &mesh.vertices {
            let offset = Vec3::from_array(v.position) - Vec3::new(1.0, 2.0, 3.0);
            assert!((offset.abs() - Vec3::splat(0.25)).abs().max_element() < 1e-5);
        }
    }

    #[test]
    fn test_far_cell_saturated_to_grid_edge_meshes() {
        let mut volume = single();
        let far = volume.to_key(Vec3::new(1e12, 0.0, 0.0));
        assert_eq!(far, IVec3::new(i32::MAX, 0, 0));
        volume.paint(far, Color::RED);

        let mesh = synthesize(&volume);
        assert_eq!(mesh.face_count(), 12);
        assert!(mesh.has_face(far, FaceDirection::PosX));
    }

    #[test]
    fn test_new_builds_initial_mesh() {
        let mut volume = single();
        let synth = MeshSynthesizer::new(&mut volume);
        assert_eq!(synth.rebuild_count(), 1);
        assert_eq!(synth.mesh().read().face_count(), 6);
        assert!(!synth.is_dirty());
    }

    #[test]
    fn test_update_without_changes_does_nothing() {
        let mut volume = single();
        let mut synth = MeshSynthesizer::new(&mut volume);
        assert!(!synth.update(&volume));
        assert_eq!(synth.rebuild_count(), 1);
    }

    #[test]
    fn test_multiple_changes_coalesce_into_one_rebuild() {
        let mut volume = single();
        let mut synth = MeshSynthesizer::new(&mut volume);

        for x in 1..=4 {
            volume.paint(IVec3::new(x, 0, 0), Color::RED);
        }
        assert!(synth.is_dirty());
        assert!(synth.update(&volume));
        assert_eq!(synth.rebuild_count(), 2);
        // 1x5 bar: 5*4 side faces + 2 end caps.
        assert_eq!(synth.mesh().read().face_count(), 22);
        assert!(!synth.update(&volume));
    }

    #[test]
    fn test_noop_write_does_not_dirty() {
        let mut volume = single();
        let mut synth = MeshSynthesizer::new(&mut volume);
        volume.paint(IVec3::ZERO, Color::WHITE);
        assert!(!synth.is_dirty());
        assert!(!synth.update(&volume));
    }

    #[test]
    fn test_rebuild_keeps_handle_identity() {
        let mut volume = single();
        let mut synth = MeshSynthesizer::new(&mut volume);
        let bound = synth.mesh().clone();

        volume.paint(IVec3::NEG_Z, Color::GREEN);
        synth.update(&volume);

        assert!(bound.same_resource(synth.mesh()));
        assert_eq!(bound.read().face_count(), 10);
    }
}
