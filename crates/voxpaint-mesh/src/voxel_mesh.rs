//! Mesh buffers produced by a synthesis pass.

use glam::Vec3;

use voxpaint_volume::{Color, GridCoord, VolumeFrame};

use crate::cube_template::{FACE_INDICES, face_template};
use crate::face_direction::FaceDirection;

/// A single world-space mesh vertex, laid out for direct buffer upload.
///
/// Layout (48 bytes): position `[f32; 3]`, normal `[f32; 3]`, uv `[f32; 2]`,
/// color `[f32; 4]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space unit normal.
    pub normal: [f32; 3],
    /// Texture coordinates within the face (0..=1).
    pub uv: [f32; 2],
    /// RGBA tint copied from the cell.
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 48]);

/// Which cell and face a quad in the mesh came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceInfo {
    /// The cell owning the face.
    pub coord: GridCoord,
    /// The direction the face points.
    pub direction: FaceDirection,
}

/// Vertex and index buffers for one volume.
///
/// Every face contributes four vertices and six indices; indices are offset by
/// the running vertex count so the buffers stay contiguous.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelMesh {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// One entry per emitted face, in emission order.
    pub faces: Vec<FaceInfo>,
}

impl VoxelMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `faces` quads.
    pub fn with_face_capacity(faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(faces * 4),
            indices: Vec::with_capacity(faces * FACE_INDICES.len()),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Appends the face of `coord` pointing in `direction`.
    ///
    /// Each template corner becomes `frame.from_key(coord) +
    /// frame.transform_vector(corner)`, so the frame's scale and rotation apply
    /// uniformly to every cell. Mirrored frames (negative determinant) get
    /// reversed winding to stay front-facing.
    pub fn push_face(
        &mut self,
        frame: &VolumeFrame,
        coord: GridCoord,
        direction: FaceDirection,
        color: Color,
    ) {
        let face = face_template(direction);
        let center = frame.from_key(coord);
        let normal = frame.transform_normal(face.normal).to_array();
        let color = color.to_array();
        let base = self.vertices.len() as u32;

        for (corner, uv) in face.corners.iter().zip(face.uvs) {
            let position: Vec3 = center + frame.transform_vector(*corner);
            self.vertices.push(MeshVertex {
                position: position.to_array(),
                normal,
                uv,
                color,
            });
        }

        if frame.to_world().matrix3.determinant() < 0.0 {
            self.indices
                .extend(FACE_INDICES.chunks(3).flat_map(|t| [t[0], t[2], t[1]]).map(|i| base + i));
        } else {
            self.indices.extend(FACE_INDICES.iter().map(|i| base + i));
        }

        self.faces.push(FaceInfo { coord, direction });
    }

    /// Returns the number of faces (quads) in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if the mesh holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Counts the faces pointing in `direction`.
    pub fn count_faces_for_direction(&self, direction: FaceDirection) -> usize {
        self.faces
            .iter()
            .filter(|f| f.direction == direction)
            .count()
    }

    /// Returns `true` if the mesh contains the face of `coord` pointing in `direction`.
    pub fn has_face(&self, coord: GridCoord, direction: FaceDirection) -> bool {
        self.faces
            .iter()
            .any(|f| f.coord == coord && f.direction == direction)
    }

    /// Returns the raw vertex bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
