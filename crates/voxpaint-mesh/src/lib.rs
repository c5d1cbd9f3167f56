//! Mesh synthesis for voxel volumes: visible-face culling, the unit-cube face
//! template, mesh buffers, and the dirty-flag driven rebuild.

pub mod cube_template;
pub mod face_direction;
pub mod handle;
pub mod synthesizer;
pub mod visibility;
pub mod voxel_mesh;

pub use cube_template::{FACE_INDICES, FaceTemplate, face_template};
pub use face_direction::FaceDirection;
pub use handle::MeshHandle;
pub use synthesizer::{MeshSynthesizer, synthesize};
pub use visibility::{VisibleFaces, compute_visible_faces, count_visible_faces, visible_faces};
pub use voxel_mesh::{FaceInfo, MeshVertex, VoxelMesh};
