//! Unit-cube template: one quad per face in cell-local space.
//!
//! The cube is centered on the cell (corners at ±0.5). Corners run
//! counter-clockwise when viewed from outside the face, so [`FACE_INDICES`]
//! yields front-facing triangles.

use glam::Vec3;

use crate::face_direction::FaceDirection;

/// Two triangles covering a face quad, relative to its first vertex.
pub const FACE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Local-space geometry of one cube face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTemplate {
    /// Corner positions, counter-clockwise from outside.
    pub corners: [Vec3; 4],
    /// Texture coordinates per corner.
    pub uvs: [[f32; 2]; 4],
    /// Outward unit normal.
    pub normal: Vec3,
}

/// Returns the template quad for the face pointing in `direction`.
pub fn face_template(direction: FaceDirection) -> FaceTemplate {
    let normal = direction.normal().as_vec3();
    // (u, v) span the face with u × v = normal.
    let (u, v) = match direction {
        FaceDirection::PosX => (Vec3::Y, Vec3::Z),
        FaceDirection::NegX => (Vec3::Z, Vec3::Y),
        FaceDirection::PosY => (Vec3::Z, Vec3::X),
        FaceDirection::NegY => (Vec3::X, Vec3::Z),
        FaceDirection::PosZ => (Vec3::X, Vec3::Y),
        FaceDirection::NegZ => (Vec3::Y, Vec3::X),
    };

    let signs: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let corners = signs.map(|(su, sv)| (normal + u * su + v * sv) * 0.5);
    let uvs = signs.map(|(su, sv)| [(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);

    FaceTemplate {
        corners,
        uvs,
        normal,
    }
}
