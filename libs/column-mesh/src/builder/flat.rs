//! Sharp-edged bar: an axis-aligned box with unshared face corners.

use glam::Vec3;

use super::BarPlacement;
use crate::buffer::GeometryBuffer;

/// Corner indices of each face, counter-clockwise seen from outside.
///
/// Corners 0..4 lie on the base, 4..8 directly above them, ordered
/// (+x,+z), (+x,-z), (-x,-z), (-x,+z).
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 5, 4], // +X
    [2, 3, 7, 6], // -X
    [4, 5, 6, 7], // +Y
    [3, 2, 1, 0], // -Y
    [0, 4, 7, 3], // +Z
    [1, 2, 6, 5], // -Z
];

const FACE_NORMALS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Fan split of a face quad into two triangles, in face-local indices.
const QUAD_TRIANGLES: [[u32; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

pub(super) fn build(buffer: &mut GeometryBuffer, bar: &BarPlacement) {
    let half_x = bar.size.x / 2.0;
    let half_z = bar.size.z / 2.0;
    let footprint = [
        Vec3::new(half_x, 0.0, half_z),
        Vec3::new(half_x, 0.0, -half_z),
        Vec3::new(-half_x, 0.0, -half_z),
        Vec3::new(-half_x, 0.0, half_z),
    ];

    let base = bar.start;
    let top = bar.start + Vec3::Y * bar.size.y;
    let mut corners = [Vec3::ZERO; 8];
    for (i, offset) in footprint.iter().enumerate() {
        corners[i] = base + *offset;
        corners[i + 4] = top + *offset;
    }

    for (face, normal) in CUBE_FACES.iter().zip(FACE_NORMALS) {
        let first = buffer.vertex_offset() as u32;
        for triangle in QUAD_TRIANGLES {
            buffer.push_triangle(triangle.map(|i| first + i));
        }
        for &corner in face {
            buffer.push_vertex(corners[corner], normal, bar.uv);
        }
    }
}
