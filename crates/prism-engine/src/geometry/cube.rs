use glam::Vec3;

use super::{MeshData, MeshVertex};

/// `(normal, u, v)` per face, with `u × v = normal`.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Axis-aligned cube with half-extent 1 and flat per-face normals.
///
/// Faces do not share vertices: 24 vertices, 36 indices.
pub fn cube(center: Vec3) -> MeshData {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in FACES {
        let base = vertices.len() as u32;
        let face_center = center + normal;

        for corner in [-u - v, u - v, u + v, -u + v] {
            vertices.push(MeshVertex::new(face_center + corner, normal));
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_six_quads() {
        let mesh = cube(Vec3::ZERO);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn corners_at_unit_extent() {
        let mesh = cube(Vec3::new(0.0, 3.0, 0.0));
        for v in &mesh.vertices {
            let local = Vec3::from(v.position) - Vec3::new(0.0, 3.0, 0.0);
            assert_eq!(local.abs(), Vec3::ONE);
        }
    }

    #[test]
    fn faces_wind_along_normals() {
        let mesh = cube(Vec3::ZERO);
        for (tri, idx) in mesh.triangles().zip(mesh.indices.chunks_exact(3)) {
            let [a, b, c] = tri;
            let geometric = (b - a).cross(c - a).normalize();
            let stored = Vec3::from(mesh.vertices[idx[0] as usize].normal);
            approx::assert_relative_eq!(geometric.dot(stored), 1.0, epsilon = 1e-6);
        }
    }
}
