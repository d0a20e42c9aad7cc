use glam::Vec3;

use super::{MeshData, MeshVertex};

/// Flat square in the XY plane facing +Z, spanning `[-1, 1]` on both axes.
pub fn square(center: Vec3) -> MeshData {
    let corners = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];

    let vertices = corners
        .into_iter()
        .map(|p| MeshVertex::new(center + p, Vec3::Z))
        .collect();

    MeshData::new(vertices, vec![0, 1, 2, 0, 2, 3])
}
