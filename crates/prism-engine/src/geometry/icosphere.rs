use std::collections::HashMap;

use glam::Vec3;

use super::{MeshData, MeshVertex};

/// Golden ratio; icosahedron vertices lie on `(±1, ±T, 0)` and its permutations.
const T: f32 = 1.618_034;

const BASE_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];

const BASE_FACES: [[u32; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Generates a sphere by subdividing a regular icosahedron.
///
/// Each subdivision splits every triangle into four, sharing midpoint vertices
/// between neighbouring faces, so the result has `20 * 4^n` faces and
/// `10 * 4^n + 2` vertices.
pub fn icosphere(center: Vec3, radius: f32, subdivisions: u32) -> MeshData {
    let mut unit: Vec<Vec3> = BASE_VERTICES
        .iter()
        .map(|&p| Vec3::from(p).normalize())
        .collect();
    let mut faces: Vec<[u32; 3]> = BASE_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);
        let mut next = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = midpoint(&mut unit, &mut midpoints, a, b);
            let bc = midpoint(&mut unit, &mut midpoints, b, c);
            let ca = midpoint(&mut unit, &mut midpoints, c, a);

            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }

        faces = next;
    }

    let vertices = unit
        .into_iter()
        .map(|n| MeshVertex::new(center + n * radius, n))
        .collect();
    let indices = faces.into_iter().flatten().collect();

    MeshData::new(vertices, indices)
}

fn midpoint(
    unit: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let p = ((unit[a as usize] + unit[b as usize]) * 0.5).normalize();
        unit.push(p);
        (unit.len() - 1) as u32
    })
}
