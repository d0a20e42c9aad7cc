//! Procedural geometry.
//!
//! Generators produce CPU-side [`MeshData`]; uploading to the GPU is a separate
//! step performed by a [`RenderBackend`](crate::render::RenderBackend).
//!
//! All generators emit indexed triangle lists with counter-clockwise winding
//! when viewed from outside the shape.

mod cube;
mod icosphere;
mod mesh_data;
mod square;

pub use cube::cube;
pub use icosphere::icosphere;
pub use mesh_data::{MeshData, MeshVertex};
pub use square::square;
