//! 3D rendering subsystem.
//!
//! - [`RenderBackend`] is the renderer-service contract the viewer drives once
//!   per frame; [`FrameRenderer`] implements it on top of wgpu.
//! - [`Renderer`] owns state that outlives a frame (clear color, viewport size,
//!   depth target).
//! - [`ShaderProgram`] is a compiled pipeline plus its uniform slots.
//! - [`GpuMesh`] is an uploaded drawable.
//!
//! Convention: right-handed world space, Y up, clip depth in `[0, 1]`.

mod backend;
mod camera;
mod depth;
mod mesh;
mod renderer;
mod shader;

pub use backend::{MeshUploader, RenderBackend, Viewport};
pub use camera::Camera;
pub use depth::DEPTH_FORMAT;
pub use mesh::GpuMesh;
pub use renderer::{FrameRenderer, GpuUploader, Renderer};
pub use shader::{ProgramDesc, ShaderProgram};
