use crate::geometry::MeshData;
use crate::paint::Color;

use super::Camera;

/// Creates and releases drawables.
///
/// Split from [`RenderBackend`] so geometry can be built before the first
/// frame exists.
pub trait MeshUploader {
    /// Uploaded drawable.
    type Mesh;

    /// Uploads CPU mesh data and returns a drawable handle.
    fn create_mesh(&mut self, data: &MeshData) -> Self::Mesh;

    /// Releases the GPU resources of a drawable.
    fn destroy_mesh(&mut self, mesh: Self::Mesh);
}

/// Anything that tracks a viewport size in physical pixels.
pub trait Viewport {
    fn set_viewport_size(&mut self, width: u32, height: u32);
}

/// Renderer-service contract used by the frame loop.
///
/// A backend owns viewport/clear state and turns one `render` call into one
/// draw per drawable. Implementations must rebind everything they need on
/// every `render` call; nothing bound by a previous call (or frame) may be
/// assumed to survive.
pub trait RenderBackend: MeshUploader + Viewport {
    /// Compiled shader program.
    type Program;

    fn set_clear_color(&mut self, color: Color);

    /// Clears color and depth using the configured clear color.
    fn clear(&mut self);

    /// Writes the animation time uniform of `program`.
    fn set_time(&mut self, program: &Self::Program, time: f32);

    /// Binds `program`, uploads camera matrices and `color`, then draws each
    /// drawable in order.
    fn render(
        &mut self,
        camera: &Camera,
        program: &Self::Program,
        drawables: &[&Self::Mesh],
        color: Color,
    );
}
