use glam::Mat4;

use crate::geometry::MeshData;
use crate::paint::Color;

use super::depth::DepthTarget;
use super::{Camera, GpuMesh, MeshUploader, ProgramDesc, RenderBackend, ShaderProgram, Viewport};

/// Frame-independent renderer state: clear color, viewport size and the depth
/// target matching it.
///
/// The depth texture is only re-created when the viewport size changes, so a
/// steady-state frame allocates no GPU objects.
pub struct Renderer {
    color_format: wgpu::TextureFormat,
    clear_color: Color,
    viewport: (u32, u32),
    depth: Option<DepthTarget>,
}

impl Renderer {
    pub fn new(color_format: wgpu::TextureFormat) -> Self {
        Self {
            color_format,
            clear_color: Color::black(),
            viewport: (1, 1),
            depth: None,
        }
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Compiles a shader program against this renderer's color format.
    pub fn create_program(&self, device: &wgpu::Device, desc: &ProgramDesc) -> ShaderProgram {
        ShaderProgram::new(device, self.color_format, desc)
    }

    /// Starts recording into an acquired frame.
    pub fn frame<'a>(
        &'a mut self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
    ) -> FrameRenderer<'a> {
        FrameRenderer {
            renderer: self,
            uploader: GpuUploader::new(device),
            queue,
            encoder,
            color_view,
        }
    }

    fn depth_view(&mut self, device: &wgpu::Device) -> &wgpu::TextureView {
        let (w, h) = self.viewport;
        if self.depth.as_ref().is_some_and(|d| d.size != (w, h)) {
            self.depth = None;
        }
        &self
            .depth
            .get_or_insert_with(|| {
                log::debug!("depth target created at {w}x{h}");
                DepthTarget::new(device, w, h)
            })
            .view
    }
}

impl Viewport for Renderer {
    /// Records the viewport size; zero extents clamp to 1.
    ///
    /// The depth target follows on the next frame that touches it.
    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }
}

/// Uploads meshes through a device; usable before any frame is acquired.
pub struct GpuUploader<'a> {
    device: &'a wgpu::Device,
    created: u64,
}

impl<'a> GpuUploader<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device, created: 0 }
    }
}

impl MeshUploader for GpuUploader<'_> {
    type Mesh = GpuMesh;

    fn create_mesh(&mut self, data: &MeshData) -> GpuMesh {
        self.created += 1;
        GpuMesh::create(self.device, &format!("prism mesh {}", self.created), data)
    }

    fn destroy_mesh(&mut self, mesh: GpuMesh) {
        mesh.destroy();
    }
}

/// [`RenderBackend`] recording into one acquired frame.
pub struct FrameRenderer<'a> {
    renderer: &'a mut Renderer,
    uploader: GpuUploader<'a>,
    queue: &'a wgpu::Queue,
    encoder: &'a mut wgpu::CommandEncoder,
    color_view: &'a wgpu::TextureView,
}

impl MeshUploader for FrameRenderer<'_> {
    type Mesh = GpuMesh;

    fn create_mesh(&mut self, data: &MeshData) -> GpuMesh {
        self.uploader.create_mesh(data)
    }

    fn destroy_mesh(&mut self, mesh: GpuMesh) {
        self.uploader.destroy_mesh(mesh);
    }
}

impl Viewport for FrameRenderer<'_> {
    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.renderer.set_viewport_size(width, height);
    }
}

impl RenderBackend for FrameRenderer<'_> {
    type Program = ShaderProgram;

    fn set_clear_color(&mut self, color: Color) {
        self.renderer.set_clear_color(color);
    }

    fn clear(&mut self) {
        let clear = self.renderer.clear_color.to_wgpu();
        let depth_view = self.renderer.depth_view(self.uploader.device);

        let _rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn set_time(&mut self, program: &ShaderProgram, time: f32) {
        if program.uses_time() {
            program.write_time(self.queue, time);
        }
    }

    fn render(
        &mut self,
        camera: &Camera,
        program: &ShaderProgram,
        drawables: &[&GpuMesh],
        color: Color,
    ) {
        program.write_frame_uniforms(
            self.queue,
            Mat4::IDENTITY,
            camera.view(),
            camera.projection(),
            color.to_array(),
        );

        if drawables.is_empty() {
            return;
        }

        let (w, h) = self.renderer.viewport;
        let depth_view = self.renderer.depth_view(self.uploader.device);

        let mut rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(program.label()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, w as f32, h as f32, 0.0, 1.0);
        program.bind(&mut rpass);

        for mesh in drawables {
            mesh.draw(&mut rpass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_zero_extents() {
        let mut renderer = Renderer::new(wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(renderer.viewport, (1, 1));

        renderer.set_viewport_size(800, 600);
        assert_eq!(renderer.viewport, (800, 600));

        renderer.set_viewport_size(0, 300);
        assert_eq!(renderer.viewport, (1, 300));
        assert!(renderer.depth.is_none());
    }
}
