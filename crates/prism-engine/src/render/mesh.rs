use wgpu::util::DeviceExt;

use crate::geometry::MeshData;

/// A mesh uploaded to the GPU: vertex + index buffers for a triangle list.
///
/// Created from [`MeshData`] in a separate step, so CPU construction and GPU
/// upload stay ordered. Buffers are released by [`destroy`](Self::destroy) or
/// on drop.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn create(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    /// Frees the GPU buffers immediately instead of waiting for the last
    /// in-flight submission to drop them.
    pub fn destroy(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }

    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
