//! Recording render backend for GPU-free tests.

use prism_engine::geometry::MeshData;
use prism_engine::paint::Color;
use prism_engine::render::{Camera, MeshUploader, RenderBackend, Viewport};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockMesh {
    pub id:        u32,
    pub triangles: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateMesh { id: u32, triangles: usize },
    DestroyMesh(u32),
    SetClearColor(Color),
    SetViewport(u32, u32),
    Clear,
    SetTime { program: &'static str, time: f32 },
    Render { program: &'static str, meshes: Vec<u32>, color: Color },
}

/// Backend that records every call in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    next_id:   u32,
}

impl Recorder {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn created(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::CreateMesh { .. })).count()
    }

    pub fn destroyed(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::DestroyMesh(_))).count()
    }

    pub fn renders(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Render { .. })).collect()
    }
}

impl MeshUploader for Recorder {
    type Mesh = MockMesh;

    fn create_mesh(&mut self, data: &MeshData) -> MockMesh {
        self.next_id += 1;
        let mesh = MockMesh { id: self.next_id, triangles: data.triangle_count() };
        self.calls.push(Call::CreateMesh { id: mesh.id, triangles: mesh.triangles });
        mesh
    }

    fn destroy_mesh(&mut self, mesh: MockMesh) {
        self.calls.push(Call::DestroyMesh(mesh.id));
    }
}

impl Viewport for Recorder {
    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.calls.push(Call::SetViewport(width, height));
    }
}

impl RenderBackend for Recorder {
    type Program = &'static str;

    fn set_clear_color(&mut self, color: Color) {
        self.calls.push(Call::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn set_time(&mut self, program: &&'static str, time: f32) {
        self.calls.push(Call::SetTime { program: *program, time });
    }

    fn render(&mut self, _camera: &Camera, program: &&'static str, drawables: &[&MockMesh], color: Color) {
        self.calls.push(Call::Render {
            program: *program,
            meshes: drawables.iter().map(|m| m.id).collect(),
            color,
        });
    }
}
