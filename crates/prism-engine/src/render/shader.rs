use std::mem::offset_of;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::geometry::MeshVertex;

use super::DEPTH_FORMAT;

/// Static description of a shader program.
#[derive(Debug, Copy, Clone)]
pub struct ProgramDesc {
    pub label: &'static str,
    /// WGSL source with `vs_main` / `fs_main` entry points and the uniform block
    /// at group 0, binding 0.
    pub source: &'static str,
    /// Whether the shader reads the time uniform.
    pub uses_time: bool,
}

impl ProgramDesc {
    pub const LAMBERT: Self = Self {
        label: "lambert",
        source: include_str!("shaders/lambert.wgsl"),
        uses_time: false,
    };

    pub const CUSTOM: Self = Self {
        label: "custom",
        source: include_str!("shaders/custom.wgsl"),
        uses_time: true,
    };
}

/// Uniform block layout (224 bytes):
///
///  offset   0  model   mat4x4<f32>
///  offset  64  view    mat4x4<f32>
///  offset 128  proj    mat4x4<f32>
///  offset 192  color   vec4<f32>
///  offset 208  params  vec4<f32>   (.x = time)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ProgramUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

/// Byte offset of the time slot. Per-draw uploads stop short of it so the
/// time written by `set_time` survives `render`.
pub(super) const TIME_OFFSET: usize = offset_of!(ProgramUniforms, params);

/// A compiled render pipeline with its uniform buffer and bind group.
pub struct ShaderProgram {
    label: &'static str,
    uses_time: bool,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShaderProgram {
    /// Compiles `desc` for the given color target format.
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, desc: &ProgramDesc) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });

        let uniform_size = std::mem::size_of::<ProgramUniforms>() as u64;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism program bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism program ubo"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism program bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism program pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The square is visible from both sides.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("compiled shader program '{}'", desc.label);

        Self {
            label: desc.label,
            uses_time: desc.uses_time,
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn uses_time(&self) -> bool {
        self.uses_time
    }

    pub(super) fn write_time(&self, queue: &wgpu::Queue, time: f32) {
        queue.write_buffer(
            &self.uniform_buffer,
            TIME_OFFSET as u64,
            bytemuck::bytes_of(&[time, 0.0f32, 0.0, 0.0]),
        );
    }

    /// Uploads matrices and color; leaves the time slot untouched.
    pub(super) fn write_frame_uniforms(
        &self,
        queue: &wgpu::Queue,
        model: Mat4,
        view: Mat4,
        proj: Mat4,
        color: [f32; 4],
    ) {
        let uniforms = ProgramUniforms {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            color,
            params: [0.0; 4],
        };
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            &bytemuck::bytes_of(&uniforms)[..TIME_OFFSET],
        );
    }

    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
    }
}
