//! Instanced camera-facing sprites for particle layers
//!
//! Each particle is one instance; the vertex shader expands it into a quad
//! from `vertex_index`, so no per-vertex buffer is bound. The instance
//! buffer is the particle slice itself.

use crate::device::{uniform_entry, GpuContext};
use crate::surface::DEPTH_FORMAT;
use cosmic_core::{Particle, ParticleCloud};
use cosmic_scene::Blending;
use std::collections::HashMap;

/// Vertices emitted per sprite (two triangles)
pub const SPRITE_VERTICES: u32 = 6;

pub fn instance_desc<'a>() -> wgpu::VertexBufferLayout<'a> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Particle>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

pub struct GpuCloud {
    pub instance_buffer: wgpu::Buffer,
    pub count: u32,
}

impl GpuCloud {
    pub fn upload(gpu: &GpuContext, label: &str, cloud: &ParticleCloud) -> Self {
        Self {
            instance_buffer: gpu.create_buffer_init(label, &cloud.points, wgpu::BufferUsages::VERTEX),
            count: cloud.len() as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticlePipelineKey {
    pub blending: Blending,
    pub depth_write: bool,
}

pub fn blend_state(blending: Blending) -> wgpu::BlendState {
    match blending {
        Blending::Additive => wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Zero,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        },
        Blending::Normal => wgpu::BlendState::ALPHA_BLENDING,
    }
}

pub struct ParticlePipelines {
    layer_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<ParticlePipelineKey, wgpu::RenderPipeline>,
}

impl ParticlePipelines {
    pub fn new(gpu: &GpuContext, frame_layout: &wgpu::BindGroupLayout, format: wgpu::TextureFormat) -> Self {
        let layer_layout = gpu.create_bind_group_layout("particle_layer_bind_group_layout", &[uniform_entry(0)]);
        let shader = gpu.create_shader_module("Particle Shader", include_str!("shaders/particles.wgsl"));
        let layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[frame_layout, &layer_layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = HashMap::new();
        for blending in [Blending::Additive, Blending::Normal] {
            for depth_write in [false, true] {
                let key = ParticlePipelineKey { blending, depth_write };
                pipelines.insert(key, create_pipeline(gpu, &layout, &shader, format, key));
            }
        }

        Self { layer_layout, pipelines }
    }

    pub fn layer_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layer_layout
    }

    pub fn get(&self, key: ParticlePipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&key)
    }
}

fn create_pipeline(
    gpu: &GpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    key: ParticlePipelineKey,
) -> wgpu::RenderPipeline {
    let label = format!("Particle Pipeline {:?}", key);
    gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[instance_desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend_state(key.blending)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: key.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
