//! Lit, optionally textured triangle meshes

use crate::device::{uniform_entry, GpuContext};
use crate::surface::DEPTH_FORMAT;
use bytemuck::{Pod, Zeroable};
use cosmic_core::TriangleMesh;
use cosmic_scene::Side;
use std::collections::HashMap;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// Interleave a mesh's attributes. Missing normals point away from the
    /// origin, missing UVs are zero.
    pub fn from_mesh(mesh: &TriangleMesh) -> Vec<Self> {
        mesh.vertices
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let normal = match &mesh.normals {
                    Some(normals) => normals[i],
                    None => p.coords.try_normalize(f32::EPSILON).unwrap_or_else(nalgebra::Vector3::y),
                };
                let uv = mesh.uvs.as_ref().map_or([0.0, 0.0], |uvs| uvs[i]);
                Self {
                    position: [p.x, p.y, p.z],
                    normal: [normal.x, normal.y, normal.z],
                    uv,
                }
            })
            .collect()
    }
}

/// Vertex and index buffers of one uploaded mesh
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(gpu: &GpuContext, label: &str, mesh: &TriangleMesh) -> Self {
        let vertices = MeshVertex::from_mesh(mesh);
        let indices = mesh.indices_u32();
        Self {
            vertex_buffer: gpu.create_buffer_init(label, &vertices, wgpu::BufferUsages::VERTEX),
            index_buffer: gpu.create_buffer_init(label, &indices, wgpu::BufferUsages::INDEX),
            index_count: indices.len() as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshPipelineKey {
    pub side: Side,
    pub transparent: bool,
}

pub fn cull_mode(side: Side) -> Option<wgpu::Face> {
    match side {
        Side::Front => Some(wgpu::Face::Back),
        Side::Back => Some(wgpu::Face::Front),
        Side::Double => None,
    }
}

/// One pipeline per side/transparency combination, all built up front
pub struct MeshPipelines {
    draw_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<MeshPipelineKey, wgpu::RenderPipeline>,
}

impl MeshPipelines {
    pub fn new(gpu: &GpuContext, frame_layout: &wgpu::BindGroupLayout, format: wgpu::TextureFormat) -> Self {
        let draw_layout = gpu.create_bind_group_layout(
            "mesh_draw_bind_group_layout",
            &[
                uniform_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        );

        let shader = gpu.create_shader_module("Mesh Shader", include_str!("shaders/mesh.wgsl"));
        let layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[frame_layout, &draw_layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = HashMap::new();
        for side in [Side::Front, Side::Back, Side::Double] {
            for transparent in [false, true] {
                let key = MeshPipelineKey { side, transparent };
                pipelines.insert(key, create_pipeline(gpu, &layout, &shader, format, key));
            }
        }

        Self { draw_layout, pipelines }
    }

    pub fn draw_layout(&self) -> &wgpu::BindGroupLayout {
        &self.draw_layout
    }

    pub fn get(&self, key: MeshPipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&key)
    }
}

fn create_pipeline(
    gpu: &GpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    key: MeshPipelineKey,
) -> wgpu::RenderPipeline {
    let label = format!("Mesh Pipeline {:?}", key);
    gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[MeshVertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: if key.transparent {
                    Some(wgpu::BlendState::ALPHA_BLENDING)
                } else {
                    Some(wgpu::BlendState::REPLACE)
                },
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: cull_mode(key.side),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !key.transparent,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(MeshVertex::desc().array_stride, 32);
    }

    #[test]
    fn test_from_sphere_keeps_attributes() {
        let sphere = TriangleMesh::uv_sphere(2.0, 8, 6).unwrap();
        let vertices = MeshVertex::from_mesh(&sphere);
        assert_eq!(vertices.len(), sphere.vertex_count());

        let top = vertices[0];
        assert!((top.position[1] - 2.0).abs() < 1e-5);
        assert!((top.normal[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_missing_normals_point_outward() {
        let mesh = TriangleMesh {
            vertices: vec![
                cosmic_core::Point3f::new(3.0, 0.0, 0.0),
                cosmic_core::Point3f::new(0.0, 0.0, -2.0),
                cosmic_core::Point3f::origin(),
            ],
            faces: vec![[0, 1, 2]],
            ..TriangleMesh::default()
        };
        let vertices = MeshVertex::from_mesh(&mesh);
        assert_eq!(vertices[0].normal, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 0.0, -1.0]);
        assert_eq!(vertices[2].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_cull_modes() {
        assert_eq!(cull_mode(Side::Front), Some(wgpu::Face::Back));
        assert_eq!(cull_mode(Side::Back), Some(wgpu::Face::Front));
        assert_eq!(cull_mode(Side::Double), None);
    }
}
