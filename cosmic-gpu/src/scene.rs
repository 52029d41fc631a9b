//! Draws a [`SceneGraph`] into a color and depth target

use crate::device::{uniform_entry, GpuContext};
use crate::meshes::{GpuMesh, MeshPipelineKey, MeshPipelines};
use crate::particles::{GpuCloud, ParticlePipelineKey, ParticlePipelines, SPRITE_VERTICES};
use crate::texture::{create_sampler, TextureCache};
use crate::uniforms::{CameraUniform, DrawUniform, LayerUniform, LightsUniform};
use cosmic_core::{Point3f, Rgb};
use cosmic_scene::{CloudHandle, Light, MeshHandle, NodeId, NodeKind, SceneGraph};
use nalgebra::Matrix4;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDraw {
    pub node: NodeId,
    pub mesh: MeshHandle,
    pub key: MeshPipelineKey,
    pub uniform: DrawUniform,
    /// Distance from the eye to the node origin
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerDraw {
    pub node: NodeId,
    pub cloud: CloudHandle,
    pub key: ParticlePipelineKey,
    pub uniform: LayerUniform,
}

/// Everything visible this frame, in draw order
#[derive(Debug, Default)]
pub struct DrawList {
    pub opaque: Vec<MeshDraw>,
    /// Farthest first
    pub transparent: Vec<MeshDraw>,
    pub layers: Vec<LayerDraw>,
}

impl DrawList {
    pub fn collect(graph: &SceneGraph, eye: Point3f) -> Self {
        let mut list = Self::default();

        for (id, world) in graph.walk_visible() {
            match &graph.node(id).kind {
                NodeKind::Mesh { mesh, material } => {
                    let draw = MeshDraw {
                        node: id,
                        mesh: *mesh,
                        key: MeshPipelineKey {
                            side: material.side,
                            transparent: material.transparent,
                        },
                        uniform: DrawUniform::new(&world.matrix, material),
                        distance: (world.origin() - eye).norm(),
                    };
                    if material.transparent {
                        list.transparent.push(draw);
                    } else {
                        list.opaque.push(draw);
                    }
                }
                NodeKind::Points { cloud, material } => list.layers.push(LayerDraw {
                    node: id,
                    cloud: *cloud,
                    key: ParticlePipelineKey {
                        blending: material.blending,
                        depth_write: material.depth_write,
                    },
                    uniform: LayerUniform::new(&world.matrix, material),
                }),
                NodeKind::Group | NodeKind::Label(_) => {}
            }
        }

        list.transparent.sort_by(|a, b| b.distance.total_cmp(&a.distance));
        list
    }
}

struct NodeBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Renders the mesh and particle nodes of one scene graph.
///
/// GPU resources for every mesh, particle cloud and drawable node are
/// created in [`SceneRenderer::new`]; a frame only rewrites uniforms.
pub struct SceneRenderer {
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    mesh_pipelines: MeshPipelines,
    particle_pipelines: ParticlePipelines,
    meshes: Vec<GpuMesh>,
    clouds: Vec<GpuCloud>,
    bindings: HashMap<NodeId, NodeBinding>,
    eye: Point3f,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        gpu: &GpuContext,
        format: wgpu::TextureFormat,
        graph: &SceneGraph,
        asset_root: impl Into<PathBuf>,
    ) -> Self {
        let start = instant::Instant::now();

        let frame_layout = gpu.create_bind_group_layout("frame_bind_group_layout", &[uniform_entry(0), uniform_entry(1)]);
        let camera_buffer = gpu.create_uniform_buffer("Camera Buffer", &CameraUniform::default());
        let lights_buffer = gpu.create_uniform_buffer("Lights Buffer", &LightsUniform::from_lights(&[]));
        let frame_bind_group = gpu.create_bind_group(
            "frame_bind_group",
            &frame_layout,
            &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        );

        let mesh_pipelines = MeshPipelines::new(gpu, &frame_layout, format);
        let particle_pipelines = ParticlePipelines::new(gpu, &frame_layout, format);

        let meshes: Vec<GpuMesh> = graph
            .meshes()
            .iter()
            .enumerate()
            .map(|(i, mesh)| GpuMesh::upload(gpu, &format!("Mesh {}", i), mesh))
            .collect();
        let clouds: Vec<GpuCloud> = graph
            .clouds()
            .iter()
            .enumerate()
            .map(|(i, cloud)| GpuCloud::upload(gpu, &format!("Particle Layer {}", i), cloud))
            .collect();

        let sampler = create_sampler(&gpu.device);
        let mut textures = TextureCache::new(gpu, asset_root);
        let mut bindings = HashMap::new();

        for index in 0..graph.len() {
            let id = NodeId(index);
            let node = graph.node(id);
            let binding = match &node.kind {
                NodeKind::Mesh { material, .. } => {
                    let uniform = DrawUniform::new(&Matrix4::identity(), material);
                    let buffer = gpu.create_uniform_buffer(&node.name, &uniform);
                    let texture = textures.get(gpu, material.texture.as_deref());
                    let bind_group = gpu.create_bind_group(
                        &node.name,
                        mesh_pipelines.draw_layout(),
                        &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: buffer.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::TextureView(&texture.view),
                            },
                            wgpu::BindGroupEntry {
                                binding: 2,
                                resource: wgpu::BindingResource::Sampler(&sampler),
                            },
                        ],
                    );
                    NodeBinding { buffer, bind_group }
                }
                NodeKind::Points { material, .. } => {
                    let uniform = LayerUniform::new(&Matrix4::identity(), material);
                    let buffer = gpu.create_uniform_buffer(&node.name, &uniform);
                    let bind_group = gpu.create_bind_group(
                        &node.name,
                        particle_pipelines.layer_layout(),
                        &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: buffer.as_entire_binding(),
                        }],
                    );
                    NodeBinding { buffer, bind_group }
                }
                NodeKind::Group | NodeKind::Label(_) => continue,
            };
            bindings.insert(id, binding);
        }

        let particles: u32 = clouds.iter().map(|c| c.count).sum();
        log::info!(
            "uploaded {} meshes, {} particle layers ({} particles) in {:?}",
            meshes.len(),
            clouds.len(),
            particles,
            start.elapsed()
        );

        Self {
            camera_buffer,
            lights_buffer,
            frame_bind_group,
            mesh_pipelines,
            particle_pipelines,
            meshes,
            clouds,
            bindings,
            eye: Point3f::origin(),
            clear_color: wgpu::Color::BLACK,
        }
    }

    /// Update camera view and projection matrices
    pub fn update_camera(&mut self, gpu: &GpuContext, view: &Matrix4<f32>, projection: &Matrix4<f32>, eye: Point3f) {
        self.eye = eye;
        let uniform = CameraUniform::new(view, projection, eye);
        gpu.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn set_lights(&mut self, gpu: &GpuContext, lights: &[Light]) {
        let uniform = LightsUniform::from_lights(lights);
        gpu.queue.write_buffer(&self.lights_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn set_clear_color(&mut self, color: Rgb) {
        self.clear_color = wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: 1.0,
        };
    }

    /// Record one frame of `graph` and return the encoder unsubmitted, so
    /// further passes can draw on top before the caller submits it
    pub fn render(
        &self,
        gpu: &GpuContext,
        graph: &SceneGraph,
        target: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) -> wgpu::CommandEncoder {
        let list = DrawList::collect(graph, self.eye);

        for draw in list.opaque.iter().chain(&list.transparent) {
            if let Some(binding) = self.bindings.get(&draw.node) {
                gpu.queue.write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&draw.uniform));
            }
        }
        for layer in &list.layers {
            if let Some(binding) = self.bindings.get(&layer.node) {
                gpu.queue.write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&layer.uniform));
            }
        }

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Scene Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for draw in list.opaque.iter().chain(&list.transparent) {
                let (Some(pipeline), Some(binding), Some(mesh)) = (
                    self.mesh_pipelines.get(draw.key),
                    self.bindings.get(&draw.node),
                    self.meshes.get(draw.mesh.0),
                ) else {
                    continue;
                };
                if mesh.index_count == 0 {
                    continue;
                }
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, &binding.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            for layer in &list.layers {
                let (Some(pipeline), Some(binding), Some(cloud)) = (
                    self.particle_pipelines.get(layer.key),
                    self.bindings.get(&layer.node),
                    self.clouds.get(layer.cloud.0),
                ) else {
                    continue;
                };
                if cloud.count == 0 {
                    continue;
                }
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, &binding.bind_group, &[]);
                render_pass.set_vertex_buffer(0, cloud.instance_buffer.slice(..));
                render_pass.draw(0..SPRITE_VERTICES, 0..cloud.count);
            }
        }

        encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmic_core::{Particle, ParticleCloud, TriangleMesh};
    use cosmic_scene::{Blending, MeshMaterial, Node, PointsMaterial};

    fn sphere_graph() -> (SceneGraph, MeshHandle) {
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(TriangleMesh::uv_sphere(1.0, 8, 6).unwrap());
        (graph, mesh)
    }

    #[test]
    fn test_transparent_draws_back_to_front() {
        let (mut graph, mesh) = sphere_graph();
        let root = graph.root();
        let glass = MeshMaterial::new(Rgb::WHITE).opacity(0.5);
        graph.add(root, Node::mesh("near", mesh, glass.clone()).at(0.0, 0.0, 5.0));
        graph.add(root, Node::mesh("far", mesh, glass.clone()).at(0.0, 0.0, -20.0));
        graph.add(root, Node::mesh("mid", mesh, glass).at(0.0, 0.0, -5.0));
        graph.add(root, Node::mesh("solid", mesh, MeshMaterial::default()));

        let list = DrawList::collect(&graph, Point3f::new(0.0, 0.0, 10.0));
        let order: Vec<&str> = list.transparent.iter().map(|d| graph.node(d.node).name.as_str()).collect();
        assert_eq!(order, vec!["far", "mid", "near"]);
        assert_eq!(list.opaque.len(), 1);
        assert!(!list.opaque[0].key.transparent);
    }

    #[test]
    fn test_hidden_nodes_are_not_drawn() {
        let (mut graph, mesh) = sphere_graph();
        let root = graph.root();
        let group = graph.add(root, Node::group("solar").hidden());
        graph.add(group, Node::mesh("sun", mesh, MeshMaterial::default()));
        let cloud = graph.add_cloud(ParticleCloud::from_points(vec![Particle::default(); 4]));
        graph.add(root, Node::points("stars", cloud, PointsMaterial::new(0.5, 0.8, Blending::Additive)));

        let list = DrawList::collect(&graph, Point3f::new(0.0, 0.0, 10.0));
        assert!(list.opaque.is_empty());
        assert_eq!(list.layers.len(), 1);
        assert_eq!(list.layers[0].uniform.params[..2], [0.5, 0.8]);
    }

    #[test]
    fn test_draw_uniform_uses_world_transform() {
        let (mut graph, mesh) = sphere_graph();
        let root = graph.root();
        let parent = graph.add(root, Node::group("orbit").at(10.0, 0.0, 0.0));
        graph.add(parent, Node::mesh("planet", mesh, MeshMaterial::default()).at(0.0, 2.0, 0.0));

        let list = DrawList::collect(&graph, Point3f::origin());
        let model = list.opaque[0].uniform.model;
        assert_eq!(model[3][..3], [10.0, 2.0, 0.0]);
    }
}
