//! # Cosmic GPU
//!
//! wgpu renderer for the cosmic-voyage scene graph: lit and textured meshes,
//! instanced particle sprites, and the window surface they are drawn to.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cosmic_gpu::{GpuContext, SceneRenderer};
//! use cosmic_scene::SceneGraph;
//!
//! async fn example(graph: &SceneGraph, target: &wgpu::TextureView, depth: &wgpu::TextureView) -> cosmic_core::Result<()> {
//!     let gpu = GpuContext::headless().await?;
//!     let renderer = SceneRenderer::new(&gpu, wgpu::TextureFormat::Rgba8Unorm, graph, "assets");
//!     let encoder = renderer.render(&gpu, graph, target, depth);
//!     gpu.queue.submit(std::iter::once(encoder.finish()));
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod surface;
pub mod uniforms;
pub mod texture;
pub mod meshes;
pub mod particles;
pub mod scene;

pub use device::GpuContext;
pub use surface::{RenderSurface, DEPTH_FORMAT};
pub use uniforms::{CameraUniform, DrawUniform, LayerUniform, LightsUniform, MAX_POINT_LIGHTS};
pub use texture::{GpuTexture, TextureCache};
pub use meshes::{GpuMesh, MeshPipelineKey, MeshVertex};
pub use particles::{GpuCloud, ParticlePipelineKey};
pub use scene::{DrawList, LayerDraw, MeshDraw, SceneRenderer};
