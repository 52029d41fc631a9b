//! Uniform block layouts shared with the WGSL shaders
//!
//! Every block is a whole number of 16-byte rows so it can be bound without
//! padding surprises on any backend.

use bytemuck::{Pod, Zeroable};
use cosmic_core::Point3f;
use cosmic_scene::{Light, MeshMaterial, PointsMaterial};
use nalgebra::Matrix4;

/// Point lights beyond this count are dropped
pub const MAX_POINT_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// Camera right and up axes in world space, for billboards
    pub right: [f32; 4],
    pub up: [f32; 4],
}

impl CameraUniform {
    pub fn new(view: &Matrix4<f32>, projection: &Matrix4<f32>, eye: Point3f) -> Self {
        // Rows of the view rotation are the camera axes in world space
        let right = [view[(0, 0)], view[(0, 1)], view[(0, 2)], 0.0];
        let up = [view[(1, 0)], view[(1, 1)], view[(1, 2)], 0.0];
        Self {
            view_proj: (projection * view).into(),
            eye: [eye.x, eye.y, eye.z, 1.0],
            right,
            up,
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(&Matrix4::identity(), &Matrix4::identity(), Point3f::origin())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct LightsUniform {
    /// Summed ambient color times intensity
    pub ambient: [f32; 4],
    pub positions: [[f32; 4]; MAX_POINT_LIGHTS],
    /// Color times intensity
    pub colors: [[f32; 4]; MAX_POINT_LIGHTS],
    /// Number of point lights in `x`
    pub count: [u32; 4],
}

impl LightsUniform {
    pub fn from_lights(lights: &[Light]) -> Self {
        let mut uniform = Self::zeroed();
        let mut count = 0usize;

        for light in lights {
            match *light {
                Light::Ambient { color, intensity } => {
                    let c = color.scaled(intensity);
                    uniform.ambient[0] += c.r;
                    uniform.ambient[1] += c.g;
                    uniform.ambient[2] += c.b;
                }
                Light::Point { position, color, intensity } => {
                    if count == MAX_POINT_LIGHTS {
                        log::warn!("more than {} point lights, extra lights ignored", MAX_POINT_LIGHTS);
                        continue;
                    }
                    let c = color.scaled(intensity);
                    uniform.positions[count] = [position.x, position.y, position.z, 1.0];
                    uniform.colors[count] = [c.r, c.g, c.b, 1.0];
                    count += 1;
                }
            }
        }

        uniform.count[0] = count as u32;
        uniform
    }
}

/// Per-draw block of a mesh node
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    /// Base color and opacity
    pub color: [f32; 4],
    /// Emissive color premultiplied by intensity
    pub emissive: [f32; 4],
    /// Roughness, metalness
    pub surface: [f32; 4],
}

impl DrawUniform {
    pub fn new(model: &Matrix4<f32>, material: &MeshMaterial) -> Self {
        let c = material.color;
        let e = material.emitted();
        Self {
            model: (*model).into(),
            color: [c.r, c.g, c.b, material.opacity],
            emissive: [e.r, e.g, e.b, 0.0],
            surface: [material.roughness, material.metalness, 0.0, 0.0],
        }
    }
}

/// Per-layer block of a particle node
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LayerUniform {
    pub model: [[f32; 4]; 4],
    /// Base sprite size, opacity
    pub params: [f32; 4],
}

impl LayerUniform {
    pub fn new(model: &Matrix4<f32>, material: &PointsMaterial) -> Self {
        Self {
            model: (*model).into(),
            params: [material.size, material.opacity, 0.0, 0.0],
        }
    }
}
