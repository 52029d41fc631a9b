//! Point and particle types

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A single star, dust grain or glow sprite in a particle field.
///
/// The layout is `repr(C)` so a slice of particles can be uploaded to the
/// GPU as an instance buffer without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Particle {
    pub position: Point3f,
    /// Linear RGB, not clamped
    pub color: [f32; 3],
    /// Relative sprite size, multiplied by the layer's base size when drawn
    pub size: f32,
}

unsafe impl Pod for Particle {}
unsafe impl Zeroable for Particle {}

impl Particle {
    pub fn new(position: Point3f, color: [f32; 3], size: f32) -> Self {
        Self { position, color, size }
    }

    /// Distance from the galactic axis (the Y axis), ignoring height
    pub fn planar_radius(&self) -> f32 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }

    /// Rec. 709 relative luminance of the particle color
    pub fn luminance(&self) -> f32 {
        0.2126 * self.color[0] + 0.7152 * self.color[1] + 0.0722 * self.color[2]
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [1.0, 1.0, 1.0],
            size: 1.0,
        }
    }
}
