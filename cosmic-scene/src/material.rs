//! Materials and lights

use cosmic_core::{Point3f, Rgb};

/// Which faces of a mesh are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    /// Only inner faces; used for glow shells around a body
    Back,
    Double,
}

/// How particle sprites combine with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blending {
    #[default]
    Additive,
    Normal,
}

/// Surface description of a mesh node
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMaterial {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
    pub roughness: f32,
    pub metalness: f32,
    /// Texture path relative to the asset root. Missing files are ignored.
    pub texture: Option<String>,
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            emissive: Rgb::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
            roughness: 1.0,
            metalness: 0.0,
            texture: None,
        }
    }
}

impl MeshMaterial {
    pub fn new(color: Rgb) -> Self {
        Self { color, ..Self::default() }
    }

    pub fn emissive(mut self, emissive: Rgb, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// Mark the material transparent with the given opacity
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn texture(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(path.into());
        self
    }

    /// Emissive color premultiplied by its intensity
    pub fn emitted(&self) -> Rgb {
        self.emissive.scaled(self.emissive_intensity)
    }
}

/// Sprite settings shared by every particle of a points node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    /// Base sprite size in world units, multiplied by each particle's size
    pub size: f32,
    pub opacity: f32,
    pub blending: Blending,
    pub depth_write: bool,
}

impl PointsMaterial {
    pub fn new(size: f32, opacity: f32, blending: Blending) -> Self {
        Self {
            size,
            opacity,
            blending,
            depth_write: false,
        }
    }
}

/// Scene light
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { color: Rgb, intensity: f32 },
    Point { position: Point3f, color: Rgb, intensity: f32 },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient { color: Rgb::WHITE, intensity }
    }

    pub fn point(position: Point3f, color: Rgb, intensity: f32) -> Self {
        Light::Point { position, color, intensity }
    }
}
