//! Core data structures for cosmic-voyage
//!
//! This crate provides the fundamental types shared by the galaxy generator,
//! the scene graph and the renderer: points and particles, colors, particle
//! clouds, triangle meshes with primitive builders, transforms and rays.

pub mod point;
pub mod color;
pub mod point_cloud;
pub mod mesh;
pub mod transform;
pub mod ray;
pub mod error;

pub use point::*;
pub use color::*;
pub use point_cloud::*;
pub use mesh::*;
pub use transform::*;
pub use ray::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
