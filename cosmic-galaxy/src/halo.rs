//! Halo glow and dust lanes
//!
//! Both layers scatter particles uniformly in radius and angle over an
//! annulus, which (unlike the spiral arms) thins their areal density toward
//! the rim and gives the galaxy a soft, structureless envelope.

use crate::chunked::generate_chunked;
use crate::params::{DustParams, GlowParams};
use cosmic_core::{Particle, ParticleCloud, Point3f, Result};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

fn annulus_position(rng: &mut StdRng, min_radius: f32, max_radius: f32, thickness: f32) -> Point3f {
    let radius = min_radius + rng.gen::<f32>() * (max_radius - min_radius);
    let angle = rng.gen::<f32>() * TAU;
    let height = (rng.gen::<f32>() - 0.5) * thickness;
    Point3f::new(angle.cos() * radius, height, angle.sin() * radius)
}

/// Generate the bluish halo glow around the disk
pub fn generate_glow_halo(params: &GlowParams, seed: u64) -> Result<ParticleCloud> {
    params.validate()?;

    let color = params.color.to_array();
    let points = generate_chunked(params.count, seed, |_, rng| {
        let position = annulus_position(rng, params.min_radius, params.max_radius, params.thickness);
        let size = 0.3 + rng.gen::<f32>() * 0.7;
        Particle::new(position, color, size)
    });

    log::debug!("generated {} glow particles", points.len());
    Ok(ParticleCloud::from_points(points))
}

/// Generate the dark dust lane; each grain is a randomly darkened dust color
pub fn generate_dust_lane(params: &DustParams, seed: u64) -> Result<ParticleCloud> {
    params.validate()?;

    let points = generate_chunked(params.count, seed, |_, rng| {
        let position = annulus_position(rng, params.min_radius, params.max_radius, params.thickness);
        let darkness = 0.4 + rng.gen::<f32>() * 0.4;
        let size = 0.5 + rng.gen::<f32>() * 1.5;
        Particle::new(position, params.color.scaled(darkness).to_array(), size)
    });

    log::debug!("generated {} dust particles", points.len());
    Ok(ParticleCloud::from_points(points))
}
