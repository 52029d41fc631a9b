//! Spiral-arm star distribution

use crate::chunked::generate_chunked;
use crate::params::SpiralParams;
use cosmic_core::{Particle, ParticleCloud, Point3f, Result};
use rand::Rng;
use std::f32::consts::TAU;

/// Generate the main star field of a spiral galaxy
///
/// Particle `i` belongs to arm `i % arms`. Its radius is drawn with a
/// quadratic bias toward the center (`u² · (outer - inner) + inner`), so the
/// density falls off with distance. Arms wind logarithmically with radius,
/// the disk thins linearly toward the rim, and color and sprite size are
/// chosen by which band (core, arm, halo) the radius falls in.
///
/// # Arguments
/// * `params` - Shape, color and budget of the field
/// * `seed` - RNG seed; equal seeds give identical fields
///
/// # Returns
/// * `Result<ParticleCloud>` - The particles, or `InvalidParameter` for a
///   degenerate shape
///
/// # Example
/// ```rust
/// use cosmic_galaxy::{generate_spiral_galaxy, SpiralParams};
///
/// fn main() -> cosmic_core::Result<()> {
///     let params = SpiralParams { count: 1_000, ..SpiralParams::default() };
///     let cloud = generate_spiral_galaxy(&params, 7)?;
///     assert_eq!(cloud.len(), 1_000);
///     Ok(())
/// }
/// ```
pub fn generate_spiral_galaxy(params: &SpiralParams, seed: u64) -> Result<ParticleCloud> {
    params.validate()?;

    let start = instant::Instant::now();
    let arm_step = TAU / params.arms as f32;
    let span = params.outer_radius - params.inner_radius;

    let points = generate_chunked(params.count, seed, |i, rng| {
        let u: f32 = rng.gen();
        let radius = u * u * span + params.inner_radius;

        let arm_angle = (i % params.arms as usize) as f32 * arm_step;
        let spin = (radius / params.inner_radius + 1.0).ln() * params.spin_factor;
        let angle = arm_angle + spin + (rng.gen::<f32>() - 0.5) * params.angle_jitter;

        let arm_offset = (rng.gen::<f32>() - 0.5) * params.arm_spread * radius;
        let height = (rng.gen::<f32>() - 0.5)
            * params.disk_thickness
            * (1.0 - radius / params.outer_radius);

        let position = Point3f::new(
            angle.cos() * radius + arm_offset,
            height,
            angle.sin() * radius + arm_offset,
        );

        let color = if radius < params.core_radius {
            params.core_color.scaled(0.9 + rng.gen::<f32>() * 0.3)
        } else if radius < params.arm_radius {
            params.arm_color.scaled(0.7 + rng.gen::<f32>() * 0.3)
        } else {
            params.halo_color.scaled(0.5 + rng.gen::<f32>() * 0.2)
        };

        let size = if radius < params.core_radius {
            0.6 + rng.gen::<f32>() * 0.4
        } else {
            0.2 + rng.gen::<f32>() * 0.3
        };

        Particle::new(position, color.to_array(), size)
    });

    log::debug!(
        "generated {} spiral particles ({} arms) in {:?}",
        points.len(),
        params.arms,
        start.elapsed()
    );

    Ok(ParticleCloud::from_points(points))
}
