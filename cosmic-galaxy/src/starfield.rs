//! Background star shells

use crate::params::StarShellParams;
use cosmic_core::{Particle, ParticleCloud, Point3f, Result, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Generate a spherical shell of background stars
///
/// The radius starts at `radius + depth` and every star steps it inward by a
/// random fraction of `depth / count`, so the shell is densest at its outer
/// edge. Directions are uniform on the sphere. Hue walks the color wheel with
/// the star index; with zero saturation every star is a light gray.
///
/// Generation is sequential because each radius depends on the previous one.
pub fn generate_star_shell(params: &StarShellParams, seed: u64) -> Result<ParticleCloud> {
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut radius = params.radius + params.depth;
    let increment = if params.count > 0 { params.depth / params.count as f32 } else { 0.0 };

    let mut cloud = ParticleCloud::with_capacity(params.count);
    for i in 0..params.count {
        radius -= increment * rng.gen::<f32>();

        let polar = (1.0 - rng.gen::<f32>() * 2.0).acos();
        let azimuth = rng.gen::<f32>() * TAU;
        let position = Point3f::new(
            radius * polar.sin() * azimuth.sin(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.cos(),
        );

        let hue = i as f32 / params.count as f32;
        let color = Rgb::from_hsl(hue, params.saturation, 0.9);
        let size = (0.5 + 0.5 * rng.gen::<f32>()) * params.factor;

        cloud.push(Particle::new(position, color.to_array(), size));
    }

    Ok(cloud)
}
