//! Radial statistics of a particle field
//!
//! Used to report on generated fields and to check their shape: how density
//! falls off with radius, how the disk thins, and how color changes from
//! core to rim.

use cosmic_core::ParticleCloud;
use std::f32::consts::PI;

/// One equal-width ring of the radial histogram
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBand {
    pub inner: f32,
    pub outer: f32,
    pub count: usize,
    /// Particles per unit area of the ring
    pub density: f32,
    pub mean_abs_height: f32,
    pub mean_luminance: f32,
}

/// Summary of a particle field measured in the galactic (XZ) plane
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStats {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub mean_radius: f32,
    pub bands: Vec<RadialBand>,
}

impl FieldStats {
    /// Compute statistics over `bands` equal-width rings from the axis to the
    /// outermost particle. An empty cloud yields zeroed stats with no bands.
    pub fn compute(cloud: &ParticleCloud, bands: usize) -> Self {
        if cloud.is_empty() {
            return Self {
                count: 0,
                min_radius: 0.0,
                max_radius: 0.0,
                mean_radius: 0.0,
                bands: Vec::new(),
            };
        }

        let radii: Vec<f32> = cloud.iter().map(|p| p.planar_radius()).collect();
        let min_radius = radii.iter().copied().fold(f32::INFINITY, f32::min);
        let max_radius = radii.iter().copied().fold(0.0, f32::max);
        let mean_radius = radii.iter().sum::<f32>() / radii.len() as f32;

        let bands = bands.max(1);
        let width = if max_radius > 0.0 { max_radius / bands as f32 } else { 1.0 };

        let mut counts = vec![0usize; bands];
        let mut heights = vec![0.0f32; bands];
        let mut luminance = vec![0.0f32; bands];
        for (p, r) in cloud.iter().zip(&radii) {
            let band = ((r / width) as usize).min(bands - 1);
            counts[band] += 1;
            heights[band] += p.position.y.abs();
            luminance[band] += p.luminance();
        }

        let bands = (0..bands)
            .map(|i| {
                let inner = i as f32 * width;
                let outer = inner + width;
                let count = counts[i];
                let area = PI * (outer * outer - inner * inner);
                let mean = |sum: f32| if count > 0 { sum / count as f32 } else { 0.0 };
                RadialBand {
                    inner,
                    outer,
                    count,
                    density: count as f32 / area,
                    mean_abs_height: mean(heights[i]),
                    mean_luminance: mean(luminance[i]),
                }
            })
            .collect();

        Self {
            count: cloud.len(),
            min_radius,
            max_radius,
            mean_radius,
            bands,
        }
    }
}
