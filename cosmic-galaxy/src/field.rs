//! The three galaxy layers generated together

use crate::halo::{generate_dust_lane, generate_glow_halo};
use crate::params::GalaxyFieldParams;
use crate::spiral::generate_spiral_galaxy;
use cosmic_core::{ParticleCloud, Result};

/// Spiral arms, halo glow and dust lane of one galaxy
#[derive(Debug, Clone, Default)]
pub struct GalaxyField {
    pub arms: ParticleCloud,
    pub glow: ParticleCloud,
    pub dust: ParticleCloud,
}

impl GalaxyField {
    /// Generate all layers. Each layer gets its own stream derived from `seed`.
    pub fn generate(params: &GalaxyFieldParams, seed: u64) -> Result<Self> {
        let start = instant::Instant::now();

        let (arms, (glow, dust)) = rayon::join(
            || generate_spiral_galaxy(&params.spiral, seed),
            || {
                rayon::join(
                    || generate_glow_halo(&params.glow, seed.wrapping_add(0x676c_6f77)),
                    || generate_dust_lane(&params.dust, seed.wrapping_add(0x6475_7374)),
                )
            },
        );

        let field = Self {
            arms: arms?,
            glow: glow?,
            dust: dust?,
        };

        log::info!(
            "galaxy field ready: {} arm, {} glow, {} dust particles in {:?}",
            field.arms.len(),
            field.glow.len(),
            field.dust.len(),
            start.elapsed()
        );
        Ok(field)
    }

    pub fn total_len(&self) -> usize {
        self.arms.len() + self.glow.len() + self.dust.len()
    }
}
