//! Deterministic parallel generation in fixed-size chunks

use cosmic_core::Particle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Particles generated per RNG stream. Changing this changes every field.
pub(crate) const CHUNK_SIZE: usize = 16_384;

/// SplitMix64 finalizer, spreads (seed, chunk) pairs across the seed space
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub(crate) fn chunk_rng(seed: u64, chunk: usize) -> StdRng {
    StdRng::seed_from_u64(mix(seed ^ mix(chunk as u64)))
}

/// Generate `count` particles where particle `i` is produced by `f(i, rng)`.
///
/// Each chunk of [`CHUNK_SIZE`] indices owns its own RNG stream, so the
/// result only depends on `seed` and `count`.
pub(crate) fn generate_chunked<F>(count: usize, seed: u64, f: F) -> Vec<Particle>
where
    F: Fn(usize, &mut StdRng) -> Particle + Sync,
{
    let chunks = count.div_ceil(CHUNK_SIZE);

    let parts: Vec<Vec<Particle>> = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * CHUNK_SIZE;
            let end = (start + CHUNK_SIZE).min(count);
            let mut rng = chunk_rng(seed, chunk);
            (start..end).map(|i| f(i, &mut rng)).collect()
        })
        .collect();

    parts.concat()
}
