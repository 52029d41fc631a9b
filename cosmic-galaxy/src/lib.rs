//! # Cosmic Galaxy
//!
//! Procedural particle fields for the galaxy explorer.
//!
//! Every generator takes a parameter struct and a `u64` seed and returns a
//! [`ParticleCloud`](cosmic_core::ParticleCloud). Output is deterministic for
//! a given (parameters, seed) pair regardless of how many threads rayon uses.
//!
//! ```rust
//! use cosmic_galaxy::{generate_spiral_galaxy, SpiralParams, FieldStats};
//!
//! fn main() -> cosmic_core::Result<()> {
//!     let params = SpiralParams { count: 10_000, ..SpiralParams::default() };
//!     let arms = generate_spiral_galaxy(&params, 42)?;
//!     let stats = FieldStats::compute(&arms, 10);
//!     println!("{} particles, mean radius {:.1}", stats.count, stats.mean_radius);
//!     Ok(())
//! }
//! ```

pub mod params;
pub mod spiral;
pub mod halo;
pub mod starfield;
pub mod field;
pub mod stats;
mod chunked;

pub use params::*;
pub use spiral::generate_spiral_galaxy;
pub use halo::{generate_glow_halo, generate_dust_lane};
pub use starfield::generate_star_shell;
pub use field::GalaxyField;
pub use stats::{FieldStats, RadialBand};
