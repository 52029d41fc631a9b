//! Headless report on a generated galaxy: radial bands with particle
//! density, disk thickness and brightness
//!
//! ```text
//! cargo run -p cosmic-demos --bin galaxy_stats -- --layer arms --bands 8
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cosmic_core::ParticleCloud;
use cosmic_galaxy::{FieldStats, GalaxyField, GalaxyFieldParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layer {
    Arms,
    Glow,
    Dust,
    All,
}

#[derive(Parser, Debug)]
#[command(name = "galaxy_stats", about = "Print radial statistics of a generated galaxy")]
struct Args {
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of equal-width radial bands
    #[arg(long, default_value_t = 10)]
    bands: usize,

    #[arg(long, value_enum, default_value_t = Layer::All)]
    layer: Layer,

    /// Multiplier on the particle counts
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

fn report(name: &str, cloud: &ParticleCloud, bands: usize) {
    let stats = FieldStats::compute(cloud, bands);
    println!(
        "{}: {} particles, radius {:.2}..{:.2} (mean {:.2})",
        name, stats.count, stats.min_radius, stats.max_radius, stats.mean_radius
    );
    println!("  {:>8} {:>8} {:>8} {:>10} {:>8} {:>8}", "inner", "outer", "count", "density", "|y|", "lum");
    for band in &stats.bands {
        println!(
            "  {:>8.2} {:>8.2} {:>8} {:>10.4} {:>8.3} {:>8.3}",
            band.inner, band.outer, band.count, band.density, band.mean_abs_height, band.mean_luminance
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.scale.is_finite() && args.scale >= 0.0, "--scale must be non-negative");

    let params = GalaxyFieldParams::default().scaled(args.scale);
    let field = GalaxyField::generate(&params, args.seed)
        .with_context(|| format!("generate galaxy with seed {}", args.seed))?;
    log::info!("seed {}: {} particles in total", args.seed, field.total_len());

    let layers = [
        ("arms", Layer::Arms, &field.arms),
        ("glow", Layer::Glow, &field.glow),
        ("dust", Layer::Dust, &field.dust),
    ];
    for (name, layer, cloud) in layers {
        if args.layer == Layer::All || args.layer == layer {
            report(name, cloud, args.bands);
        }
    }
    Ok(())
}
