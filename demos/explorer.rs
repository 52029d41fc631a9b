//! Galaxy and solar system explorer
//!
//! ```text
//! cargo run -p cosmic-demos --bin explorer -- --config config/explorer.toml
//! ```
//!
//! Controls:
//!   Left drag: orbit      Right drag: pan      Scroll: zoom
//!   Click the marker to visit the solar system, click a planet to hear it
//!   G: back to galaxy     S: solar system      R: reset camera
//!   Space: play/pause narration                Esc: quit

use anyhow::Result;
use clap::Parser;
use cosmic_visualization::{ExplorerApp, ExplorerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "explorer", about = "Explore the Milky Way and fly to our solar system")]
struct Args {
    /// TOML configuration file; defaults are used when it does not exist
    #[arg(long, default_value = "config/explorer.toml")]
    config: PathBuf,

    /// Seed for every procedural particle field
    #[arg(long)]
    seed: Option<u64>,

    /// Multiplier on the galaxy particle counts
    #[arg(long)]
    particle_scale: Option<f32>,
}

fn main() -> Result<()> {
    let default = "info,wgpu_hal=off,wgpu_core=off,naga=off";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let args = Args::parse();
    let mut config = ExplorerConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(scale) = args.particle_scale {
        anyhow::ensure!(scale.is_finite() && scale >= 0.0, "--particle-scale must be non-negative");
        config.particle_scale = scale;
    }

    ExplorerApp::new(config).run()
}
