//! Explorer configuration loaded from `config/explorer.toml`

use crate::camera::CameraPreset;
use anyhow::{Context, Result};
use cosmic_core::Rgb;
use cosmic_narration::VoicePreferences;
use cosmic_scene::{Universe, UniverseParams, View};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cosmic Voyage Explorer".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    /// Length of the camera move when switching views
    pub flight_seconds: f32,
    #[serde(deserialize_with = "galaxy_preset")]
    pub galaxy: CameraPreset,
    #[serde(deserialize_with = "solar_preset")]
    pub solar: CameraPreset,
}

/// A camera preset table where every key is optional. Missing keys keep the
/// value of the view's own built-in preset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PresetPatch {
    eye: Option<[f32; 3]>,
    target: Option<[f32; 3]>,
    min_distance: Option<f32>,
    max_distance: Option<f32>,
    damping: Option<f32>,
    rotate_speed: Option<f32>,
    zoom_speed: Option<f32>,
    pan_speed: Option<f32>,
}

impl PresetPatch {
    fn apply(self, base: CameraPreset) -> CameraPreset {
        CameraPreset {
            eye: self.eye.unwrap_or(base.eye),
            target: self.target.unwrap_or(base.target),
            min_distance: self.min_distance.unwrap_or(base.min_distance),
            max_distance: self.max_distance.unwrap_or(base.max_distance),
            damping: self.damping.unwrap_or(base.damping),
            rotate_speed: self.rotate_speed.unwrap_or(base.rotate_speed),
            zoom_speed: self.zoom_speed.unwrap_or(base.zoom_speed),
            pan_speed: self.pan_speed.unwrap_or(base.pan_speed),
        }
    }
}

fn galaxy_preset<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<CameraPreset, D::Error> {
    PresetPatch::deserialize(deserializer).map(|patch| patch.apply(CameraPreset::galaxy()))
}

fn solar_preset<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<CameraPreset, D::Error> {
    PresetPatch::deserialize(deserializer).map(|patch| patch.apply(CameraPreset::solar()))
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            flight_seconds: 1.5,
            galaxy: CameraPreset::galaxy(),
            solar: CameraPreset::solar(),
        }
    }
}

impl CameraConfig {
    pub fn preset(&self, view: View) -> &CameraPreset {
        match view {
            View::Galaxy => &self.galaxy,
            View::Solar => &self.solar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub voice: VoicePreferences,
    pub words_per_minute: f32,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            voice: VoicePreferences::default(),
            words_per_minute: cosmic_narration::silent::DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub galaxy: Rgb,
    pub solar: Rgb,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            galaxy: Universe::background_color(View::Galaxy),
            solar: Universe::background_color(View::Solar),
        }
    }
}

impl BackgroundConfig {
    pub fn color(&self, view: View) -> Rgb {
        match view {
            View::Galaxy => self.galaxy,
            View::Solar => self.solar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub window: WindowConfig,
    pub seed: u64,
    /// Multiplies every galaxy layer's particle count
    pub particle_scale: f32,
    /// Directory textures are resolved against
    pub asset_root: PathBuf,
    pub universe: UniverseParams,
    pub narration: NarrationConfig,
    pub camera: CameraConfig,
    pub background: BackgroundConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            seed: 42,
            particle_scale: 1.0,
            asset_root: PathBuf::from("assets"),
            universe: UniverseParams::default(),
            narration: NarrationConfig::default(),
            camera: CameraConfig::default(),
            background: BackgroundConfig::default(),
        }
    }
}

impl ExplorerConfig {
    /// Read `path` when it exists (defaults otherwise), then apply the
    /// `COSMIC_*` environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let mut cfg = if path.is_file() {
            let txt = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            Self::from_toml_str(&txt).with_context(|| format!("parse {}", path.display()))?
        } else {
            log::info!("{} not found, using default configuration", path.display());
            Self::default()
        };
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_toml_str(txt: &str) -> Result<Self> {
        toml::from_str::<Self>(txt).context("parse explorer TOML")
    }

    /// Override fields from `COSMIC_SEED`, `COSMIC_PARTICLE_SCALE` and
    /// `COSMIC_VOICE`. Unparsable values are logged and ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(s) = var("COSMIC_SEED") {
            match s.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(_) => log::warn!("ignoring COSMIC_SEED={:?}: not an integer", s),
            }
        }
        if let Some(s) = var("COSMIC_PARTICLE_SCALE") {
            match s.trim().parse::<f32>() {
                Ok(scale) if scale.is_finite() && scale >= 0.0 => self.particle_scale = scale,
                _ => log::warn!("ignoring COSMIC_PARTICLE_SCALE={:?}: not a non-negative number", s),
            }
        }
        if let Some(name) = var("COSMIC_VOICE") {
            if !name.is_empty() {
                self.narration.voice.preferred_name = name;
            }
        }
    }

    /// Universe parameters with the particle scale applied
    pub fn universe_params(&self) -> UniverseParams {
        let mut params = self.universe.clone();
        params.galaxy = params.galaxy.scaled(self.particle_scale);
        params
    }
}
