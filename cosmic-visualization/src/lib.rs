//! Interactive explorer front end
//!
//! Ties the scene, narration and GPU crates to a winit window:
//! - orbit camera with per-view presets and animated view changes
//! - TOML configuration with environment overrides
//! - egui overlay with view controls, narration panel and projected labels
//! - the event loop that drives all of it

pub mod camera;
pub mod config;
pub mod overlay;
pub mod session;
pub mod app;

pub use camera::{smoothstep, CameraFlight, CameraPreset, OrbitCamera};
pub use config::{BackgroundConfig, CameraConfig, ExplorerConfig, NarrationConfig, WindowConfig};
pub use overlay::{NarrationPanel, OverlayAction, OverlayModel, ScreenLabel};
pub use session::Session;
pub use app::{run_explorer, ExplorerApp};
