//! Window-independent explorer session: scene, interaction state, camera
//! and narration advanced together one frame at a time

use crate::camera::{CameraFlight, OrbitCamera};
use crate::config::{BackgroundConfig, CameraConfig, ExplorerConfig};
use crate::overlay::{NarrationPanel, OverlayAction, OverlayModel};
use cosmic_core::{Ray, Rgb};
use cosmic_narration::{Narrator, SpeechSynthesizer};
use cosmic_scene::{pick, ExplorerEvent, ExplorerState, Light, PickTarget, Universe, View};

/// Pointer travel, in pixels, below which a press and release count as a click
pub const CLICK_SLOP: f32 = 4.0;

pub struct Session<S: SpeechSynthesizer> {
    pub universe: Universe,
    pub explorer: ExplorerState,
    pub narrator: Narrator<S>,
    pub camera: OrbitCamera,
    flight: Option<CameraFlight>,
    camera_config: CameraConfig,
    background: BackgroundConfig,
    elapsed: f32,
    pending_lights: Option<Vec<Light>>,
}

impl<S: SpeechSynthesizer> Session<S> {
    pub fn new(config: &ExplorerConfig, universe: Universe, narrator: Narrator<S>, aspect_ratio: f32) -> Self {
        let camera = OrbitCamera::new(
            config.camera.galaxy.clone(),
            config.camera.fov_degrees.to_radians(),
            aspect_ratio,
        );
        let pending_lights = Some(Universe::lights(universe.view()));
        Self {
            universe,
            explorer: ExplorerState::new(),
            narrator,
            camera,
            flight: None,
            camera_config: config.camera.clone(),
            background: config.background.clone(),
            elapsed: 0.0,
            pending_lights,
        }
    }

    pub fn view(&self) -> View {
        self.explorer.view()
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn background(&self) -> Rgb {
        self.background.color(self.view())
    }

    /// Lights to upload, once after each view change
    pub fn take_lights(&mut self) -> Option<Vec<Light>> {
        self.pending_lights.take()
    }

    pub fn zoom_to_solar(&mut self) {
        let events = self.explorer.zoom_to_solar();
        self.apply(events);
    }

    pub fn back_to_galaxy(&mut self) {
        let events = self.explorer.back_to_galaxy();
        self.apply(events);
    }

    pub fn handle_action(&mut self, action: OverlayAction) {
        let events = match action {
            OverlayAction::ZoomToSolar => self.explorer.zoom_to_solar(),
            OverlayAction::BackToGalaxy => self.explorer.back_to_galaxy(),
            OverlayAction::TogglePlayback => self.explorer.toggle_playback(),
            OverlayAction::ToggleCameraControls => self.explorer.toggle_camera_controls(),
            OverlayAction::ToggleNarration => {
                self.narrator.toggle_play_pause();
                Vec::new()
            }
            OverlayAction::ToggleNarrationText => {
                self.narrator.toggle_text();
                Vec::new()
            }
        };
        self.apply(events);
    }

    fn ray_at(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        self.camera.screen_ray(x, y, width, height)
    }

    /// Pickable target under pixel (`x`, `y`)
    pub fn target_at(&self, x: f32, y: f32, width: f32, height: f32) -> Option<PickTarget> {
        pick(&self.universe.graph, &self.ray_at(x, y, width, height)).map(|hit| hit.target)
    }

    pub fn click_at(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(target) = self.target_at(x, y, width, height) {
            log::debug!("clicked {:?}", target);
            let events = self.explorer.click(target);
            self.apply(events);
        }
    }

    /// Update hover from the pointer position and return what is under it
    pub fn hover_at(&mut self, x: f32, y: f32, width: f32, height: f32) -> Option<PickTarget> {
        let target = self.target_at(x, y, width, height);
        let events = self.explorer.hover(target);
        self.apply(events);
        target
    }

    /// Pointer left the window
    pub fn clear_hover(&mut self) {
        let events = self.explorer.hover(None);
        self.apply(events);
    }

    /// Mouse drag in pixels: orbit with the primary button, pan otherwise
    pub fn drag(&mut self, dx: f32, dy: f32, pan: bool) {
        if !self.explorer.camera_controls_enabled() {
            return;
        }
        self.flight = None;
        if pan {
            self.camera.pan(dx, dy);
        } else {
            self.camera.orbit(dx, dy);
        }
    }

    pub fn scroll(&mut self, steps: f32) {
        if !self.explorer.camera_controls_enabled() {
            return;
        }
        self.flight = None;
        self.camera.zoom(steps);
    }

    pub fn reset_camera(&mut self) {
        self.flight = None;
        self.camera.reset();
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.camera.aspect_ratio = aspect_ratio;
    }

    /// Advance animation, camera and narration by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;

        if let Some(flight) = &mut self.flight {
            let (eye, target) = flight.advance(dt);
            let finished = flight.is_finished();
            self.camera.look_at(eye, target);
            if finished {
                self.flight = None;
            }
        } else {
            self.camera.update(dt);
        }

        self.explorer.sync_scene(&mut self.universe);
        self.universe
            .graph
            .advance(dt, self.elapsed, self.explorer.is_playing());
        self.narrator.update(dt);
    }

    pub fn overlay_model(&self) -> OverlayModel {
        let solar = self.explorer.solar();
        OverlayModel {
            view: self.view(),
            playing: solar.playing,
            controls_visible: solar.controls_visible,
            narration: self.explorer.selected_planet().map(|planet| NarrationPanel {
                planet: planet.to_string(),
                script: self.narrator.script(),
                playing: self.narrator.is_playing(),
                show_text: self.narrator.show_text(),
            }),
        }
    }

    fn apply(&mut self, events: Vec<ExplorerEvent>) {
        for event in events {
            match event {
                ExplorerEvent::ViewChanged(view) => self.enter_view(view),
                ExplorerEvent::SelectionChanged(planet) => self.narrator.select_planet(planet),
                ExplorerEvent::PlaybackChanged(playing) => log::debug!("solar playback: {}", playing),
                ExplorerEvent::ControlsChanged(visible) => log::debug!("solar camera controls: {}", visible),
                ExplorerEvent::HoverChanged(_) => {}
            }
        }
    }

    fn enter_view(&mut self, view: View) {
        self.pending_lights = Some(self.universe.set_view(view));

        let preset = self.camera_config.preset(view).clone();
        let from = (self.camera.eye(), self.camera.target);
        let to = (preset.eye_point(), preset.target_point());
        self.camera.set_preset(preset);
        self.flight = Some(CameraFlight::new(from, to, self.camera_config.flight_seconds));
        log::info!("view changed to {:?}", view);
    }
}
