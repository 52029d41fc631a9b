//! Interaction model of the explorer
//!
//! [`ExplorerState`] owns which view is shown, which planet is selected and
//! the solar system's local controls. Every operation returns the list of
//! [`ExplorerEvent`]s it caused so the app can react (fly the camera, start
//! narration) without diffing state itself.

use crate::picking::PickTarget;
use crate::universe::Universe;
use cosmic_core::Vector3f;
use std::collections::BTreeSet;

/// Scale of a planet under the pointer
pub const HOVER_SCALE: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Galaxy,
    Solar,
}

/// Controls local to the solar system view. Reset on every visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolarState {
    /// Orbits and spins advance only while playing
    pub playing: bool,
    /// Camera controls are enabled while visible
    pub controls_visible: bool,
    pub hovered: Option<&'static str>,
    /// Planets whose name label was toggled on by a click
    pub labelled: BTreeSet<&'static str>,
}

impl Default for SolarState {
    fn default() -> Self {
        Self {
            playing: true,
            controls_visible: true,
            hovered: None,
            labelled: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerEvent {
    ViewChanged(View),
    SelectionChanged(Option<&'static str>),
    HoverChanged(Option<&'static str>),
    PlaybackChanged(bool),
    ControlsChanged(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerState {
    view: View,
    selected_planet: Option<&'static str>,
    solar: SolarState,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_planet(&self) -> Option<&'static str> {
        self.selected_planet
    }

    pub fn solar(&self) -> &SolarState {
        &self.solar
    }

    /// Whether gated animation should advance this frame
    pub fn is_playing(&self) -> bool {
        self.solar.playing
    }

    /// Whether pointer drags and wheel should move the camera
    pub fn camera_controls_enabled(&self) -> bool {
        self.view == View::Galaxy || self.solar.controls_visible
    }

    pub fn zoom_to_solar(&mut self) -> Vec<ExplorerEvent> {
        if self.view == View::Solar {
            return Vec::new();
        }
        self.view = View::Solar;
        self.solar = SolarState::default();
        log::info!("entering solar system view");
        vec![ExplorerEvent::ViewChanged(View::Solar)]
    }

    pub fn back_to_galaxy(&mut self) -> Vec<ExplorerEvent> {
        if self.view == View::Galaxy {
            return Vec::new();
        }
        self.view = View::Galaxy;
        log::info!("returning to galaxy view");

        let mut events = vec![ExplorerEvent::ViewChanged(View::Galaxy)];
        if self.selected_planet.take().is_some() {
            events.push(ExplorerEvent::SelectionChanged(None));
        }
        events
    }

    /// React to a click on a pickable node. Targets from the other view are ignored.
    pub fn click(&mut self, target: PickTarget) -> Vec<ExplorerEvent> {
        match (self.view, target) {
            (View::Galaxy, PickTarget::SolarSystemMarker) => self.zoom_to_solar(),
            (View::Solar, PickTarget::Planet(name)) => {
                if !self.solar.labelled.remove(name) {
                    self.solar.labelled.insert(name);
                }
                if self.selected_planet == Some(name) {
                    return Vec::new();
                }
                log::debug!("selected planet {}", name);
                self.selected_planet = Some(name);
                vec![ExplorerEvent::SelectionChanged(Some(name))]
            }
            _ => Vec::new(),
        }
    }

    /// Update the planet under the pointer. Only planets in the solar view count.
    pub fn hover(&mut self, target: Option<PickTarget>) -> Vec<ExplorerEvent> {
        if self.view != View::Solar {
            return Vec::new();
        }
        let hovered = match target {
            Some(PickTarget::Planet(name)) => Some(name),
            _ => None,
        };
        if hovered == self.solar.hovered {
            return Vec::new();
        }
        self.solar.hovered = hovered;
        vec![ExplorerEvent::HoverChanged(hovered)]
    }

    pub fn toggle_playback(&mut self) -> Vec<ExplorerEvent> {
        if self.view != View::Solar {
            return Vec::new();
        }
        self.solar.playing = !self.solar.playing;
        vec![ExplorerEvent::PlaybackChanged(self.solar.playing)]
    }

    pub fn toggle_camera_controls(&mut self) -> Vec<ExplorerEvent> {
        if self.view != View::Solar {
            return Vec::new();
        }
        self.solar.controls_visible = !self.solar.controls_visible;
        vec![ExplorerEvent::ControlsChanged(self.solar.controls_visible)]
    }

    /// Push view visibility, hover scale and label visibility into the graph
    pub fn sync_scene(&self, universe: &mut Universe) {
        if universe.view() != self.view {
            universe.set_view(self.view);
        }

        let planets = universe.solar.planets.clone();
        for nodes in planets {
            let name = nodes.planet.name;
            let hovered = self.solar.hovered == Some(name);
            let scale = if hovered { HOVER_SCALE } else { 1.0 };

            universe.graph.node_mut(nodes.body).transform.scale = Vector3f::new(scale, scale, scale);
            universe
                .graph
                .set_visible(nodes.label, hovered || self.solar.labelled.contains(name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_click_enters_solar() {
        let mut state = ExplorerState::new();
        assert_eq!(state.click(PickTarget::SolarSystemMarker), vec![ExplorerEvent::ViewChanged(View::Solar)]);
        assert_eq!(state.view(), View::Solar);
        // Marker is not part of the solar view
        assert!(state.click(PickTarget::SolarSystemMarker).is_empty());
    }

    #[test]
    fn test_planet_clicks_ignored_in_galaxy() {
        let mut state = ExplorerState::new();
        assert!(state.click(PickTarget::Planet("Earth")).is_empty());
        assert!(state.hover(Some(PickTarget::Planet("Earth"))).is_empty());
        assert_eq!(state.selected_planet(), None);
    }

    #[test]
    fn test_reclicking_selected_planet_toggles_label_only() {
        let mut state = ExplorerState::new();
        state.zoom_to_solar();

        assert_eq!(
            state.click(PickTarget::Planet("Mars")),
            vec![ExplorerEvent::SelectionChanged(Some("Mars"))]
        );
        assert!(state.solar().labelled.contains("Mars"));

        assert!(state.click(PickTarget::Planet("Mars")).is_empty());
        assert!(!state.solar().labelled.contains("Mars"));
        assert_eq!(state.selected_planet(), Some("Mars"));
    }

    #[test]
    fn test_back_to_galaxy_clears_selection() {
        let mut state = ExplorerState::new();
        state.zoom_to_solar();
        state.click(PickTarget::Planet("Venus"));

        assert_eq!(
            state.back_to_galaxy(),
            vec![ExplorerEvent::ViewChanged(View::Galaxy), ExplorerEvent::SelectionChanged(None)]
        );
        assert_eq!(state.selected_planet(), None);
        assert!(state.back_to_galaxy().is_empty());
    }

    #[test]
    fn test_solar_state_resets_on_each_visit() {
        let mut state = ExplorerState::new();
        state.zoom_to_solar();
        state.toggle_playback();
        state.toggle_camera_controls();
        state.click(PickTarget::Planet("Earth"));
        assert!(!state.is_playing());
        assert!(!state.camera_controls_enabled());

        state.back_to_galaxy();
        state.zoom_to_solar();
        assert_eq!(state.solar(), &SolarState::default());
        assert!(state.camera_controls_enabled());
    }

    #[test]
    fn test_solar_toggles_are_noops_in_galaxy() {
        let mut state = ExplorerState::new();
        assert!(state.toggle_playback().is_empty());
        assert!(state.toggle_camera_controls().is_empty());
        assert!(state.is_playing());
        assert!(state.camera_controls_enabled());
    }

    #[test]
    fn test_hover_reports_only_changes() {
        let mut state = ExplorerState::new();
        state.zoom_to_solar();
        assert_eq!(
            state.hover(Some(PickTarget::Planet("Jupiter"))),
            vec![ExplorerEvent::HoverChanged(Some("Jupiter"))]
        );
        assert!(state.hover(Some(PickTarget::Planet("Jupiter"))).is_empty());
        assert_eq!(state.hover(None), vec![ExplorerEvent::HoverChanged(None)]);
    }
}
