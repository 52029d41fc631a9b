//! The complete scene: background stars, galaxy and solar system under one root

use crate::background::build_background;
use crate::explorer::View;
use crate::galaxy::{build_galaxy, galaxy_lights, GalaxyNodes};
use crate::graph::{NodeId, SceneGraph};
use crate::material::Light;
use crate::solar::{build_solar_system, solar_lights, SolarNodes, SOLAR_BACKGROUND};
use cosmic_core::{Result, Rgb};
use cosmic_galaxy::{GalaxyField, GalaxyFieldParams, StarShellParams};
use serde::{Deserialize, Serialize};

/// Everything needed to generate the particle layers of a universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseParams {
    pub galaxy: GalaxyFieldParams,
    /// Parallax star shells, visible in both views
    pub background: Vec<StarShellParams>,
    pub solar_stars: StarShellParams,
}

impl Default for UniverseParams {
    fn default() -> Self {
        Self {
            galaxy: GalaxyFieldParams::default(),
            background: vec![StarShellParams::near(), StarShellParams::far()],
            solar_stars: StarShellParams::solar(),
        }
    }
}

/// Built scene plus handles to its major subtrees
#[derive(Debug, Clone)]
pub struct Universe {
    pub graph: SceneGraph,
    pub background: NodeId,
    pub galaxy: GalaxyNodes,
    pub solar: SolarNodes,
    view: View,
}

impl Universe {
    /// Generate every particle layer and assemble the graph.
    ///
    /// The galaxy is generated once here and kept for the lifetime of the
    /// universe; switching views only toggles visibility. Starts in the
    /// galaxy view.
    pub fn build(params: &UniverseParams, seed: u64) -> Result<Self> {
        let start = instant::Instant::now();
        let field = GalaxyField::generate(&params.galaxy, seed)?;

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let background = build_background(&mut graph, root, &params.background, seed.wrapping_add(0x7374_6172))?;
        let galaxy = build_galaxy(&mut graph, root, field)?;
        let solar = build_solar_system(&mut graph, root, &params.solar_stars, seed.wrapping_add(0x736f_6c))?;

        let mut universe = Self {
            graph,
            background,
            galaxy,
            solar,
            view: View::Galaxy,
        };
        universe.set_view(View::Galaxy);

        log::info!(
            "universe built: {} nodes, {} meshes, {} particle layers in {:?}",
            universe.graph.len(),
            universe.graph.meshes().len(),
            universe.graph.clouds().len(),
            start.elapsed()
        );
        Ok(universe)
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Show the subtree of `view`, hide the other, and return the lights
    pub fn set_view(&mut self, view: View) -> Vec<Light> {
        self.view = view;
        self.graph.set_visible(self.galaxy.root, view == View::Galaxy);
        self.graph.set_visible(self.solar.root, view == View::Solar);
        Self::lights(view)
    }

    /// Lights of a view. The solar view keeps the galaxy lights and adds its own.
    pub fn lights(view: View) -> Vec<Light> {
        let mut lights = galaxy_lights();
        if view == View::Solar {
            lights.extend(solar_lights());
        }
        lights
    }

    pub fn background_color(view: View) -> Rgb {
        match view {
            View::Galaxy => Rgb::BLACK,
            View::Solar => Rgb::from_rgb24(SOLAR_BACKGROUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> UniverseParams {
        UniverseParams {
            galaxy: GalaxyFieldParams::default().scaled(0.001),
            background: vec![StarShellParams { count: 50, ..StarShellParams::near() }],
            solar_stars: StarShellParams { count: 50, ..StarShellParams::solar() },
        }
    }

    #[test]
    fn test_starts_in_galaxy_view() {
        let universe = Universe::build(&tiny(), 1).unwrap();
        assert_eq!(universe.view(), View::Galaxy);
        assert!(universe.graph.is_visible_in_world(universe.galaxy.marker_sphere));
        assert!(!universe.graph.is_visible_in_world(universe.solar.sun));
        assert!(universe.graph.is_visible_in_world(universe.background));
    }

    #[test]
    fn test_set_view_toggles_subtrees_and_lights() {
        let mut universe = Universe::build(&tiny(), 1).unwrap();
        let lights = universe.set_view(View::Solar);
        assert_eq!(lights.len(), 7);
        assert!(universe.graph.is_visible_in_world(universe.solar.sun));
        assert!(!universe.graph.is_visible_in_world(universe.galaxy.core));
        assert!(universe.graph.is_visible_in_world(universe.background));

        assert_eq!(universe.set_view(View::Galaxy).len(), 3);
        assert!(!universe.graph.is_visible_in_world(universe.solar.sun));
    }

    #[test]
    fn test_background_color_per_view() {
        assert_eq!(Universe::background_color(View::Galaxy), Rgb::BLACK);
        assert_eq!(Universe::background_color(View::Solar), Rgb::from_rgb24(0x111111));
    }
}
