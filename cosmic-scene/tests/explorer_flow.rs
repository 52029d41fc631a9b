//! End-to-end interaction: pick things in a built universe and drive the
//! explorer state through a full galaxy -> solar -> galaxy visit.

use cosmic_core::{Point3f, Ray, Vector3f};
use cosmic_galaxy::{GalaxyFieldParams, StarShellParams};
use cosmic_scene::*;

fn universe() -> Universe {
    let params = UniverseParams {
        galaxy: GalaxyFieldParams::default().scaled(0.001),
        background: vec![StarShellParams { count: 20, ..StarShellParams::near() }],
        solar_stars: StarShellParams { count: 20, ..StarShellParams::solar() },
    };
    Universe::build(&params, 42).unwrap()
}

/// Ray pointing straight down at a node from above
fn ray_onto(universe: &Universe, node: NodeId) -> Ray {
    let target = universe.graph.world_transform(node).origin();
    Ray::new(target + Vector3f::new(0.0, 50.0, 0.0), Vector3f::new(0.0, -1.0, 0.0))
}

#[test]
fn test_marker_pick_leads_to_solar_view() {
    let mut universe = universe();
    let mut state = ExplorerState::new();

    let hit = pick(&universe.graph, &ray_onto(&universe, universe.galaxy.marker_sphere)).unwrap();
    assert_eq!(hit.target, PickTarget::SolarSystemMarker);

    let events = state.click(hit.target);
    assert_eq!(events, vec![ExplorerEvent::ViewChanged(View::Solar)]);
    state.sync_scene(&mut universe);

    assert_eq!(universe.view(), View::Solar);
    assert!(!universe.graph.is_visible_in_world(universe.galaxy.marker_sphere));
    // The marker can no longer be picked once hidden
    let ray = Ray::new(Point3f::new(42.0, 50.0, 22.0), Vector3f::new(0.0, -1.0, 0.0));
    assert_ne!(pick(&universe.graph, &ray).map(|h| h.target), Some(PickTarget::SolarSystemMarker));
}

#[test]
fn test_planet_hover_and_selection_reach_the_graph() {
    let mut universe = universe();
    let mut state = ExplorerState::new();
    state.zoom_to_solar();
    state.sync_scene(&mut universe);

    let saturn = *universe.solar.planet("Saturn").unwrap();
    let hit = pick(&universe.graph, &ray_onto(&universe, saturn.body)).unwrap();
    assert_eq!(hit.target, PickTarget::Planet("Saturn"));

    state.hover(Some(hit.target));
    state.sync_scene(&mut universe);
    assert_eq!(universe.graph.node(saturn.body).transform.scale.x, explorer::HOVER_SCALE);
    assert!(universe.graph.node(saturn.label).visible);

    assert_eq!(state.click(hit.target), vec![ExplorerEvent::SelectionChanged(Some("Saturn"))]);
    state.hover(None);
    state.sync_scene(&mut universe);
    assert_eq!(universe.graph.node(saturn.body).transform.scale.x, 1.0);
    // Still labelled because it was clicked
    assert!(universe.graph.node(saturn.label).visible);

    let events = state.back_to_galaxy();
    assert!(events.contains(&ExplorerEvent::SelectionChanged(None)));
    state.sync_scene(&mut universe);
    assert!(!universe.graph.is_visible_in_world(saturn.body));
}

#[test]
fn test_paused_solar_system_stands_still() {
    let mut universe = universe();
    let mut state = ExplorerState::new();
    state.zoom_to_solar();
    state.toggle_playback();
    state.sync_scene(&mut universe);

    let earth = universe.solar.planet("Earth").unwrap().body;
    let before = universe.graph.world_transform(earth).origin();
    universe.graph.advance(2.0, 2.0, state.is_playing());
    assert_eq!(universe.graph.world_transform(earth).origin(), before);

    // The galaxy keeps turning regardless
    let galaxy_rotation = universe.graph.node(universe.galaxy.root).transform.rotation.y;
    assert!(galaxy_rotation > 0.0);
}
