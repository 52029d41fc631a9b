//! A full visit driven through the session the way the window would drive it

use cosmic_galaxy::StarShellParams;
use cosmic_narration::{Narrator, PlaybackState, SilentSynthesizer, VoicePreferences};
use cosmic_scene::{NodeId, Universe, View};
use cosmic_visualization::{ExplorerConfig, OverlayAction, Session};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;

fn session() -> Session<SilentSynthesizer> {
    let mut config = ExplorerConfig {
        particle_scale: 0.001,
        ..ExplorerConfig::default()
    };
    config.universe.background = vec![StarShellParams { count: 20, ..StarShellParams::near() }];
    config.universe.solar_stars = StarShellParams { count: 20, ..StarShellParams::solar() };

    let universe = Universe::build(&config.universe_params(), config.seed).unwrap();
    let narrator = Narrator::new(SilentSynthesizer::default(), VoicePreferences::default());
    Session::new(&config, universe, narrator, WIDTH / HEIGHT)
}

fn screen_pos(session: &Session<SilentSynthesizer>, node: NodeId) -> [f32; 2] {
    let world = session.universe.graph.world_transform(node).origin();
    session.camera.project(&world, WIDTH, HEIGHT).expect("node on screen")
}

fn enter_solar(session: &mut Session<SilentSynthesizer>) {
    let [x, y] = screen_pos(session, session.universe.galaxy.marker_sphere);
    session.click_at(x, y, WIDTH, HEIGHT);
    assert_eq!(session.view(), View::Solar);
    // Let the camera flight finish
    session.update(2.0);
    assert!(!session.is_flying());
}

#[test]
fn test_clicking_the_marker_flies_to_the_solar_system() {
    let mut s = session();
    assert_eq!(s.take_lights().map(|l| l.len()), Some(3));
    assert!(s.take_lights().is_none());

    enter_solar(&mut s);
    assert_eq!(s.take_lights().map(|l| l.len()), Some(7));
    assert!((s.camera.distance() - 76.16).abs() < 0.1);
    assert_eq!(s.background(), cosmic_core::Rgb::from_rgb24(0x111111));
}

#[test]
fn test_clicking_a_planet_starts_narration() {
    let mut s = session();
    enter_solar(&mut s);

    let earth = s.universe.solar.planet("Earth").unwrap().body;
    let [x, y] = screen_pos(&s, earth);
    assert_eq!(s.hover_at(x, y, WIDTH, HEIGHT), Some(cosmic_scene::PickTarget::Planet("Earth")));
    s.click_at(x, y, WIDTH, HEIGHT);

    assert_eq!(s.explorer.selected_planet(), Some("Earth"));
    assert_eq!(s.narrator.state(), PlaybackState::Pending);
    s.update(0.016);
    assert_eq!(s.narrator.state(), PlaybackState::Speaking);

    let panel = s.overlay_model().narration.unwrap();
    assert_eq!(panel.planet, "Earth");
    assert!(panel.playing);

    s.handle_action(OverlayAction::ToggleNarration);
    assert_eq!(s.narrator.state(), PlaybackState::Paused);
}

#[test]
fn test_back_to_galaxy_stops_narration() {
    let mut s = session();
    enter_solar(&mut s);
    let mars = s.universe.solar.planet("Mars").unwrap().body;
    let [x, y] = screen_pos(&s, mars);
    s.click_at(x, y, WIDTH, HEIGHT);
    assert!(s.narrator.is_playing());

    s.handle_action(OverlayAction::BackToGalaxy);
    assert_eq!(s.view(), View::Galaxy);
    assert_eq!(s.narrator.state(), PlaybackState::Idle);
    assert!(s.overlay_model().narration.is_none());
    assert_eq!(s.take_lights().map(|l| l.len()), Some(3));
}

#[test]
fn test_hidden_controls_freeze_the_camera() {
    let mut s = session();
    enter_solar(&mut s);
    s.handle_action(OverlayAction::ToggleCameraControls);
    assert!(!s.overlay_model().controls_visible);

    let before = s.camera.eye();
    s.drag(200.0, 50.0, false);
    s.scroll(5.0);
    s.update(1.0);
    assert_eq!(s.camera.eye(), before);
}

#[test]
fn test_paused_solar_system_stands_still() {
    let mut s = session();
    enter_solar(&mut s);
    s.handle_action(OverlayAction::TogglePlayback);

    let orbit = s.universe.solar.planet("Jupiter").unwrap().orbit;
    let before = s.universe.graph.node(orbit).transform.rotation;
    s.update(1.0);
    assert_eq!(s.universe.graph.node(orbit).transform.rotation, before);
}
