//! egui overlay: page header, view controls, narration panel and the 3D
//! text labels projected onto the screen

use crate::camera::OrbitCamera;
use cosmic_core::Rgb;
use cosmic_scene::{NodeKind, SceneGraph, View};
use egui::{Align2, Color32, FontId, RichText};

const PANEL_MARGIN: f32 = 16.0;

/// Pixel size range for projected labels
const MIN_LABEL_PX: f32 = 9.0;
const MAX_LABEL_PX: f32 = 64.0;

/// Something the user asked for through the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    ZoomToSolar,
    BackToGalaxy,
    TogglePlayback,
    ToggleCameraControls,
    ToggleNarration,
    ToggleNarrationText,
}

/// Narration panel contents; present only while a planet is selected
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationPanel {
    pub planet: String,
    pub script: Option<&'static str>,
    pub playing: bool,
    pub show_text: bool,
}

/// Snapshot of the state the overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModel {
    pub view: View,
    pub playing: bool,
    pub controls_visible: bool,
    pub narration: Option<NarrationPanel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLabel {
    pub text: String,
    pub position: [f32; 2],
    pub size_px: f32,
    pub color: Rgb,
    pub outline: Option<Rgb>,
}

/// Project every visible label node onto a `width`×`height` screen.
///
/// World font sizes become pixel sizes by perspective, so labels shrink with
/// distance like the 3D text they stand for.
pub fn project_labels(graph: &SceneGraph, camera: &OrbitCamera, width: f32, height: f32) -> Vec<ScreenLabel> {
    let eye = camera.eye();
    let pixels_per_unit_at_one = height / (2.0 * (camera.fov_y * 0.5).tan());

    graph
        .walk_visible()
        .into_iter()
        .filter_map(|(id, world)| {
            let NodeKind::Label(label) = &graph.node(id).kind else {
                return None;
            };
            let anchor = world.origin();
            let position = camera.project(&anchor, width, height)?;
            let depth = (anchor - eye).norm().max(camera.near);
            let size_px = (label.font_size * pixels_per_unit_at_one / depth).clamp(MIN_LABEL_PX, MAX_LABEL_PX);
            Some(ScreenLabel {
                text: label.text.clone(),
                position,
                size_px,
                color: label.color,
                outline: label.outline,
            })
        })
        .collect()
}

pub fn color32(c: Rgb) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(c.r), channel(c.g), channel(c.b))
}

fn panel_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(Color32::from_black_alpha(180))
        .rounding(8.0)
        .inner_margin(12.0)
}

/// Lay out the overlay for one frame and return the actions clicked.
///
/// `labels` are in physical pixels; `pixels_per_point` converts them to
/// egui points.
pub fn draw(ctx: &egui::Context, model: &OverlayModel, labels: &[ScreenLabel], pixels_per_point: f32) -> Vec<OverlayAction> {
    let mut actions = Vec::new();

    paint_labels(ctx, labels, pixels_per_point);

    egui::Area::new(egui::Id::new("page_header"))
        .anchor(Align2::CENTER_TOP, [0.0, PANEL_MARGIN])
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Cosmic Voyage Explorer").size(28.0).strong().color(Color32::WHITE));
                ui.label(
                    RichText::new("Journey from the Milky Way to our Solar System")
                        .size(13.0)
                        .color(Color32::LIGHT_GRAY),
                );
            });
        });

    egui::Area::new(egui::Id::new("view_controls"))
        .anchor(Align2::LEFT_TOP, [PANEL_MARGIN, PANEL_MARGIN])
        .show(ctx, |ui| {
            match model.view {
                View::Solar => {
                    if ui.button("← Back to Galaxy").clicked() {
                        actions.push(OverlayAction::BackToGalaxy);
                    }
                }
                View::Galaxy => {
                    if ui.button("🔭 Zoom to Solar System").clicked() {
                        actions.push(OverlayAction::ZoomToSolar);
                    }
                }
            }
            ui.add_space(8.0);
            panel_frame().show(ui, |ui| {
                ui.set_max_width(240.0);
                ui.label(RichText::new("⚡ Controls").strong().color(Color32::WHITE));
                for line in [
                    "Click and drag to rotate",
                    "Scroll to zoom in/out",
                    "Click planets for voice info",
                    "Click green marker to explore",
                ] {
                    ui.label(RichText::new(format!("• {}", line)).color(Color32::WHITE));
                }
            });

            if model.view == View::Solar {
                ui.add_space(8.0);
                panel_frame().show(ui, |ui| {
                    let playback = if model.playing { "⏸ Pause" } else { "▶ Play" };
                    if ui.button(playback).clicked() {
                        actions.push(OverlayAction::TogglePlayback);
                    }
                    let controls = if model.controls_visible { "Hide Controls" } else { "Show Controls" };
                    if ui.button(controls).clicked() {
                        actions.push(OverlayAction::ToggleCameraControls);
                    }
                });
            }
        });

    if let Some(panel) = &model.narration {
        egui::Area::new(egui::Id::new("narration"))
            .anchor(Align2::RIGHT_BOTTOM, [-PANEL_MARGIN, -PANEL_MARGIN])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let play = if panel.playing { "⏸ Pause narration" } else { "▶ Play narration" };
                    if ui.button(play).clicked() {
                        actions.push(OverlayAction::ToggleNarration);
                    }
                    let text = if panel.show_text { "Hide text" } else { "Show text" };
                    if ui.button(text).clicked() {
                        actions.push(OverlayAction::ToggleNarrationText);
                    }
                });
                if panel.show_text {
                    ui.add_space(8.0);
                    panel_frame().show(ui, |ui| {
                        ui.set_max_width(420.0);
                        ui.label(RichText::new(&panel.planet).size(18.0).strong().color(Color32::WHITE));
                        if let Some(script) = panel.script {
                            ui.label(RichText::new(script).size(13.0).color(Color32::WHITE));
                        }
                    });
                }
            });
    }

    actions
}

fn paint_labels(ctx: &egui::Context, labels: &[ScreenLabel], pixels_per_point: f32) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    for label in labels {
        let pos = egui::pos2(label.position[0], label.position[1]) / pixels_per_point;
        let font = FontId::proportional(label.size_px / pixels_per_point);

        if let Some(outline) = label.outline {
            let outline = color32(outline);
            for offset in [[-1.0, 0.0], [1.0, 0.0], [0.0, -1.0], [0.0, 1.0]] {
                painter.text(pos + egui::vec2(offset[0], offset[1]), Align2::CENTER_CENTER, &label.text, font.clone(), outline);
            }
        }
        painter.text(pos, Align2::CENTER_CENTER, &label.text, font, color32(label.color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPreset;
    use cosmic_scene::{Label, Node};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(CameraPreset::solar(), 60f32.to_radians(), 1.0)
    }

    fn run(model: &OverlayModel, labels: &[ScreenLabel]) -> (Vec<OverlayAction>, egui::FullOutput) {
        let ctx = egui::Context::default();
        let mut actions = Vec::new();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            actions = draw(ctx, model, labels, 1.0);
        });
        (actions, output)
    }

    #[test]
    fn test_visible_labels_are_projected() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.add(root, Node::label("near", Label::new("Earth", 1.0, Rgb::WHITE)).at(0.0, 0.0, 40.0));
        graph.add(root, Node::label("far", Label::new("Neptune", 1.0, Rgb::WHITE)));
        graph.add(root, Node::label("hidden", Label::new("Mars", 1.0, Rgb::WHITE)).hidden());

        let labels = project_labels(&graph, &camera(), 800.0, 800.0);
        assert_eq!(labels.len(), 2);
        let near = labels.iter().find(|l| l.text == "Earth").unwrap();
        let far = labels.iter().find(|l| l.text == "Neptune").unwrap();
        assert!(near.size_px > far.size_px);
    }

    #[test]
    fn test_label_behind_camera_is_dropped() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.add(root, Node::label("behind", Label::new("Sun", 1.0, Rgb::WHITE)).at(0.0, 60.0, 140.0));
        assert!(project_labels(&graph, &camera(), 800.0, 800.0).is_empty());
    }

    #[test]
    fn test_overlay_lays_out_without_input() {
        let model = OverlayModel {
            view: View::Solar,
            playing: true,
            controls_visible: true,
            narration: Some(NarrationPanel {
                planet: "Saturn".to_string(),
                script: cosmic_narration::narration_for("Saturn"),
                playing: true,
                show_text: true,
            }),
        };
        let label = ScreenLabel {
            text: "Saturn".to_string(),
            position: [100.0, 100.0],
            size_px: 14.0,
            color: Rgb::WHITE,
            outline: Some(Rgb::BLACK),
        };
        let (actions, output) = run(&model, &[label]);
        assert!(actions.is_empty());
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn test_color_conversion_clamps() {
        assert_eq!(color32(Rgb::new(2.0, 0.5, -1.0)), Color32::from_rgb(255, 128, 0));
    }
}
