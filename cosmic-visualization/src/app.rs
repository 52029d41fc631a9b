//! Window, event loop and per-frame rendering of the explorer

use crate::config::ExplorerConfig;
use crate::overlay::{self, OverlayAction};
use crate::session::{Session, CLICK_SLOP};
use anyhow::{Context, Result};
use cosmic_gpu::{GpuContext, RenderSurface, SceneRenderer};
use cosmic_narration::{Narrator, SilentSynthesizer, SpeechSynthesizer};
use cosmic_scene::Universe;
use std::sync::Arc;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{CursorIcon, WindowBuilder},
};

/// Longest frame step fed to the simulation, so a stall does not jump orbits
const MAX_FRAME_SECONDS: f32 = 0.1;

/// Pointer state between winit events
#[derive(Debug, Default)]
struct PointerState {
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    mouse_pressed: bool,
    right_mouse_pressed: bool,
    /// Pixels travelled since the primary button went down
    travel: f32,
}

struct Graphics {
    gpu: GpuContext,
    surface: RenderSurface,
    scene: SceneRenderer,
    egui_renderer: egui_wgpu::Renderer,
}

impl Graphics {
    fn render<S: SpeechSynthesizer>(
        &mut self,
        session: &mut Session<S>,
        egui_ctx: &egui::Context,
        output: EguiFrame,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        if let Some(lights) = session.take_lights() {
            self.scene.set_lights(&self.gpu, &lights);
        }
        self.scene.set_clear_color(session.background());
        let camera = &session.camera;
        self.scene
            .update_camera(&self.gpu, &camera.view_matrix(), &camera.projection_matrix(), camera.eye());

        let frame = self.surface.acquire()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .scene
            .render(&self.gpu, &session.universe.graph, &view, self.surface.depth_view());

        let (width, height) = self.surface.size();
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: output.pixels_per_point,
        };
        for (id, delta) in &output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, delta);
        }
        let paint_jobs = egui_ctx.tessellate(output.shapes, output.pixels_per_point);
        let overlay_commands = self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen);
        }

        self.gpu
            .queue
            .submit(overlay_commands.into_iter().chain(std::iter::once(encoder.finish())));
        frame.present();

        for id in &output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        Ok(())
    }
}

/// The parts of an egui frame needed after platform output was handled
struct EguiFrame {
    textures_delta: egui::TexturesDelta,
    shapes: Vec<egui::epaint::ClippedShape>,
    pixels_per_point: f32,
}

/// Interactive galaxy and solar system explorer
pub struct ExplorerApp {
    config: ExplorerConfig,
}

impl ExplorerApp {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    /// Generate the universe, open the window and run until it closes
    pub fn run(self) -> Result<()> {
        let config = self.config;
        log::info!("starting Cosmic Voyage Explorer (seed {})", config.seed);

        let universe = Universe::build(&config.universe_params(), config.seed).context("build universe")?;

        let event_loop = EventLoop::new().context("create event loop")?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height))
                .build(&event_loop)
                .context("create window")?,
        );

        let (gpu, surface) = pollster::block_on(RenderSurface::for_window(window.clone()))?;
        let scene = SceneRenderer::new(&gpu, surface.format(), &universe.graph, &config.asset_root);
        let egui_renderer = overlay_renderer(&gpu.device, surface.format());
        let mut graphics = Graphics {
            gpu,
            surface,
            scene,
            egui_renderer,
        };

        let egui_ctx = egui::Context::default();
        let mut egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
        );

        let engine = SilentSynthesizer::default().with_words_per_minute(config.narration.words_per_minute);
        let narrator = Narrator::new(engine, config.narration.voice.clone());
        let mut session = Session::new(&config, universe, narrator, graphics.surface.aspect());

        let mut pointer = PointerState::default();
        let mut last_frame = instant::Instant::now();

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Poll);

                let Event::WindowEvent { event, window_id } = event else {
                    return;
                };
                if window_id != window.id() {
                    return;
                }

                let response = egui_state.on_window_event(&window, &event);
                let (width, height) = graphics.surface.size();
                let (width, height) = (width as f32, height as f32);

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => {
                        graphics.surface.resize(&graphics.gpu, size.width, size.height);
                        session.set_aspect_ratio(graphics.surface.aspect());
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        let pressed = state == ElementState::Pressed;
                        match button {
                            MouseButton::Left => {
                                if pressed && !response.consumed {
                                    pointer.mouse_pressed = true;
                                    pointer.travel = 0.0;
                                } else if !pressed && pointer.mouse_pressed {
                                    pointer.mouse_pressed = false;
                                    if pointer.travel < CLICK_SLOP {
                                        if let Some(pos) = pointer.last_mouse_pos {
                                            session.click_at(pos.x as f32, pos.y as f32, width, height);
                                        }
                                    }
                                }
                            }
                            MouseButton::Right => {
                                pointer.right_mouse_pressed = pressed && !response.consumed;
                            }
                            _ => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        if let Some(last_pos) = pointer.last_mouse_pos {
                            let delta_x = (position.x - last_pos.x) as f32;
                            let delta_y = (position.y - last_pos.y) as f32;

                            if pointer.mouse_pressed {
                                pointer.travel += delta_x.hypot(delta_y);
                                session.drag(delta_x, delta_y, false);
                            } else if pointer.right_mouse_pressed {
                                session.drag(delta_x, delta_y, true);
                            }
                        }
                        pointer.last_mouse_pos = Some(position);

                        let over_ui = egui_ctx.is_pointer_over_area();
                        let target = if over_ui {
                            session.clear_hover();
                            None
                        } else {
                            session.hover_at(position.x as f32, position.y as f32, width, height)
                        };
                        window.set_cursor_icon(if target.is_some() {
                            CursorIcon::Pointer
                        } else {
                            CursorIcon::Default
                        });
                    }
                    WindowEvent::CursorLeft { .. } => {
                        pointer.last_mouse_pos = None;
                        session.clear_hover();
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        if !response.consumed {
                            let steps = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            session.scroll(steps);
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed || egui_ctx.wants_keyboard_input() {
                            return;
                        }
                        match &event.logical_key {
                            Key::Character(c) => match c.as_str() {
                                "g" | "G" => session.back_to_galaxy(),
                                "s" | "S" => session.zoom_to_solar(),
                                "r" | "R" => session.reset_camera(),
                                _ => {}
                            },
                            Key::Named(NamedKey::Space) => session.handle_action(OverlayAction::ToggleNarration),
                            Key::Named(NamedKey::Escape) => elwt.exit(),
                            _ => {}
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = instant::Instant::now();
                        let dt = (now - last_frame).as_secs_f32().min(MAX_FRAME_SECONDS);
                        last_frame = now;
                        session.update(dt);

                        let labels = overlay::project_labels(&session.universe.graph, &session.camera, width, height);
                        let model = session.overlay_model();
                        let pixels_per_point = egui_ctx.pixels_per_point();
                        let mut actions = Vec::new();
                        let raw_input = egui_state.take_egui_input(&window);
                        let full_output = egui_ctx.run(raw_input, |ctx| {
                            actions = overlay::draw(ctx, &model, &labels, pixels_per_point);
                        });
                        egui_state.handle_platform_output(&window, full_output.platform_output);
                        for action in actions {
                            session.handle_action(action);
                        }

                        let output = EguiFrame {
                            textures_delta: full_output.textures_delta,
                            shapes: full_output.shapes,
                            pixels_per_point: full_output.pixels_per_point,
                        };
                        match graphics.render(&mut session, &egui_ctx, output) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                log::debug!("surface lost, reconfiguring");
                                graphics.surface.reconfigure(&graphics.gpu);
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("GPU out of memory, exiting");
                                elwt.exit();
                            }
                            Err(e) => log::warn!("frame dropped: {:?}", e),
                        }

                        window.request_redraw();
                    }
                    _ => {}
                }
            })
            .context("event loop")?;

        Ok(())
    }
}

/// The egui renderer draws straight onto the surface, no depth and no MSAA
fn overlay_renderer(device: &wgpu::Device, format: wgpu::TextureFormat) -> egui_wgpu::Renderer {
    egui_wgpu::Renderer::new(device, format, None, 1)
}

/// Run the explorer with the configuration at `config_path`
pub fn run_explorer(config_path: &std::path::Path) -> Result<()> {
    let config = ExplorerConfig::load(config_path)?;
    ExplorerApp::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_renderer_paints_offscreen() {
        let Ok(gpu) = pollster::block_on(GpuContext::headless()) else {
            eprintln!("no GPU adapter, skipping");
            return;
        };
        let format = wgpu::TextureFormat::Rgba8Unorm;
        let mut renderer = overlay_renderer(&gpu.device, format);

        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::Window::new("Planet").show(ctx, |ui| ui.label("Earth"));
        });
        let paint_jobs = ctx.tessellate(output.shapes, output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [64, 64],
            pixels_per_point: output.pixels_per_point,
        };

        let target = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("overlay target"),
            size: wgpu::Extent3d {
                width: 64,
                height: 64,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        for (id, delta) in &output.textures_delta.set {
            renderer.update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        let extra = renderer.update_buffers(&gpu.device, &gpu.queue, &mut encoder, &paint_jobs, &screen);
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("overlay"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            renderer.render(&mut pass, &paint_jobs, &screen);
        }
        gpu.queue.submit(extra.into_iter().chain(std::iter::once(encoder.finish())));
        assert!(!paint_jobs.is_empty());
    }
}
