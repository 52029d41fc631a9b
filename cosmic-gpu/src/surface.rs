//! Window surface with a matching depth buffer

use crate::device::GpuContext;
use cosmic_core::{Error, Result};
use std::sync::Arc;
use winit::window::Window;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct RenderSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
}

impl RenderSurface {
    /// Open a device able to present to `window` and configure its surface
    pub async fn for_window(window: Arc<Window>) -> Result<(GpuContext, Self)> {
        let size = window.inner_size();
        let instance = GpuContext::create_instance();
        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;

        let gpu = GpuContext::new(instance, Some(&surface)).await?;
        let render_surface = Self::new(&gpu, surface, size.width, size.height)?;
        Ok((gpu, render_surface))
    }

    pub fn new(gpu: &GpuContext, surface: wgpu::Surface<'static>, width: u32, height: u32) -> Result<Self> {
        let caps = surface.get_capabilities(&gpu.adapter);
        // Scene colors and egui are both authored in sRGB, so present without conversion
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("surface reports no formats".to_string()))?;

        let present_mode = if caps.present_modes.contains(&wgpu::PresentMode::Fifo) {
            wgpu::PresentMode::Fifo
        } else {
            caps.present_modes.first().copied().unwrap_or(wgpu::PresentMode::Fifo)
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);
        log::debug!("surface configured: {}x{} {:?}", config.width, config.height, format);

        let depth_view = create_depth_view(&gpu.device, config.width, config.height);
        Ok(Self {
            surface,
            config,
            depth_view,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Resize the surface and depth buffer. Zero-sized requests (minimized
    /// windows) are ignored.
    pub fn resize(&mut self, gpu: &GpuContext, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure(gpu);
    }

    /// Apply the current configuration again, e.g. after the surface was lost
    pub fn reconfigure(&mut self, gpu: &GpuContext) {
        self.surface.configure(&gpu.device, &self.config);
        self.depth_view = create_depth_view(&gpu.device, self.config.width, self.config.height);
    }

    pub fn acquire(&self) -> std::result::Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
