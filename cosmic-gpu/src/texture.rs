//! Material textures loaded from the asset directory

use crate::device::GpuContext;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn from_rgba(gpu: &GpuContext, label: &str, width: u32, height: u32, rgba: &[u8]) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        gpu.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Decode an image under `root`. Missing or unreadable files are logged and
/// yield `None`, so a material simply renders untextured.
pub fn load_rgba(root: &Path, relative: &str) -> Option<image::RgbaImage> {
    let path = root.join(relative);
    match image::open(&path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            log::warn!("texture {} not loaded: {}", path.display(), e);
            None
        }
    }
}

/// Textures by relative path, each decoded and uploaded at most once
pub struct TextureCache {
    root: PathBuf,
    white: Arc<GpuTexture>,
    loaded: HashMap<String, Arc<GpuTexture>>,
}

impl TextureCache {
    pub fn new(gpu: &GpuContext, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            white: Arc::new(GpuTexture::from_rgba(gpu, "White Texture", 1, 1, &[255; 4])),
            loaded: HashMap::new(),
        }
    }

    /// 1×1 white texture bound for untextured materials
    pub fn white(&self) -> Arc<GpuTexture> {
        self.white.clone()
    }

    pub fn get(&mut self, gpu: &GpuContext, relative: Option<&str>) -> Arc<GpuTexture> {
        let Some(relative) = relative else {
            return self.white();
        };
        if let Some(texture) = self.loaded.get(relative) {
            return texture.clone();
        }

        let texture = match load_rgba(&self.root, relative) {
            Some(img) => {
                log::debug!("uploaded texture {} ({}x{})", relative, img.width(), img.height());
                Arc::new(GpuTexture::from_rgba(gpu, relative, img.width(), img.height(), img.as_raw()))
            }
            None => self.white(),
        };
        self.loaded.insert(relative.to_string(), texture.clone());
        texture
    }
}

pub(crate) fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Material Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_texture_is_none() {
        let root = std::env::temp_dir();
        assert!(load_rgba(&root, "cosmic-voyage-no-such-texture.jpg").is_none());
    }

    #[test]
    fn test_png_is_decoded() {
        let dir = std::env::temp_dir();
        let name = format!("cosmic-voyage-texture-{}.png", std::process::id());
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        img.save(dir.join(&name)).unwrap();

        let loaded = load_rgba(&dir, &name).unwrap();
        assert_eq!(loaded.dimensions(), (2, 3));
        assert_eq!(loaded.get_pixel(1, 2).0, [10, 20, 30, 255]);
        std::fs::remove_file(dir.join(&name)).unwrap();
    }
}
