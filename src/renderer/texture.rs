use std::path::Path;

use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::error::AssetError;

/// Handle to a texture owned by the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    Linear,
    /// Crisp pixels for sprite sheets.
    Nearest,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Wrap {
    #[default]
    Clamp,
    /// Required wherever texture coordinates drift outside `[0, 1]`.
    Repeat,
}

/// How a texture is sampled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SamplerOptions {
    pub filter: Filter,
    pub wrap: Wrap,
}

impl SamplerOptions {
    /// Full-screen images and the font atlas.
    pub const SCREEN: Self = Self { filter: Filter::Linear, wrap: Wrap::Clamp };
    /// Sprite sheets: nearest filtering, repeat wrap.
    pub const SPRITE: Self = Self { filter: Filter::Nearest, wrap: Wrap::Repeat };
    /// Scrolling backgrounds: smooth filtering, repeat wrap.
    pub const SCROLLING: Self = Self { filter: Filter::Linear, wrap: Wrap::Repeat };
}

/// Turns image files into GPU textures.
///
/// Implemented by the [`Renderer`](super::Renderer); the scene only sees
/// this trait so it can be initialised without a GPU.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path, options: SamplerOptions) -> Result<TextureId, AssetError>;

    /// Handle returned by the most recent successful load.
    fn last_loaded(&self) -> Option<TextureId>;
}

/// Decode any supported image file into RGBA8.
pub fn decode_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// A texture resident on the GPU, ready to bind.
pub struct GpuTexture {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        img: &RgbaImage,
        options: SamplerOptions,
        label: &str,
    ) -> Self {
        let (width, height) = img.dimensions();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let filter = match options.filter {
            Filter::Linear => wgpu::FilterMode::Linear,
            Filter::Nearest => wgpu::FilterMode::Nearest,
        };
        let address_mode = match options.wrap {
            Wrap::Clamp => wgpu::AddressMode::ClampToEdge,
            Wrap::Repeat => wgpu::AddressMode::Repeat,
        };
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            mag_filter: filter,
            min_filter: filter,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self { bind_group, width, height }
    }

    /// 1×1 opaque white texel used for untextured (colour-only) quads.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout) -> Self {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Self::upload(device, queue, layout, &img, SamplerOptions::SCREEN, "white_texture")
    }
}
