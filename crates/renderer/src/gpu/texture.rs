use anyhow::Result;
use effect::SourceImage;
use wgpu::util::{DeviceExt, TextureDataOrder};

/// Rejects images the device cannot hold in a single 2D texture.
pub(crate) fn ensure_fits(width: u32, height: u32, max_dimension: u32) -> Result<()> {
    if width > max_dimension || height > max_dimension {
        anyhow::bail!(
            "source image is {width}x{height}, but the GPU supports textures up to {max_dimension}x{max_dimension}"
        );
    }
    Ok(())
}

/// The uploaded source image plus the sampler the fragment program reads it with.
pub(crate) struct ImageTexture {
    pub _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl ImageTexture {
    /// Uploads `image` once; rows stay top-first so `uv.y = 0` is the top edge.
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &SourceImage,
    ) -> Self {
        let pixels = image.as_rgba();
        let (width, height) = pixels.dimensions();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("source image"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            pixels.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("source image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        tracing::debug!(width, height, "uploaded source image texture");

        Self {
            _texture: texture,
            view,
            sampler,
        }
    }
}
