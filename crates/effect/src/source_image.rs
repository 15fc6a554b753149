use std::path::Path;

use image::RgbaImage;

use crate::EffectError;

/// Decoded bitmap sampled by the effect. Immutable for the session.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decodes the image at `path` into RGBA8.
    pub fn open(path: &Path) -> Result<Self, EffectError> {
        let decoded = image::open(path).map_err(|source| EffectError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let pixels = decoded.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(EffectError::EmptyImage {
                path: path.to_path_buf(),
                width: pixels.width(),
                height: pixels.height(),
            });
        }

        tracing::info!(
            path = %path.display(),
            width = pixels.width(),
            height = pixels.height(),
            "loaded source image"
        );
        Ok(Self { pixels })
    }

    /// Wraps an in-memory bitmap. Zero-sized bitmaps are padded to 1x1 black.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Self {
                pixels: RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255])),
            };
        }
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn aspect(&self) -> f32 {
        self.width() as f32 / self.height() as f32
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Bilinear sample at normalized `uv` with clamp-to-edge addressing.
    ///
    /// Texel centers sit at half-pixel offsets, the same convention the GPU
    /// sampler uses with linear filtering. `uv` (0, 0) is the top-left corner.
    pub fn sample(&self, uv: [f32; 2]) -> [f32; 3] {
        let w = self.width() as f32;
        let h = self.height() as f32;
        let x = uv[0].clamp(0.0, 1.0) * w - 0.5;
        let y = uv[1].clamp(0.0, 1.0) * h - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;

        let top = lerp3(self.texel(x0, y0), self.texel(x0 + 1.0, y0), tx);
        let bottom = lerp3(self.texel(x0, y0 + 1.0), self.texel(x0 + 1.0, y0 + 1.0), tx);
        lerp3(top, bottom, ty)
    }

    fn texel(&self, x: f32, y: f32) -> [f32; 3] {
        let max_x = self.width() as i64 - 1;
        let max_y = self.height() as i64 - 1;
        let px = (x as i64).clamp(0, max_x) as u32;
        let py = (y as i64).clamp(0, max_y) as u32;
        let [r, g, b, _] = self.pixels.get_pixel(px, py).0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
