//! Whole-frame evaluation on the CPU.

use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;

use crate::program::shade;
use crate::{EffectError, FrameUniforms, SourceImage};

/// Renders one canvas-sized frame.
///
/// Rows are shaded in parallel; every pixel depends only on its own
/// coordinate and `uniforms`, so the result does not depend on scheduling.
pub fn render_frame(uniforms: &FrameUniforms, image: &SourceImage) -> RgbaImage {
    let (width, height) = uniforms.resolution.pixel_size();
    let mut frame = RgbaImage::new(width, height);
    let row_len = width as usize * 4;
    let canvas_height = height as f32;

    frame
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(row, line)| {
            let frag_y = canvas_height - (row as f32 + 0.5);
            for (column, pixel) in line.chunks_exact_mut(4).enumerate() {
                let frag = [column as f32 + 0.5, frag_y];
                let [r, g, b] = shade(frag, uniforms, image);
                pixel.copy_from_slice(&[to_unorm8(r), to_unorm8(g), to_unorm8(b), 255]);
            }
        });

    tracing::debug!(width, height, time = uniforms.time, "rasterized frame");
    frame
}

/// Renders a frame and writes it to `path`; the format follows the extension.
pub fn export_frame(
    uniforms: &FrameUniforms,
    image: &SourceImage,
    path: &Path,
) -> Result<(), EffectError> {
    let frame = render_frame(uniforms, image);
    frame.save(path).map_err(|source| EffectError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "exported still frame"
    );
    Ok(())
}

fn to_unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
