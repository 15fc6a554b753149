use std::path::Path;

use anyhow::{Context, Result};
use effect::raster::export_frame;
use effect::{CanvasLayout, FrameUniforms, PointerState, SeedValue, Session, SourceImage};
use renderer::{RenderPolicy, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Largest canvas axis a still export will allocate.
const MAX_EXPORT_DIMENSION: u32 = 16384;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let image = SourceImage::open(&cli.image)
        .with_context(|| format!("failed to load image {}", cli.image.display()))?;

    let seed = match cli.rng_seed {
        Some(value) => SeedValue::from_rng_seed(value),
        None => SeedValue::from_entropy(),
    };
    let session = Session::new(image, seed);

    if let Some(path) = cli.still_export.as_deref() {
        return export_still(&cli, &session, path);
    }

    let policy = match cli.still_time {
        Some(time) => RenderPolicy::Still { time },
        None => RenderPolicy::Animate,
    };
    let config = RendererConfig {
        surface_size: cli.size,
        policy,
        ..RendererConfig::default()
    };
    Renderer::new(config, session).run()
}

fn export_still(cli: &Cli, session: &Session, path: &Path) -> Result<()> {
    let window = (cli.size.0 as f32, cli.size.1 as f32);
    let layout = CanvasLayout::compute(window, session.aspect());
    ensure_export_size(&layout)?;
    let (x, y) = cli.pointer.unwrap_or((0.0, 0.0));
    let uniforms = FrameUniforms {
        resolution: layout.rect,
        mouse: PointerState::new(x, y),
        time: cli.still_time.unwrap_or(0.0),
        seed: session.seed,
    };

    tracing::info!(
        width = layout.rect.width,
        height = layout.rect.height,
        time = uniforms.time,
        "rendering still export"
    );
    export_frame(&uniforms, &session.image, path)
        .with_context(|| format!("failed to export still frame to {}", path.display()))
}

fn ensure_export_size(layout: &CanvasLayout) -> Result<()> {
    let (width, height) = layout.rect.pixel_size();
    if width > MAX_EXPORT_DIMENSION || height > MAX_EXPORT_DIMENSION {
        anyhow::bail!(
            "still export canvas would be {width}x{height}; each axis must be at most {MAX_EXPORT_DIMENSION}"
        );
    }
    Ok(())
}
