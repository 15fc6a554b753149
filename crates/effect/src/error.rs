use std::path::PathBuf;

/// Failures surfaced by the effect core.
///
/// All of them happen during session setup or export; the per-pixel program
/// itself is total and never fails.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("failed to load source image at {path}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },
    #[error("source image at {path} has zero extent ({width}x{height})")]
    EmptyImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    #[error("failed to write frame to {path}")]
    Export {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },
}
