use crate::runtime::RenderPolicy;

/// Configuration passed from the CLI into the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title shown by the window manager.
    pub title: String,
    /// High-level render behaviour requested by the caller.
    pub policy: RenderPolicy,
}

impl Default for RendererConfig {
    /// Provides a 720p animated window.
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            title: "tilescroll".to_string(),
            policy: RenderPolicy::Animate,
        }
    }
}
