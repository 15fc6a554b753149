//! GPU host for the tile-scroll duotone effect.
//!
//! The crate runs a GLSL port of [`effect::program`] in a single full-surface
//! pass and feeds it the same [`effect::FrameUniforms`] the CPU reference uses.
//! The overall flow is:
//!
//! ```text
//!   CLI / tilescroll
//!          │ RendererConfig + Session
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop ──▶ FrameDriver::next_frame()
//!                                                │
//!                                                └─▶ GpuState::render() ─▶ uniform block ─▶ draw
//! ```
//!
//! `FrameDriver` is GPU-free so resize and pointer handling can be tested
//! without a device; shader sources are validated through naga by
//! [`compile::validate`].

pub mod compile;
mod driver;
mod gpu;
mod runtime;
mod types;
mod window;

use anyhow::Result;
use effect::Session;

pub use compile::ShaderCompileError;
pub use driver::FrameDriver;
pub use runtime::{
    time_source_for_policy, BoxedTimeSource, FixedTimeSource, RenderPolicy, SystemTimeSource,
    TimeSample, TimeSource,
};
pub use types::RendererConfig;

/// Entry point that owns the configuration and the session for one window.
pub struct Renderer {
    config: RendererConfig,
    session: Session,
}

impl Renderer {
    pub fn new(config: RendererConfig, session: Session) -> Self {
        Self { config, session }
    }

    /// Opens the window and blocks until it is closed.
    ///
    /// Fails if no adapter or surface is available, or if either shader
    /// stage does not compile; no frame is drawn in that case.
    pub fn run(self) -> Result<()> {
        tracing::info!(
            width = self.config.surface_size.0,
            height = self.config.surface_size.1,
            policy = ?self.config.policy,
            "starting renderer"
        );
        window::run(&self.config, self.session)
    }
}
