//! GPU side of the renderer.
//!
//! - `context` owns the wgpu instance, device and surface, and reconfigures
//!   the swapchain when the window resizes.
//! - `texture` uploads the decoded source image once per session.
//! - `pipeline` compiles the GLSL program and wires both bind groups.
//! - `uniforms` mirrors the `EffectParams` block byte for byte.
//! - `state` glues everything together behind `GpuState`, which `window`
//!   drives once per redraw.

mod context;
mod pipeline;
mod state;
mod texture;
mod uniforms;

pub(crate) use state::GpuState;
