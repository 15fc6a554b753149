//! Core of the tile-scroll duotone effect.
//!
//! Everything in this crate is GPU-free so the effect can be reasoned about
//! and tested on the CPU. The GPU host in the `renderer` crate runs a GLSL
//! port of [`program`] and feeds it the same [`FrameUniforms`] snapshot:
//!
//! ```text
//!   window size ──▶ geometry::CanvasLayout ─┐
//!   cursor      ──▶ PointerState ───────────┼─▶ FrameUniforms ─▶ program::shade (per pixel)
//!   clock       ──▶ time ───────────────────┤                        ▲
//!   Session { SourceImage, SeedValue } ─────┘────────────────────────┘
//! ```
//!
//! [`raster::render_frame`] evaluates the program for a whole canvas in
//! parallel, which backs still exports and frame-level tests.

mod error;
pub mod geometry;
pub mod program;
pub mod raster;
mod seed;
mod session;
mod source_image;
mod uniforms;

pub use error::EffectError;
pub use geometry::{CanvasLayout, ViewportRect};
pub use seed::{Polarity, SeedValue};
pub use session::Session;
pub use source_image::SourceImage;
pub use uniforms::{FrameUniforms, PointerState};
