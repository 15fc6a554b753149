use crate::geometry::{CanvasLayout, ViewportRect};
use crate::SeedValue;

/// Pointer position normalized against the canvas, top-left origin.
///
/// Values are not clamped: a cursor left of the canvas yields a negative `x`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Maps a window-space cursor position into canvas coordinates.
    pub fn normalize(cursor: (f32, f32), layout: &CanvasLayout) -> Self {
        let width = layout.rect.width.max(1.0);
        let height = layout.rect.height.max(1.0);
        Self {
            x: (cursor.0 - layout.origin.0) / width,
            y: (cursor.1 - layout.origin.1) / height,
        }
    }
}

/// Per-frame snapshot consumed by the pixel program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub resolution: ViewportRect,
    pub mouse: PointerState,
    /// Seconds since the session started.
    pub time: f32,
    pub seed: SeedValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_relative_to_canvas_origin() {
        let layout = CanvasLayout::compute((1920.0, 1080.0), 1.0);
        let pointer = PointerState::normalize((420.0 + 540.0, 270.0), &layout);
        assert!((pointer.x - 0.5).abs() < 1e-6);
        assert!((pointer.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn pointer_outside_canvas_is_not_clamped() {
        let layout = CanvasLayout::compute((1920.0, 1080.0), 1.0);
        let pointer = PointerState::normalize((0.0, 1080.0), &layout);
        assert!(pointer.x < 0.0);
        assert!((pointer.y - 1.0).abs() < 1e-6);
    }
}
