//! Canvas sizing for the host window.
//!
//! The canvas keeps the source image's aspect ratio and is centered inside the
//! window. Sizing fills the window height when the window is landscape or
//! square and the width otherwise, so very tall images in a portrait window
//! can overflow vertically.

/// Size of the drawable canvas in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Rounds to whole pixels, never below 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

/// Fits a canvas with the given `aspect` (width / height) into `window`.
pub fn fit_canvas(window: (f32, f32), aspect: f32) -> ViewportRect {
    let (w, h) = (window.0.max(1.0), window.1.max(1.0));
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };

    if w >= h {
        ViewportRect::new(h * aspect, h)
    } else {
        ViewportRect::new(w, w / aspect)
    }
}

/// Canvas rect plus its top-left offset inside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub window: (f32, f32),
    pub rect: ViewportRect,
    pub origin: (f32, f32),
}

impl CanvasLayout {
    pub fn compute(window: (f32, f32), aspect: f32) -> Self {
        let rect = fit_canvas(window, aspect);
        let origin = (
            (window.0 - rect.width) * 0.5,
            (window.1 - rect.height) * 0.5,
        );
        Self {
            window,
            rect,
            origin,
        }
    }

    /// True when the canvas sticks out of the window on either axis.
    pub fn overflows(&self) -> bool {
        self.rect.width > self.window.0 + f32::EPSILON
            || self.rect.height > self.window.1 + f32::EPSILON
    }
}
