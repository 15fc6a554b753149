//! Per-frame bookkeeping shared by the window loop and tests.
//!
//! The driver owns the canvas layout and the latest cursor position, and
//! turns them into a [`FrameUniforms`] snapshot each frame. It never touches
//! the GPU, so resize and pointer handling can be exercised headless.

use effect::{CanvasLayout, FrameUniforms, PointerState, Session};

use crate::runtime::{BoxedTimeSource, TimeSample};

pub struct FrameDriver {
    session: Session,
    layout: CanvasLayout,
    cursor: Option<(f32, f32)>,
    pointer: PointerState,
    time_source: BoxedTimeSource,
    last_sample: Option<TimeSample>,
}

impl FrameDriver {
    pub fn new(session: Session, window: (u32, u32), time_source: BoxedTimeSource) -> Self {
        let layout = CanvasLayout::compute(as_f32(window), session.aspect());
        Self {
            session,
            layout,
            cursor: None,
            pointer: PointerState::default(),
            time_source,
            last_sample: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn last_sample(&self) -> Option<TimeSample> {
        self.last_sample
    }

    /// Recomputes the canvas for a new window size.
    ///
    /// Returns `false` when the size did not change. The pointer is
    /// re-normalized against the new layout if a cursor position is known.
    pub fn resize(&mut self, window: (u32, u32)) -> bool {
        let layout = CanvasLayout::compute(as_f32(window), self.session.aspect());
        if layout == self.layout {
            return false;
        }

        self.layout = layout;
        if layout.overflows() {
            tracing::warn!(
                window_width = window.0,
                window_height = window.1,
                canvas_width = layout.rect.width,
                canvas_height = layout.rect.height,
                "canvas overflows the window; edges will be cropped"
            );
        } else {
            tracing::debug!(
                canvas_width = layout.rect.width,
                canvas_height = layout.rect.height,
                "canvas resized"
            );
        }

        if let Some(cursor) = self.cursor {
            self.pointer = PointerState::normalize(cursor, &self.layout);
        }
        true
    }

    /// Records a window-space cursor position in physical pixels.
    pub fn pointer_moved(&mut self, cursor: (f32, f32)) {
        self.cursor = Some(cursor);
        self.pointer = PointerState::normalize(cursor, &self.layout);
    }

    /// The cursor left the window; the last known position stays in effect.
    pub fn pointer_left(&mut self) {
        tracing::trace!(x = self.pointer.x, y = self.pointer.y, "pointer left window");
    }

    /// Overrides the pointer with an already normalized position.
    pub fn pointer_at(&mut self, pointer: PointerState) {
        self.cursor = None;
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Samples the time source and assembles the next frame snapshot.
    pub fn next_frame(&mut self) -> FrameUniforms {
        let sample = self.time_source.sample();
        self.last_sample = Some(sample);
        FrameUniforms {
            resolution: self.layout.rect,
            mouse: self.pointer,
            time: sample.seconds,
            seed: self.session.seed,
        }
    }
}

fn as_f32(size: (u32, u32)) -> (f32, f32) {
    (size.0 as f32, size.1 as f32)
}
