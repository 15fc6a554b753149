use bytemuck::{Pod, Zeroable};
use effect::{CanvasLayout, FrameUniforms};

/// CPU-side mirror of the `EffectParams` uniform block.
///
/// The layout matches the GLSL declaration in [`crate::compile`] under std140
/// rules: three `vec2`s followed by two `float`s, 32 bytes in total.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EffectUniforms {
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub origin: [f32; 2],
    pub time: f32,
    pub seed: f32,
}

unsafe impl Zeroable for EffectUniforms {}
unsafe impl Pod for EffectUniforms {}

impl EffectUniforms {
    pub fn new(layout: &CanvasLayout) -> Self {
        Self {
            resolution: [layout.rect.width, layout.rect.height],
            mouse: [0.0; 2],
            origin: [layout.origin.0, layout.origin.1],
            time: 0.0,
            seed: 0.0,
        }
    }

    /// Copies a frame snapshot plus the canvas offset into the block.
    pub fn update(&mut self, frame: &FrameUniforms, layout: &CanvasLayout) {
        self.resolution = [frame.resolution.width, frame.resolution.height];
        self.mouse = [frame.mouse.x, frame.mouse.y];
        self.origin = [layout.origin.0, layout.origin.1];
        self.time = frame.time;
        self.seed = frame.seed.value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect::{PointerState, SeedValue};
    use std::mem::{align_of, size_of};

    #[test]
    fn uniforms_follow_std140_layout() {
        let layout = CanvasLayout::compute((1920.0, 1080.0), 1.5);
        let uniforms = EffectUniforms::new(&layout);
        let base = &uniforms as *const _ as usize;

        assert_eq!(align_of::<EffectUniforms>(), 16);
        assert_eq!(size_of::<EffectUniforms>(), 32);
        assert_eq!((&uniforms.resolution as *const _ as usize) - base, 0);
        assert_eq!((&uniforms.mouse as *const _ as usize) - base, 8);
        assert_eq!((&uniforms.origin as *const _ as usize) - base, 16);
        assert_eq!((&uniforms.time as *const _ as usize) - base, 24);
        assert_eq!((&uniforms.seed as *const _ as usize) - base, 28);
    }

    #[test]
    fn update_copies_frame_snapshot() {
        let layout = CanvasLayout::compute((1000.0, 500.0), 1.0);
        let mut uniforms = EffectUniforms::new(&layout);
        let frame = FrameUniforms {
            resolution: layout.rect,
            mouse: PointerState::new(0.25, 0.75),
            time: 3.5,
            seed: SeedValue::HIGH,
        };
        uniforms.update(&frame, &layout);

        assert_eq!(uniforms.resolution, [500.0, 500.0]);
        assert_eq!(uniforms.mouse, [0.25, 0.75]);
        assert_eq!(uniforms.origin, [250.0, 0.0]);
        assert_eq!(uniforms.time, 3.5);
        assert_eq!(uniforms.seed, 9.0);
    }
}
