//! CPU reference of the per-pixel effect.
//!
//! Every function here has a counterpart of the same shape in the GLSL
//! fragment shader compiled by the renderer, and all arithmetic stays in `f32`
//! so results track the GPU closely. The band partition and the hash are
//! evaluated per pixel; nothing is cached between pixels or frames.

use crate::{FrameUniforms, SourceImage};

/// Accent painted wherever the duotone would otherwise be black (#FC1408).
pub const ACCENT: [f32; 3] = [0.988, 0.078, 0.031];
/// Luminance at which the duotone switches tone.
pub const LUMINANCE_THRESHOLD: f32 = 0.367;
/// Pointer coordinate beyond which an axis stops scrolling.
pub const FREEZE_EDGE: f32 = 0.97;
/// Upper bound of the band count term.
pub const MAX_BANDS: f32 = 300.0;

const POWER_CURVE: f32 = 0.72;
const CENTER_BRIGHTNESS: f32 = 0.5;
const COLORIZE: f32 = 0.0;
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// GLSL `fract`.
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `mod`, which follows the sign of `y` unlike `%`.
fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// GLSL `step`.
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// GLSL `mix`.
fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Deterministic hash of a scalar into `[0, 1)`.
pub fn random(x: f32) -> f32 {
    fract(x.sin() * 43758.5453)
}

/// Number of bands along an axis for the given pointer coordinate.
pub fn area_count(mouse_pos: f32) -> f32 {
    let position = mouse_pos.clamp(0.0, 1.0);
    (MAX_BANDS * (1.0 - position)).floor() + 1.0
}

/// Index of the band containing `n`, or `-1.0` when neither neighbour matches.
pub fn find_area_number(n: f32, mouse_pos: f32) -> f32 {
    let area_count = area_count(mouse_pos);
    let area_offset = 1.0 / area_count;
    let lower_bound = (n / area_offset).floor().max(0.0);
    let upper_bound = (n / area_offset).ceil().min(area_count);

    if n >= area_offset * lower_bound && n <= area_offset * (lower_bound + 1.0) {
        lower_bound
    } else if n >= area_offset * upper_bound && n <= area_offset * (upper_bound + 1.0) {
        upper_bound
    } else {
        -1.0
    }
}

/// Scroll direction of a band: `1.0` for roughly 70% of indices, else `-1.0`.
pub fn direction(band: f32) -> f32 {
    if random(band) > 0.3 {
        1.0
    } else {
        -1.0
    }
}

/// Applies the time-based band scroll to a top-left origin `uv`.
pub fn scroll_uv(uv: [f32; 2], uniforms: &FrameUniforms) -> [f32; 2] {
    let [mut u, mut v] = uv;
    let mouse = uniforms.mouse;
    let time = uniforms.time;

    let band_x = find_area_number(u, mouse.x);
    let band_y = find_area_number(v, mouse.y);
    let random_x = random(band_x);
    let random_y = random(band_y);

    if band_x > 0.0 && mouse.x < FREEZE_EDGE {
        v = glsl_mod(v - time * direction(band_x) * 0.2 * (random_x + 0.4), 1.0);
    }
    if band_y > 0.0 && mouse.y < FREEZE_EDGE {
        u = glsl_mod(u - time * direction(band_y) * 0.3 * (random_y + 0.3), 1.0);
    }
    [u, v]
}

pub fn rgb_to_hsv(c: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = c;
    let k = [0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0];
    let p = if g < b {
        [b, g, k[3], k[2]]
    } else {
        [g, b, k[0], k[1]]
    };
    let q = if r < p[0] {
        [p[0], p[1], p[3], r]
    } else {
        [r, p[1], p[2], p[0]]
    };
    let d = q[0] - q[3].min(q[1]);
    let e = 1.0e-10;
    [
        (q[2] + (q[3] - q[1]) / (6.0 * d + e)).abs(),
        d / (q[0] + e),
        q[0],
    ]
}

pub fn hsv_to_rgb(c: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = c;
    let k = [1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0];
    let channel = |offset: f32| {
        let p = (fract(h + offset) * 6.0 - k[3]).abs();
        v * mix(k[0], (p - k[0]).clamp(0.0, 1.0), s)
    };
    [channel(k[0]), channel(k[1]), channel(k[2])]
}

/// V-shaped tonal fold: darks and highlights go bright, mid-grey goes black.
pub fn inverted_color(color: [f32; 3]) -> [f32; 3] {
    let mut hsv = rgb_to_hsv(color);

    hsv[2] = hsv[2].powf(POWER_CURVE);
    hsv[2] = if hsv[2] < CENTER_BRIGHTNESS {
        1.0 - hsv[2] / CENTER_BRIGHTNESS
    } else {
        (hsv[2] - CENTER_BRIGHTNESS) / CENTER_BRIGHTNESS
    };
    hsv[1] = hsv[1] * hsv[2] * COLORIZE;

    hsv_to_rgb(hsv)
}

/// Thresholds luminance into white or [`ACCENT`], polarity chosen by `seed`.
pub fn orange_color(color: [f32; 3], seed: f32) -> [f32; 3] {
    let luminance = color[0] * LUMA[0] + color[1] * LUMA[1] + color[2] * LUMA[2];
    let flip = step(seed, 0.0);
    let bright = mix(1.0, 0.0, flip);
    let dark = mix(0.0, 1.0, flip);
    let tone = mix(bright, dark, step(LUMINANCE_THRESHOLD, luminance));

    if tone == 0.0 {
        ACCENT
    } else {
        [tone; 3]
    }
}

/// Full per-pixel program.
///
/// `frag_coord` uses the GL convention: pixel centers, origin bottom-left.
pub fn shade(frag_coord: [f32; 2], uniforms: &FrameUniforms, image: &SourceImage) -> [f32; 3] {
    let mut uv = [
        frag_coord[0] / uniforms.resolution.width,
        frag_coord[1] / uniforms.resolution.height,
    ];
    uv[1] = 1.0 - uv[1];

    let uv = scroll_uv(uv, uniforms);
    let color = image.sample(uv);
    orange_color(inverted_color(color), uniforms.seed.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointerState, SeedValue, ViewportRect};

    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    fn uniforms(mouse: PointerState, time: f32) -> FrameUniforms {
        FrameUniforms {
            resolution: ViewportRect::new(64.0, 64.0),
            mouse,
            time,
            seed: SeedValue::LOW,
        }
    }

    #[test]
    fn area_count_shrinks_towards_far_edge() {
        let mut last = f32::INFINITY;
        for step in 0..=1_000 {
            let count = area_count(step as f32 / 1_000.0);
            assert!(count >= 1.0);
            assert!(count <= last);
            last = count;
        }
        assert_eq!(area_count(0.0), MAX_BANDS + 1.0);
        assert_eq!(area_count(1.0), 1.0);
        assert_eq!(area_count(-4.0), area_count(0.0));
        assert_eq!(area_count(7.0), area_count(1.0));
    }

    #[test]
    fn band_index_stays_in_range() {
        for p in 0..=100 {
            let mouse = p as f32 / 100.0;
            let count = area_count(mouse);
            for i in 0..=500 {
                let band = find_area_number(i as f32 / 500.0, mouse);
                assert!(band == -1.0 || (0.0..=count).contains(&band), "{band}");
            }
            assert_eq!(find_area_number(0.0, mouse), 0.0);
        }
    }

    #[test]
    fn unit_coordinate_reaches_last_band() {
        for mouse in [0.0, 0.5, 1.0] {
            assert_eq!(find_area_number(1.0, mouse), area_count(mouse));
        }
    }

    #[test]
    fn unit_coordinate_can_resolve_to_previous_band() {
        // 1 / (1 / 255) rounds below 255 in f32, and the lower bound matches first.
        assert_eq!(area_count(0.151), 255.0);
        assert_eq!(find_area_number(1.0, 0.151), 254.0);
    }

    #[test]
    fn single_band_when_pointer_at_far_edge() {
        assert_eq!(find_area_number(0.3, 1.0), 0.0);
        assert_eq!(find_area_number(0.99, 1.0), 0.0);
    }

    #[test]
    fn direction_is_stable_and_mostly_positive() {
        let mut positive = 0;
        for band in 0..10_000 {
            let band = band as f32;
            let first = direction(band);
            assert_eq!(first, direction(band));
            if first > 0.0 {
                positive += 1;
            }
        }
        let ratio = positive as f32 / 10_000.0;
        assert!((ratio - 0.7).abs() < 0.03, "ratio {ratio}");
    }

    #[test]
    fn random_stays_in_unit_range() {
        for i in -500..500 {
            let value = random(i as f32 * 0.37);
            assert!((0.0..=1.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn zero_time_leaves_uv_untouched() {
        let uv = [0.31, 0.77];
        for mouse in [PointerState::new(0.0, 0.0), PointerState::new(0.4, 0.2)] {
            assert_eq!(scroll_uv(uv, &uniforms(mouse, 0.0)), uv);
        }
    }

    #[test]
    fn pointer_near_edge_freezes_both_axes() {
        let uv = [0.31, 0.77];
        let frozen = uniforms(PointerState::new(0.98, 0.99), 12.5);
        assert_eq!(scroll_uv(uv, &frozen), uv);
    }

    #[test]
    fn scrolled_uv_wraps_into_unit_square() {
        let moving = uniforms(PointerState::new(0.1, 0.2), 37.25);
        for i in 0..200 {
            let t = i as f32 / 200.0;
            let [u, v] = scroll_uv([t, 1.0 - t], &moving);
            assert!((0.0..=1.0).contains(&u), "{u}");
            assert!((0.0..=1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn glsl_mod_follows_divisor_sign() {
        assert!((glsl_mod(-0.25, 1.0) - 0.75).abs() < 1e-6);
        assert!((glsl_mod(2.5, 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hsv_conversion_keeps_primaries() {
        let hsv = rgb_to_hsv([1.0, 0.0, 0.0]);
        assert!(hsv[0].abs() < 1e-6);
        assert!((hsv[1] - 1.0).abs() < 1e-6);
        assert!((hsv[2] - 1.0).abs() < 1e-6);
        let rgb = hsv_to_rgb(rgb_to_hsv([0.2, 0.6, 0.4]));
        for (got, want) in rgb.iter().zip([0.2, 0.6, 0.4]) {
            assert!((got - want).abs() < 1e-5);
        }
    }

    #[test]
    fn tonal_fold_is_v_shaped() {
        let black = inverted_color([0.0, 0.0, 0.0]);
        let white = inverted_color(WHITE);
        let mid = 0.5_f32.powf(1.0 / POWER_CURVE);
        let grey = inverted_color([mid, mid, mid]);
        assert!((black[0] - 1.0).abs() < 1e-6);
        assert!((white[0] - 1.0).abs() < 1e-6);
        assert!(grey[0].abs() < 1e-4);
    }

    #[test]
    fn tonal_fold_is_greyscale() {
        let out = inverted_color([0.9, 0.1, 0.4]);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
    }

    #[test]
    fn duotone_polarity_depends_on_seed() {
        let dark = [0.1, 0.1, 0.1];
        let light = [0.8, 0.8, 0.8];
        assert_eq!(orange_color(dark, 0.0), ACCENT);
        assert_eq!(orange_color(light, 0.0), WHITE);
        assert_eq!(orange_color(dark, 9.0), WHITE);
        assert_eq!(orange_color(light, 9.0), ACCENT);
    }

    #[test]
    fn duotone_never_emits_black() {
        for seed in [0.0, 9.0] {
            for i in 0..=100 {
                let v = i as f32 / 100.0;
                let out = orange_color([v, v, v], seed);
                assert!(out == WHITE || out == ACCENT, "{out:?}");
            }
        }
    }
}
