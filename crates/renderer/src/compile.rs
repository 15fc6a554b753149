use std::borrow::Cow;

use thiserror::Error;
use wgpu::naga::{self, ShaderStage};

/// A shader stage that failed to parse or validate.
///
/// `diagnostic` carries the full annotated log so the caller can print it
/// before aborting.
#[derive(Debug, Error)]
#[error("{stage:?} shader failed to compile:\n{diagnostic}")]
pub struct ShaderCompileError {
    pub stage: ShaderStage,
    pub diagnostic: String,
}

/// Parses and validates GLSL `source` for `stage` without touching a device.
pub fn validate(stage: ShaderStage, source: &str) -> Result<naga::Module, ShaderCompileError> {
    let mut frontend = naga::front::glsl::Frontend::default();
    let module = frontend
        .parse(&naga::front::glsl::Options::from(stage), source)
        .map_err(|errors| ShaderCompileError {
            stage,
            diagnostic: errors.emit_to_string(source),
        })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|err| ShaderCompileError {
        stage,
        diagnostic: err.emit_to_string(source),
    })?;

    Ok(module)
}

/// Compiles the static full-screen triangle vertex shader.
pub(crate) fn compile_vertex_shader(
    device: &wgpu::Device,
) -> Result<wgpu::ShaderModule, ShaderCompileError> {
    compile(device, "tilescroll vertex", ShaderStage::Vertex, VERTEX_SHADER_GLSL)
}

/// Compiles the band-scroll fragment program.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
) -> Result<wgpu::ShaderModule, ShaderCompileError> {
    compile(
        device,
        "tilescroll fragment",
        ShaderStage::Fragment,
        FRAGMENT_SHADER_GLSL,
    )
}

fn compile(
    device: &wgpu::Device,
    label: &str,
    stage: ShaderStage,
    source: &'static str,
) -> Result<wgpu::ShaderModule, ShaderCompileError> {
    if let Err(err) = validate(stage, source) {
        tracing::error!(?stage, "{}", err.diagnostic);
        return Err(err);
    }
    tracing::debug!(?stage, "shader validated");

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage,
            defines: &[],
        },
    }))
}

/// Minimal full-screen triangle vertex shader.
pub const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec2 v_uv;

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    uint vertex_index = uint(gl_VertexIndex);
    vec2 pos = positions[vertex_index];
    v_uv = pos * 0.5 + vec2(0.5, 0.5);
    gl_Position = vec4(pos, 0.0, 1.0);
}
";

/// Per-pixel band scroll and duotone.
///
/// The uniform block layout must match `EffectUniforms` in `gpu/uniforms.rs`.
/// `gl_FragCoord` is top-left in wgpu, so the canvas-local coordinate is
/// flipped into a bottom-left frame before the usual `uv.y = 1 - uv.y`.
pub const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform EffectParams {
    vec2 _resolution;
    vec2 _mouse;
    vec2 _origin;
    float _time;
    float _seed;
} ubo;

#define u_resolution ubo._resolution
#define u_mouse ubo._mouse
#define u_origin ubo._origin
#define u_time ubo._time
#define u_seed ubo._seed

layout(set = 1, binding = 0) uniform texture2D u_image_texture;
layout(set = 1, binding = 1) uniform sampler u_image_sampler;

const vec3 ACCENT = vec3(0.988, 0.078, 0.031);
const vec3 LUMA = vec3(0.2126, 0.7152, 0.0722);
const float LUMINANCE_THRESHOLD = 0.367;
const float FREEZE_EDGE = 0.97;
const float MAX_BANDS = 300.0;
const float POWER_CURVE = 0.72;
const float CENTER_BRIGHTNESS = 0.5;
const float COLORIZE = 0.0;

float random(float x) {
    return fract(sin(x) * 43758.5453);
}

float area_count(float mouse_pos) {
    float position = clamp(mouse_pos, 0.0, 1.0);
    return floor(MAX_BANDS * (1.0 - position)) + 1.0;
}

float find_area_number(float n, float mouse_pos) {
    float count = area_count(mouse_pos);
    float area_offset = 1.0 / count;
    float lower_bound = max(floor(n / area_offset), 0.0);
    float upper_bound = min(ceil(n / area_offset), count);

    if (n >= area_offset * lower_bound && n <= area_offset * (lower_bound + 1.0)) {
        return lower_bound;
    }
    if (n >= area_offset * upper_bound && n <= area_offset * (upper_bound + 1.0)) {
        return upper_bound;
    }
    return -1.0;
}

float direction(float band) {
    if (random(band) > 0.3) {
        return 1.0;
    }
    return -1.0;
}

vec3 rgb_to_hsv(vec3 c) {
    vec4 K = vec4(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    vec4 p = c.g < c.b ? vec4(c.bg, K.wz) : vec4(c.gb, K.xy);
    vec4 q = c.r < p.x ? vec4(p.xyw, c.r) : vec4(c.r, p.yzx);
    float d = q.x - min(q.w, q.y);
    float e = 1.0e-10;
    return vec3(abs(q.z + (q.w - q.y) / (6.0 * d + e)), d / (q.x + e), q.x);
}

vec3 hsv_to_rgb(vec3 c) {
    vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(c.xxx + K.xyz) * 6.0 - K.www);
    return c.z * mix(K.xxx, clamp(p - K.xxx, 0.0, 1.0), c.y);
}

vec3 inverted_color(vec3 color) {
    vec3 hsv = rgb_to_hsv(color);
    hsv.z = pow(hsv.z, POWER_CURVE);
    if (hsv.z < CENTER_BRIGHTNESS) {
        hsv.z = 1.0 - hsv.z / CENTER_BRIGHTNESS;
    } else {
        hsv.z = (hsv.z - CENTER_BRIGHTNESS) / CENTER_BRIGHTNESS;
    }
    hsv.y = hsv.y * hsv.z * COLORIZE;
    return hsv_to_rgb(hsv);
}

vec3 orange_color(vec3 color, float seed) {
    float luminance = dot(color, LUMA);
    float flip = step(seed, 0.0);
    float bright = mix(1.0, 0.0, flip);
    float dark = mix(0.0, 1.0, flip);
    float tone = mix(bright, dark, step(LUMINANCE_THRESHOLD, luminance));
    if (tone == 0.0) {
        return ACCENT;
    }
    return vec3(tone);
}

void main() {
    vec2 local = gl_FragCoord.xy - u_origin;
    if (local.x < 0.0 || local.y < 0.0 || local.x >= u_resolution.x || local.y >= u_resolution.y) {
        outColor = vec4(0.0, 0.0, 0.0, 1.0);
        return;
    }

    vec2 frag_coord = vec2(local.x, u_resolution.y - local.y);
    vec2 uv = frag_coord / u_resolution;
    uv.y = 1.0 - uv.y;

    float band_x = find_area_number(uv.x, u_mouse.x);
    float band_y = find_area_number(uv.y, u_mouse.y);
    float random_x = random(band_x);
    float random_y = random(band_y);

    if (band_x > 0.0 && u_mouse.x < FREEZE_EDGE) {
        uv.y = mod(uv.y - u_time * direction(band_x) * 0.2 * (random_x + 0.4), 1.0);
    }
    if (band_y > 0.0 && u_mouse.y < FREEZE_EDGE) {
        uv.x = mod(uv.x - u_time * direction(band_y) * 0.3 * (random_y + 0.3), 1.0);
    }

    vec3 color = texture(sampler2D(u_image_texture, u_image_sampler), uv).rgb;
    outColor = vec4(orange_color(inverted_color(color), u_seed), 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_shader_validates() {
        let module = validate(ShaderStage::Vertex, VERTEX_SHADER_GLSL).unwrap();
        assert_eq!(module.entry_points.len(), 1);
    }

    #[test]
    fn fragment_shader_validates() {
        let module = validate(ShaderStage::Fragment, FRAGMENT_SHADER_GLSL).unwrap();
        assert_eq!(module.entry_points[0].stage, ShaderStage::Fragment);
    }

    #[test]
    fn fragment_shader_declares_effect_uniforms() {
        for name in ["_resolution", "_mouse", "_origin", "_time", "_seed"] {
            assert!(FRAGMENT_SHADER_GLSL.contains(name), "missing {name}");
        }
    }

    #[test]
    fn hsv_conversion_uses_branch_selects() {
        assert!(FRAGMENT_SHADER_GLSL.contains("c.g < c.b ? vec4(c.bg, K.wz) : vec4(c.gb, K.xy)"));
        assert!(FRAGMENT_SHADER_GLSL.contains("c.r < p.x ? vec4(p.xyw, c.r) : vec4(c.r, p.yzx)"));
    }

    #[test]
    fn broken_source_reports_diagnostic() {
        let source = "#version 450\nvoid main() { undefined_call(); }\n";
        let err = validate(ShaderStage::Fragment, source).unwrap_err();
        assert_eq!(err.stage, ShaderStage::Fragment);
        assert!(!err.diagnostic.is_empty());
    }
}
