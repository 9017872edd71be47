//! Fixed GLSL templates.
//!
//! Everything targets `#version 150` core profile. Attribute names
//! (`position`, `texcoord`) and `modelViewProjectionMatrix` follow the host
//! renderer's default bindings.

/// Prefix a template body with the shared version header.
macro_rules! glsl {
    ($($body:tt)+) => {
        concat!("#version 150\n", $($body)+)
    };
}

/// Body of the four-quadrant Kuwahara filter. Expects `radius` declared above it.
macro_rules! kuwahara_body {
    () => {
        r#"
in vec2 texCoordVarying;
out vec4 fragColor;

void quadrant(ivec2 lo, ivec2 hi, vec2 texel, inout float minSigma, inout vec3 color) {
    vec3 m = vec3(0.0);
    vec3 s = vec3(0.0);
    for (int j = lo.y; j <= hi.y; ++j) {
        for (int i = lo.x; i <= hi.x; ++i) {
            vec3 c = texture(tex0, texCoordVarying + vec2(i, j) * texel).rgb;
            m += c;
            s += c * c;
        }
    }
    float n = float((hi.x - lo.x + 1) * (hi.y - lo.y + 1));
    m /= n;
    s = abs(s / n - m * m);
    float sigma = s.r + s.g + s.b;
    if (sigma < minSigma) {
        minSigma = sigma;
        color = m;
    }
}

void main(void) {
    vec2 texel = 1.0 / vec2(textureSize(tex0, 0));
    float minSigma = 1e20;
    vec3 color = vec3(0.0);
    quadrant(ivec2(-radius, -radius), ivec2(0, 0), texel, minSigma, color);
    quadrant(ivec2(0, -radius), ivec2(radius, 0), texel, minSigma, color);
    quadrant(ivec2(0, 0), ivec2(radius, radius), texel, minSigma, color);
    quadrant(ivec2(-radius, 0), ivec2(0, radius), texel, minSigma, color);
    fragColor = vec4(color, 1.0);
}
"#
    };
}

pub const GLSL_VERSION: &str = "#version 150\n";

// ── Shared vertex stage ─────────────────────────────────────────────

pub const PASSTHROUGH_VERTEX: &str = glsl!(
    r#"
uniform mat4 modelViewProjectionMatrix;
in vec4 position;
in vec2 texcoord;

out vec2 texCoordVarying;

void main() {
    texCoordVarying = texcoord;
    gl_Position = modelViewProjectionMatrix * position;
}
"#
);

// ── Depth ───────────────────────────────────────────────────────────

pub const DEPTH_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform float minEdge;
uniform float maxEdge;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    float d = texture(tex0, texCoordVarying).r;
    float dist = (d - minEdge) / (maxEdge - minEdge);
    float color = (1.0 - dist) * (step(minEdge, d) - step(maxEdge, d));
    fragColor = vec4(vec3(color), 1.0);
}
"#
);

pub const DEPTH_MASK_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform float minEdge;
uniform float maxEdge;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    float d = texture(tex0, texCoordVarying).r;
    float color = step(minEdge, d) - step(maxEdge, d);
    fragColor = vec4(vec3(color), 1.0);
}
"#
);

pub const BACKGROUND_SUBTRACT_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D bgTex;
uniform float tolerance;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    float c = texture(tex0, texCoordVarying).r;
    float bg = texture(bgTex, texCoordVarying).r;
    bool keep = abs(c - bg) > tolerance;
    fragColor = vec4(vec3(mix(0.0, c, keep)), 1.0);
}
"#
);

pub const CLOUD_VERTEX: &str = glsl!(
    r#"
uniform mat4 modelViewProjectionMatrix;
in vec4 position;

out float depth;

void main() {
    gl_Position = modelViewProjectionMatrix * position;
    depth = gl_Position.z;
}
"#
);

pub const CLOUD_FRAGMENT: &str = glsl!(
    r#"
uniform float minEdge;
uniform float maxEdge;
// clip-space depth to [0, 1], typically 1/100000
uniform float scale;

in float depth;
out vec4 fragColor;

void main(void) {
    float d = depth * scale;
    float dist = (d - minEdge) / (maxEdge - minEdge);
    float color = (1.0 - dist) * (step(minEdge, d) - step(maxEdge, d));
    fragColor = vec4(vec3(color), 1.0);
}
"#
);

// ── Masking ─────────────────────────────────────────────────────────

pub const MASK_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D maskTex;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    fragColor = vec4(texture(tex0, texCoordVarying).rgb, texture(maskTex, texCoordVarying).r);
}
"#
);

pub const INVERSE_MASK_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D maskTex;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    fragColor = vec4(texture(tex0, texCoordVarying).rgb, 1.0 - texture(maskTex, texCoordVarying).r);
}
"#
);

// ── Color ───────────────────────────────────────────────────────────

pub const COLOR_TO_GRAY_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    fragColor = vec4(vec3(dot(texture(tex0, texCoordVarying).rgb, vec3(0.299, 0.587, 0.114))), 1.0);
}
"#
);

pub const THRESHOLD_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform float edge0;
uniform float edge1;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    float c = texture(tex0, texCoordVarying).r;
    fragColor = vec4(vec3(smoothstep(edge0, edge1, c) * c), 1.0);
}
"#
);

/// Colorizes a gray input: the red channel is lightness, `hue` in [0, 1].
pub const HSL_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform float hue;
uniform float sat;
uniform float offset;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    float l = texture(tex0, texCoordVarying).r + offset;
    float c = (1.0 - abs(2.0 * l - 1.0)) * sat;

    vec3 y;
    y.r = abs(hue * 6.0 - 3.0) - 1.0;
    y.g = 2.0 - abs(hue * 6.0 - 2.0);
    y.b = 2.0 - abs(hue * 6.0 - 4.0);
    fragColor = vec4((clamp(y, 0.0, 1.0) - 0.5) * c + l, 1.0);
}
"#
);

// ── Compositing ─────────────────────────────────────────────────────

pub const SCREEN_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D tex1;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    vec4 col0 = texture(tex0, texCoordVarying);
    vec4 col1 = texture(tex1, texCoordVarying);
    fragColor = 1.0 - (1.0 - col0) * (1.0 - col1);
}
"#
);

/// Bit `i` of `mask` enables `tex{i}`; disabled inputs contribute black.
pub const SCREEN_MULTIPLE_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D tex1;
uniform sampler2D tex2;
uniform sampler2D tex3;
uniform sampler2D tex4;
uniform int mask;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    vec3 col0 = mix(vec3(0.0), texture(tex0, texCoordVarying).rgb, bvec3(mask & 1));
    vec3 col1 = mix(vec3(0.0), texture(tex1, texCoordVarying).rgb, bvec3(mask & (1 << 1)));
    vec3 col2 = mix(vec3(0.0), texture(tex2, texCoordVarying).rgb, bvec3(mask & (1 << 2)));
    vec3 col3 = mix(vec3(0.0), texture(tex3, texCoordVarying).rgb, bvec3(mask & (1 << 3)));
    vec3 col4 = mix(vec3(0.0), texture(tex4, texCoordVarying).rgb, bvec3(mask & (1 << 4)));
    vec3 color = 1.0 - (1.0 - col0) * (1.0 - col1) * (1.0 - col2) * (1.0 - col3) * (1.0 - col4);
    fragColor = vec4(color, 1.0);
}
"#
);

pub const BLEND_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D tex1;
uniform float alpha;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    vec4 base = texture(tex0, texCoordVarying);
    vec4 top = texture(tex1, texCoordVarying);
    fragColor = vec4(mix(base.rgb, top.rgb, top.a * alpha), 1.0);
}
"#
);

// ── Temporal ────────────────────────────────────────────────────────

pub const ECHO_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform sampler2D tex1;
uniform float alpha;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    fragColor = vec4(mix(texture(tex0, texCoordVarying).rgb, texture(tex1, texCoordVarying).rgb, alpha), 1.0);
}
"#
);

/// `tex0` is the live frame, `tex1` / `tex2` the previous value and hue targets.
pub const STROBE_FRAGMENT: &str = glsl!(
    r#"#extension GL_ARB_explicit_attrib_location : enable
uniform sampler2D tex0;
uniform sampler2D tex1;
uniform sampler2D tex2;

uniform int frameNum;
uniform int strobeRate;
uniform float decay;

in vec2 texCoordVarying;
layout (location = 1) out float fragColor;
layout (location = 0) out float fragHue;

void main(void) {
    float c = texture(tex0, texCoordVarying).r;
    float s1 = texture(tex1, texCoordVarying).r;
    float s2 = texture(tex2, texCoordVarying).r;
    bool f = (frameNum % strobeRate) == 0;

    fragColor = mix(s1 * decay, float(f) * c, f && c > 0.0);
    fragHue = mix(s2, float(frameNum / 10 % 256) / 255.0, f && c > 0.0);
}
"#
);

// ── Stylization ─────────────────────────────────────────────────────

/// Marks masked texels (red > 0.5) that touch an unmasked 4-neighbour.
pub const BORDER_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;

in vec2 texCoordVarying;
out vec4 fragColor;

float inside(vec2 uv) {
    return step(0.5, texture(tex0, uv).r);
}

void main(void) {
    vec2 texel = 1.0 / vec2(textureSize(tex0, 0));
    float c = inside(texCoordVarying);
    float l = inside(texCoordVarying - vec2(texel.x, 0.0));
    float r = inside(texCoordVarying + vec2(texel.x, 0.0));
    float d = inside(texCoordVarying - vec2(0.0, texel.y));
    float u = inside(texCoordVarying + vec2(0.0, texel.y));
    float edge = c * (1.0 - min(min(l, r), min(d, u)));
    fragColor = vec4(vec3(edge), 1.0);
}
"#
);

pub const DILATION_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    vec2 texel = 1.0 / vec2(textureSize(tex0, 0));
    vec4 m = vec4(0.0);
    for (int y = -1; y <= 1; ++y) {
        for (int x = -1; x <= 1; ++x) {
            m = max(m, texture(tex0, texCoordVarying + vec2(x, y) * texel));
        }
    }
    fragColor = m;
}
"#
);

/// Dot screen: `scale` is the cell size in pixels, `rotation` the screen angle in radians.
pub const HALFTONE_FRAGMENT: &str = glsl!(
    r#"
uniform sampler2D tex0;
uniform float scale;
uniform float rotation;

in vec2 texCoordVarying;
out vec4 fragColor;

void main(void) {
    vec2 size = vec2(textureSize(tex0, 0));
    float s = sin(rotation);
    float c = cos(rotation);
    mat2 rot = mat2(c, -s, s, c);

    vec2 grid = rot * (texCoordVarying * size) / scale;
    vec2 cell = floor(grid) + 0.5;
    vec2 cellUv = (transpose(rot) * (cell * scale)) / size;

    float lum = dot(texture(tex0, cellUv).rgb, vec3(0.299, 0.587, 0.114));
    float dotRadius = sqrt(1.0 - lum) * 0.5;
    float aa = 1.0 / scale;
    float ink = 1.0 - smoothstep(dotRadius - aa, dotRadius + aa, length(grid - cell));
    fragColor = vec4(vec3(1.0 - ink), 1.0);
}
"#
);

pub const KUWAHARA_FRAGMENT: &str = glsl!(
    "uniform sampler2D tex0;\nuniform int radius;\n",
    kuwahara_body!()
);

pub const KUWAHARA3_FRAGMENT: &str = glsl!(
    "uniform sampler2D tex0;\nconst int radius = 3;\n",
    kuwahara_body!()
);

// ── Separable blur fragments (tap statements are generated) ─────────

pub const FAST_BLUR_VERTEX_HEADER: &str = glsl!(
    r#"
uniform mat4 modelViewProjectionMatrix;
uniform vec2 dir;
in vec4 position;
in vec2 texcoord;
"#
);
