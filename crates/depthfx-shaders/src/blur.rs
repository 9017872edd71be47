use std::fmt::Write;

use depthfx_core::{KernelCoefficients, ShaderSource, TapStaging};

use crate::registry::{Accumulation, BlurLayout};
use crate::templates::{FAST_BLUR_VERTEX_HEADER, GLSL_VERSION, PASSTHROUGH_VERTEX};

/// Write `value` as a GLSL float literal that parses back to the same `f64`.
///
/// Always carries a decimal point or an exponent so the compiler never sees an int.
pub fn glsl_float(value: f64) -> String {
    format!("{value:?}")
}

/// Where tap `index` samples from, as a GLSL `vec2` expression.
fn tap_position(layout: &BlurLayout, staging: TapStaging, kernel: &KernelCoefficients, index: usize) -> String {
    let offset = f64::from(kernel.offset_of(index));
    match (staging, layout.depth_gated) {
        (TapStaging::Fragment, false) => format!("texCoordVarying + {offset:.1} * dir"),
        (TapStaging::Fragment, true) => format!("texCoordVarying + {offset:.1} * dir*factor"),
        (TapStaging::Vertex, false) => format!("texCoordVarying[{index}]"),
        // Pull the precomputed tap towards the center by the gate factor.
        (TapStaging::Vertex, true) => format!(
            "mix(texCoordVarying[{}], texCoordVarying[{index}], factor)",
            kernel.radius()
        ),
    }
}

fn center_position(staging: TapStaging, kernel: &KernelCoefficients) -> String {
    match staging {
        TapStaging::Fragment => "texCoordVarying".to_string(),
        TapStaging::Vertex => format!("texCoordVarying[{}]", kernel.radius()),
    }
}

/// Vertex stage that writes one texture coordinate per tap.
fn staged_vertex(kernel: &KernelCoefficients) -> String {
    let mut src = String::from(FAST_BLUR_VERTEX_HEADER);
    let _ = writeln!(src, "\nout vec2 texCoordVarying[{}];\n", kernel.len());
    src.push_str("void main() {\n");
    src.push_str("    gl_Position = modelViewProjectionMatrix * position;\n");
    for (i, _) in kernel.iter() {
        let offset = f64::from(kernel.offset_of(i));
        let _ = writeln!(src, "    texCoordVarying[{i}] = texcoord + {offset:.1} * dir;");
    }
    src.push_str("}\n");
    src
}

fn fragment(layout: &BlurLayout, staging: TapStaging, kernel: &KernelCoefficients) -> String {
    let mut src = String::from(GLSL_VERSION);
    src.push_str("\nuniform sampler2D tex0;\n");
    if layout.depth_gated {
        src.push_str("uniform sampler2D depthTex;\n");
    }
    if staging == TapStaging::Fragment {
        src.push_str("uniform vec2 dir;\n");
    }
    if layout.depth_gated {
        src.push_str("uniform float scale;\nuniform float offset;\n");
    }
    match staging {
        TapStaging::Fragment => src.push_str("\nin vec2 texCoordVarying;\n"),
        TapStaging::Vertex => {
            let _ = writeln!(src, "\nin vec2 texCoordVarying[{}];", kernel.len());
        }
    }
    src.push_str("out vec4 fragColor;\n\nvoid main(void) {\n");

    match layout.accumulation {
        Accumulation::Rgba => src.push_str("    fragColor = vec4(0.0);\n"),
        Accumulation::RgbOpaque => src.push_str("    fragColor = vec4(vec3(0.0), 1.0);\n"),
        Accumulation::Red => src.push_str("    float color = 0.0;\n"),
    }

    if layout.depth_gated {
        let center = center_position(staging, kernel);
        let _ = writeln!(src, "    float dist = 1.0 - texture(depthTex, {center}).r;");
        // Hard threshold: taps collapse to the center wherever dist < offset.
        src.push_str("    float factor = min(step(offset, dist) * scale, 1.0);\n");
    }

    for (i, weight) in kernel.iter() {
        let pos = tap_position(layout, staging, kernel, i);
        let w = glsl_float(weight);
        let _ = match layout.accumulation {
            Accumulation::Rgba => writeln!(src, "    fragColor += texture(tex0, {pos})*{w};"),
            Accumulation::RgbOpaque => {
                writeln!(src, "    fragColor += vec4(texture(tex0, {pos}).rgb*{w}, 1.0);")
            }
            Accumulation::Red => writeln!(src, "    color += texture(tex0, {pos}).r*{w};"),
        };
    }

    if layout.accumulation == Accumulation::Red {
        src.push_str("    fragColor = vec4(vec3(color), 1.0);\n");
    }
    src.push_str("}\n");
    src
}

/// Unroll `kernel` into a vertex/fragment pair, one sample statement per tap.
pub fn emit_separable_blur(layout: &BlurLayout, staging: TapStaging, kernel: &KernelCoefficients) -> ShaderSource {
    let vertex = match staging {
        TapStaging::Vertex => staged_vertex(kernel),
        TapStaging::Fragment => PASSTHROUGH_VERTEX.to_string(),
    };
    ShaderSource {
        vertex,
        fragment: fragment(layout, staging, kernel),
    }
}
