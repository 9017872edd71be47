use depthfx_core::{EffectKind, KernelMapping, Result, ShaderError, TapStaging};

use crate::templates::*;

/// What a separable blur accumulates per tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulation {
    /// `fragColor += texture(..)*w`
    Rgba,
    /// `fragColor += vec4(texture(..).rgb*w, 1.0)`; alpha saturates.
    RgbOpaque,
    /// `color += texture(..).r*w`, written out as gray.
    Red,
}

/// Shape of a generated separable blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurLayout {
    pub mapping: KernelMapping,
    pub staging: TapStaging,
    pub accumulation: Accumulation,
    /// Scale every tap offset by a per-fragment factor read from `depthTex`.
    pub depth_gated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Fixed {
        vertex: &'static str,
        fragment: &'static str,
    },
    SeparableBlur(BlurLayout),
}

/// One row of the registry: the template and every name the caller binds.
pub struct EffectEntry {
    pub kind: EffectKind,
    pub name: &'static str,
    /// Sampler uniforms, in texture-unit order.
    pub samplers: &'static [&'static str],
    /// Non-sampler uniforms.
    pub uniforms: &'static [&'static str],
    pub template: Template,
}

impl EffectEntry {
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn blur_layout(&self) -> Option<&BlurLayout> {
        match &self.template {
            Template::SeparableBlur(layout) => Some(layout),
            Template::Fixed { .. } => None,
        }
    }
}

const fn fixed(fragment: &'static str) -> Template {
    Template::Fixed {
        vertex: PASSTHROUGH_VERTEX,
        fragment,
    }
}

/// All available effects, one entry per [`EffectKind`].
pub static REGISTRY: [EffectEntry; 23] = [
    // ── Depth ─────────────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::DepthVisualize,
        name: "Depth",
        samplers: &["tex0"],
        uniforms: &["minEdge", "maxEdge"],
        template: fixed(DEPTH_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::DepthMask,
        name: "Depth Mask",
        samplers: &["tex0"],
        uniforms: &["minEdge", "maxEdge"],
        template: fixed(DEPTH_MASK_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::BackgroundSubtract,
        name: "Background Subtraction",
        samplers: &["tex0", "bgTex"],
        uniforms: &["tolerance"],
        template: fixed(BACKGROUND_SUBTRACT_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::CloudDepth,
        name: "Point Cloud Depth",
        samplers: &[],
        uniforms: &["minEdge", "maxEdge", "scale"],
        template: Template::Fixed {
            vertex: CLOUD_VERTEX,
            fragment: CLOUD_FRAGMENT,
        },
    },
    // ── Masking ───────────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::Mask,
        name: "Mask",
        samplers: &["tex0", "maskTex"],
        uniforms: &[],
        template: fixed(MASK_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::InverseMask,
        name: "Inverse Mask",
        samplers: &["tex0", "maskTex"],
        uniforms: &[],
        template: fixed(INVERSE_MASK_FRAGMENT),
    },
    // ── Color ─────────────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::ColorToGray,
        name: "Color to Gray",
        samplers: &["tex0"],
        uniforms: &[],
        template: fixed(COLOR_TO_GRAY_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Threshold,
        name: "Threshold",
        samplers: &["tex0"],
        uniforms: &["edge0", "edge1"],
        template: fixed(THRESHOLD_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Hsl,
        name: "HSL",
        samplers: &["tex0"],
        uniforms: &["hue", "sat", "offset"],
        template: fixed(HSL_FRAGMENT),
    },
    // ── Blur ──────────────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::FastBlur,
        name: "Fast Blur",
        samplers: &["tex0"],
        uniforms: &["dir"],
        template: Template::SeparableBlur(BlurLayout {
            mapping: KernelMapping::OffByOne,
            staging: TapStaging::Vertex,
            accumulation: Accumulation::Rgba,
            depth_gated: false,
        }),
    },
    EffectEntry {
        kind: EffectKind::Blur,
        name: "Blur",
        samplers: &["tex0"],
        uniforms: &["dir"],
        template: Template::SeparableBlur(BlurLayout {
            mapping: KernelMapping::Centered,
            staging: TapStaging::Fragment,
            accumulation: Accumulation::RgbOpaque,
            depth_gated: false,
        }),
    },
    EffectEntry {
        kind: EffectKind::DepthBlur,
        name: "Depth Blur",
        samplers: &["tex0"],
        uniforms: &["dir"],
        template: Template::SeparableBlur(BlurLayout {
            mapping: KernelMapping::Centered,
            staging: TapStaging::Fragment,
            accumulation: Accumulation::Red,
            depth_gated: false,
        }),
    },
    EffectEntry {
        kind: EffectKind::VarDepthBlur,
        name: "Variable Depth Blur",
        samplers: &["tex0", "depthTex"],
        uniforms: &["dir", "scale", "offset"],
        template: Template::SeparableBlur(BlurLayout {
            mapping: KernelMapping::OffByOne,
            staging: TapStaging::Fragment,
            accumulation: Accumulation::Rgba,
            depth_gated: true,
        }),
    },
    // ── Compositing ───────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::Screen,
        name: "Screen",
        samplers: &["tex0", "tex1"],
        uniforms: &[],
        template: fixed(SCREEN_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::ScreenMultiple,
        name: "Screen Multiple",
        samplers: &["tex0", "tex1", "tex2", "tex3", "tex4"],
        uniforms: &["mask"],
        template: fixed(SCREEN_MULTIPLE_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Blend,
        name: "Blend",
        samplers: &["tex0", "tex1"],
        uniforms: &["alpha"],
        template: fixed(BLEND_FRAGMENT),
    },
    // ── Temporal ──────────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::Echo,
        name: "Echo",
        samplers: &["tex0", "tex1"],
        uniforms: &["alpha"],
        template: fixed(ECHO_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Strobe,
        name: "Strobe",
        samplers: &["tex0", "tex1", "tex2"],
        uniforms: &["frameNum", "strobeRate", "decay"],
        template: fixed(STROBE_FRAGMENT),
    },
    // ── Stylization ───────────────────────────────────────────
    EffectEntry {
        kind: EffectKind::Border,
        name: "Border",
        samplers: &["tex0"],
        uniforms: &[],
        template: fixed(BORDER_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Dilation,
        name: "Dilation",
        samplers: &["tex0"],
        uniforms: &[],
        template: fixed(DILATION_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Halftone,
        name: "Halftone",
        samplers: &["tex0"],
        uniforms: &["scale", "rotation"],
        template: fixed(HALFTONE_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Kuwahara,
        name: "Kuwahara",
        samplers: &["tex0"],
        uniforms: &["radius"],
        template: fixed(KUWAHARA_FRAGMENT),
    },
    EffectEntry {
        kind: EffectKind::Kuwahara3,
        name: "Kuwahara (radius 3)",
        samplers: &["tex0"],
        uniforms: &[],
        template: fixed(KUWAHARA3_FRAGMENT),
    },
];

/// Look up the registry row for `kind`.
pub fn entry(kind: EffectKind) -> Result<&'static EffectEntry> {
    REGISTRY
        .iter()
        .find(|e| e.kind == kind)
        .ok_or_else(|| ShaderError::UnsupportedEffect(kind.id().to_string()))
}
