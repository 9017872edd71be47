use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShaderError};
use crate::kernel::KernelMapping;

/// Every shader variant the pipeline knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    DepthVisualize,
    DepthMask,
    BackgroundSubtract,
    Mask,
    InverseMask,
    ColorToGray,
    FastBlur,
    DepthBlur,
    Blur,
    VarDepthBlur,
    Threshold,
    Screen,
    ScreenMultiple,
    Blend,
    Hsl,
    Echo,
    Strobe,
    CloudDepth,
    Border,
    Dilation,
    Halftone,
    Kuwahara,
    Kuwahara3,
}

impl EffectKind {
    pub const ALL: [EffectKind; 23] = [
        EffectKind::DepthVisualize,
        EffectKind::DepthMask,
        EffectKind::BackgroundSubtract,
        EffectKind::Mask,
        EffectKind::InverseMask,
        EffectKind::ColorToGray,
        EffectKind::FastBlur,
        EffectKind::DepthBlur,
        EffectKind::Blur,
        EffectKind::VarDepthBlur,
        EffectKind::Threshold,
        EffectKind::Screen,
        EffectKind::ScreenMultiple,
        EffectKind::Blend,
        EffectKind::Hsl,
        EffectKind::Echo,
        EffectKind::Strobe,
        EffectKind::CloudDepth,
        EffectKind::Border,
        EffectKind::Dilation,
        EffectKind::Halftone,
        EffectKind::Kuwahara,
        EffectKind::Kuwahara3,
    ];

    /// Stable identifier used in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            EffectKind::DepthVisualize => "depth",
            EffectKind::DepthMask => "depthMask",
            EffectKind::BackgroundSubtract => "backgroundSubtract",
            EffectKind::Mask => "mask",
            EffectKind::InverseMask => "inverseMask",
            EffectKind::ColorToGray => "colorToGray",
            EffectKind::FastBlur => "fastBlur",
            EffectKind::DepthBlur => "depthBlur",
            EffectKind::Blur => "blur",
            EffectKind::VarDepthBlur => "varDepthBlur",
            EffectKind::Threshold => "threshold",
            EffectKind::Screen => "screen",
            EffectKind::ScreenMultiple => "screenMultiple",
            EffectKind::Blend => "blend",
            EffectKind::Hsl => "hsl",
            EffectKind::Echo => "echo",
            EffectKind::Strobe => "strobe",
            EffectKind::CloudDepth => "cloud",
            EffectKind::Border => "border",
            EffectKind::Dilation => "dilation",
            EffectKind::Halftone => "halftone",
            EffectKind::Kuwahara => "kuwahara",
            EffectKind::Kuwahara3 => "kuwahara3",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| ShaderError::UnsupportedEffect(id.to_string()))
    }

    /// Separable blurs need a [`BlurParameters`] to build.
    pub fn is_blur(&self) -> bool {
        matches!(
            self,
            EffectKind::FastBlur | EffectKind::DepthBlur | EffectKind::Blur | EffectKind::VarDepthBlur
        )
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EffectKind {
    type Err = ShaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s)
    }
}

/// Where the per-tap sampling offsets of a separable blur are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TapStaging {
    /// Once per vertex, passed down as an array of `2 * radius + 1` varyings.
    Vertex,
    /// Once per tap in the fragment stage, from a single varying.
    Fragment,
}

/// Kernel shape for a separable blur.
///
/// `mapping` and `staging` fall back to the effect's registered defaults when unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurParameters {
    pub radius: i32,
    pub variance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<KernelMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging: Option<TapStaging>,
}

impl BlurParameters {
    pub fn new(radius: i32, variance: f64) -> Self {
        Self {
            radius,
            variance,
            mapping: None,
            staging: None,
        }
    }

    pub fn with_mapping(mut self, mapping: KernelMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_staging(mut self, staging: TapStaging) -> Self {
        self.staging = Some(staging);
        self
    }

    pub fn tap_count(&self) -> usize {
        (2 * i64::from(self.radius.max(0)) + 1) as usize
    }
}
