use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{Result, ShaderError};

/// Largest accepted kernel radius. Every tap becomes one unrolled GLSL statement.
pub const MAX_RADIUS: i32 = 256;

/// How tap indices `0..=2*radius` are spread over the Gaussian's `[-1, 1]` domain.
///
/// Both variants are in use by different blur effects and produce different
/// weights, so neither is a drop-in replacement for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KernelMapping {
    /// Remaps `[0, radius - 1]` onto `[-1, 1]`. Indices past `radius - 1`
    /// land outside the domain, so the kernel leans towards negative offsets.
    OffByOne,
    /// Remaps `[0, 2 * radius]` onto `[-1, 1]`. Exactly symmetric.
    Centered,
}

impl KernelMapping {
    /// Upper end of the index range that maps onto `+1`.
    fn index_upper(&self, radius: i32) -> f64 {
        match self {
            KernelMapping::OffByOne => f64::from(radius) - 1.0,
            KernelMapping::Centered => 2.0 * f64::from(radius),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KernelMapping::OffByOne => "Off-by-one",
            KernelMapping::Centered => "Centered",
        }
    }
}

/// A normalized 1-D Gaussian kernel of `2 * radius + 1` taps.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelCoefficients {
    taps: Vec<f64>,
    radius: i32,
    variance: f64,
    mapping: KernelMapping,
}

impl KernelCoefficients {
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn mapping(&self) -> KernelMapping {
        self.mapping
    }

    pub fn sum(&self) -> f64 {
        self.taps.iter().sum()
    }

    /// Weight of the middle tap (offset zero).
    pub fn center(&self) -> f64 {
        self.taps[self.radius as usize]
    }

    /// Signed sample offset of tap `index`, in units of the blur direction.
    pub fn offset_of(&self, index: usize) -> i32 {
        index as i32 - self.radius
    }

    /// True when `taps[i]` and `taps[len - 1 - i]` agree within `tolerance` for every `i`.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.taps
            .iter()
            .zip(self.taps.iter().rev())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.taps.iter().copied().enumerate()
    }
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`, unclamped.
///
/// A degenerate input range (narrower than `f32::EPSILON`) yields `out_min`.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if (in_max - in_min).abs() < f64::from(f32::EPSILON) {
        return out_min;
    }
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Normal density with zero mean.
pub fn gaussian(x: f64, variance: f64) -> f64 {
    (1.0 / (TAU * variance).sqrt()) * (-(x * x) / (2.0 * variance)).exp()
}

/// Sample and normalize a Gaussian kernel.
///
/// Radius 0 always yields the single tap `[1.0]`.
pub fn gaussian_coefficients(
    radius: i32,
    variance: f64,
    mapping: KernelMapping,
) -> Result<KernelCoefficients> {
    if !(0..=MAX_RADIUS).contains(&radius) {
        return Err(ShaderError::InvalidParameter(format!(
            "kernel radius must be in 0..={MAX_RADIUS}, got {radius}"
        )));
    }
    if !variance.is_finite() || variance <= 0.0 {
        return Err(ShaderError::InvalidParameter(format!(
            "kernel variance must be a positive finite number, got {variance}"
        )));
    }

    let upper = mapping.index_upper(radius);
    let mut taps: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = remap(f64::from(i), 0.0, upper, -1.0, 1.0);
            gaussian(x, variance)
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    // Every sample can underflow to zero for extreme variances.
    if !(sum.is_finite() && sum > 0.0) {
        return Err(ShaderError::InvalidParameter(format!(
            "kernel variance {variance} leaves no usable weight at radius {radius} ({})",
            mapping.name()
        )));
    }
    for tap in taps.iter_mut() {
        *tap /= sum;
    }

    Ok(KernelCoefficients {
        taps,
        radius,
        variance,
        mapping,
    })
}
