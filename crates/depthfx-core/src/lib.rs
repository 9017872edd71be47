pub mod effect;
pub mod error;
pub mod kernel;
pub mod source;

pub use effect::{BlurParameters, EffectKind, TapStaging};
pub use error::{Result, ShaderError, ShaderStage};
pub use kernel::{gaussian_coefficients, KernelCoefficients, KernelMapping, MAX_RADIUS};
pub use source::{GeneratedShader, ShaderCompiler, ShaderSource};
