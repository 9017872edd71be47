use crate::effect::EffectKind;
use crate::error::Result;
use crate::kernel::KernelCoefficients;

/// Vertex and fragment GLSL text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Output of a single build call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedShader {
    pub kind: EffectKind,
    pub source: ShaderSource,
    /// The weights baked into the text. Only blur effects carry one.
    pub kernel: Option<KernelCoefficients>,
}

/// The graphics-API side that turns source text into a linked program.
///
/// Implementations compile both stages, bind the default vertex attribute
/// locations and link. Failures come back as `CompileError` / `LinkError`
/// with the driver's log untouched.
pub trait ShaderCompiler {
    type Program;

    fn compile(&self, source: &ShaderSource) -> Result<Self::Program>;
}
