use depthfx_core::{
    gaussian_coefficients, BlurParameters, EffectKind, GeneratedShader, Result, ShaderCompiler,
    ShaderError, ShaderSource,
};

use crate::blur::emit_separable_blur;
use crate::registry::{entry, Template};

/// Build the GLSL for `kind`.
///
/// Blur effects require `blur` with a radius of at least 1; every other effect
/// must be called without it. Nothing is returned unless generation succeeds.
pub fn generate(kind: EffectKind, blur: Option<BlurParameters>) -> Result<GeneratedShader> {
    let entry = entry(kind)?;

    let shader = match (&entry.template, blur) {
        (Template::Fixed { vertex, fragment }, None) => GeneratedShader {
            kind,
            source: ShaderSource::new(*vertex, *fragment),
            kernel: None,
        },
        (Template::Fixed { .. }, Some(_)) => {
            return Err(ShaderError::InvalidParameter(format!(
                "{kind} takes no blur parameters"
            )));
        }
        (Template::SeparableBlur(_), None) => {
            return Err(ShaderError::InvalidParameter(format!(
                "{kind} requires a blur radius and variance"
            )));
        }
        (Template::SeparableBlur(layout), Some(params)) => {
            if params.radius < 1 {
                return Err(ShaderError::InvalidParameter(format!(
                    "{kind} needs a radius of at least 1, got {}",
                    params.radius
                )));
            }
            let mapping = params.mapping.unwrap_or(layout.mapping);
            let staging = params.staging.unwrap_or(layout.staging);
            let kernel = gaussian_coefficients(params.radius, params.variance, mapping)?;
            GeneratedShader {
                kind,
                source: emit_separable_blur(layout, staging, &kernel),
                kernel: Some(kernel),
            }
        }
    };

    log::debug!(
        "Generated {} shader: {} taps, vertex {} bytes, fragment {} bytes",
        kind,
        shader.kernel.as_ref().map_or(0, |k| k.len()),
        shader.source.vertex.len(),
        shader.source.fragment.len(),
    );
    log::trace!(
        "{} vertex:\n{}\n{} fragment:\n{}",
        kind,
        shader.source.vertex,
        kind,
        shader.source.fragment
    );

    Ok(shader)
}

/// [`generate`] by configuration id, e.g. `"fastBlur"`.
pub fn generate_by_id(id: &str, blur: Option<BlurParameters>) -> Result<GeneratedShader> {
    generate(EffectKind::from_id(id)?, blur)
}

/// Generate `kind` and hand it to `compiler`. Compiler errors are returned as-is.
pub fn build_program<C: ShaderCompiler>(
    compiler: &C,
    kind: EffectKind,
    blur: Option<BlurParameters>,
) -> Result<C::Program> {
    let shader = generate(kind, blur)?;
    compiler.compile(&shader.source).inspect_err(|e| {
        log::warn!("Building {kind} failed: {e}");
    })
}
