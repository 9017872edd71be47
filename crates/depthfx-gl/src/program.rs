use glow::HasContext;
use std::collections::HashMap;

use depthfx_core::{
    BlurParameters, EffectKind, KernelCoefficients, Result, ShaderCompiler, ShaderError,
    ShaderSource, ShaderStage,
};
use depthfx_shaders::registry::{entry, EffectEntry};

/// Attribute locations bound before linking, matching the host renderer's
/// vertex layout.
pub const DEFAULT_ATTRIBUTES: [(u32, &str); 4] = [
    (0, "position"),
    (1, "color"),
    (2, "normal"),
    (3, "texcoord"),
];

/// Texture unit each sampler of `entry` is bound to, in declared order.
pub fn sampler_units(entry: &EffectEntry) -> impl Iterator<Item = (&'static str, u32)> + '_ {
    entry.samplers.iter().enumerate().map(|(unit, name)| (*name, unit as u32))
}

/// Compile one stage. The shader object is released on failure.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_stage(gl: &glow::Context, stage: ShaderStage, src: &str) -> Result<glow::Shader> {
    let kind = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };
    let shader = unsafe { gl.create_shader(kind) }
        .map_err(|log| ShaderError::CompileError { stage, log })?;

    unsafe {
        gl.shader_source(shader, src);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            log::warn!("{stage} shader failed to compile:\n{log}");
            return Err(ShaderError::CompileError { stage, log });
        }
    }
    Ok(shader)
}

/// Compile both stages, bind [`DEFAULT_ATTRIBUTES`] and link.
///
/// All GL objects created here are released if any step fails; on success
/// only the program handle remains for the caller to delete.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
pub unsafe fn compile_program(gl: &glow::Context, source: &ShaderSource) -> Result<glow::Program> {
    let vert = unsafe { compile_stage(gl, ShaderStage::Vertex, &source.vertex) }?;
    let frag = match unsafe { compile_stage(gl, ShaderStage::Fragment, &source.fragment) } {
        Ok(frag) => frag,
        Err(e) => {
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(log) => {
                gl.delete_shader(vert);
                gl.delete_shader(frag);
                return Err(ShaderError::LinkError { log });
            }
        };

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        for (index, name) in DEFAULT_ATTRIBUTES {
            gl.bind_attrib_location(program, index, name);
        }
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        let log = if linked { String::new() } else { gl.get_program_info_log(program) };

        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !linked {
            gl.delete_program(program);
            log::warn!("Program linking failed:\n{log}");
            return Err(ShaderError::LinkError { log });
        }
        Ok(program)
    }
}

/// [`ShaderCompiler`] over a live `glow` context.
pub struct GlCompiler<'a> {
    gl: &'a glow::Context,
}

impl<'a> GlCompiler<'a> {
    /// `gl` must be current on the calling thread for as long as this compiler is used.
    pub fn new(gl: &'a glow::Context) -> Self {
        Self { gl }
    }
}

impl ShaderCompiler for GlCompiler<'_> {
    type Program = glow::Program;

    fn compile(&self, source: &ShaderSource) -> Result<glow::Program> {
        unsafe { compile_program(self.gl, source) }
    }
}

/// A linked effect program with its uniform locations resolved by name.
pub struct EffectProgram {
    program: glow::Program,
    entry: &'static EffectEntry,
    kernel: Option<KernelCoefficients>,
    locations: HashMap<&'static str, glow::UniformLocation>,
}

impl EffectProgram {
    /// Generate, compile and link `kind`.
    pub fn new(gl: &glow::Context, kind: EffectKind, blur: Option<BlurParameters>) -> Result<Self> {
        let entry = entry(kind)?;
        let shader = depthfx_shaders::generate(kind, blur)?;
        let program = GlCompiler::new(gl).compile(&shader.source)?;

        let mut locations = HashMap::new();
        for name in entry.samplers.iter().chain(entry.uniforms.iter()) {
            match unsafe { gl.get_uniform_location(program, name) } {
                Some(loc) => {
                    locations.insert(*name, loc);
                }
                // Inactive uniforms are legal; the driver drops them.
                None => log::debug!("{kind}: uniform '{name}' is inactive"),
            }
        }

        log::debug!("Linked {kind} program ({} active uniforms)", locations.len());
        Ok(Self {
            program,
            entry,
            kernel: shader.kernel,
            locations,
        })
    }

    pub fn kind(&self) -> EffectKind {
        self.entry.kind
    }

    pub fn program(&self) -> glow::Program {
        self.program
    }

    pub fn kernel(&self) -> Option<&KernelCoefficients> {
        self.kernel.as_ref()
    }

    pub fn texture_unit(&self, sampler: &str) -> Option<u32> {
        sampler_units(self.entry).find(|(name, _)| *name == sampler).map(|(_, unit)| unit)
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Point every sampler at its texture unit. The program must be bound.
    pub fn bind_samplers(&self, gl: &glow::Context) {
        for (name, unit) in sampler_units(self.entry) {
            if let Some(loc) = self.locations.get(name) {
                unsafe { gl.uniform_1_i32(Some(loc), unit as i32) };
            }
        }
    }

    pub fn set_f32(&self, gl: &glow::Context, name: &str, value: f32) {
        if let Some(loc) = self.location(name) {
            unsafe { gl.uniform_1_f32(Some(loc), value) };
        }
    }

    pub fn set_i32(&self, gl: &glow::Context, name: &str, value: i32) {
        if let Some(loc) = self.location(name) {
            unsafe { gl.uniform_1_i32(Some(loc), value) };
        }
    }

    /// Blur direction is one texel along an axis, e.g. `Vec2::new(1.0 / width, 0.0)`.
    pub fn set_vec2(&self, gl: &glow::Context, name: &str, value: glam::Vec2) {
        if let Some(loc) = self.location(name) {
            unsafe { gl.uniform_2_f32(Some(loc), value.x, value.y) };
        }
    }

    fn location(&self, name: &str) -> Option<&glow::UniformLocation> {
        let loc = self.locations.get(name);
        if loc.is_none() {
            log::debug!("{}: no active uniform '{name}'", self.entry.kind);
        }
        loc
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) };
    }
}
