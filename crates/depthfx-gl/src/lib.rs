pub mod program;

pub use program::{compile_program, EffectProgram, GlCompiler, DEFAULT_ATTRIBUTES};
