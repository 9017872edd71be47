//! Mock compiler for testing
//!
//! Records every source it is asked to compile and can be told to fail,
//! without requiring a GL context.

use std::sync::Mutex;

use depthfx_core::{Result, ShaderCompiler, ShaderError, ShaderSource};

/// Handle returned by [`MockCompiler`]: the index of the compile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockProgram(pub usize);

#[derive(Debug, Default)]
pub struct MockCompiler {
    /// Every source passed to `compile`, in call order.
    pub compiled: Mutex<Vec<ShaderSource>>,
    /// Returned from every `compile` call when set.
    pub fail_with: Option<ShaderError>,
}

impl MockCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ShaderError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub fn compile_count(&self) -> usize {
        self.compiled.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl ShaderCompiler for MockCompiler {
    type Program = MockProgram;

    fn compile(&self, source: &ShaderSource) -> Result<MockProgram> {
        let mut compiled = self
            .compiled
            .lock()
            .map_err(|_| ShaderError::LinkError { log: "mock compiler lock poisoned".to_string() })?;
        compiled.push(source.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(MockProgram(compiled.len() - 1)),
        }
    }
}
