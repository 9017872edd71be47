use std::fmt;

use thiserror::Error;

/// Pipeline stage a compile error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can go wrong while generating or compiling an effect shader.
///
/// Compile and link logs are carried verbatim from the driver; nothing here
/// interprets them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShaderError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported effect: {0}")]
    UnsupportedEffect(String),

    #[error("{stage} shader failed to compile:\n{log}")]
    CompileError { stage: ShaderStage, log: String },

    #[error("Program linking failed:\n{log}")]
    LinkError { log: String },

    #[error("Invalid shader configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_message_keeps_log() {
        let err = ShaderError::CompileError {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("fragment shader failed to compile"));
        assert!(msg.ends_with("0:3(1): error: syntax error"));
    }
}
