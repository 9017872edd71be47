pub mod blur;
pub mod builder;
pub mod config;
pub mod mock;
pub mod registry;
pub mod templates;

pub use builder::{build_program, generate, generate_by_id};
pub use config::{ShaderConfig, ShaderSetConfig};
pub use registry::{entry, EffectEntry, REGISTRY};
