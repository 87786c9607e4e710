pub mod app;
pub mod config;
pub mod render;
pub mod tutorials;
pub mod utils;

// Re-export commonly used types
pub use app::{run, InitError, Tutorial};
pub use config::{AppConfig, ConfigError, WindowConfig};
pub use render::{
    compile_shader, link_program, load_shader, resolve_input, GlApi, GlDriver, InputKind,
    Location, ProgramHandle, Shader, ShaderError, ShaderHandle, ShaderProgram, ShaderStage,
};
