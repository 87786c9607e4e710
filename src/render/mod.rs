pub mod buffer;
pub mod driver;
pub mod handles;
pub mod shaders;

#[cfg(test)]
pub(crate) mod fake;

pub use buffer::{Buffer, BufferError, BufferTarget, VertexAttribute};
pub use driver::{GlApi, GlDriver};
pub use handles::{BufferHandle, Location, ProgramHandle, ShaderHandle};
pub use shaders::{
    compile_shader, link_program, load_shader, resolve_input, InputKind, Shader, ShaderError,
    ShaderProgram, ShaderStage,
};
