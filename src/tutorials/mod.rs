pub mod tut01;
pub mod tut02;
pub mod tut03;
pub mod tut04;
pub mod tut05;

use crate::config::AppConfig;
use crate::render::{link_program, load_shader, GlDriver, ShaderError, ShaderProgram, ShaderStage};

/// Loads a vertex/fragment pair from the configured shader directory and
/// links them.
pub fn load_program<D: GlDriver>(
    gl: &D,
    config: &AppConfig,
    vertex: &str,
    fragment: &str,
) -> Result<ShaderProgram<D>, ShaderError> {
    let vs = load_shader(gl, config.shader_path(vertex), ShaderStage::Vertex)?;
    let fs = load_shader(gl, config.shader_path(fragment), ShaderStage::Fragment)?;
    link_program(gl, &[&vs, &fs])
}
