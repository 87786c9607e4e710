//! The tut01 triangle with its shaders read from `triangle.v.glsl` and
//! `triangle.f.glsl`.

use super::load_program;
use super::tut01::TRIANGLE_VERTICES;
use crate::app::{InitError, Tutorial};
use crate::config::AppConfig;
use crate::render::{
    Buffer, BufferTarget, GlApi, GlDriver, Location, ShaderError, ShaderProgram, VertexAttribute,
};

pub const VERTEX_SHADER: &str = "triangle.v.glsl";
pub const FRAGMENT_SHADER: &str = "triangle.f.glsl";

pub(crate) struct Inputs {
    pub coord2d: Location,
}

impl Inputs {
    pub fn resolve<D: GlDriver>(program: &ShaderProgram<D>) -> Result<Self, ShaderError> {
        Ok(Self {
            coord2d: program.attribute("coord2d")?,
        })
    }
}

pub struct FileTriangle {
    program: ShaderProgram<GlApi>,
    vbo: Buffer,
    coord2d: VertexAttribute,
}

impl Tutorial for FileTriangle {
    const TITLE: &'static str = "My First Triangle";

    fn init(gl: GlApi, config: &AppConfig) -> Result<Self, InitError> {
        let program = load_program(&gl, config, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let inputs = Inputs::resolve(&program)?;
        let vbo = Buffer::new(BufferTarget::Vertex, &TRIANGLE_VERTICES)?;

        Ok(Self {
            program,
            vbo,
            coord2d: VertexAttribute::packed(inputs.coord2d, 2),
        })
    }

    fn render(&self) {
        unsafe {
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.bind();
        self.vbo.bind();
        self.coord2d.enable();
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, self.vbo.len() as i32) };
        self.coord2d.disable();
    }
}
