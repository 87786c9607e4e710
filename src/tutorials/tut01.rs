//! A blue triangle whose shader sources are embedded in the program.

use crate::app::{InitError, Tutorial};
use crate::config::AppConfig;
use crate::render::{
    compile_shader, link_program, Buffer, BufferTarget, GlApi, GlDriver, Location, ShaderError,
    ShaderProgram, ShaderStage, VertexAttribute,
};

const VERTEX_SOURCE: &str = "#version 120
attribute vec2 coord2d;
void main(void) {
    gl_Position = vec4(coord2d, 0.0, 1.0);
}
";

const FRAGMENT_SOURCE: &str = "#version 120
void main(void) {
    gl_FragColor[0] = 0.0;
    gl_FragColor[1] = 0.0;
    gl_FragColor[2] = 1.0;
}
";

pub const TRIANGLE_VERTICES: [[f32; 2]; 3] = [[0.0, 0.8], [-0.8, -0.8], [0.8, -0.8]];

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

pub(crate) fn build_program<D: GlDriver>(gl: &D) -> Result<ShaderProgram<D>, ShaderError> {
    let vs = compile_shader(gl, "vertex shader", VERTEX_SOURCE, ShaderStage::Vertex)?;
    let fs = compile_shader(gl, "fragment shader", FRAGMENT_SOURCE, ShaderStage::Fragment)?;
    link_program(gl, &[&vs, &fs])
}

pub struct Triangle {
    program: ShaderProgram<GlApi>,
    vbo: Buffer,
    coord2d: VertexAttribute,
}

impl Tutorial for Triangle {
    const TITLE: &'static str = "My First Triangle";

    fn init(gl: GlApi, _config: &AppConfig) -> Result<Self, InitError> {
        let program = build_program(&gl)?;
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
