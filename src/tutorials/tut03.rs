//! Interleaved position and colour attributes, with the whole triangle
//! fading in and out through the `fade` uniform.

use bytemuck::{Pod, Zeroable};
use std::mem::offset_of;
use std::time::Duration;

use super::load_program;
use crate::app::{InitError, Tutorial};
use crate::config::AppConfig;
use crate::render::{
    Buffer, BufferTarget, GlApi, GlDriver, Location, ShaderError, ShaderProgram, VertexAttribute,
};
use crate::utils::math::fade;

pub const VERTEX_SHADER: &str = "fade.v.glsl";
pub const FRAGMENT_SHADER: &str = "fade.f.glsl";

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub coord2d: [f32; 2],
    pub v_color: [f32; 3],
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        coord2d: [0.0, 0.8],
        v_color: [1.0, 1.0, 0.0],
    },
    Vertex {
        coord2d: [-0.8, -0.8],
        v_color: [0.0, 0.0, 1.0],
    },
    Vertex {
        coord2d: [0.8, -0.8],
        v_color: [1.0, 0.0, 0.0],
    },
];

pub(crate) struct Inputs {
    pub coord2d: Location,
    pub v_color: Location,
    pub fade: Location,
}

impl Inputs {
    pub fn resolve<D: GlDriver>(program: &ShaderProgram<D>) -> Result<Self, ShaderError> {
        Ok(Self {
            coord2d: program.attribute("coord2d")?,
            v_color: program.attribute("v_color")?,
            fade: program.uniform("fade")?,
        })
    }
}

pub struct FadingTriangle {
    program: ShaderProgram<GlApi>,
    vbo: Buffer,
    attributes: [VertexAttribute; 2],
    fade_location: Location,
    fade: f32,
}

impl Tutorial for FadingTriangle {
    const TITLE: &'static str = "My First Triangle";

    fn init(gl: GlApi, config: &AppConfig) -> Result<Self, InitError> {
        let program = load_program(&gl, config, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let inputs = Inputs::resolve(&program)?;
        let vbo = Buffer::new(BufferTarget::Vertex, &TRIANGLE)?;

        Ok(Self {
            program,
            vbo,
            attributes: [
                VertexAttribute::interleaved::<Vertex>(
                    inputs.coord2d,
                    2,
                    offset_of!(Vertex, coord2d),
                ),
                VertexAttribute::interleaved::<Vertex>(
                    inputs.v_color,
                    3,
                    offset_of!(Vertex, v_color),
                ),
            ],
            fade_location: inputs.fade,
            fade: fade(0.0),
        })
    }

    fn update(&mut self, elapsed: Duration) {
        self.fade = fade(elapsed.as_secs_f32());
    }

    fn render(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.bind();
        unsafe { gl::Uniform1f(self.fade_location.as_uniform(), self.fade) };

        self.vbo.bind();
        for attribute in &self.attributes {
            attribute.enable();
        }
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, self.vbo.len() as i32) };
        for attribute in &self.attributes {
            attribute.disable();
        }
    }
}
