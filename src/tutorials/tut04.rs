//! The fading triangle, now sliding left and right while it spins.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::mem::offset_of;
use std::time::Duration;

use super::load_program;
use crate::app::{InitError, Tutorial};
use crate::config::AppConfig;
use crate::render::{
    Buffer, BufferTarget, GlApi, GlDriver, Location, ShaderError, ShaderProgram, VertexAttribute,
};
use crate::utils::math::{fade, oscillating_transform};

pub const VERTEX_SHADER: &str = "transform.v.glsl";
pub const FRAGMENT_SHADER: &str = "transform.f.glsl";

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub coord3d: [f32; 3],
    pub v_color: [f32; 3],
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        coord3d: [0.0, 0.8, 0.0],
        v_color: [1.0, 1.0, 0.0],
    },
    Vertex {
        coord3d: [-0.8, -0.8, 0.0],
        v_color: [0.0, 0.0, 1.0],
    },
    Vertex {
        coord3d: [0.8, -0.8, 0.0],
        v_color: [1.0, 0.0, 0.0],
    },
];

pub(crate) struct Inputs {
    pub coord3d: Location,
    pub v_color: Location,
    pub fade: Location,
    pub m_transform: Location,
}

impl Inputs {
    pub fn resolve<D: GlDriver>(program: &ShaderProgram<D>) -> Result<Self, ShaderError> {
        Ok(Self {
            coord3d: program.attribute("coord3d")?,
            v_color: program.attribute("v_color")?,
            fade: program.uniform("fade")?,
            m_transform: program.uniform("m_transform")?,
        })
    }
}

pub struct TransformedTriangle {
    program: ShaderProgram<GlApi>,
    vbo: Buffer,
    attributes: [VertexAttribute; 2],
    fade_location: Location,
    transform_location: Location,
    fade: f32,
    transform: Mat4,
}

impl Tutorial for TransformedTriangle {
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
                    inputs.coord3d,
                    3,
                    offset_of!(Vertex, coord3d),
                ),
                VertexAttribute::interleaved::<Vertex>(
                    inputs.v_color,
                    3,
                    offset_of!(Vertex, v_color),
                ),
            ],
            fade_location: inputs.fade,
            transform_location: inputs.m_transform,
            fade: fade(0.0),
            transform: Mat4::IDENTITY,
        })
    }

    fn update(&mut self, elapsed: Duration) {
        let seconds = elapsed.as_secs_f32();
        self.fade = fade(seconds);
        self.transform = oscillating_transform(seconds);
    }

    fn render(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.bind();
        unsafe {
            gl::Uniform1f(self.fade_location.as_uniform(), self.fade);
            gl::UniformMatrix4fv(
                self.transform_location.as_uniform(),
                1,
                gl::FALSE,
                self.transform.to_cols_array().as_ptr(),
            );
        }

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
