//! A colour-per-corner cube drawn from an index buffer, spinning in front of
//! a perspective camera.

use glam::Mat4;
use std::time::Duration;

use super::load_program;
use crate::app::{InitError, Tutorial};
use crate::config::AppConfig;
use crate::render::{
    Buffer, BufferTarget, GlApi, GlDriver, Location, ShaderError, ShaderProgram, VertexAttribute,
};
use crate::utils::math::{aspect_ratio, cube_mvp};

pub const VERTEX_SHADER: &str = "cube.v.glsl";
pub const FRAGMENT_SHADER: &str = "cube.f.glsl";

pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // back
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

pub const CUBE_COLORS: [[f32; 3]; 8] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Two triangles per face.
pub const CUBE_ELEMENTS: [u16; 36] = [
    0, 1, 2, 2, 3, 0, // front
    1, 5, 6, 6, 2, 1, // right
    7, 6, 5, 5, 4, 7, // back
    4, 0, 3, 3, 7, 4, // left
    4, 5, 1, 1, 0, 4, // bottom
    3, 2, 6, 6, 7, 3, // top
];

pub(crate) struct Inputs {
    pub coord3d: Location,
    pub v_color: Location,
    pub mvp: Location,
}

impl Inputs {
    pub fn resolve<D: GlDriver>(program: &ShaderProgram<D>) -> Result<Self, ShaderError> {
        Ok(Self {
            coord3d: program.attribute("coord3d")?,
            v_color: program.attribute("v_color")?,
            mvp: program.uniform("mvp")?,
        })
    }
}

pub struct Cube {
    program: ShaderProgram<GlApi>,
    vertices: Buffer,
    colors: Buffer,
    elements: Buffer,
    coord3d: VertexAttribute,
    v_color: VertexAttribute,
    mvp_location: Location,
    aspect: f32,
    mvp: Mat4,
}

impl Tutorial for Cube {
    const TITLE: &'static str = "My Rotating Cube";
    const DEFAULT_SIZE: (u32, u32) = (800, 600);

    fn init(gl: GlApi, config: &AppConfig) -> Result<Self, InitError> {
        let vertices = Buffer::new(BufferTarget::Vertex, &CUBE_VERTICES)?;
        let colors = Buffer::new(BufferTarget::Vertex, &CUBE_COLORS)?;
        let elements = Buffer::new(BufferTarget::Index, &CUBE_ELEMENTS)?;

        let program = load_program(&gl, config, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let inputs = Inputs::resolve(&program)?;

        unsafe { gl::Enable(gl::DEPTH_TEST) };

        let (width, height) = config.window.size_or(Self::DEFAULT_SIZE);
        let aspect = aspect_ratio(width, height);
        Ok(Self {
            program,
            vertices,
            colors,
            elements,
            coord3d: VertexAttribute::packed(inputs.coord3d, 3),
            v_color: VertexAttribute::packed(inputs.v_color, 3),
            mvp_location: inputs.mvp,
            aspect,
            mvp: cube_mvp(0.0, aspect),
        })
    }

    fn update(&mut self, elapsed: Duration) {
        self.mvp = cube_mvp(elapsed.as_secs_f32(), self.aspect);
    }

    fn render(&self) {
        unsafe {
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        self.program.bind();
        unsafe {
            gl::UniformMatrix4fv(
                self.mvp_location.as_uniform(),
                1,
                gl::FALSE,
                self.mvp.to_cols_array().as_ptr(),
            );
        }

        self.vertices.bind();
        self.coord3d.enable();
        self.colors.bind();
        self.v_color.enable();

        self.elements.bind();
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                self.elements.len() as i32,
                gl::UNSIGNED_SHORT,
                std::ptr::null(),
            );
        }

        self.coord3d.disable();
        self.v_color.disable();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
    }
}
