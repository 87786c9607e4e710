use gl::types::*;
use std::ffi::{c_void, CStr, CString};
use std::ptr;
use thiserror::Error;

use super::handles::{Location, ProgramHandle, ShaderHandle};
use super::shaders::ShaderStage;

/// The driver operations the shader loader needs. Object names travel as
/// typed handles; "no object" and "not found" come back as `None`.
pub trait GlDriver: Clone {
    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderHandle>;
    fn shader_source(&self, shader: ShaderHandle, source: &CStr);
    fn compile_shader(&self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    fn create_program(&self) -> Option<ProgramHandle>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn delete_program(&self, program: ProgramHandle);
    fn use_program(&self, program: ProgramHandle);

    fn attrib_location(&self, program: ProgramHandle, name: &CStr) -> Option<Location>;
    fn uniform_location(&self, program: ProgramHandle, name: &CStr) -> Option<Location>;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("OpenGL entry point {0} is unavailable; OpenGL 2.0 or newer is required")]
    Missing(&'static str),
}

/// `GlDriver` over the global `gl` bindings. Only obtainable through
/// [`GlApi::load_with`], so holding one means the pointers are loaded.
#[derive(Debug, Clone, Copy)]
pub struct GlApi {
    _loaded: (),
}

impl GlApi {
    pub fn load_with<F>(mut loader: F) -> Result<Self, LoadError>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => loader(&symbol),
            Err(_) => ptr::null(),
        });

        let required = [
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glShaderSource", gl::ShaderSource::is_loaded()),
            ("glCompileShader", gl::CompileShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glLinkProgram", gl::LinkProgram::is_loaded()),
            ("glGetAttribLocation", gl::GetAttribLocation::is_loaded()),
            ("glGetUniformLocation", gl::GetUniformLocation::is_loaded()),
            ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
            ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ];
        if let Some(&(name, _)) = required.iter().find(|&&(_, loaded)| !loaded) {
            return Err(LoadError::Missing(name));
        }

        Ok(Self { _loaded: () })
    }
}

impl GlDriver for GlApi {
    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderHandle> {
        ShaderHandle::from_raw(unsafe { gl::CreateShader(stage.gl_enum()) })
    }

    fn shader_source(&self, shader: ShaderHandle, source: &CStr) {
        unsafe { gl::ShaderSource(shader.get(), 1, &source.as_ptr(), ptr::null()) };
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        unsafe { gl::CompileShader(shader.get()) };
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe { gl::GetShaderiv(shader.get(), gl::COMPILE_STATUS, &mut status) };
        status != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader.get(), gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader.get(), capacity, written, buffer)
        })
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { gl::DeleteShader(shader.get()) };
    }

    fn create_program(&self) -> Option<ProgramHandle> {
        ProgramHandle::from_raw(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { gl::AttachShader(program.get(), shader.get()) };
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { gl::LinkProgram(program.get()) };
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe { gl::GetProgramiv(program.get(), gl::LINK_STATUS, &mut status) };
        status != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program.get(), gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program.get(), capacity, written, buffer)
        })
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { gl::DeleteProgram(program.get()) };
    }

    fn use_program(&self, program: ProgramHandle) {
        unsafe { gl::UseProgram(program.get()) };
    }

    fn attrib_location(&self, program: ProgramHandle, name: &CStr) -> Option<Location> {
        Location::from_raw(unsafe { gl::GetAttribLocation(program.get(), name.as_ptr()) })
    }

    fn uniform_location(&self, program: ProgramHandle, name: &CStr) -> Option<Location> {
        Location::from_raw(unsafe { gl::GetUniformLocation(program.get(), name.as_ptr()) })
    }
}

/// Reads an info log whose length (terminator included) the driver reported
/// as `len`. The buffer is sized from that length and cut to the byte count
/// the driver says it wrote.
fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    let Ok(capacity) = usize::try_from(len) else {
        return String::new();
    };
    if capacity == 0 {
        return String::new();
    }

    let mut buffer = vec![0u8; capacity];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);

    let written = usize::try_from(written).unwrap_or(0).min(capacity);
    buffer.truncate(written);
    if let Some(nul) = buffer.iter().position(|&b| b == 0) {
        buffer.truncate(nul);
    }
    String::from_utf8_lossy(&buffer).trim_end().to_owned()
}
