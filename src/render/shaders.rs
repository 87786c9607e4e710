// shaders.rs - shader compilation, program linking and input lookup

use gl::types::GLenum;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::driver::GlDriver;
use super::handles::{Location, ProgramHandle, ShaderHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    Compute,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::Compute => gl::COMPUTE_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Compute => "compute",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Attribute,
    Uniform,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Attribute => "attribute",
            InputKind::Uniform => "uniform",
        })
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Error opening {}: {source}", .path.display())]
    ResourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name}: {stage} shader compilation failed: {log}")]
    Compile {
        stage: ShaderStage,
        name: String,
        log: String,
    },
    #[error("Program linking failed: {log}")]
    Link { log: String },
    #[error("Could not bind {kind} {name} in {program}")]
    InputNotFound {
        name: String,
        kind: InputKind,
        program: ProgramHandle,
    },
    #[error("Program has no {0} shader")]
    MissingStage(ShaderStage),
    #[error("A compute program takes exactly one compute shader")]
    InvalidStageSet,
    #[error("Driver could not create a {0} object")]
    Allocation(&'static str),
    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),
}

pub type Result<T> = std::result::Result<T, ShaderError>;

/// A compiled shader object. Deleting it once it is attached to a linked
/// program only flags it; the driver frees it with the program.
pub struct Shader<D: GlDriver> {
    gl: D,
    handle: ShaderHandle,
    stage: ShaderStage,
    name: String,
}

impl<D: GlDriver> Shader<D> {
    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<D: GlDriver> fmt::Debug for Shader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("handle", &self.handle)
            .field("stage", &self.stage)
            .field("name", &self.name)
            .finish()
    }
}

impl<D: GlDriver> Drop for Shader<D> {
    fn drop(&mut self) {
        log::debug!("Deleting {} ({})", self.handle, self.name);
        self.gl.delete_shader(self.handle);
    }
}

/// Reads `path` as one source unit and compiles it as `stage`.
pub fn load_shader<D: GlDriver>(
    gl: &D,
    path: impl AsRef<Path>,
    stage: ShaderStage,
) -> Result<Shader<D>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| {
        log::error!("Error opening {}: {}", path.display(), source);
        ShaderError::ResourceRead {
            path: path.to_path_buf(),
            source,
        }
    })?;

    compile_shader(gl, &path.display().to_string(), &source, stage)
}

/// Compiles in-memory `source`; `name` only labels diagnostics.
pub fn compile_shader<D: GlDriver>(
    gl: &D,
    name: &str,
    source: &str,
    stage: ShaderStage,
) -> Result<Shader<D>> {
    let source = CString::new(source)?;

    let handle = gl
        .create_shader(stage)
        .ok_or(ShaderError::Allocation("shader"))?;
    // From here on the object is released on every exit path.
    let shader = Shader {
        gl: gl.clone(),
        handle,
        stage,
        name: name.to_owned(),
    };

    gl.shader_source(handle, &source);
    gl.compile_shader(handle);

    if !gl.shader_compile_status(handle) {
        let log = gl.shader_info_log(handle);
        log::error!("{}: {}", name, log);
        return Err(ShaderError::Compile {
            stage,
            name: name.to_owned(),
            log,
        });
    }

    log::debug!("Compiled {} shader {} as {}", stage, name, handle);
    Ok(shader)
}

/// Attaches `shaders` to a new program and links it. Graphics programs need a
/// vertex and a fragment stage (geometry optional); a compute program is a
/// single compute shader.
pub fn link_program<D: GlDriver>(gl: &D, shaders: &[&Shader<D>]) -> Result<ShaderProgram<D>> {
    let has = |stage: ShaderStage| shaders.iter().any(|s| s.stage == stage);
    if has(ShaderStage::Compute) {
        if shaders.len() != 1 {
            return Err(ShaderError::InvalidStageSet);
        }
    } else {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if !has(stage) {
                return Err(ShaderError::MissingStage(stage));
            }
        }
    }

    let handle = gl
        .create_program()
        .ok_or(ShaderError::Allocation("program"))?;
    let program = ShaderProgram {
        gl: gl.clone(),
        handle,
    };

    for shader in shaders {
        gl.attach_shader(handle, shader.handle);
    }
    gl.link_program(handle);

    if !gl.program_link_status(handle) {
        let log = gl.program_info_log(handle);
        log::error!("glLinkProgram: {}", log);
        return Err(ShaderError::Link { log });
    }

    log::debug!("Linked {} from {} shaders", handle, shaders.len());
    Ok(program)
}

/// Looks `name` up in a linked program. A name the driver does not know is
/// an error, never a silent `-1`.
pub fn resolve_input<D: GlDriver>(
    gl: &D,
    program: ProgramHandle,
    name: &str,
    kind: InputKind,
) -> Result<Location> {
    let cname = CString::new(name)?;
    let location = match kind {
        InputKind::Attribute => gl.attrib_location(program, &cname),
        InputKind::Uniform => gl.uniform_location(program, &cname),
    };

    location.ok_or_else(|| {
        log::error!("Could not bind {} {}", kind, name);
        ShaderError::InputNotFound {
            name: name.to_owned(),
            kind,
            program,
        }
    })
}

/// A successfully linked program, deleted when dropped.
pub struct ShaderProgram<D: GlDriver> {
    gl: D,
    handle: ProgramHandle,
}

impl<D: GlDriver> ShaderProgram<D> {
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn bind(&self) {
        self.gl.use_program(self.handle);
    }

    pub fn attribute(&self, name: &str) -> Result<Location> {
        resolve_input(&self.gl, self.handle, name, InputKind::Attribute)
    }

    pub fn uniform(&self, name: &str) -> Result<Location> {
        resolve_input(&self.gl, self.handle, name, InputKind::Uniform)
    }
}

impl<D: GlDriver> fmt::Debug for ShaderProgram<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .finish()
    }
}

impl<D: GlDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        log::debug!("Deleting {}", self.handle);
        self.gl.delete_program(self.handle);
    }
}
