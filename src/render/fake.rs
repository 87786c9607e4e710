//! In-memory `GlDriver` for tests. It "compiles" GLSL by checking statement
//! terminators, records declared attributes, uniforms and varyings, and links
//! when every varying the fragment stage reads is written by the vertex stage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;
use std::rc::Rc;

use super::driver::GlDriver;
use super::handles::{Location, ProgramHandle, ShaderHandle};
use super::shaders::ShaderStage;

#[derive(Default)]
struct FakeShader {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
    log: String,
    deleted: bool,
    attributes: Vec<String>,
    uniforms: Vec<String>,
    varyings: Vec<String>,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Default)]
struct State {
    next_id: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    shaders_created: usize,
    programs_created: usize,
    current: Option<ProgramHandle>,
}

impl State {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn is_live_shader(&self, id: u32) -> bool {
        match self.shaders.get(&id) {
            Some(shader) if shader.deleted => {
                self.programs.values().any(|p| p.attached.contains(&id))
            }
            Some(_) => true,
            None => false,
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Rc<RefCell<State>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shaders_created(&self) -> usize {
        self.state.borrow().shaders_created
    }

    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs_created
    }

    /// Shaders not yet freed. A deleted shader stays alive while any program
    /// still has it attached.
    pub fn live_shaders(&self) -> usize {
        let state = self.state.borrow();
        state.shaders.keys().filter(|&&id| state.is_live_shader(id)).count()
    }

    pub fn is_live_shader(&self, shader: ShaderHandle) -> bool {
        self.state.borrow().is_live_shader(shader.get())
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.state.borrow().current
    }
}

fn compile(shader: &mut FakeShader) {
    let stage = shader.stage;
    let mut has_main = false;

    for (index, raw) in shader.source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        if !(line.ends_with(';') || line.ends_with('{') || line.ends_with('}')) {
            shader.log = format!("0:{}: error: syntax error, expected ';'\n", index + 1);
            return;
        }
        if line.starts_with("void main") {
            has_main = true;
        }

        let tokens: Vec<&str> = line.trim_end_matches(';').split_whitespace().collect();
        let (Some(qualifier), Some(name)) = (tokens.first(), tokens.last()) else {
            continue;
        };
        let name = name.to_string();
        match (*qualifier, stage) {
            ("attribute", Some(ShaderStage::Vertex)) | ("in", Some(ShaderStage::Vertex)) => {
                shader.attributes.push(name)
            }
            ("uniform", _) => shader.uniforms.push(name),
            ("varying", _) => shader.varyings.push(name),
            _ => {}
        }
    }

    if !has_main {
        shader.log = "error: missing function main\n".to_string();
        return;
    }
    shader.compiled = true;
}

fn link(state: &mut State, id: u32) {
    let attached = match state.programs.get(&id) {
        Some(program) => program.attached.clone(),
        None => return,
    };

    let mut written = Vec::new();
    let mut read = Vec::new();
    let mut attributes = Vec::new();
    let mut uniforms: Vec<String> = Vec::new();
    let mut log = String::new();

    for shader_id in attached {
        let Some(shader) = state.shaders.get(&shader_id) else {
            log = format!("error: shader {} does not exist\n", shader_id);
            break;
        };
        if !shader.compiled {
            log = format!("error: shader {} is not compiled\n", shader_id);
            break;
        }
        match shader.stage {
            Some(ShaderStage::Vertex) => {
                attributes.extend(shader.attributes.iter().cloned());
                written.extend(shader.varyings.iter().cloned());
            }
            Some(ShaderStage::Fragment) => read.extend(shader.varyings.iter().cloned()),
            _ => {}
        }
        for uniform in &shader.uniforms {
            if !uniforms.contains(uniform) {
                uniforms.push(uniform.clone());
            }
        }
    }

    if log.is_empty() {
        if let Some(missing) = read.iter().find(|&v| !written.contains(v)) {
            log = format!("error: varying {} not written by vertex shader\n", missing);
        }
    }

    if let Some(program) = state.programs.get_mut(&id) {
        program.linked = log.is_empty();
        program.log = log;
        if program.linked {
            program.attributes = attributes;
            program.uniforms = uniforms;
        }
    }
}

fn location_of(names: &[String], name: &CStr) -> Option<Location> {
    let name = name.to_str().ok()?;
    let index = names.iter().position(|n| n == name)?;
    Location::from_raw(index as i32)
}

impl GlDriver for FakeDriver {
    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderHandle> {
        let mut state = self.state.borrow_mut();
        let id = state.next();
        state.shaders_created += 1;
        state.shaders.insert(
            id,
            FakeShader {
                stage: Some(stage),
                ..FakeShader::default()
            },
        );
        ShaderHandle::from_raw(id)
    }

    fn shader_source(&self, shader: ShaderHandle, source: &CStr) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.get()) {
            s.source = source.to_string_lossy().into_owned();
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.get()) {
            compile(s);
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader.get())
            .map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader.get())
            .map(|s| s.log.trim_end().to_owned())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.get()) {
            s.deleted = true;
        }
    }

    fn create_program(&self) -> Option<ProgramHandle> {
        let mut state = self.state.borrow_mut();
        let id = state.next();
        state.programs_created += 1;
        state.programs.insert(id, FakeProgram::default());
        ProgramHandle::from_raw(id)
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program.get()) {
            p.attached.push(shader.get());
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        link(&mut self.state.borrow_mut(), program.get());
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .map_or(false, |p| p.linked)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .map(|p| p.log.trim_end().to_owned())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program.get());
        if state.current == Some(program) {
            state.current = None;
        }
    }

    fn use_program(&self, program: ProgramHandle) {
        self.state.borrow_mut().current = Some(program);
    }

    fn attrib_location(&self, program: ProgramHandle, name: &CStr) -> Option<Location> {
        let state = self.state.borrow();
        let program = state.programs.get(&program.get()).filter(|p| p.linked)?;
        location_of(&program.attributes, name)
    }

    fn uniform_location(&self, program: ProgramHandle, name: &CStr) -> Option<Location> {
        let state = self.state.borrow();
        let program = state.programs.get(&program.get()).filter(|p| p.linked)?;
        location_of(&program.uniforms, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_fake_compiler_flags_missing_semicolon() {
        let gl = FakeDriver::new();
        let shader = gl.create_shader(ShaderStage::Fragment).unwrap();
        let source = CString::new("void main(void) {\n  gl_FragColor = vec4(1.0)\n}\n").unwrap();
        gl.shader_source(shader, &source);
        gl.compile_shader(shader);
        assert!(!gl.shader_compile_status(shader));
        assert!(gl.shader_info_log(shader).starts_with("0:2:"));
    }

    #[test]
    fn test_attached_shader_outlives_its_delete() {
        let gl = FakeDriver::new();
        let shader = gl.create_shader(ShaderStage::Vertex).unwrap();
        let program = gl.create_program().unwrap();
        gl.attach_shader(program, shader);

        gl.delete_shader(shader);
        assert!(gl.is_live_shader(shader));
        assert_eq!(gl.live_shaders(), 1);

        gl.delete_program(program);
        assert!(!gl.is_live_shader(shader));
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn test_unattached_shader_is_freed_on_delete() {
        let gl = FakeDriver::new();
        let shader = gl.create_shader(ShaderStage::Fragment).unwrap();
        gl.delete_shader(shader);
        assert!(!gl.is_live_shader(shader));
    }
}
