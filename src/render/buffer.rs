use bytemuck::Pod;
use gl::types::*;
use std::mem;
use thiserror::Error;

use super::handles::{BufferHandle, Location};

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("Driver could not create a buffer for {0:?} data")]
    Allocation(BufferTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Vertex,
    Index,
}

impl BufferTarget {
    fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Vertex => gl::ARRAY_BUFFER,
            BufferTarget::Index => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A static GPU buffer filled once at creation.
pub struct Buffer {
    handle: BufferHandle,
    target: BufferTarget,
    len: usize,
}

impl Buffer {
    pub fn new<T: Pod>(target: BufferTarget, data: &[T]) -> Result<Self, BufferError> {
        let bytes: &[u8] = bytemuck::cast_slice(data);

        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        let handle = BufferHandle::from_raw(id).ok_or(BufferError::Allocation(target))?;

        unsafe {
            gl::BindBuffer(target.gl_enum(), handle.get());
            gl::BufferData(
                target.gl_enum(),
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }

        log::debug!("Uploaded {} bytes to {}", bytes.len(), handle);
        Ok(Self {
            handle,
            target,
            len: data.len(),
        })
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(self.target.gl_enum(), self.handle.get()) };
    }

    /// Number of elements uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        let id = self.handle.get();
        unsafe { gl::DeleteBuffers(1, &id) };
    }
}

/// A float vertex attribute read from the currently bound array buffer.
#[derive(Debug, Clone, Copy)]
pub struct VertexAttribute {
    pub location: Location,
    pub components: i32,
    pub stride: usize,
    pub offset: usize,
}

impl VertexAttribute {
    /// Tightly packed attribute filling a buffer of its own.
    pub fn packed(location: Location, components: i32) -> Self {
        Self {
            location,
            components,
            stride: 0,
            offset: 0,
        }
    }

    /// One field of an interleaved vertex struct `V`.
    pub fn interleaved<V>(location: Location, components: i32, offset: usize) -> Self {
        Self {
            location,
            components,
            stride: mem::size_of::<V>(),
            offset,
        }
    }

    pub fn enable(&self) {
        unsafe {
            gl::EnableVertexAttribArray(self.location.get());
            gl::VertexAttribPointer(
                self.location.get(),
                self.components,
                gl::FLOAT,
                gl::FALSE,
                self.stride as GLsizei,
                self.offset as *const _,
            );
        }
    }

    pub fn disable(&self) {
        unsafe { gl::DisableVertexAttribArray(self.location.get()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::InitError;

    #[test]
    fn test_allocation_failure_names_the_buffer() {
        let err = BufferError::Allocation(BufferTarget::Index);
        assert_eq!(err.to_string(), "Driver could not create a buffer for Index data");

        let init: InitError = err.into();
        assert!(matches!(init, InitError::Buffer(BufferError::Allocation(BufferTarget::Index))));
    }
}
