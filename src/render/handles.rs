use std::fmt;
use std::num::NonZeroU32;

/// Driver object names. Zero is the driver's "no object" value, so a handle
/// only exists for a real object and the sentinel shows up as `None`.
macro_rules! gl_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            pub fn from_raw(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map(Self)
            }

            pub fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " #{}"), self.0)
            }
        }
    };
}

gl_handle!(
    /// A compiled (or compiling) shader object.
    ShaderHandle,
    "shader"
);
gl_handle!(
    /// A program object that shaders are attached to and linked into.
    ProgramHandle,
    "program"
);
gl_handle!(BufferHandle, "buffer");

/// Binding index of an attribute or uniform inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location(u32);

impl Location {
    /// Converts the driver's signed location; `-1` (any negative) means the
    /// name was not found.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Uniform entry points take the location as a signed integer.
    pub fn as_uniform(self) -> i32 {
        self.0 as i32
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_no_object() {
        assert!(ShaderHandle::from_raw(0).is_none());
        assert!(ProgramHandle::from_raw(0).is_none());
        assert_eq!(ShaderHandle::from_raw(7).map(ShaderHandle::get), Some(7));
    }

    #[test]
    fn test_negative_location_is_not_found() {
        assert!(Location::from_raw(-1).is_none());
        assert_eq!(Location::from_raw(0).map(Location::get), Some(0));
        assert_eq!(Location::from_raw(3).map(Location::as_uniform), Some(3));
    }

    #[test]
    fn test_display_names_the_kind() {
        let program = ProgramHandle::from_raw(4).unwrap();
        assert_eq!(program.to_string(), "program #4");
    }
}
