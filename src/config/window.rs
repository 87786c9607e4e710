use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Overrides the tutorial's own size when set.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resizable: bool,
    pub vsync: bool,
    /// Requested OpenGL compatibility context version, `[major, minor]`.
    pub gl_version: [u8; 2],
    pub alpha_bits: u8,
    pub depth_bits: u8,
}

impl WindowConfig {
    pub fn size_or(&self, (width, height): (u32, u32)) -> (u32, u32) {
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            resizable: true,
            vsync: true,
            gl_version: [2, 1],
            alpha_bits: 8,
            depth_bits: 24,
        }
    }
}
