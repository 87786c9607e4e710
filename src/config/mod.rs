pub mod core;
pub mod window;

pub use self::core::{AppConfig, ConfigError};
pub use window::WindowConfig;
