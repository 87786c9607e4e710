pub mod logging;
pub mod math;

pub use math::{aspect_ratio, cube_mvp, fade, oscillating_transform};
