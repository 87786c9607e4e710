//! src/utils/math.rs
//! Per-frame animation values and transform matrices
use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Seconds for one full back-and-forth cycle of the fade and slide.
pub const OSCILLATION_PERIOD: f32 = 5.0;
/// Rotation speed of the animated shapes.
pub const DEGREES_PER_SECOND: f32 = 45.0;

fn oscillation(seconds: f32) -> f32 {
    (seconds * (2.0 * PI) / OSCILLATION_PERIOD).sin()
}

/// Alpha going 0 -> 1 -> 0 over one period.
pub fn fade(seconds: f32) -> f32 {
    oscillation(seconds) / 2.0 + 0.5
}

/// Slides between -1 and +1 on x while spinning about z.
pub fn oscillating_transform(seconds: f32) -> Mat4 {
    let angle = (seconds * DEGREES_PER_SECOND).to_radians();
    Mat4::from_translation(Vec3::new(oscillation(seconds), 0.0, 0.0)) * Mat4::from_rotation_z(angle)
}

/// Camera above and in front of a cube pushed 4 units back, spinning about y.
pub fn cube_mvp(seconds: f32, aspect: f32) -> Mat4 {
    let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0));
    let view = Mat4::look_at_rh(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -4.0), Vec3::Y);
    let projection = Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 0.1, 10.0);
    let anim = Mat4::from_rotation_y((seconds * DEGREES_PER_SECOND).to_radians());

    projection * view * model * anim
}

/// Width over height; a zero height (minimised window) counts as square.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_fade_stays_in_unit_range() {
        for step in 0..200 {
            let value = fade(step as f32 * 0.05);
            assert!((0.0..=1.0).contains(&value), "fade out of range: {}", value);
        }
        assert!((fade(0.0) - 0.5).abs() < EPS);
        assert!((fade(1.25) - 1.0).abs() < EPS);
        assert!((fade(3.75) - 0.0).abs() < EPS);
    }

    #[test]
    fn test_transform_at_start_is_identity() {
        assert!(oscillating_transform(0.0).abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn test_transform_after_two_seconds_rotates_a_quarter_turn() {
        let m = oscillating_transform(2.0);
        let moved = oscillation(2.0);
        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        // 90 degrees about z takes +x to +y, then the slide applies.
        assert!((p.x - moved).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cube_centre_is_in_front_of_camera() {
        let clip = cube_mvp(0.0, 4.0 / 3.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < EPS);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_aspect_ratio_handles_zero_height() {
        assert_eq!(aspect_ratio(800, 600), 800.0 / 600.0);
        assert_eq!(aspect_ratio(800, 0), 1.0);
    }
}
