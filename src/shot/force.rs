//! Swipe → launch vector mapping
//!
//! The swipe steers the shot relative to the camera: horizontal swipe bends
//! it sideways, vertical swipe adds lift on top of a constant arc. Swipe
//! length sets power, clamped so even a short flick reaches 30%.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Camera pose used to orient shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraBasis {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl CameraBasis {
    /// Camera at `position` looking along `forward`, rolled level with world up
    pub fn looking(position: Vec3, forward: Vec3) -> Self {
        let forward = forward.normalize_or(Vec3::Z);
        let right = Vec3::Y.cross(forward).normalize_or(Vec3::X);
        let up = forward.cross(right);
        Self {
            position,
            forward,
            right,
            up,
        }
    }
}

/// Swipe length as a fraction of full power, clamped to [MIN_POWER, MAX_POWER]
#[inline]
pub fn power_fraction(swipe: Vec2) -> f32 {
    (swipe.length() / FULL_POWER_SWIPE).clamp(MIN_POWER, MAX_POWER)
}

/// A release only launches if the pointer travelled far enough
#[inline]
pub fn is_launchable(swipe: Vec2, min_distance: f32) -> bool {
    swipe.length() > min_distance
}

/// Normalize one swipe axis against a screen dimension
fn normalized_axis(delta: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        (delta / extent).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Launch vector (velocity change) for a swipe
pub fn compute_force(swipe: Vec2, screen_size: Vec2, camera: &CameraBasis, max_force: f32) -> Vec3 {
    let nx = normalized_axis(swipe.x, screen_size.x);
    let ny = normalized_axis(swipe.y, screen_size.y);

    let direction = (camera.forward
        + camera.right * (SWIPE_SIDE_FACTOR * nx)
        + camera.up * (SWIPE_LIFT_FACTOR * ny + BASE_LIFT))
        .normalize_or(camera.forward);

    direction * (power_fraction(swipe) * max_force)
}

/// Random spin for visual flair, scaled by swipe length
pub fn spin_torque<R: Rng>(swipe: Vec2, rng: &mut R) -> Vec3 {
    let axis = Vec3::new(
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
    )
    .normalize_or_zero();
    axis * swipe.length() * SPIN_PER_PIXEL
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SCREEN: Vec2 = Vec2::new(1080.0, 1920.0);

    #[test]
    fn test_short_swipe_floor() {
        let force = compute_force(Vec2::new(0.0, 10.0), SCREEN, &CameraBasis::default(), 25.0);
        assert!((force.length() - 0.3 * 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_swipe_ceiling() {
        let force = compute_force(Vec2::new(0.0, 900.0), SCREEN, &CameraBasis::default(), 25.0);
        assert!((force.length() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_straight_up_swipe_direction() {
        let cam = CameraBasis::default();
        let swipe = Vec2::new(0.0, 192.0); // ny = 0.1
        let dir = compute_force(swipe, SCREEN, &cam, 25.0).normalize();
        let expected = (Vec3::Z + Vec3::Y * (0.3 * 0.1 + 0.3)).normalize();
        assert!((dir - expected).length() < 1e-5);
    }

    #[test]
    fn test_sideways_swipe_bends_right() {
        let cam = CameraBasis::default();
        let force = compute_force(Vec2::new(540.0, 0.0), SCREEN, &cam, 25.0);
        assert!(force.x > 0.0);
        let left = compute_force(Vec2::new(-540.0, 0.0), SCREEN, &cam, 25.0);
        assert!(left.x < 0.0);
    }

    #[test]
    fn test_oversized_swipe_clamps_axes() {
        let cam = CameraBasis::default();
        let a = compute_force(Vec2::new(5000.0, 5000.0), SCREEN, &cam, 25.0);
        let b = compute_force(Vec2::new(1080.0, 1920.0), SCREEN, &cam, 25.0);
        assert!((a - b).length() < 1e-4);
    }

    #[test]
    fn test_zero_screen_size_is_finite() {
        let force = compute_force(Vec2::new(80.0, 80.0), Vec2::ZERO, &CameraBasis::default(), 25.0);
        assert!(force.is_finite());
    }

    #[test]
    fn test_launch_threshold_is_strict() {
        assert!(!is_launchable(Vec2::new(50.0, 0.0), 50.0));
        assert!(is_launchable(Vec2::new(50.1, 0.0), 50.0));
    }

    #[test]
    fn test_spin_is_seeded() {
        let swipe = Vec2::new(30.0, 40.0);
        let a = spin_torque(swipe, &mut Pcg32::seed_from_u64(9));
        let b = spin_torque(swipe, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a, b);
        assert!(a.length() <= 5.0 + 1e-4);
    }

    #[test]
    fn test_looking_basis_is_orthonormal() {
        let cam = CameraBasis::looking(Vec3::ZERO, Vec3::new(1.0, -0.2, 1.0));
        assert!(cam.forward.dot(cam.right).abs() < 1e-5);
        assert!(cam.forward.dot(cam.up).abs() < 1e-5);
        assert!((cam.up.length() - 1.0).abs() < 1e-5);
        assert!(cam.up.y > 0.0);
    }
}
