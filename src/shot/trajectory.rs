//! Ballistic trajectory sampling
//!
//! position(t) = origin + velocity * t + 0.5 * gravity * t^2
//!
//! No drag, no collisions: once a shot is released the physics collaborator
//! takes over, so this only has to agree with it up to the first contact.

use std::iter::FusedIterator;

use glam::Vec3;

/// Closed-form position after `t` seconds
#[inline]
pub fn position_at(origin: Vec3, velocity: Vec3, gravity: Vec3, t: f32) -> Vec3 {
    origin + velocity * t + 0.5 * gravity * t * t
}

/// Lazy sequence of sampled positions.
///
/// Cloning restarts from the clone point; construct again to recompute with
/// new inputs.
#[derive(Debug, Clone)]
pub struct Trajectory {
    origin: Vec3,
    velocity: Vec3,
    gravity: Vec3,
    dt: f32,
    /// Next sample index
    index: usize,
    /// One past the last sample index
    end: usize,
}

impl Trajectory {
    /// Samples at t = dt, 2·dt, …, steps·dt (positions after launch)
    pub fn new(origin: Vec3, velocity: Vec3, gravity: Vec3, dt: f32, steps: usize) -> Self {
        Self {
            origin,
            velocity,
            gravity,
            dt,
            index: 1,
            end: steps + 1,
        }
    }

    /// Samples at t = 0, dt, …, (steps-1)·dt, so the drawn line starts at
    /// the ball
    pub fn preview(origin: Vec3, velocity: Vec3, gravity: Vec3, dt: f32, steps: usize) -> Self {
        Self {
            origin,
            velocity,
            gravity,
            dt,
            index: 0,
            end: steps,
        }
    }

    pub fn position_at(&self, t: f32) -> Vec3 {
        position_at(self.origin, self.velocity, self.gravity, t)
    }
}

impl Iterator for Trajectory {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.index >= self.end {
            return None;
        }
        let t = self.index as f32 * self.dt;
        self.index += 1;
        Some(self.position_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.index);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Trajectory {}
impl FusedIterator for Trajectory {}

/// Sample `steps` positions after launch
pub fn simulate(origin: Vec3, velocity: Vec3, gravity: Vec3, dt: f32, steps: usize) -> Vec<Vec3> {
    Trajectory::new(origin, velocity, gravity, dt, steps).collect()
}
