//! Keyboard orbit controls
//!
//! Key presses feed angular impulses; every frame the velocity is applied
//! and decays by the damping factor, so the orbit coasts to a stop after
//! the key is released. The orbit is locked to the horizontal plane and
//! panning does not exist, so the camera always circles the origin at
//! eye level.

use crate::config::CameraConfig;
use crate::math::Vec3;

/// Velocities below this are treated as stopped
const REST_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    azimuth: f64,
    velocity: f64,
    distance: f64,
    min_distance: f64,
    max_distance: f64,
    damping: f64,
}

impl OrbitControls {
    pub fn new(config: &CameraConfig) -> Self {
        OrbitControls {
            azimuth: 0.0,
            velocity: 0.0,
            distance: config.distance,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            damping: config.damping,
        }
    }

    /// Add an azimuthal impulse, radians per frame. Positive orbits
    /// counterclockwise seen from above.
    pub fn rotate(&mut self, impulse: f64) {
        self.velocity += impulse;
    }

    /// Dolly toward (positive) or away from (negative) the target,
    /// clamped to the configured range
    pub fn zoom(&mut self, delta: f64) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
    }

    /// Apply one frame of motion and decay the velocity
    pub fn update(&mut self) {
        self.azimuth += self.velocity;
        self.velocity *= 1.0 - self.damping;
        if self.velocity.abs() < REST_THRESHOLD {
            self.velocity = 0.0;
        }
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_coasting(&self) -> bool {
        self.velocity != 0.0
    }

    /// Camera position on the horizontal orbit ring
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.azimuth.sin(),
            0.0,
            self.distance * self.azimuth.cos(),
        )
    }
}
