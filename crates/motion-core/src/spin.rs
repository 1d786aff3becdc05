//! Constant self-rotation about the vertical axis.

use std::f64::consts::TAU;

use levitate_common::clock::sanitize_delta;
use levitate_common::config::SpinConfig;

/// Turns objects at a fixed angular speed, independent of the spring.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    angular_speed: f64,
    max_delta: f64,
}

impl Spin {
    pub fn new(config: SpinConfig, max_delta: f64) -> Self {
        Self {
            angular_speed: config.angular_speed,
            max_delta,
        }
    }

    /// Next angle, wrapped into `[0, 2π)` so long sessions stay precise.
    pub fn advance(&self, angle: f64, delta: f64) -> f64 {
        let dt = sanitize_delta(delta, self.max_delta);
        let next = (angle + dt * self.angular_speed).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if next >= TAU {
            0.0
        } else {
            next
        }
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }
}
