/// Circular orbit curves: pure math, no engine dependencies.
///
/// Curves live in a 2D plane; game code maps `(x, y)` onto the world XZ
/// plane so every orbit is flat on the ecliptic (y = 0).

use std::f32::consts::TAU;
use glam::{Vec2, Vec3};

/// Number of samples used to draw an orbit line.
pub const ORBIT_LINE_SAMPLES: usize = 100;

/// A circular (equal radii) parametric curve centered on its container origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCurve {
    /// Semi-major axis.
    pub radius_x: f32,
    /// Semi-minor axis. Always equal to `radius_x` for orbits built here.
    pub radius_y: f32,
    /// Angle at phase 0, radians.
    pub start_angle: f32,
    /// Angle at phase 1, radians.
    pub end_angle: f32,
    pub clockwise: bool,
}

/// Full counter-clockwise circle of the given radius.
/// A radius of 0 is a stationary body parked at the origin.
pub fn make_orbit(radius: f32) -> OrbitCurve {
    OrbitCurve {
        radius_x: radius,
        radius_y: radius,
        start_angle: 0.0,
        end_angle: TAU,
        clockwise: false,
    }
}

impl OrbitCurve {
    pub fn is_stationary(&self) -> bool {
        self.radius_x == 0.0 && self.radius_y == 0.0
    }

    /// Point on the curve at `phase`. Any real phase is accepted and taken mod 1.
    pub fn sample(&self, phase: f32) -> Vec2 {
        if self.is_stationary() {
            return Vec2::ZERO;
        }
        let phase = phase.rem_euclid(1.0);
        let mut sweep = self.end_angle - self.start_angle;
        if self.clockwise {
            sweep = -sweep;
        }
        let angle = self.start_angle + phase * sweep;
        Vec2::new(self.radius_x * angle.cos(), self.radius_y * angle.sin())
    }

    /// Same as `sample`, lifted onto the XZ plane.
    pub fn sample_xz(&self, phase: f32) -> Vec3 {
        let p = self.sample(phase);
        Vec3::new(p.x, 0.0, p.y)
    }

    /// `samples` evenly spaced points on the XZ plane, for drawing as a
    /// closed polyline.
    pub fn points(&self, samples: usize) -> Vec<Vec3> {
        (0..samples)
            .map(|i| self.sample_xz(i as f32 / samples as f32))
            .collect()
    }
}

/// Free-function form of `OrbitCurve::sample`.
pub fn sample(curve: &OrbitCurve, phase: f32) -> Vec2 {
    curve.sample(phase)
}
