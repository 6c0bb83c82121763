/// Per-frame body placement from the orbit curves.

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{BodyRegistry, BodyTag};
use crate::model::OrbitCurves;

/// Phase advanced per elapsed millisecond at speed 1.
pub const DEFAULT_PHASE_RATE: f64 = 0.00001;

// ── Phase relations ──────────────────────────────────────────────────

/// The Moon laps ten times per Earth orbit and starts opposite the Sun.
const MOON_PHASE_FACTOR: f32 = 10.0;
const MOON_PHASE_OFFSET: f32 = 0.5;
const VENUS_PHASE_FACTOR: f32 = 0.2;
const VENUS_PHASE_OFFSET: f32 = 0.75;

/// Monotonic phase accumulator scaled by a global speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    time: f64,
    rate: f64,
    speed: f32,
}

impl AnimationClock {
    pub fn new(rate: f64) -> Self {
        Self { time: 0.0, rate, speed: 1.0 }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.time += dt_ms * self.rate * self.speed as f64;
    }

    /// Current phase in [0, 1).
    pub fn phase(&self) -> f32 {
        self.time.rem_euclid(1.0) as f32
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// 0 freezes every body in place.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }
}

/// Where each body sits at a phase. Earth system and Sun (and Venus) are in
/// world space; the Moon is relative to the Earth system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPositions {
    pub earth_system: Vec3,
    pub moon: Vec3,
    pub sun: Vec3,
    pub venus: Option<Vec3>,
}

impl BodyPositions {
    pub fn at(curves: &OrbitCurves, phase: f32) -> Self {
        Self {
            earth_system: curves.earth.sample_xz(phase),
            moon: curves.moon.sample_xz(phase * MOON_PHASE_FACTOR + MOON_PHASE_OFFSET),
            sun: curves.sun.sample_xz(phase),
            venus: curves
                .venus
                .map(|c| c.sample_xz(phase * VENUS_PHASE_FACTOR + VENUS_PHASE_OFFSET)),
        }
    }
}

/// Drives body positions and the Sun light every frame.
pub struct AnimationLoop {
    clock: AnimationClock,
    sun_light: Option<LightId>,
}

impl AnimationLoop {
    pub fn new(rate: f64) -> Self {
        Self {
            clock: AnimationClock::new(rate),
            sun_light: None,
        }
    }

    /// Light that tracks the Sun.
    pub fn set_sun_light(&mut self, light: LightId) {
        self.sun_light = Some(light);
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.clock.set_speed(speed);
    }

    /// Advance by `dt_ms` and write positions onto the scene.
    pub fn step(&mut self, ctx: &mut EngineContext, bodies: &BodyRegistry, curves: &OrbitCurves, dt_ms: f64) {
        self.clock.advance(dt_ms);
        let positions = BodyPositions::at(curves, self.clock.phase());
        self.place(ctx, bodies, &positions);
    }

    fn place(&self, ctx: &mut EngineContext, bodies: &BodyRegistry, positions: &BodyPositions) {
        let scene = &mut ctx.scene;
        if let Some(node) = scene.get_mut(bodies.earth_system()) {
            node.position = positions.earth_system;
        }
        let mut set = |tag: BodyTag, pos: Vec3| {
            if let Some(node) = bodies.get_by_tag(tag).and_then(|id| scene.get_mut(id)) {
                node.position = pos;
            }
        };
        set(BodyTag::Moon, positions.moon);
        set(BodyTag::Sun, positions.sun);
        if let Some(venus) = positions.venus {
            set(BodyTag::Venus, venus);
        }

        if let Some(light) = self.sun_light.and_then(|id| ctx.lights.get_mut(id)) {
            light.set_position(positions.sun);
        }
    }
}
