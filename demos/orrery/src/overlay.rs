//! Measurement overlays: transient geometry illustrating a historical
//! argument for each model change.
//!
//! `build` is pure: it reads a snapshot of the scene and returns a plan.
//! `TutorialOverlay::enter` applies the plan; `exit` tears all of it down.

use glam::{Quat, Vec3};
use orrery_engine::*;

use crate::animation::AnimationLoop;
use crate::bodies::{self, BodyRegistry, BodyTag};
use crate::model::{ModelFlags, ModelStateMachine, OrbitCurves, Transition, HELIOCENTRIC_MOON_ORBIT, VENUS_ORBIT_FACTOR};
use crate::orbit::{make_orbit, OrbitCurve};

// ── Default view ─────────────────────────────────────────────────────

pub const DEFAULT_CAMERA: CameraPose = CameraPose {
    position: Vec3::new(0.0, 30.0, 500.0),
    target: Vec3::ZERO,
};

// ── Overlay styling ──────────────────────────────────────────────────

const RAY_COLOR: Color = Color::from_hex(0xffee88);
const GUIDE_COLOR: Color = Color::from_hex(0x66ccff);
const TICK_COLOR: Color = Color::from_hex(0xff5544);
const POLE_COLOR: Color = Color::from_hex(0xdddddd);
const MARKER_COLOR: Color = Color::from_hex(0x44dd88);
const DECOY_COLOR: Color = Color::from_hex(0xbbbbbb);

// ── Eratosthenes ─────────────────────────────────────────────────────

const POLE_HEIGHT: f32 = 20.0;
const POLE_RADIUS: f32 = 1.5;
/// Angular distance of each pole from the subsolar point on the sphere.
const POLE_ANGLES_DEG: [f32; 2] = [10.0, 40.0];
/// Pole offsets along the sunward axis on the disk.
const DISK_POLE_OFFSETS: [f32; 2] = [-20.0, 20.0];
/// Sun elevation over the disk; rays are parallel so both poles see it.
const DISK_SUN_ELEVATION_DEG: f32 = 60.0;
const SUN_RAY_LENGTH: f32 = 120.0;

// ── Aristarchus ──────────────────────────────────────────────────────

const RIGHT_ANGLE_TICK: f32 = 8.0;

// ── Copernicus ───────────────────────────────────────────────────────

const COPERNICUS_SAMPLES: usize = 8;
/// Earth phase step between samples.
const COPERNICUS_STEP: f32 = 1.0 / 16.0;
/// The inner planet laps faster than the Earth.
const INNER_PLANET_RATE: f32 = 1.6;
const SIGHT_LINE_SCALE: f32 = 2.5;
const EARTH_MARKER_RADIUS: f32 = 4.0;
const PLANET_MARKER_RADIUS: f32 = 5.0;

// ── Lunar parallax ───────────────────────────────────────────────────

const BACKDROP_FACTOR: f32 = 3.0;
const OBSERVER_RADIUS: f32 = 3.0;

/// One overlay per model transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Eratosthenes,
    Aristarchus,
    Copernicus,
    LunarParallax,
}

impl OverlayKind {
    pub fn for_transition(transition: Transition) -> Self {
        match transition {
            Transition::ToggleFlatEarth => OverlayKind::Eratosthenes,
            Transition::ToggleSunDistance => OverlayKind::Aristarchus,
            Transition::ToggleGeocentric => OverlayKind::Copernicus,
            Transition::ToggleMoonSize => OverlayKind::LunarParallax,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OverlayKind::Eratosthenes => "eratosthenes",
            OverlayKind::Aristarchus => "aristarchus",
            OverlayKind::Copernicus => "copernicus",
            OverlayKind::LunarParallax => "lunar_parallax",
        }
    }

    /// Wire value used in host events; 0 means no overlay.
    pub fn code(self) -> f32 {
        match self {
            OverlayKind::Eratosthenes => 1.0,
            OverlayKind::Aristarchus => 2.0,
            OverlayKind::Copernicus => 3.0,
            OverlayKind::LunarParallax => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Snapshot of everything an overlay reads.
#[derive(Debug, Clone, Copy)]
pub struct OverlayInputs {
    pub flags: ModelFlags,
    pub earth_variant: BodyTag,
    /// World position of the Earth-system group.
    pub earth: Vec3,
    pub sun: Vec3,
    pub moon: Vec3,
    pub curves: OrbitCurves,
    pub phase: f32,
}

impl OverlayInputs {
    pub fn capture(ctx: &EngineContext, bodies: &BodyRegistry, model: &ModelStateMachine, animation: &AnimationLoop) -> Self {
        let earth = ctx.scene.world_position(bodies.earth_system()).unwrap_or(Vec3::ZERO);
        Self {
            flags: model.flags(),
            earth_variant: bodies.earth_variant(),
            earth,
            sun: bodies.world_position(&ctx.scene, BodyTag::Sun).unwrap_or(Vec3::ZERO),
            moon: bodies.world_position(&ctx.scene, BodyTag::Moon).unwrap_or(earth),
            curves: *model.curves(),
            phase: animation.clock().phase(),
        }
    }

    fn sun_direction(&self) -> Vec3 {
        horizontal_unit(self.sun - self.earth, Vec3::X)
    }

    fn earth_radius(&self) -> f32 {
        match self.earth_variant {
            BodyTag::FlatEarth => bodies::FLAT_EARTH_RADIUS,
            _ => bodies::EARTH_RADIUS,
        }
    }

    fn moon_radius(&self) -> f32 {
        if self.flags.big_moon {
            bodies::MOON_RADIUS_BIG
        } else {
            bodies::MOON_RADIUS_SMALL
        }
    }
}

/// Which container an overlay node hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayParent {
    Root,
    EarthSystem,
}

/// A node to create; it gets an id when the plan is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedNode {
    pub parent: OverlayParent,
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub mesh: Option<MeshComponent>,
    pub line: Option<LineComponent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlan {
    pub kind: OverlayKind,
    pub nodes: Vec<PlannedNode>,
    pub camera: CameraPose,
    pub hide_moon: bool,
}

impl OverlayPlan {
    fn new(kind: OverlayKind, camera: CameraPose) -> Self {
        Self { kind, nodes: Vec::new(), camera, hide_moon: false }
    }

    fn push(&mut self, parent: OverlayParent, position: Vec3, mesh: Option<MeshComponent>, line: Option<LineComponent>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(PlannedNode {
            parent,
            name: format!("{}_{}", self.kind.name(), index),
            position,
            rotation: Quat::IDENTITY,
            mesh,
            line,
        });
        index
    }

    fn line(&mut self, parent: OverlayParent, points: Vec<Vec3>, color: Color) -> usize {
        self.push(parent, Vec3::ZERO, None, Some(LineComponent::open(points, color)))
    }

    fn sphere(&mut self, parent: OverlayParent, position: Vec3, radius: f32, color: Color) -> usize {
        let mesh = MeshComponent::new(Geometry::sphere(radius), Material::new(color));
        self.push(parent, position, Some(mesh), None)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineComponent> {
        self.nodes.iter().filter_map(|n| n.line.as_ref())
    }

    pub fn meshes(&self) -> impl Iterator<Item = &PlannedNode> {
        self.nodes.iter().filter(|n| n.mesh.is_some())
    }
}

/// Unit vector of `v` flattened onto the XZ plane, or `fallback`.
fn horizontal_unit(v: Vec3, fallback: Vec3) -> Vec3 {
    let flat = Vec3::new(v.x, 0.0, v.z);
    if flat.length_squared() < 1e-8 {
        fallback
    } else {
        flat.normalize()
    }
}

/// In-plane perpendicular of a horizontal unit vector.
fn side_of(dir: Vec3) -> Vec3 {
    Vec3::Y.cross(dir).normalize_or_zero()
}

/// Build the transient geometry for `kind`.
pub fn build(kind: OverlayKind, inputs: &OverlayInputs) -> OverlayPlan {
    match kind {
        OverlayKind::Eratosthenes => eratosthenes(inputs),
        OverlayKind::Aristarchus => aristarchus(inputs),
        OverlayKind::Copernicus => copernicus(inputs),
        OverlayKind::LunarParallax => lunar_parallax(inputs),
    }
}

/// Shadow length of a pole of `height` whose axis is `incidence` radians off the light.
pub fn shadow_length(height: f32, incidence: f32) -> f32 {
    height * incidence.tan()
}

/// Two poles casting shadows: different lengths on a sphere, equal on a disk.
fn eratosthenes(inputs: &OverlayInputs) -> OverlayPlan {
    let s = inputs.sun_direction();
    let side = side_of(s);
    let camera = CameraPose {
        position: inputs.earth + side * 160.0 + Vec3::Y * 40.0,
        target: inputs.earth,
    };
    let mut plan = OverlayPlan::new(OverlayKind::Eratosthenes, camera);
    plan.hide_moon = true;

    // (base, surface normal, incoming ray) in Earth-system space
    let poles: Vec<(Vec3, Vec3, Vec3)> = match inputs.earth_variant {
        BodyTag::FlatEarth => {
            let elevation = DISK_SUN_ELEVATION_DEG.to_radians();
            let ray = -(s * elevation.cos() + Vec3::Y * elevation.sin());
            DISK_POLE_OFFSETS
                .iter()
                .map(|&offset| (Vec3::Y * (bodies::FLAT_EARTH_HEIGHT / 2.0) + s * offset, Vec3::Y, ray))
                .collect()
        }
        _ => POLE_ANGLES_DEG
            .iter()
            .map(|&deg| {
                let a = deg.to_radians();
                let normal = s * a.cos() + Vec3::Y * a.sin();
                (normal * bodies::EARTH_RADIUS, normal, -s)
            })
            .collect(),
    };

    for (base, normal, ray) in poles {
        let pole = MeshComponent::new(Geometry::cylinder(POLE_RADIUS, POLE_HEIGHT), Material::new(POLE_COLOR));
        let index = plan.push(OverlayParent::EarthSystem, base + normal * (POLE_HEIGHT / 2.0), Some(pole), None);
        plan.nodes[index].rotation = Quat::from_rotation_arc(Vec3::Y, normal);

        let top = inputs.earth + base + normal * POLE_HEIGHT;
        plan.line(OverlayParent::Root, vec![top - ray * SUN_RAY_LENGTH, top], RAY_COLOR);

        let incidence = (-ray).angle_between(normal);
        let along = (ray - normal * ray.dot(normal)).normalize_or_zero();
        let length = shadow_length(POLE_HEIGHT, incidence);
        plan.line(OverlayParent::EarthSystem, vec![base, base + along * length], TICK_COLOR);
    }
    plan
}

/// Half-moon triangle: the angle at the Moon is right, so the angle at
/// the Earth gives the Sun's distance in Moon distances.
fn aristarchus(inputs: &OverlayInputs) -> OverlayPlan {
    let e = inputs.earth;
    let s = inputs.sun;
    let d = (s - e).length();
    let u = inputs.sun_direction();
    let side = side_of(u);
    let mut r = inputs.curves.moon.radius_x;
    if r <= 0.0 {
        r = HELIOCENTRIC_MOON_ORBIT;
    }
    let r = r.min(d);
    let theta = (r / d.max(f32::EPSILON)).acos();
    let m = e + (u * theta.cos() + side * theta.sin()) * r;

    let mid = (e + s) / 2.0;
    let camera = CameraPose {
        position: mid + Vec3::Y * (d * 1.2) + side * 1.0,
        target: mid,
    };
    let mut plan = OverlayPlan::new(OverlayKind::Aristarchus, camera);
    plan.hide_moon = true;

    plan.sphere(OverlayParent::Root, m, inputs.moon_radius(), DECOY_COLOR);
    plan.line(OverlayParent::Root, vec![e, m], GUIDE_COLOR);
    plan.line(OverlayParent::Root, vec![m, s], GUIDE_COLOR);
    plan.line(OverlayParent::Root, vec![s, e], GUIDE_COLOR);

    let to_e = (e - m).normalize_or_zero() * RIGHT_ANGLE_TICK;
    let to_s = (s - m).normalize_or_zero() * RIGHT_ANGLE_TICK;
    plan.line(OverlayParent::Root, vec![m + to_e, m + to_e + to_s, m + to_s], TICK_COLOR);
    plan
}

/// Inner planet and Earth over successive phases; sight lines from Earth
/// sweep back and forth (retrograde motion).
fn copernicus(inputs: &OverlayInputs) -> OverlayPlan {
    let d = inputs.flags.sun_earth_distance();
    let earth_curve = if inputs.curves.earth.is_stationary() {
        make_orbit(d)
    } else {
        inputs.curves.earth
    };
    let planet_curve: OrbitCurve = inputs
        .curves
        .venus
        .unwrap_or_else(|| make_orbit(d * VENUS_ORBIT_FACTOR));

    let camera = CameraPose {
        position: Vec3::new(0.0, d * 2.2, 1.0),
        target: Vec3::ZERO,
    };
    let mut plan = OverlayPlan::new(OverlayKind::Copernicus, camera);

    for k in 0..COPERNICUS_SAMPLES {
        let phase = inputs.phase + k as f32 * COPERNICUS_STEP;
        let earth = earth_curve.sample_xz(phase);
        let planet = planet_curve.sample_xz(phase * INNER_PLANET_RATE);
        plan.sphere(OverlayParent::Root, earth, EARTH_MARKER_RADIUS, MARKER_COLOR);
        plan.sphere(OverlayParent::Root, planet, PLANET_MARKER_RADIUS, DECOY_COLOR);
        let sight = (planet - earth).normalize_or_zero() * d * SIGHT_LINE_SCALE;
        plan.line(OverlayParent::Root, vec![earth, earth + sight], GUIDE_COLOR);
    }
    plan
}

/// Two observers on opposite limbs see the Moon against different points
/// of a distant backdrop.
fn lunar_parallax(inputs: &OverlayInputs) -> OverlayPlan {
    let e = inputs.earth;
    let m = inputs.moon;
    let u = horizontal_unit(m - e, Vec3::X);
    let distance = (m - e).length().max(inputs.earth_radius() * 2.0);
    let backdrop = distance * BACKDROP_FACTOR;
    let side = side_of(u);
    let radius = inputs.earth_radius();

    let camera = CameraPose {
        position: e - u * 150.0 + Vec3::Y * 40.0,
        target: m,
    };
    let mut plan = OverlayPlan::new(OverlayKind::LunarParallax, camera);

    let mut apparent = Vec::with_capacity(2);
    for sign in [1.0_f32, -1.0] {
        let local = side * radius * sign;
        plan.sphere(OverlayParent::EarthSystem, local, OBSERVER_RADIUS, MARKER_COLOR);

        let observer = e + local;
        let dir = (m - observer).normalize_or_zero();
        let along = dir.dot(u);
        let t = if along > f32::EPSILON { backdrop / along } else { backdrop };
        let seen = observer + dir * t;
        plan.line(OverlayParent::Root, vec![observer, seen], GUIDE_COLOR);
        plan.sphere(OverlayParent::Root, seen, inputs.moon_radius(), DECOY_COLOR);
        apparent.push(seen);
    }
    plan.line(OverlayParent::Root, apparent, TICK_COLOR);
    plan
}

// ── Lifecycle ────────────────────────────────────────────────────────

struct ActiveOverlay {
    kind: OverlayKind,
    nodes: Vec<NodeId>,
}

/// The overlay currently shown, if any.
#[derive(Default)]
pub struct TutorialOverlay {
    active: Option<ActiveOverlay>,
}

impl TutorialOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_kind(&self) -> Option<OverlayKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Add the plan's nodes, move the camera, freeze animation and suppress
    /// model changes. Returns false if an overlay is already up.
    pub fn enter(
        &mut self,
        plan: OverlayPlan,
        ctx: &mut EngineContext,
        bodies: &BodyRegistry,
        model: &mut ModelStateMachine,
        animation: &mut AnimationLoop,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let mut nodes = Vec::with_capacity(plan.nodes.len());
        for planned in plan.nodes {
            let parent = match planned.parent {
                OverlayParent::Root => None,
                OverlayParent::EarthSystem => Some(bodies.earth_system()),
            };
            let id = ctx.next_id();
            let mut node = Node::new(id)
                .with_name(planned.name)
                .with_position(planned.position)
                .with_rotation(planned.rotation);
            node.mesh = planned.mesh;
            node.line = planned.line;
            if ctx.scene.attach(node, parent).is_ok() {
                nodes.push(id);
            }
        }
        if plan.hide_moon {
            bodies.set_visible(&mut ctx.scene, BodyTag::Moon, false);
        }
        ctx.camera.look_from(plan.camera.position, plan.camera.target);
        animation.set_speed(0.0);
        model.set_in_tutorial(true);

        log::info!("overlay: entered {} ({} nodes)", plan.kind.name(), nodes.len());
        self.active = Some(ActiveOverlay { kind: plan.kind, nodes });
        true
    }

    /// Tear the overlay down and restore the default view. Returns false if
    /// none was active.
    pub fn exit(
        &mut self,
        ctx: &mut EngineContext,
        bodies: &BodyRegistry,
        model: &mut ModelStateMachine,
        animation: &mut AnimationLoop,
    ) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        let earth_system = Some(bodies.earth_system());
        for id in &active.nodes {
            ctx.scene.remove_child(None, *id);
            ctx.scene.remove_child(earth_system, *id);
        }
        ctx.camera.look_from(DEFAULT_CAMERA.position, DEFAULT_CAMERA.target);
        animation.set_speed(1.0);
        bodies.set_visible(&mut ctx.scene, BodyTag::Moon, true);
        model.set_in_tutorial(false);

        log::info!("overlay: left {}", active.kind.name());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::DEFAULT_PHASE_RATE;
    use crate::bodies::BodySetup;

    struct World {
        ctx: EngineContext,
        bodies: BodyRegistry,
        model: ModelStateMachine,
        animation: AnimationLoop,
    }

    fn world(flags: ModelFlags) -> World {
        let mut ctx = EngineContext::new();
        let bodies = BodyRegistry::spawn(
            &mut ctx,
            BodySetup { flat_earth: flags.flat_earth, big_moon: flags.big_moon, venus: false },
        );
        let mut model = ModelStateMachine::new(flags, false);
        model.draw_orbits(&mut ctx, &bodies);
        let mut animation = AnimationLoop::new(DEFAULT_PHASE_RATE);
        animation.step(&mut ctx, &bodies, model.curves(), 20_000.0);
        ctx.camera.look_from(DEFAULT_CAMERA.position, DEFAULT_CAMERA.target);
        World { ctx, bodies, model, animation }
    }

    fn inputs(w: &World) -> OverlayInputs {
        OverlayInputs::capture(&w.ctx, &w.bodies, &w.model, &w.animation)
    }

    fn shadow_ticks(plan: &OverlayPlan) -> Vec<f32> {
        plan.nodes
            .iter()
            .filter(|n| n.parent == OverlayParent::EarthSystem)
            .filter_map(|n| n.line.as_ref())
            .map(|l| (l.points[1] - l.points[0]).length())
            .collect()
    }

    #[test]
    fn shadow_length_grows_with_incidence() {
        assert_eq!(shadow_length(20.0, 0.0), 0.0);
        assert!((shadow_length(20.0, std::f32::consts::FRAC_PI_4) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn eratosthenes_sphere_shadows_differ() {
        let w = world(ModelFlags { flat_earth: false, geocentric: false, ..ModelFlags::default() });
        let plan = build(OverlayKind::Eratosthenes, &inputs(&w));
        let ticks = shadow_ticks(&plan);
        assert_eq!(ticks.len(), 2);
        let expected: Vec<f32> = POLE_ANGLES_DEG.iter().map(|a| shadow_length(POLE_HEIGHT, a.to_radians())).collect();
        assert!((ticks[0] - expected[0]).abs() < 1e-3);
        assert!((ticks[1] - expected[1]).abs() < 1e-3);
        assert!(plan.hide_moon);
    }

    #[test]
    fn eratosthenes_disk_shadows_match() {
        let w = world(ModelFlags::default());
        let plan = build(OverlayKind::Eratosthenes, &inputs(&w));
        let ticks = shadow_ticks(&plan);
        assert_eq!(ticks.len(), 2);
        assert!((ticks[0] - ticks[1]).abs() < 1e-3);
        assert!(ticks[0] > 0.0);
    }

    #[test]
    fn aristarchus_angle_at_moon_is_right() {
        let w = world(ModelFlags { geocentric: false, sun_nearby: false, ..ModelFlags::default() });
        let input = inputs(&w);
        let plan = build(OverlayKind::Aristarchus, &input);
        let decoy = plan.meshes().next().unwrap().position;
        let to_earth = input.earth - decoy;
        let to_sun = input.sun - decoy;
        assert!(to_earth.normalize().dot(to_sun.normalize()).abs() < 1e-3);
        assert!((to_earth.length() - 60.0).abs() < 1e-2);
        assert_eq!(plan.lines().count(), 4);
    }

    #[test]
    fn copernicus_samples_and_sight_lines() {
        let w = world(ModelFlags { geocentric: false, ..ModelFlags::default() });
        let plan = build(OverlayKind::Copernicus, &inputs(&w));
        assert_eq!(plan.meshes().count(), COPERNICUS_SAMPLES * 2);
        assert_eq!(plan.lines().count(), COPERNICUS_SAMPLES);
        assert!(!plan.hide_moon);
    }

    #[test]
    fn parallax_observers_straddle_earth() {
        let w = world(ModelFlags { geocentric: false, flat_earth: false, ..ModelFlags::default() });
        let input = inputs(&w);
        let plan = build(OverlayKind::LunarParallax, &input);
        let observers: Vec<Vec3> = plan
            .nodes
            .iter()
            .filter(|n| n.parent == OverlayParent::EarthSystem)
            .map(|n| n.position)
            .collect();
        assert_eq!(observers.len(), 2);
        assert!((observers[0] + observers[1]).length() < 1e-3);
        assert!((observers[0].length() - bodies::EARTH_RADIUS).abs() < 1e-3);
        // decoys sit on the backdrop, well beyond the Moon
        let moon_distance = (input.moon - input.earth).length();
        for decoy in plan.meshes().filter(|n| n.parent == OverlayParent::Root) {
            assert!((decoy.position - input.earth).length() > moon_distance * 2.5);
        }
    }

    #[test]
    fn enter_then_exit_leaves_nothing_behind() {
        for kind in [
            OverlayKind::Eratosthenes,
            OverlayKind::Aristarchus,
            OverlayKind::Copernicus,
            OverlayKind::LunarParallax,
        ] {
            let mut w = world(ModelFlags { geocentric: false, ..ModelFlags::default() });
            let before = w.ctx.scene.len();
            let plan = build(kind, &inputs(&w));
            let mut overlay = TutorialOverlay::new();
            assert!(overlay.enter(plan, &mut w.ctx, &w.bodies, &mut w.model, &mut w.animation));
            assert_eq!(overlay.active_kind(), Some(kind));
            assert!(w.model.in_tutorial());
            assert_eq!(w.animation.clock().speed(), 0.0);
            assert!(w.ctx.scene.len() > before);

            assert!(overlay.exit(&mut w.ctx, &w.bodies, &mut w.model, &mut w.animation));
            assert_eq!(w.ctx.scene.len(), before);
            let es = Some(w.bodies.earth_system());
            let leftovers = w
                .ctx
                .scene
                .iter()
                .filter(|n| n.parent.is_none() || n.parent == es)
                .filter(|n| n.name.starts_with(kind.name()))
                .count();
            assert_eq!(leftovers, 0);
            assert_eq!(w.ctx.camera.position, Vec3::new(0.0, 30.0, 500.0));
            assert_eq!(w.ctx.camera.target, Vec3::ZERO);
            assert_eq!(w.animation.clock().speed(), 1.0);
            assert!(!w.model.in_tutorial());
            let moon = w.bodies.get_by_tag(BodyTag::Moon).unwrap();
            assert!(w.ctx.scene.get(moon).unwrap().visible);
        }
    }

    #[test]
    fn second_enter_is_refused() {
        let mut w = world(ModelFlags::default());
        let mut overlay = TutorialOverlay::new();
        let plan = build(OverlayKind::Copernicus, &inputs(&w));
        assert!(overlay.enter(plan.clone(), &mut w.ctx, &w.bodies, &mut w.model, &mut w.animation));
        assert!(!overlay.enter(plan, &mut w.ctx, &w.bodies, &mut w.model, &mut w.animation));
        assert!(!TutorialOverlay::new().exit(&mut w.ctx, &w.bodies, &mut w.model, &mut w.animation));
    }
}
