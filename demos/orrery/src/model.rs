/// Model flags, the orbit radii they imply, and the orbit lines drawn for them.
///
/// All radii are derived from `ModelFlags` on demand; nothing else is stored.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use orrery_engine::*;

use crate::bodies::{BodyRegistry, BodyTag};
use crate::orbit::{make_orbit, OrbitCurve, ORBIT_LINE_SAMPLES};

// ── Distances ────────────────────────────────────────────────────────

pub const SUN_NEAR_DISTANCE: f32 = 250.0;
pub const SUN_FAR_DISTANCE: f32 = 400.0;
pub const HELIOCENTRIC_MOON_ORBIT: f32 = 60.0;
pub const GEOCENTRIC_MOON_ORBIT: f32 = 120.0;
/// Venus orbit as a fraction of the Sun-Earth distance.
pub const VENUS_ORBIT_FACTOR: f32 = 0.72;

pub const ORBIT_COLOR: Color = Color::from_hex(0x888888);
const ORBIT_NAME_PREFIX: &str = "orbit";

// ── Flags ────────────────────────────────────────────────────────────

/// The complete model state. Every combination is renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelFlags {
    pub geocentric: bool,
    pub flat_earth: bool,
    pub sun_nearby: bool,
    pub big_moon: bool,
}

impl Default for ModelFlags {
    fn default() -> Self {
        Self {
            geocentric: true,
            flat_earth: true,
            sun_nearby: true,
            big_moon: true,
        }
    }
}

impl ModelFlags {
    pub fn sun_earth_distance(&self) -> f32 {
        if self.sun_nearby {
            SUN_NEAR_DISTANCE
        } else {
            SUN_FAR_DISTANCE
        }
    }

    /// Flags as a bit set for host events: geocentric=1, flat_earth=2,
    /// sun_nearby=4, big_moon=8.
    pub fn bits(&self) -> u32 {
        (self.geocentric as u32)
            | (self.flat_earth as u32) << 1
            | (self.sun_nearby as u32) << 2
            | (self.big_moon as u32) << 3
    }
}

/// Orbit radius of each body for a given flag set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRadii {
    pub earth: f32,
    pub moon: f32,
    pub sun: f32,
    pub venus: Option<f32>,
}

impl OrbitRadii {
    pub fn derive(flags: &ModelFlags, venus: bool) -> Self {
        let d = flags.sun_earth_distance();
        let venus = venus.then_some(d * VENUS_ORBIT_FACTOR);
        if flags.geocentric {
            Self { earth: 0.0, moon: GEOCENTRIC_MOON_ORBIT, sun: d, venus }
        } else {
            Self { earth: d, moon: HELIOCENTRIC_MOON_ORBIT, sun: 0.0, venus }
        }
    }
}

/// One curve per orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCurves {
    pub earth: OrbitCurve,
    pub moon: OrbitCurve,
    pub sun: OrbitCurve,
    pub venus: Option<OrbitCurve>,
}

impl OrbitCurves {
    pub fn from_radii(radii: &OrbitRadii) -> Self {
        Self {
            earth: make_orbit(radii.earth),
            moon: make_orbit(radii.moon),
            sun: make_orbit(radii.sun),
            venus: radii.venus.map(make_orbit),
        }
    }
}

// ── Orbit lines ──────────────────────────────────────────────────────

/// Tracks the names of the orbit lines currently in the scene.
#[derive(Debug, Default)]
pub struct OrbitLineRegistry {
    indices: BTreeSet<u32>,
}

impl OrbitLineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest index not in use.
    fn next_index(&self) -> u32 {
        (0..).find(|i| !self.indices.contains(i)).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.indices.iter().map(|i| format!("{ORBIT_NAME_PREFIX}{i}")).collect()
    }

    /// Remove every tracked line from both containers it could live in.
    pub fn clear(&mut self, scene: &mut Scene, earth_system: NodeId) {
        for name in self.names() {
            scene.remove_named(None, &name);
            scene.remove_named(Some(earth_system), &name);
        }
        self.indices.clear();
    }

    fn add(&mut self, ctx: &mut EngineContext, parent: Option<NodeId>, curve: &OrbitCurve) {
        let index = self.next_index();
        let id = ctx.next_id();
        let node = Node::new(id)
            .with_name(format!("{ORBIT_NAME_PREFIX}{index}"))
            .with_line(LineComponent::closed(curve.points(ORBIT_LINE_SAMPLES), ORBIT_COLOR));
        match ctx.scene.attach(node, parent) {
            Ok(()) => {
                self.indices.insert(index);
            }
            Err(_) => log::warn!("orbits: parent {:?} missing, line dropped", parent),
        }
    }

    /// Drop all lines and draw fresh ones for `curves`. The Moon's orbit goes
    /// inside the Earth system; everything else hangs off the scene root.
    pub fn redraw(&mut self, ctx: &mut EngineContext, earth_system: NodeId, curves: &OrbitCurves) {
        self.clear(&mut ctx.scene, earth_system);
        self.add(ctx, None, &curves.earth);
        self.add(ctx, Some(earth_system), &curves.moon);
        self.add(ctx, None, &curves.sun);
        if let Some(venus) = &curves.venus {
            self.add(ctx, None, venus);
        }
    }
}

// ── State machine ────────────────────────────────────────────────────

/// A flag flip caused by picking a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Earth or flat Earth picked.
    ToggleFlatEarth,
    /// Sun picked while heliocentric.
    ToggleSunDistance,
    /// Sun picked while geocentric.
    ToggleGeocentric,
    /// Moon picked.
    ToggleMoonSize,
}

impl Transition {
    /// Transition a pick of `tag` triggers under `flags`, if any.
    pub fn for_pick(tag: BodyTag, flags: &ModelFlags) -> Option<Self> {
        match tag {
            BodyTag::Earth | BodyTag::FlatEarth => Some(Transition::ToggleFlatEarth),
            BodyTag::Sun if flags.geocentric => Some(Transition::ToggleGeocentric),
            BodyTag::Sun => Some(Transition::ToggleSunDistance),
            BodyTag::Moon => Some(Transition::ToggleMoonSize),
            BodyTag::Venus => None,
        }
    }

    fn flip(self, flags: &mut ModelFlags) {
        match self {
            Transition::ToggleFlatEarth => flags.flat_earth = !flags.flat_earth,
            Transition::ToggleSunDistance => flags.sun_nearby = !flags.sun_nearby,
            Transition::ToggleGeocentric => flags.geocentric = !flags.geocentric,
            Transition::ToggleMoonSize => flags.big_moon = !flags.big_moon,
        }
    }
}

/// Owns the flags, the current curves, and the orbit lines.
pub struct ModelStateMachine {
    flags: ModelFlags,
    venus: bool,
    curves: OrbitCurves,
    lines: OrbitLineRegistry,
    in_tutorial: bool,
}

impl ModelStateMachine {
    pub fn new(flags: ModelFlags, venus: bool) -> Self {
        let curves = OrbitCurves::from_radii(&OrbitRadii::derive(&flags, venus));
        Self {
            flags,
            venus,
            curves,
            lines: OrbitLineRegistry::new(),
            in_tutorial: false,
        }
    }

    pub fn flags(&self) -> ModelFlags {
        self.flags
    }

    pub fn radii(&self) -> OrbitRadii {
        OrbitRadii::derive(&self.flags, self.venus)
    }

    pub fn curves(&self) -> &OrbitCurves {
        &self.curves
    }

    pub fn lines(&self) -> &OrbitLineRegistry {
        &self.lines
    }

    pub fn in_tutorial(&self) -> bool {
        self.in_tutorial
    }

    /// While set, picks never change the model.
    pub fn set_in_tutorial(&mut self, in_tutorial: bool) {
        self.in_tutorial = in_tutorial;
    }

    /// Draw the orbit lines for the current flags.
    pub fn draw_orbits(&mut self, ctx: &mut EngineContext, bodies: &BodyRegistry) {
        self.curves = OrbitCurves::from_radii(&self.radii());
        self.lines.redraw(ctx, bodies.earth_system(), &self.curves);
    }

    /// React to a picked body. Returns the transition applied, or `None`
    /// when the tag has none or a tutorial overlay is up.
    pub fn apply(
        &mut self,
        tag: BodyTag,
        ctx: &mut EngineContext,
        bodies: &mut BodyRegistry,
    ) -> Option<Transition> {
        if self.in_tutorial {
            log::debug!("model: {} ignored during tutorial", tag.name());
            return None;
        }
        let transition = Transition::for_pick(tag, &self.flags)?;
        transition.flip(&mut self.flags);

        match transition {
            Transition::ToggleFlatEarth => bodies.swap_earth_variant(self.flags.flat_earth, &mut ctx.scene),
            Transition::ToggleMoonSize => bodies.swap_moon_size(self.flags.big_moon, &mut ctx.scene),
            Transition::ToggleSunDistance | Transition::ToggleGeocentric => {}
        }
        self.draw_orbits(ctx, bodies);

        log::info!("model: {:?} -> {:?}", transition, self.flags);
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodySetup;

    fn setup(flags: ModelFlags, venus: bool) -> (EngineContext, BodyRegistry, ModelStateMachine) {
        let mut ctx = EngineContext::new();
        let mut bodies = BodyRegistry::spawn(
            &mut ctx,
            BodySetup { flat_earth: flags.flat_earth, big_moon: flags.big_moon, venus },
        );
        let mut model = ModelStateMachine::new(flags, venus);
        model.draw_orbits(&mut ctx, &mut bodies);
        (ctx, bodies, model)
    }

    fn orbit_nodes(ctx: &EngineContext) -> Vec<String> {
        let mut names: Vec<String> = ctx
            .scene
            .iter()
            .filter(|n| n.name.starts_with("orbit"))
            .map(|n| n.name.clone())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn sun_distance_follows_flag() {
        let mut flags = ModelFlags::default();
        assert_eq!(flags.sun_earth_distance(), 250.0);
        flags.sun_nearby = false;
        assert_eq!(flags.sun_earth_distance(), 400.0);
    }

    #[test]
    fn radius_table() {
        let mut flags = ModelFlags::default();
        let geo = OrbitRadii::derive(&flags, false);
        assert_eq!((geo.earth, geo.moon, geo.sun), (0.0, 120.0, 250.0));
        assert_eq!(geo.venus, None);

        flags.geocentric = false;
        flags.sun_nearby = false;
        let helio = OrbitRadii::derive(&flags, true);
        assert_eq!((helio.earth, helio.moon, helio.sun), (400.0, 60.0, 0.0));
        assert_eq!(helio.venus, Some(400.0 * VENUS_ORBIT_FACTOR));
    }

    #[test]
    fn sun_click_from_geocentric_start() {
        let (mut ctx, mut bodies, mut model) = setup(ModelFlags::default(), false);
        let applied = model.apply(BodyTag::Sun, &mut ctx, &mut bodies);
        assert_eq!(applied, Some(Transition::ToggleGeocentric));
        assert!(!model.flags().geocentric);
        let r = model.radii();
        assert_eq!((r.earth, r.moon, r.sun), (250.0, 60.0, 0.0));
    }

    #[test]
    fn sun_click_when_heliocentric_moves_sun_away() {
        let flags = ModelFlags { geocentric: false, ..ModelFlags::default() };
        let (mut ctx, mut bodies, mut model) = setup(flags, false);
        let applied = model.apply(BodyTag::Sun, &mut ctx, &mut bodies);
        assert_eq!(applied, Some(Transition::ToggleSunDistance));
        assert!(!model.flags().sun_nearby);
        assert!(!model.flags().geocentric);
        assert_eq!(model.radii().earth, 400.0);
    }

    #[test]
    fn moon_click_flips_only_big_moon() {
        let (mut ctx, mut bodies, mut model) = setup(ModelFlags::default(), false);
        let before = model.flags();
        let radii = model.radii();
        model.apply(BodyTag::Moon, &mut ctx, &mut bodies);
        let after = model.flags();
        assert_eq!(after.big_moon, !before.big_moon);
        assert_eq!(after.geocentric, before.geocentric);
        assert_eq!(after.flat_earth, before.flat_earth);
        assert_eq!(after.sun_nearby, before.sun_nearby);
        assert_eq!(model.radii(), radii);
    }

    #[test]
    fn earth_click_swaps_variant() {
        let (mut ctx, mut bodies, mut model) = setup(ModelFlags::default(), false);
        model.apply(BodyTag::FlatEarth, &mut ctx, &mut bodies);
        assert!(!model.flags().flat_earth);
        assert_eq!(bodies.earth_variant(), BodyTag::Earth);
        model.apply(BodyTag::Earth, &mut ctx, &mut bodies);
        assert_eq!(bodies.earth_variant(), BodyTag::FlatEarth);
    }

    #[test]
    fn orbit_lines_are_replaced_not_accumulated() {
        let (mut ctx, mut bodies, mut model) = setup(ModelFlags::default(), false);
        assert_eq!(orbit_nodes(&ctx), vec!["orbit0", "orbit1", "orbit2"]);
        for tag in [BodyTag::Sun, BodyTag::Moon, BodyTag::Sun, BodyTag::FlatEarth] {
            model.apply(tag, &mut ctx, &mut bodies);
            assert_eq!(model.lines().len(), 3);
            assert_eq!(orbit_nodes(&ctx), vec!["orbit0", "orbit1", "orbit2"]);
        }
    }

    #[test]
    fn moon_orbit_lives_in_earth_system() {
        let (ctx, bodies, _model) = setup(ModelFlags::default(), true);
        let inside: Vec<_> = ctx
            .scene
            .children(Some(bodies.earth_system()))
            .filter(|n| n.line.is_some())
            .collect();
        assert_eq!(inside.len(), 1);
        let root_lines = ctx.scene.children(None).filter(|n| n.line.is_some()).count();
        assert_eq!(root_lines, 3);
    }

    #[test]
    fn smallest_unused_index_is_reused() {
        let (mut ctx, bodies, _model) = setup(ModelFlags::default(), false);
        let mut lines = OrbitLineRegistry::new();
        let curve = make_orbit(10.0);
        lines.add(&mut ctx, None, &curve);
        lines.add(&mut ctx, None, &curve);
        lines.indices.remove(&0);
        assert_eq!(lines.next_index(), 0);
        lines.clear(&mut ctx.scene, bodies.earth_system());
        assert!(lines.is_empty());
    }

    #[test]
    fn tutorial_suppresses_transitions() {
        let (mut ctx, mut bodies, mut model) = setup(ModelFlags::default(), false);
        model.set_in_tutorial(true);
        assert_eq!(model.apply(BodyTag::Sun, &mut ctx, &mut bodies), None);
        assert_eq!(model.flags(), ModelFlags::default());
    }

    #[test]
    fn venus_pick_is_noop() {
        let (mut ctx, mut bodies, mut model) = setup(ModelFlags::default(), true);
        assert_eq!(model.apply(BodyTag::Venus, &mut ctx, &mut bodies), None);
        assert_eq!(model.lines().len(), 4);
    }

    #[test]
    fn flags_deserialize_with_defaults() {
        let flags: ModelFlags = serde_json::from_str(r#"{ "geocentric": false, "bigMoon": false }"#).unwrap();
        assert!(!flags.geocentric);
        assert!(!flags.big_moon);
        assert!(flags.flat_earth);
        assert_eq!(flags.bits(), 0b0110);
    }
}
