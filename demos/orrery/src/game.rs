/// Orrery: geocentric / heliocentric model explorer.
///
/// Clicking a body flips one model assumption and, when overlays are on,
/// opens the historical measurement that motivates the change. Escape (or
/// closing the sidebar) returns to the animated view.

use orrery_engine::*;
use glam::{Vec2, Vec3};

use crate::animation::AnimationLoop;
use crate::bodies::{BodyRegistry, BodySetup, BodyTag};
use crate::config::OrreryConfig;
use crate::content;
use crate::interaction::{InteractionResult, InteractionSystem, Sidebar};
use crate::model::ModelStateMachine;
use crate::overlay::{self, OverlayInputs, OverlayKind, TutorialOverlay, DEFAULT_CAMERA};

// ── Lighting ─────────────────────────────────────────────────────────

const AMBIENT_COLOR: Color = Color::from_hex(0x888888);
const SUN_LIGHT_INTENSITY: f32 = 1.0;

// ── Custom event kinds from the host ─────────────────────────────────

/// The sidebar close button was pressed.
pub const CUSTOM_SIDEBAR_CLOSE: u32 = 1;
/// Global animation speed; `a` = multiplier.
pub const CUSTOM_SET_SPEED: u32 = 2;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = open (0/1), b = close-button offset px, c = content tag code (0 = placeholder).
pub const EVENT_SIDEBAR: f32 = 1.0;
/// a = flag bits, b = sun-earth distance, c = Venus shown (0/1).
pub const EVENT_MODEL: f32 = 2.0;
/// a = overlay code (0 = none).
pub const EVENT_TUTORIAL: f32 = 3.0;

/// Everything that exists only once the scene is built.
pub struct VisualizationState {
    bodies: BodyRegistry,
    model: ModelStateMachine,
    animation: AnimationLoop,
    interaction: InteractionSystem,
    overlay: TutorialOverlay,
    sidebar: Sidebar,
}

impl VisualizationState {
    fn build(ctx: &mut EngineContext, config: &OrreryConfig) -> Self {
        ctx.scene.clear();
        ctx.lights.clear();
        ctx.lights.set_ambient(AMBIENT_COLOR);
        ctx.camera.look_from(DEFAULT_CAMERA.position, DEFAULT_CAMERA.target);

        let flags = config.initial_flags;
        let bodies = BodyRegistry::spawn(
            ctx,
            BodySetup {
                flat_earth: flags.flat_earth,
                big_moon: flags.big_moon,
                venus: config.venus,
            },
        );
        let mut model = ModelStateMachine::new(flags, config.venus);
        model.draw_orbits(ctx, &bodies);

        let mut animation = AnimationLoop::new(config.phase_rate);
        let sun = bodies.world_position(&ctx.scene, BodyTag::Sun).unwrap_or(Vec3::ZERO);
        animation.set_sun_light(ctx.lights.add(PointLight::new(sun, Color::WHITE, SUN_LIGHT_INTENSITY)));
        animation.step(ctx, &bodies, model.curves(), 0.0);

        Self {
            bodies,
            model,
            animation,
            interaction: InteractionSystem::new(config.dispatch),
            overlay: TutorialOverlay::new(),
            sidebar: Sidebar::default(),
        }
    }

    /// Pick, update the sidebar, then hand every resolved tag to the model.
    fn on_click(&mut self, ctx: &mut EngineContext, overlays: bool) {
        let InteractionResult::Picked { nearest, tags } = self.interaction.on_click(ctx, &self.bodies) else {
            return;
        };
        self.sidebar.toggle();
        self.sidebar.show(nearest);

        for tag in tags {
            let Some(transition) = self.model.apply(tag, ctx, &mut self.bodies) else {
                continue;
            };
            if !overlays {
                continue;
            }
            // Place bodies on the new orbits before the overlay reads them.
            self.animation.step(ctx, &self.bodies, self.model.curves(), 0.0);
            let inputs = OverlayInputs::capture(ctx, &self.bodies, &self.model, &self.animation);
            let plan = overlay::build(OverlayKind::for_transition(transition), &inputs);
            self.overlay.enter(plan, ctx, &self.bodies, &mut self.model, &mut self.animation);
        }
    }

    fn cancel(&mut self, ctx: &mut EngineContext) {
        self.overlay.exit(ctx, &self.bodies, &mut self.model, &mut self.animation);
    }

    fn emit_events(&self, ctx: &mut EngineContext) {
        let content = self.sidebar.content().map(|t| t.code()).unwrap_or(0.0);
        ctx.emit_event(GameEvent::new(
            EVENT_SIDEBAR,
            self.sidebar.is_open() as u8 as f32,
            self.sidebar.close_button_offset(),
            content,
        ));
        let flags = self.model.flags();
        ctx.emit_event(GameEvent::new(
            EVENT_MODEL,
            flags.bits() as f32,
            flags.sun_earth_distance(),
            self.bodies.has_venus() as u8 as f32,
        ));
        let tutorial = self.overlay.active_kind().map(|k| k.code()).unwrap_or(0.0);
        ctx.emit_event(GameEvent::new(EVENT_TUTORIAL, tutorial, 0.0, 0.0));
    }
}

pub struct Orrery {
    config: OrreryConfig,
    /// Applied at the start of the next frame.
    pending_config: Option<OrreryConfig>,
    /// Kept so a rebuilt scene gets its textures back.
    manifest: Option<AssetManifest>,
    state: Option<VisualizationState>,
}

impl Orrery {
    pub fn new() -> Self {
        Self::with_config(OrreryConfig::default())
    }

    pub fn with_config(config: OrreryConfig) -> Self {
        Self {
            config,
            pending_config: None,
            manifest: None,
            state: None,
        }
    }

    /// Replace the configuration; the scene is rebuilt next frame.
    pub fn set_config(&mut self, config: OrreryConfig) {
        self.pending_config = Some(config);
    }

    /// HTML for the sidebar's current content.
    pub fn sidebar_html(&self) -> &'static str {
        content::sidebar_html(self.state.as_ref().and_then(|s| s.sidebar.content()))
    }

    pub fn state(&self) -> Option<&VisualizationState> {
        self.state.as_ref()
    }

    fn rebuild(&mut self, ctx: &mut EngineContext) {
        let mut state = VisualizationState::build(ctx, &self.config);
        if let Some(manifest) = &self.manifest {
            state.bodies.apply_manifest(&mut ctx.scene, manifest);
        }
        log::info!(
            "orrery: built (venus={}, overlays={}, flags={:?})",
            self.config.venus,
            self.config.overlays,
            self.config.initial_flags
        );
        self.state = Some(state);
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Orrery {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 64,
            max_line_vertices: 4096,
            max_events: 16,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.rebuild(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if let Some(config) = self.pending_config.take() {
            self.config = config;
            self.rebuild(ctx);
        }
        let overlays = self.config.overlays;
        let Some(state) = self.state.as_mut() else { return };

        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y } => state.interaction.on_pointer_move(Vec2::new(x, y)),
                InputEvent::PointerClick => state.on_click(ctx, overlays),
                InputEvent::KeyDown { key_code } if key_code == KEY_ESCAPE => state.cancel(ctx),
                InputEvent::Custom { kind, a, .. } => match kind {
                    CUSTOM_SIDEBAR_CLOSE => {
                        state.sidebar.close();
                        state.cancel(ctx);
                    }
                    CUSTOM_SET_SPEED => {
                        if !state.overlay.is_active() {
                            state.animation.set_speed(a);
                        }
                    }
                    _ => {}
                },
                InputEvent::Resize { width, height } => ctx.camera.resize(width, height),
                _ => {}
            }
        }

        // ── Animate ──────────────────────────────────────────────────
        let dt_ms = ctx.clock.dt_ms();
        state.animation.step(ctx, &state.bodies, state.model.curves(), dt_ms);

        state.emit_events(ctx);
    }

    fn on_manifest(&mut self, ctx: &mut EngineContext, manifest: &AssetManifest) {
        if let Some(state) = self.state.as_mut() {
            state.bodies.apply_manifest(&mut ctx.scene, manifest);
        }
        self.manifest = Some(manifest.clone());
    }
}
