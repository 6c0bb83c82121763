use crate::api::types::{GameEvent, NodeId};
use crate::assets::manifest::AssetManifest;
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Vertical field of view in degrees (default: 75).
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Longest frame delta fed to the clock, in seconds (default: 0.25).
    pub max_frame_dt: f32,
    /// Maximum number of mesh instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of line vertices (default: 4096).
    pub max_line_vertices: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Maximum number of events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 10000.0,
            max_frame_dt: 0.25,
            max_instances: 64,
            max_line_vertices: 4096,
            max_lights: 4,
            max_events: 32,
        }
    }
}

/// The core contract every visualization must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn nodes, place camera and lights.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Called once per display frame after the clock advanced.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Called when the host delivers an asset manifest. Textures resolve
    /// asynchronously on the host, so this may arrive after init.
    fn on_manifest(&mut self, _ctx: &mut EngineContext, _manifest: &AssetManifest) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub lights: LightState,
    pub clock: FrameClock,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let mut camera = PerspectiveCamera::new(config.fov_y_deg, 1.0, config.near, config.far);
        camera.resize(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::new(),
            camera,
            lights: LightState::new(),
            clock: FrameClock::new(config.max_frame_dt),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit an event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn camera_aspect_from_viewport() {
        let config = GameConfig {
            viewport_width: 800.0,
            viewport_height: 400.0,
            ..GameConfig::default()
        };
        let ctx = EngineContext::from_config(&config);
        assert_eq!(ctx.camera.aspect, 2.0);
        assert_eq!(ctx.camera.fov_y_deg, 75.0);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
