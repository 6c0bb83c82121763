use orrery_engine::{
    Game, GameConfig, EngineContext, InputEvent, InputQueue,
    RenderBuffer, ProtocolLayout, AssetManifest, CameraUniform,
    build_render_buffer,
};
use orrery_engine::bridge::protocol::{pack_color, FrameCounts, HEADER_FLOATS};

/// Generic runner that wires up the engine loop.
///
/// Each concrete visualization creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    header: [f32; HEADER_FLOATS],
    camera: CameraUniform,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances, config.max_line_vertices);
        let ctx = EngineContext::from_config(&config);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer,
            layout,
            config,
            initialized: false,
            header: [0.0; HEADER_FLOATS],
            camera,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Parse a manifest and hand it to the game. A malformed manifest is
    /// logged and ignored; bodies simply stay untextured.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => self.game.on_manifest(&mut self.ctx, &manifest),
            Err(err) => log::warn!("ignoring malformed asset manifest: {}", err),
        }
    }

    /// Run one display frame: advance the clock, update the game, publish buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.ctx.clock.advance(dt);
        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.publish();
    }

    fn publish(&mut self) {
        build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        self.ctx.lights.pack(self.config.max_lights);
        self.camera = self.ctx.camera.uniform();
        self.layout.write_header(
            &mut self.header,
            FrameCounts {
                frame: self.ctx.clock.frames(),
                instances: self.render_buffer.instances().len(),
                line_vertices: self.render_buffer.line_vertices().len(),
                lights: self.ctx.lights.packed().len(),
                events: self.ctx.events.len(),
                ambient: pack_color(self.ctx.lights.ambient()),
            },
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    // ---- Pointer accessors for host reads ----

    pub fn header(&self) -> &[f32] {
        &self.header
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.render_buffer.line_vertices_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.render_buffer.line_vertex_count()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.packed().as_ptr() as *const f32
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.packed().len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
