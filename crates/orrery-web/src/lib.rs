pub mod runner;

pub use runner::GameRunner;

// Re-exported so `export_game!` expands without extra imports at the call site.
#[doc(hidden)]
pub use orrery_engine;
#[doc(hidden)]
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a visualization.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::Orrery;
///
/// orrery_web::export_game!(Orrery, "orrery");
/// ```
///
/// The game type must provide `fn new() -> Self`. Calls made before
/// `game_init()` are logged and return zero / null.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::error!("{}: not initialized, call game_init() first", $game_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_click() {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerClick));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        // ---- Data accessors ----

        /// Copy of the 12-float frame header.
        #[wasm_bindgen]
        pub fn get_header() -> $crate::js_sys::Float32Array {
            let header = with_runner(|r| r.header().to_vec()).unwrap_or_default();
            $crate::js_sys::Float32Array::from(header.as_slice())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_line_vertices_ptr() -> *const f32 {
            with_runner(|r| r.line_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_line_vertex_count() -> u32 {
            with_runner(|r| r.line_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_line_vertices() -> u32 {
            with_runner(|r| r.max_line_vertices()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
