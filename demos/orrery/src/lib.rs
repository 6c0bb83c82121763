use wasm_bindgen::prelude::*;

mod animation;
mod bodies;
mod config;
mod content;
mod game;
mod interaction;
mod model;
mod orbit;
mod overlay;

use config::OrreryConfig;
use game::Orrery;

orrery_web::export_game!(Orrery, "orrery");

/// HTML for the sidebar's current content.
#[wasm_bindgen]
pub fn game_sidebar_html() -> String {
    with_runner(|r| r.game().sidebar_html().to_string()).unwrap_or_default()
}

/// Replace the visualization options; the scene is rebuilt next frame.
/// Returns false (and keeps the current options) if the JSON is invalid.
#[wasm_bindgen]
pub fn game_load_config(json: &str) -> bool {
    match OrreryConfig::from_json(json) {
        Ok(config) => with_runner(|r| r.game_mut().set_config(config)).is_some(),
        Err(err) => {
            log::warn!("orrery: ignoring invalid config: {}", err);
            false
        }
    }
}
