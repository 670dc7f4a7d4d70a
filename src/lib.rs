//! Bomb Dash core crate.
//!
//! A deterministic, fixed-tick platformer simulation: player physics, bomb
//! collection in group order, monster movement patterns, special coins and
//! level flow. [`GameEngine`] owns a whole run and is usable natively (tests,
//! tools) or in the browser through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entities;
pub mod groups;
pub mod input;
pub mod maps;
pub mod monster;
pub mod physics;
pub mod render;
pub mod scoring;
pub mod spawner;
pub mod store;
pub mod transition;
mod web;

pub use audio::{AudioSink, RecordingAudio, SilentAudio, Sound};
pub use config::{EngineConfig, PhysicsConfig};
pub use engine::{DebugInfo, GameEngine};
pub use entities::{Bomb, BombHighlight, CoinKind, Platform, Player, Rect, SpecialCoin};
pub use input::InputState;
pub use maps::{MapDefinition, MapError};
pub use monster::{Monster, MonsterType, MovementPattern};
pub use render::{Frame, Renderer};
pub use store::{GameState, GameStatus, GameStore};
pub use web::CanvasRenderer;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web::init_logging();
}

/// Start the campaign on the page's canvas.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(false)
}

/// Start the sandbox map, which runs without the menu and countdown.
#[wasm_bindgen]
pub fn start_playground() -> Result<(), JsValue> {
    web::start(true)
}
