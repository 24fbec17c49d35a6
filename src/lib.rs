//! WebAssembly entry for Driftwake.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Boots the game loop from the browser.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    game_core::run().map_err(|e| JsValue::from_str(&game_core::fatal_line(&e)))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn start() {}
