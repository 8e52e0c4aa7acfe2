//! `wasm-bindgen` exports for the browser host.
//!
//! The host forwards `KeyboardEvent.key` tokens to [`Game::handle_key`] and
//! renders the returned snapshot.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameOptions;
use crate::error::GameError;
use crate::game::GameInstance;
use crate::palette;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(message: &str);
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            console_error(&format!("{info}"));
        }));
    });
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn parse_options(options: JsValue) -> Result<GameOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(GameOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|err| to_js_error(GameError::invalid_options(err.to_string())))
}

/// One 2048 game owned by the page.
#[wasm_bindgen]
pub struct Game {
    inner: GameInstance,
}

#[wasm_bindgen]
impl Game {
    /// Accepts `undefined` or `{ seed?: number, spawnOnNoop?: boolean }`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Game, JsValue> {
        install_panic_hook();
        let options = parse_options(options)?;
        let inner = GameInstance::new_with_default_picker(options).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Applies an arrow-key token and returns the new state.
    /// Other tokens leave the game untouched.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> Result<JsValue, JsValue> {
        self.inner.handle_key(key).map_err(to_js_error)?;
        self.state()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    /// Cells with their display colors, row-major.
    pub fn tiles(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.tiles())
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        self.inner.reset().map_err(to_js_error)?;
        self.state()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }
}

#[wasm_bindgen(js_name = tileColor)]
pub fn tile_color(value: u32) -> String {
    palette::tile_color(value).to_string()
}
