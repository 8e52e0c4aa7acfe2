use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod palette;
pub mod spawn;
pub mod types;
pub mod wasm;

pub use config::GameOptions;
pub use error::{GameError, Result};
pub use game::{GameInstance, MoveOutcome};
pub use grid::{Grid, compact, compact_line};
pub use spawn::{CellPicker, RngPicker, spawn};
pub use types::{Axis, Direction, GameState};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
