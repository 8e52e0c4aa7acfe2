use serde::Deserialize;

use crate::error::{GameError, Result};

/// Options accepted when a game is created.
///
/// Every field is optional on the JS side; missing fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GameOptions {
    /// Seed for reproducible tile placement. `None` draws from system entropy.
    pub seed: Option<u64>,
    /// When `true`, a move that leaves the grid unchanged still spawns a tile.
    pub spawn_on_noop: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_on_noop: true,
        }
    }
}

impl GameOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// JS numbers lose precision above 2^53; reject seeds that could not have
    /// round-tripped through the host.
    pub fn validate(&self) -> Result<()> {
        const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;
        match self.seed {
            Some(seed) if seed > MAX_SAFE_INTEGER => Err(GameError::invalid_options(format!(
                "seed {seed} exceeds {MAX_SAFE_INTEGER}"
            ))),
            _ => Ok(()),
        }
    }
}
