use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};

use crate::error::{GameError, Result};
use crate::grid::{Grid, MAX_SUM};

/// Value of every newly placed tile.
pub const SPAWN_VALUE: u32 = 2;
/// Tiles placed when spawning on an all-empty grid.
pub const INITIAL_TILES: usize = 2;

/// Source of the uniformly chosen empty cell.
pub trait CellPicker: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// `CellPicker` backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<ChaCha8Rng> {
    /// Reproducible picker: the same seed yields the same tile sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng + Send> CellPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Result of a spawn: the new grid plus the cells that received a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawned {
    pub grid: Grid,
    pub placed: Vec<usize>,
}

/// Places new tiles on a copy of `grid`.
///
/// An all-empty grid receives `INITIAL_TILES` tiles on distinct cells; any
/// other grid receives one. Cells are chosen uniformly among the empty ones.
/// A full grid yields `NoSpaceAvailable`; a grid whose tile sum would pass
/// `MAX_SUM` yields `InvalidGrid`.
pub fn spawn(grid: Grid, picker: &mut dyn CellPicker) -> Result<Grid> {
    spawn_tiles(grid, picker).map(|spawned| spawned.grid)
}

/// Same as [`spawn`] but also reports where the tiles went.
///
/// Picks outside `0..len` wrap around instead of failing.
pub fn spawn_tiles(grid: Grid, picker: &mut dyn CellPicker) -> Result<Spawned> {
    let mut empty = grid.empty_cells();
    if empty.is_empty() {
        warn!("spawn rejected: grid is full");
        return Err(GameError::NoSpaceAvailable);
    }

    let count = if grid.is_empty() { INITIAL_TILES } else { 1 };
    let added = u64::from(SPAWN_VALUE) * count as u64;
    if grid.sum() + added > MAX_SUM {
        warn!(sum = grid.sum(), "spawn rejected: tile sum at cap");
        return Err(GameError::invalid_grid(format!(
            "spawning would push tile sum past {MAX_SUM}"
        )));
    }

    let mut next = grid;
    let mut placed = Vec::with_capacity(count);

    for _ in 0..count {
        let choice = picker.pick(empty.len()) % empty.len();
        let idx = empty.remove(choice);
        next.set(idx, SPAWN_VALUE);
        placed.push(idx);
    }

    trace!(?placed, remaining = empty.len(), "spawned tiles");
    Ok(Spawned { grid: next, placed })
}
