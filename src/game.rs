use tracing::debug;

use crate::config::GameOptions;
use crate::error::Result;
use crate::grid::{Grid, WINNING_TILE, compact};
use crate::palette::tile_color;
use crate::spawn::{CellPicker, RngPicker, spawn_tiles};
use crate::types::{Direction, GameState, TileView};

/// What a single accepted move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// `true` when compaction moved or merged at least one tile.
    pub changed: bool,
    /// Cells that received a new tile, empty when nothing was spawned.
    pub spawned: Vec<usize>,
}

pub struct GameInstance {
    grid: Grid,
    pub last_direction: Option<Direction>,
    pub moves: u32,
    options: GameOptions,
    picker: Box<dyn CellPicker>,
}

impl GameInstance {
    /// Starts a game with two tiles placed by `picker`.
    pub fn new(options: GameOptions, mut picker: Box<dyn CellPicker>) -> Result<Self> {
        options.validate()?;
        let grid = spawn_tiles(Grid::EMPTY, picker.as_mut())?.grid;
        debug!(?options, "game started");

        Ok(Self {
            grid,
            last_direction: None,
            moves: 0,
            options,
            picker,
        })
    }

    pub fn new_with_default_picker(options: GameOptions) -> Result<Self> {
        let picker: Box<dyn CellPicker> = match options.seed {
            Some(seed) => Box::new(RngPicker::seeded(seed)),
            None => Box::new(RngPicker::from_entropy()),
        };
        Self::new(options, picker)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Applies one move: compact along the direction's axis, then spawn.
    ///
    /// The stored grid is replaced only when both steps succeed.
    pub fn apply(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let compacted = compact(self.grid, direction.axis(), direction.to_far_end());
        let changed = compacted != self.grid;

        let (next, spawned) = if changed || self.options.spawn_on_noop {
            let spawned = spawn_tiles(compacted, self.picker.as_mut())?;
            (spawned.grid, spawned.placed)
        } else {
            (compacted, Vec::new())
        };

        self.grid = next;
        self.last_direction = Some(direction);
        self.moves = self.moves.saturating_add(1);
        debug!(
            key = direction.key(),
            changed,
            ?spawned,
            moves = self.moves,
            "move applied"
        );

        Ok(MoveOutcome {
            direction,
            changed,
            spawned,
        })
    }

    /// Handles a raw key token. Tokens other than the four arrow keys are
    /// ignored and return `Ok(None)` without touching state.
    pub fn handle_key(&mut self, key: &str) -> Result<Option<MoveOutcome>> {
        match Direction::from_key(key) {
            Some(direction) => self.apply(direction).map(Some),
            None => Ok(None),
        }
    }

    /// Discards the current grid and starts over with two fresh tiles.
    pub fn reset(&mut self) -> Result<()> {
        self.grid = spawn_tiles(Grid::EMPTY, self.picker.as_mut())?.grid;
        self.last_direction = None;
        self.moves = 0;
        debug!("game reset");
        Ok(())
    }

    /// Full grid with no direction that changes it.
    pub fn is_game_over(&self) -> bool {
        self.grid.empty_count() == 0 && !self.grid.can_move()
    }

    pub fn has_won(&self) -> bool {
        self.grid.highest_tile() >= WINNING_TILE
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            grid: self.grid.to_vec(),
            direction: self.last_direction.map(|d| d.key().to_string()),
            highest_tile: self.grid.highest_tile(),
            empty_count: self.grid.empty_count(),
            moves: self.moves,
            is_game_over: self.is_game_over(),
            has_won: self.has_won(),
        }
    }

    /// Cells with their colors. Occupied cells also carry the last move's key
    /// token as an animation hint.
    pub fn tiles(&self) -> Vec<TileView> {
        let hint = self.last_direction.map(Direction::key);
        self.grid
            .cells()
            .iter()
            .enumerate()
            .map(|(index, &value)| TileView {
                index: index as u8,
                value,
                color: tile_color(value),
                direction: if value != 0 { hint } else { None },
            })
            .collect()
    }

    #[cfg(test)]
    fn set_grid_for_test(&mut self, grid: Grid) {
        self.grid = grid;
        self.last_direction = None;
    }
}
