use serde::Serialize;

/// Axis a move slides tiles along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parses a browser `KeyboardEvent.key` token.
    /// Returns `None` for anything that is not an arrow key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Up => "ArrowUp",
            Self::Down => "ArrowDown",
            Self::Left => "ArrowLeft",
            Self::Right => "ArrowRight",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// `true` when tiles gather at the far end of each line (Down/Right).
    pub fn to_far_end(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub grid: Vec<u32>,
    /// Key token of the last applied move, for presentational hints only.
    pub direction: Option<String>,
    pub highest_tile: u32,
    pub empty_count: u8,
    pub moves: u32,
    /// Contract:
    /// - `true` when the grid is full and no direction changes it.
    /// - Reported only; input is still accepted.
    pub is_game_over: bool,
    pub has_won: bool,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub index: u8,
    pub value: u32,
    pub color: &'static str,
    /// Last move's key token, set only on occupied cells.
    pub direction: Option<&'static str>,
}
