use std::fmt;

use crate::error::{GameError, Result};
use crate::types::{Axis, Direction};

const GRID_WIDTH: usize = 4;
pub const GRID_LEN: usize = GRID_WIDTH * GRID_WIDTH;
pub const WINNING_TILE: u32 = 2048;
/// Upper bound on the sum of all tiles. Every tile is at most the sum and
/// compaction conserves it, so merges never leave `u32`.
pub const MAX_SUM: u64 = 1 << 31;

/// 4x4 board in row-major order: 0 = empty, otherwise a power of two >= 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid([u32; GRID_LEN]);

impl Grid {
    pub const EMPTY: Grid = Grid([0; GRID_LEN]);

    /// Builds a grid from a slice, rejecting anything that is not 16 cells of
    /// 0 or powers of two summing to at most `MAX_SUM`.
    pub fn from_cells(cells: &[u32]) -> Result<Self> {
        if cells.len() != GRID_LEN {
            return Err(GameError::invalid_grid(format!(
                "expected {GRID_LEN} cells, got {}",
                cells.len()
            )));
        }

        let mut grid = [0u32; GRID_LEN];
        for (idx, (dst, &value)) in grid.iter_mut().zip(cells).enumerate() {
            if !is_valid_tile(value) {
                return Err(GameError::invalid_grid(format!(
                    "cell {idx} holds {value}, expected 0 or a power of two >= 2"
                )));
            }
            *dst = value;
        }

        let grid = Self(grid);
        if grid.sum() > MAX_SUM {
            return Err(GameError::invalid_grid(format!(
                "tile sum {} exceeds {MAX_SUM}",
                grid.sum()
            )));
        }
        Ok(grid)
    }

    pub fn from_array(cells: [u32; GRID_LEN]) -> Result<Self> {
        Self::from_cells(&cells)
    }

    pub fn cells(&self) -> &[u32; GRID_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.0.to_vec()
    }

    /// Returns the value at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= GRID_WIDTH || col >= GRID_WIDTH {
            return None;
        }
        Some(self.0[row * GRID_WIDTH + col])
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn empty_count(&self) -> u8 {
        self.0.iter().filter(|value| **value == 0).count() as u8
    }

    pub fn non_empty_count(&self) -> u8 {
        GRID_LEN as u8 - self.empty_count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|value| *value == 0)
    }

    pub fn highest_tile(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn sum(&self) -> u64 {
        self.0.iter().map(|value| u64::from(*value)).sum()
    }

    /// Grid positions of line `line` along `axis`, in line order.
    /// Rows are `4r..4r+4`; columns are `c, c+4, c+8, c+12`.
    pub fn line_indices(axis: Axis, line: usize) -> [usize; GRID_WIDTH] {
        let line = line % GRID_WIDTH;
        let mut indices = [0usize; GRID_WIDTH];
        for (offset, idx) in indices.iter_mut().enumerate() {
            *idx = match axis {
                Axis::Horizontal => line * GRID_WIDTH + offset,
                Axis::Vertical => offset * GRID_WIDTH + line,
            };
        }
        indices
    }

    /// Slides and merges every line for `direction`. No tile is spawned.
    pub fn shift(self, direction: Direction) -> Self {
        compact(self, direction.axis(), direction.to_far_end())
    }

    /// `true` when at least one direction changes the grid.
    pub fn can_move(&self) -> bool {
        Direction::ALL
            .into_iter()
            .any(|direction| self.shift(direction) != *self)
    }

    /// Writes `value` without validation. Callers keep the tile invariant.
    pub(crate) fn set(&mut self, idx: usize, value: u32) {
        self.0[idx] = value;
    }
}

impl TryFrom<Vec<u32>> for Grid {
    type Error = GameError;

    fn try_from(cells: Vec<u32>) -> Result<Self> {
        Self::from_cells(&cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.0.chunks(GRID_WIDTH).enumerate() {
            if row > 0 {
                writeln!(f, "-----+-----+-----+-----")?;
            }
            let line: Vec<String> = cells
                .iter()
                .map(|value| match value {
                    0 => "     ".to_string(),
                    v => format!("{v:^5}"),
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

/// Slides and merges all four lines along `axis`.
///
/// `to_far_end` gathers tiles at the end of each line (Right/Down); otherwise
/// they gather at index 0 (Left/Up).
pub fn compact(grid: Grid, axis: Axis, to_far_end: bool) -> Grid {
    let mut out = grid;
    for line in 0..GRID_WIDTH {
        let indices = Grid::line_indices(axis, line);
        let values = indices.map(|idx| grid.0[idx]);
        let compacted = compact_line(values, to_far_end);
        for (idx, value) in indices.into_iter().zip(compacted) {
            out.0[idx] = value;
        }
    }
    out
}

/// Compacts a single line.
///
/// Zeros are dropped, then one forward pass merges each equal adjacent pair
/// into the left element and consumes the right one, so a merged tile never
/// merges again in the same move. Padding goes in front when `to_far_end`.
pub fn compact_line(line: [u32; GRID_WIDTH], to_far_end: bool) -> [u32; GRID_WIDTH] {
    let mut tiles: Vec<u32> = line.into_iter().filter(|value| *value != 0).collect();

    for i in 0..tiles.len().saturating_sub(1) {
        if tiles[i] != 0 && tiles[i] == tiles[i + 1] {
            tiles[i] *= 2;
            tiles[i + 1] = 0;
        }
    }
    tiles.retain(|value| *value != 0);

    let mut out = [0u32; GRID_WIDTH];
    let start = if to_far_end {
        GRID_WIDTH - tiles.len()
    } else {
        0
    };
    out[start..start + tiles.len()].copy_from_slice(&tiles);
    out
}

fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: [u32; GRID_LEN]) -> Grid {
        Grid::from_array(cells).unwrap()
    }

    fn row(grid: &Grid, r: usize) -> [u32; 4] {
        Grid::line_indices(Axis::Horizontal, r).map(|idx| grid.cells()[idx])
    }

    fn column(grid: &Grid, c: usize) -> [u32; 4] {
        Grid::line_indices(Axis::Vertical, c).map(|idx| grid.cells()[idx])
    }

    #[test]
    fn left_merges_pair_into_first_cell() {
        let g = grid([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let moved = g.shift(Direction::Left);

        assert_eq!(row(&moved, 0), [4, 0, 0, 0]);
        assert_eq!(moved.non_empty_count(), 1);
    }

    #[test]
    fn right_merges_across_gap() {
        let g = grid([2, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let moved = g.shift(Direction::Right);

        assert_eq!(row(&moved, 0), [0, 0, 0, 4]);
    }

    #[test]
    fn earliest_pair_wins_and_result_does_not_remerge() {
        let g = grid([2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(row(&g.shift(Direction::Left), 0), [4, 2, 0, 0]);
        assert_eq!(compact_line([4, 2, 2, 0], false), [4, 4, 0, 0]);
        assert_eq!(compact_line([2, 2, 2, 2], false), [4, 4, 0, 0]);
        assert_eq!(compact_line([2, 2, 2, 2], true), [0, 0, 4, 4]);
    }

    #[test]
    fn right_keeps_left_to_right_tie_break() {
        // Pairs are scanned from index 0 even when tiles gather on the right.
        assert_eq!(compact_line([2, 2, 2, 0], true), [0, 0, 4, 2]);
    }

    #[test]
    fn down_merges_column_with_stride_four() {
        let g = grid([2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0]);

        let moved = g.shift(Direction::Down);

        assert_eq!(column(&moved, 0), [0, 0, 0, 4]);
        assert_eq!(moved.cells()[12], 4);
    }

    #[test]
    fn up_moves_each_column_independently() {
        let g = grid([0, 0, 0, 8, 0, 4, 0, 0, 2, 4, 0, 8, 2, 0, 16, 0]);

        let moved = g.shift(Direction::Up);

        assert_eq!(column(&moved, 0), [4, 0, 0, 0]);
        assert_eq!(column(&moved, 1), [8, 0, 0, 0]);
        assert_eq!(column(&moved, 2), [16, 0, 0, 0]);
        assert_eq!(column(&moved, 3), [16, 0, 0, 0]);
    }

    #[test]
    fn compact_leaves_unmovable_lines_alone() {
        let g = grid([2, 4, 8, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(g.shift(Direction::Left), g);
        assert_eq!(compact(g, Axis::Horizontal, false), g);
    }

    #[test]
    fn line_indices_cover_rows_and_columns() {
        assert_eq!(Grid::line_indices(Axis::Horizontal, 2), [8, 9, 10, 11]);
        assert_eq!(Grid::line_indices(Axis::Vertical, 1), [1, 5, 9, 13]);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let err = Grid::from_cells(&[0; 15]).unwrap_err();

        assert!(matches!(err, GameError::InvalidGrid { .. }));
        assert!(err.to_string().contains("expected 16 cells, got 15"));
    }

    #[test]
    fn from_cells_rejects_non_power_of_two() {
        let mut cells = [0u32; GRID_LEN];
        cells[5] = 6;

        let err = Grid::from_array(cells).unwrap_err();

        assert!(err.to_string().contains("cell 5 holds 6"));
        cells[5] = 1;
        assert!(Grid::from_array(cells).is_err());
    }

    #[test]
    fn from_cells_rejects_sum_above_cap() {
        let mut cells = vec![0u32; GRID_LEN];
        cells[..4].fill(1 << 30);

        let err = Grid::try_from(cells).unwrap_err();

        assert!(err.to_string().contains("exceeds 2147483648"));
    }

    #[test]
    fn merges_at_sum_cap_stay_valid() {
        let mut cells = [0u32; GRID_LEN];
        cells[..4].fill(1 << 29);
        let mut g = grid(cells);

        for expected in [[1u32 << 30, 1 << 30, 0, 0], [1 << 31, 0, 0, 0], [1 << 31, 0, 0, 0]] {
            g = g.shift(Direction::Left);
            assert_eq!(row(&g, 0), expected);
            assert_eq!(g.sum(), MAX_SUM);
            assert_eq!(Grid::from_cells(g.cells()), Ok(g));
        }
    }

    #[test]
    fn can_move_detects_locked_grid() {
        let locked = grid([2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2]);
        let mergeable = grid([2, 2, 4, 8, 4, 8, 16, 32, 8, 16, 32, 64, 16, 32, 64, 128]);

        assert!(!locked.can_move());
        assert!(mergeable.can_move());
        assert!(!Grid::EMPTY.can_move());
    }

    #[test]
    fn accessors_report_counts_and_extremes() {
        let g = grid([0, 2, 0, 0, 0, 0, 64, 0, 0, 0, 0, 0, 0, 0, 0, 8]);

        assert_eq!(g.get(1, 2), Some(64));
        assert_eq!(g.get(4, 0), None);
        assert_eq!(g.empty_count(), 13);
        assert_eq!(g.empty_cells().len(), 13);
        assert_eq!(g.highest_tile(), 64);
        assert_eq!(g.sum(), 74);
        assert!(!g.is_empty());
        assert!(Grid::EMPTY.is_empty());
    }

    #[test]
    fn display_renders_four_rows() {
        let text = grid([2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2048]).to_string();

        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("2048"));
    }
}
