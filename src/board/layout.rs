//! Board layout: the grid of spacer, border and tile cells.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{LayoutError, TileId};

/// One grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty, renders nothing.
    Spacer,
    /// Decorative outline, not interactive.
    Border,
    /// Playable slot.
    Tile(TileId),
}

impl Cell {
    #[must_use]
    pub const fn tile_id(self) -> Option<TileId> {
        match self {
            Cell::Tile(id) => Some(id),
            Cell::Spacer | Cell::Border => None,
        }
    }

}

const S: Cell = Cell::Spacer;
const B: Cell = Cell::Border;

const fn t(id: u16) -> Cell {
    Cell::Tile(TileId::new(id))
}

/// Number of playable slots in [`HEART`].
pub const HEART_TILES: usize = 46;

/// The shipped heart silhouette, 13 columns by 10 rows.
#[rustfmt::skip]
pub const HEART: [[Cell; 13]; 10] = [
    [S, S, S, B, B, S, S, S, B, B, S, S, S],
    [S, S, B, t(0), t(1), B, S, B, t(2), t(3), B, S, S],
    [S, B, t(4), t(5), t(6), t(7), B, t(8), t(9), t(10), t(11), B, S],
    [B, t(12), t(13), t(14), t(15), t(16), t(17), t(18), t(19), t(20), t(21), t(22), B],
    [S, B, t(23), t(24), t(25), t(26), t(27), t(28), t(29), t(30), t(31), B, S],
    [S, S, B, t(32), t(33), t(34), t(35), t(36), t(37), t(38), B, S, S],
    [S, S, S, B, t(39), t(40), t(41), t(42), t(43), B, S, S, S],
    [S, S, S, S, B, t(44), B, t(45), B, S, S, S, S],
    [S, S, S, S, S, B, B, B, S, S, S, S, S],
    [S, S, S, S, S, S, B, S, S, S, S, S, S],
];

/// Fixed grid of cells.
///
/// Invariant: the tile ids across all rows are exactly `0..N` for an even
/// `N`, each appearing once. Every constructor upholds it, so
/// [`is_playable`](Self::is_playable) is a range check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    rows: Vec<Vec<Cell>>,
    playable_count: usize,
}

impl BoardLayout {
    /// Build a layout from authored rows, checking the tile-id invariant.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, LayoutError> {
        let playable_count = validate_rows(&rows)?;
        Ok(Self {
            rows,
            playable_count,
        })
    }

    /// The 46-tile heart.
    #[must_use]
    pub fn heart() -> Self {
        Self {
            rows: HEART.iter().map(|row| row.to_vec()).collect(),
            playable_count: HEART_TILES,
        }
    }

    /// A single row of `count` tiles, ids in order. Handy for small games.
    pub fn strip(count: u16) -> Result<Self, LayoutError> {
        Self::from_rows(vec![(0..count).map(t).collect()])
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; renderers lay out a `height x width` grid.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Every cell with its `(row, column)` position, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &cell)| (r, c, cell))
        })
    }

    /// Number of playable slots, `N`.
    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.playable_count
    }

    /// Pairs needed to fill the board, `N / 2`.
    #[must_use]
    pub fn pairs_needed(&self) -> usize {
        self.playable_count / 2
    }

    #[must_use]
    pub fn is_playable(&self, tile: TileId) -> bool {
        tile.index() < self.playable_count
    }

    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> {
        TileId::all(self.playable_count)
    }

    /// Grid position of a tile.
    #[must_use]
    pub fn position_of(&self, tile: TileId) -> Option<(usize, usize)> {
        self.cells()
            .find(|&(_, _, cell)| cell == Cell::Tile(tile))
            .map(|(r, c, _)| (r, c))
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::heart()
    }
}

/// Returns the playable count if the rows satisfy the tile-id invariant.
fn validate_rows(rows: &[Vec<Cell>]) -> Result<usize, LayoutError> {
    let mut seen = FxHashSet::default();
    for tile in rows.iter().flatten().filter_map(|cell| cell.tile_id()) {
        if !seen.insert(tile) {
            return Err(LayoutError::DuplicateTile(tile));
        }
    }

    let count = seen.len();
    if count == 0 {
        return Err(LayoutError::NoPlayableTiles);
    }
    if let Some(missing) = TileId::all(count).find(|id| !seen.contains(id)) {
        return Err(LayoutError::MissingTile(missing));
    }
    if count % 2 != 0 {
        return Err(LayoutError::OddTileCount(count));
    }

    Ok(count)
}
