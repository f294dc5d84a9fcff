//! Game board representation: the grid of cells, root zones, and pieces.
//!
//! This module contains:
//! - Player and piece types
//! - The Cell struct (zone marker + optional occupant)
//! - The Board grid with its query and mutation methods
//!
//! The board is a fixed-size rectangular grid. Each player owns a "root
//! zone": the middle half of their home row (`[W/4, 3W/4)`). Gray's root is
//! the bottom row, Green's root is the top row. Zone markers are set once at
//! construction and never change; only occupants move.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width, matching the classic 8x8 layout.
pub const DEFAULT_BOARD_WIDTH: usize = 8;

/// Default board height.
pub const DEFAULT_BOARD_HEIGHT: usize = 8;

/// One of the two players.
///
/// Gray sits at the bottom of the board (root on the last row) and moves
/// first. Green sits at the top (root on row 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Gray,
    Green,
}

impl Player {
    /// The other player.
    pub fn opponent(&self) -> Player {
        match self {
            Player::Gray => Player::Green,
            Player::Green => Player::Gray,
        }
    }
}

/// Piece rank.
///
/// Leaves are the ordinary pieces with no usage limit. Branch and Trunk are
/// special pieces: each player may have at most one of each on the board at
/// a time, and losing one puts it on cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ordinary piece; grows the player's reachable area.
    Leaf,
    /// Special piece; opens a 5x3 placement window around itself.
    Branch,
    /// Special piece; acts as a growth source and can never be pushed.
    Trunk,
}

impl Rank {
    /// All ranks, in picker order.
    pub const ALL: [Rank; 3] = [Rank::Leaf, Rank::Branch, Rank::Trunk];

    /// Whether this rank can be shoved by an adjacent enemy placement.
    pub fn is_pushable(&self) -> bool {
        !matches!(self, Rank::Trunk)
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub fn new(owner: Player, rank: Rank) -> Self {
        Self { owner, rank }
    }
}

/// A board coordinate, `x` growing rightward and `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: usize,
    pub y: usize,
}

impl Square {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One grid cell: an immutable zone marker plus an optional occupant.
///
/// The two are independent; a root-zone cell may hold any piece or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Which player's root zone this cell belongs to, if any.
    pub zone: Option<Player>,
    /// The piece standing here, if any.
    pub occupant: Option<Piece>,
}

/// Errors from board cell access.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("coordinates ({x}, {y}) are outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// The playing field: a `width x height` grid of cells.
///
/// The grid is created once per session and mutated in place; it is never
/// resized. Cells are only reachable through the board's methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major cell storage, index `y * width + x`.
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with zones marked and starting leaves seeded.
    ///
    /// Green's root is the top row, Gray's root the bottom row, each
    /// spanning columns `[W/4, 3W/4)`. Each player starts with two leaves
    /// on the row adjacent to their root, at the two centermost columns.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 4: smaller boards cannot hold
    /// distinct root rows, starting rows, and a non-empty zone span.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 4 && height >= 4,
            "board must be at least 4x4, got {width}x{height}"
        );

        let mut board = Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        };

        for x in board.zone_columns() {
            board.cells[x].zone = Some(Player::Green);
            board.cells[(height - 1) * width + x].zone = Some(Player::Gray);
        }

        // Starting leaves: two per player, centermost columns, one row in
        // from each root row.
        for x in [width / 2 - 1, width / 2] {
            board.cells[width + x].occupant = Some(Piece::new(Player::Green, Rank::Leaf));
            board.cells[(height - 2) * width + x].occupant =
                Some(Piece::new(Player::Gray, Rank::Leaf));
        }

        board
    }

    /// Board width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies on the board.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get the cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell, BoardError> {
        if !self.contains(x, y) {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(&self.cells[y * self.width + x])
    }

    /// The occupant at `(x, y)`, or `None` when empty or out of bounds.
    pub fn occupant(&self, x: usize, y: usize) -> Option<Piece> {
        self.get(x, y).ok().and_then(|c| c.occupant)
    }

    /// Overwrite the occupant at `(x, y)`, preserving the zone marker.
    pub fn set_occupant(
        &mut self,
        x: usize,
        y: usize,
        occupant: Option<Piece>,
    ) -> Result<(), BoardError> {
        if !self.contains(x, y) {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.cells[y * self.width + x].occupant = occupant;
        Ok(())
    }

    /// The row holding `owner`'s root zone.
    pub fn root_row(&self, owner: Player) -> usize {
        match owner {
            Player::Gray => self.height - 1,
            Player::Green => 0,
        }
    }

    /// The column span of both root zones.
    pub fn zone_columns(&self) -> std::ops::Range<usize> {
        self.width / 4..self.width * 3 / 4
    }

    /// Whether `(x, y)` lies inside `owner`'s own root zone.
    pub fn in_zone(&self, x: usize, y: usize, owner: Player) -> bool {
        self.contains(x, y) && y == self.root_row(owner) && self.zone_columns().contains(&x)
    }

    /// Whether `(x, y)` lies inside the root zone of `owner`'s opponent.
    pub fn in_opponent_zone(&self, x: usize, y: usize, owner: Player) -> bool {
        self.in_zone(x, y, owner.opponent())
    }

    /// Whether `(x, y)` lies inside either root zone.
    pub fn in_any_zone(&self, x: usize, y: usize) -> bool {
        self.in_zone(x, y, Player::Gray) || self.in_zone(x, y, Player::Green)
    }

    /// Find `owner`'s piece of the given rank, scanning row by row.
    ///
    /// Returns the first match; special pieces exist at most once per
    /// player, so for Branch and Trunk this is the only match.
    pub fn find_piece(&self, owner: Player, rank: Rank) -> Option<Square> {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x].occupant == Some(Piece::new(owner, rank)) {
                    return Some(Square::new(x, y));
                }
            }
        }
        None
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Square::new(i % width, i / width), cell))
    }

    /// Count pieces matching a predicate.
    pub fn count_pieces<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Piece) -> bool,
    {
        self.cells
            .iter()
            .filter_map(|c| c.occupant)
            .filter(|p| predicate(p))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_cover_middle_half_of_home_rows() {
        let board = Board::default();

        for x in 0..8 {
            let expected = (2..6).contains(&x);
            assert_eq!(board.get(x, 0).unwrap().zone == Some(Player::Green), expected);
            assert_eq!(board.get(x, 7).unwrap().zone == Some(Player::Gray), expected);
        }

        // No zone markers anywhere else
        for y in 1..7 {
            for x in 0..8 {
                assert_eq!(board.get(x, y).unwrap().zone, None);
            }
        }
    }

    #[test]
    fn test_fresh_board_has_four_starting_leaves() {
        let board = Board::default();

        assert_eq!(board.count_pieces(|p| p.rank == Rank::Leaf), 4);
        assert_eq!(board.count_pieces(|p| p.rank != Rank::Leaf), 0);

        for x in [3, 4] {
            assert_eq!(
                board.occupant(x, 1),
                Some(Piece::new(Player::Green, Rank::Leaf))
            );
            assert_eq!(
                board.occupant(x, 6),
                Some(Piece::new(Player::Gray, Rank::Leaf))
            );
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::default();
        assert!(matches!(
            board.get(8, 0),
            Err(BoardError::OutOfBounds { x: 8, y: 0, .. })
        ));
        assert!(board.get(0, 8).is_err());
        assert!(board.get(7, 7).is_ok());
    }

    #[test]
    fn test_set_occupant_preserves_zone() {
        let mut board = Board::default();
        let piece = Piece::new(Player::Gray, Rank::Leaf);

        board.set_occupant(3, 0, Some(piece)).unwrap();
        let cell = board.get(3, 0).unwrap();
        assert_eq!(cell.zone, Some(Player::Green));
        assert_eq!(cell.occupant, Some(piece));

        board.set_occupant(3, 0, None).unwrap();
        assert_eq!(board.get(3, 0).unwrap().zone, Some(Player::Green));
    }

    #[test]
    fn test_zone_queries() {
        let board = Board::default();

        assert!(board.in_zone(3, 7, Player::Gray));
        assert!(!board.in_zone(3, 0, Player::Gray));
        assert!(board.in_opponent_zone(3, 0, Player::Gray));
        assert!(!board.in_opponent_zone(3, 7, Player::Gray));

        // Outside the column span
        assert!(!board.in_zone(1, 7, Player::Gray));
        assert!(!board.in_any_zone(0, 0));

        // Out of bounds is never in a zone
        assert!(!board.in_zone(9, 7, Player::Gray));
    }

    #[test]
    fn test_find_piece() {
        let mut board = Board::default();
        assert_eq!(board.find_piece(Player::Gray, Rank::Branch), None);

        board
            .set_occupant(5, 4, Some(Piece::new(Player::Gray, Rank::Branch)))
            .unwrap();
        assert_eq!(
            board.find_piece(Player::Gray, Rank::Branch),
            Some(Square::new(5, 4))
        );
        // Rank and owner must both match
        assert_eq!(board.find_piece(Player::Green, Rank::Branch), None);
    }

    #[test]
    fn test_non_square_board_zones() {
        let board = Board::new(12, 6);
        assert_eq!(board.zone_columns(), 3..9);
        assert!(board.in_zone(3, 5, Player::Gray));
        assert!(board.in_zone(8, 0, Player::Green));
        assert!(!board.in_zone(9, 0, Player::Green));
        assert_eq!(board.occupant(5, 1), Some(Piece::new(Player::Green, Rank::Leaf)));
        assert_eq!(board.occupant(6, 4), Some(Piece::new(Player::Gray, Rank::Leaf)));
    }

    #[test]
    #[should_panic(expected = "at least 4x4")]
    fn test_too_small_board_panics() {
        let _ = Board::new(3, 8);
    }
}
