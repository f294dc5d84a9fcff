//! The game session: move legality, placement, chain pushes, line
//! elimination, and win detection.
//!
//! All rule violations are silent rejections: `attempt_place` returns an
//! outcome with `accepted = false` and touches nothing. The push and
//! elimination phases run in a fixed documented order, and each pass reads
//! the board as mutated by the passes before it; that ordering is part of
//! the rules, not an implementation accident.

use crate::actions::{EliminatedPiece, PlaceOutcome, PushedPiece};
use crate::board::{
    Board, BoardError, Piece, Player, Rank, Square, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
};
use crate::player::{Availability, SpecialPieces};
use serde::{Deserialize, Serialize};

/// Push directions, attempted in this fixed order (left, right, up, down).
/// Later directions see the board as already mutated by earlier pushes.
const PUSH_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Half-extents of the placement window a Branch opens around itself
/// (5 columns by 3 rows).
const BRANCH_RANGE_X: usize = 2;
const BRANCH_RANGE_Y: usize = 1;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the current player to place a piece.
    AwaitingMove,
    /// Absorbing end state. `winner` is `None` when the shell abandoned
    /// the session.
    Terminal { winner: Option<Player> },
}

/// One game of TreeGo.
///
/// The session exclusively owns its board; the presentation shell drives it
/// one `attempt_place` at a time and reads state back through `cell_at`,
/// `is_valid_position`, and `snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// The game board.
    pub board: Board,
    /// Whose turn it is. Gray moves first.
    pub current_player: Player,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    gray_pieces: SpecialPieces,
    green_pieces: SpecialPieces,
}

impl GameSession {
    /// Start a session on a fresh `width x height` board, Gray to move.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board: Board::new(width, height),
            current_player: Player::Gray,
            phase: SessionPhase::AwaitingMove,
            gray_pieces: SpecialPieces::default(),
            green_pieces: SpecialPieces::default(),
        }
    }

    /// Whether the session has reached its terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Terminal { .. })
    }

    /// The winner, if the session ended with one.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            SessionPhase::Terminal { winner } => winner,
            SessionPhase::AwaitingMove => None,
        }
    }

    /// Special-piece slots for a player.
    pub fn special_pieces(&self, player: Player) -> &SpecialPieces {
        match player {
            Player::Gray => &self.gray_pieces,
            Player::Green => &self.green_pieces,
        }
    }

    fn special_pieces_mut(&mut self, player: Player) -> &mut SpecialPieces {
        match player {
            Player::Gray => &mut self.gray_pieces,
            Player::Green => &mut self.green_pieces,
        }
    }

    /// External abort from the shell. Terminal, no winner recorded.
    pub fn abandon(&mut self) {
        if !self.is_finished() {
            self.phase = SessionPhase::Terminal { winner: None };
        }
    }

    /// Zone marker and occupant at `(x, y)`, for rendering.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<(Option<Player>, Option<Piece>), BoardError> {
        let cell = self.board.get(x, y)?;
        Ok((cell.zone, cell.occupant))
    }

    // ==================== Move Legality ====================

    /// Whether the current player may place a piece of `rank` at `(x, y)`.
    ///
    /// Checks, in order: session still running, target in bounds and empty,
    /// target outside the mover's own root zone, the rank's availability
    /// gate, and reachability (Branch window or growth adjacency). Pure;
    /// used by shells for move-preview highlighting.
    pub fn is_valid_position(&self, x: usize, y: usize, rank: Rank) -> bool {
        if self.is_finished() {
            return false;
        }
        if !self.board.contains(x, y) || self.board.occupant(x, y).is_some() {
            return false;
        }
        // A player may place into the opponent's root zone, never their own.
        if self.board.in_zone(x, y, self.current_player) {
            return false;
        }
        if self.special_pieces(self.current_player).availability(rank) != Availability::Available {
            return false;
        }
        self.in_branch_range(x, y) || self.has_growth_source(x, y)
    }

    /// All cells where the current player may place `rank` right now.
    pub fn valid_positions(&self, rank: Rank) -> Vec<Square> {
        let mut positions = Vec::new();
        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                if self.is_valid_position(x, y, rank) {
                    positions.push(Square::new(x, y));
                }
            }
        }
        positions
    }

    /// Whether `(x, y)` falls in the 5x3 window around the current
    /// player's Branch, if one is on the board.
    fn in_branch_range(&self, x: usize, y: usize) -> bool {
        match self.board.find_piece(self.current_player, Rank::Branch) {
            Some(branch) => {
                x.abs_diff(branch.x) <= BRANCH_RANGE_X && y.abs_diff(branch.y) <= BRANCH_RANGE_Y
            }
            None => false,
        }
    }

    /// Whether any of the 8 neighbors of `(x, y)` holds one of the current
    /// player's Leaf or Trunk pieces.
    ///
    /// The growability test applies to the *neighbor*, not the target: a
    /// source piece standing inside the opponent's root zone never counts,
    /// while the target itself may lie inside that zone.
    fn has_growth_source(&self, x: usize, y: usize) -> bool {
        for dx in -1isize..=1 {
            for dy in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let Some((nx, ny)) = self.offset(x, y, dx, dy) else {
                    continue;
                };
                if self.board.in_opponent_zone(nx, ny, self.current_player) {
                    continue;
                }
                if let Some(piece) = self.board.occupant(nx, ny) {
                    if piece.owner == self.current_player
                        && matches!(piece.rank, Rank::Leaf | Rank::Trunk)
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Step `(x, y)` by a signed offset, `None` when it leaves the board.
    fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.board.contains(nx, ny).then_some((nx, ny))
    }

    // ==================== Placement ====================

    /// Attempt to place a piece of `rank` at `(x, y)` for the current
    /// player.
    ///
    /// On acceptance the full pipeline runs atomically: placement, cooldown
    /// decay, chain pushes, line elimination, and the two win checks (once
    /// for the mover, once for the next player after the turn switches).
    /// On rejection nothing changes.
    pub fn attempt_place(&mut self, x: usize, y: usize, rank: Rank) -> PlaceOutcome {
        if !self.is_valid_position(x, y, rank) {
            return PlaceOutcome::rejected();
        }

        let mover = self.current_player;

        self.special_pieces_mut(mover).set(rank, Availability::InPlay);
        self.board
            .set_occupant(x, y, Some(Piece::new(mover, rank)))
            .unwrap();

        // Cooldown decay: a cooldown lasts exactly until the owner's next
        // successful placement.
        self.special_pieces_mut(mover).refresh();

        let pushed = self.push_pieces(x, y);
        let eliminated = self.eliminate_pieces();

        // Win check runs twice: once for the mover, once for the next
        // player after the switch. Either can end the session.
        if self.is_win(mover) {
            self.phase = SessionPhase::Terminal { winner: Some(mover) };
            return PlaceOutcome {
                accepted: true,
                pushed,
                eliminated,
                winner: Some(mover),
            };
        }

        self.current_player = mover.opponent();

        if self.is_win(self.current_player) {
            let winner = self.current_player;
            self.phase = SessionPhase::Terminal { winner: Some(winner) };
            return PlaceOutcome {
                accepted: true,
                pushed,
                eliminated,
                winner: Some(winner),
            };
        }

        PlaceOutcome {
            accepted: true,
            pushed,
            eliminated,
            winner: None,
        }
    }

    // ==================== Chain Push ====================

    /// Push away enemy pieces orthogonally adjacent to the just-placed
    /// piece at `(x, y)`. Each direction is attempted independently, in the
    /// fixed `PUSH_DIRECTIONS` order.
    fn push_pieces(&mut self, x: usize, y: usize) -> Vec<PushedPiece> {
        let mut pushed = Vec::new();
        for (dx, dy) in PUSH_DIRECTIONS {
            let Some((nx, ny)) = self.offset(x, y, dx, dy) else {
                continue;
            };
            if self.is_pushable_enemy(nx, ny) {
                if let Some(moves) = self.push_run(nx, ny, dx, dy) {
                    pushed.extend(moves);
                }
            }
        }
        pushed
    }

    /// Whether `(x, y)` holds an opposing piece that pushes can move.
    /// Trunks never move.
    fn is_pushable_enemy(&self, x: usize, y: usize) -> bool {
        self.board
            .occupant(x, y)
            .is_some_and(|p| p.owner == self.current_player.opponent() && p.rank.is_pushable())
    }

    /// Shove the contiguous run of pushable enemy pieces starting at
    /// `(x, y)` one step along `(dx, dy)`.
    ///
    /// The whole run moves or none of it does: the push aborts when the
    /// landing cell is off the board, occupied, or inside the pushed
    /// player's own root zone.
    fn push_run(&mut self, x: usize, y: usize, dx: isize, dy: isize) -> Option<Vec<PushedPiece>> {
        let pushed_player = self.current_player.opponent();
        if !self.is_pushable_enemy(x, y) {
            return None;
        }

        let mut chain = vec![(x, y)];
        let (mut tail_x, mut tail_y) = (x, y);
        loop {
            match self.offset(tail_x, tail_y, dx, dy) {
                Some((nx, ny)) if self.is_pushable_enemy(nx, ny) => {
                    chain.push((nx, ny));
                    (tail_x, tail_y) = (nx, ny);
                }
                _ => break,
            }
        }

        let (land_x, land_y) = self.offset(tail_x, tail_y, dx, dy)?;
        // Pieces can never be shoved into their own root sanctuary.
        if self.board.in_zone(land_x, land_y, pushed_player) {
            return None;
        }
        if self.board.occupant(land_x, land_y).is_some() {
            return None;
        }

        // Shift outermost-first so no cell is overwritten before it moves.
        let mut moves = Vec::with_capacity(chain.len());
        for &(cx, cy) in chain.iter().rev() {
            let (tx, ty) = self.offset(cx, cy, dx, dy).unwrap();
            let piece = self.board.occupant(cx, cy).unwrap();
            self.board.set_occupant(tx, ty, Some(piece)).unwrap();
            self.board.set_occupant(cx, cy, None).unwrap();
            moves.push(PushedPiece {
                piece,
                from: Square::new(cx, cy),
                to: Square::new(tx, ty),
            });
        }
        Some(moves)
    }

    // ==================== Line Elimination ====================

    /// Remove every run of 3+ same-owner pieces along a row or column.
    ///
    /// Four passes in fixed order: mover-vertical, mover-horizontal,
    /// opponent-vertical, opponent-horizontal. Earlier passes mutate the
    /// board the later passes scan.
    fn eliminate_pieces(&mut self) -> Vec<EliminatedPiece> {
        let mover = self.current_player;
        let mut eliminated = Vec::new();

        self.eliminate_columns(mover, &mut eliminated);
        self.eliminate_rows(mover, &mut eliminated);
        self.eliminate_columns(mover.opponent(), &mut eliminated);
        self.eliminate_rows(mover.opponent(), &mut eliminated);

        eliminated
    }

    fn eliminate_columns(&mut self, owner: Player, out: &mut Vec<EliminatedPiece>) {
        for x in 0..self.board.width() {
            let mut run = 0usize;
            let mut zone_cells = 0usize;
            for y in 0..self.board.height() {
                self.step_run_scan(owner, x, y, &mut run, &mut zone_cells);
                if run >= 3 {
                    for yy in y - 2..=y {
                        self.clear_cell(x, yy, out);
                    }
                }
            }
        }
    }

    fn eliminate_rows(&mut self, owner: Player, out: &mut Vec<EliminatedPiece>) {
        for y in 0..self.board.height() {
            let mut run = 0usize;
            let mut zone_cells = 0usize;
            for x in 0..self.board.width() {
                self.step_run_scan(owner, x, y, &mut run, &mut zone_cells);
                if run >= 3 {
                    for xx in x - 2..=x {
                        self.clear_cell(xx, y, out);
                    }
                }
            }
        }
    }

    /// Advance one run-length scan step over `(x, y)`.
    ///
    /// The run resets on any cell not held by `owner`, and also whenever
    /// more than one of its cells lies inside a root zone (a line cannot
    /// score itself into removal with two root-zone cells). The run
    /// deliberately does *not* reset after a clear, so a run of four or
    /// more is wiped entirely as the scan walks through it.
    fn step_run_scan(
        &self,
        owner: Player,
        x: usize,
        y: usize,
        run: &mut usize,
        zone_cells: &mut usize,
    ) {
        if self.board.occupant(x, y).is_some_and(|p| p.owner == owner) {
            *run += 1;
            if self.board.in_any_zone(x, y) {
                *zone_cells += 1;
            }
        } else {
            *run = 0;
            *zone_cells = 0;
        }
        if *zone_cells > 1 {
            *run = 0;
            *zone_cells = 0;
        }
    }

    /// Clear one cell, recording the removal and starting the owner's
    /// cooldown when the piece was a Branch or Trunk. Re-clearing a cell an
    /// overlapping run already emptied is a no-op.
    fn clear_cell(&mut self, x: usize, y: usize, out: &mut Vec<EliminatedPiece>) {
        if let Some(piece) = self.board.occupant(x, y) {
            self.board.set_occupant(x, y, None).unwrap();
            if matches!(piece.rank, Rank::Branch | Rank::Trunk) {
                self.special_pieces_mut(piece.owner)
                    .set(piece.rank, Availability::Cooldown);
            }
            out.push(EliminatedPiece {
                piece,
                at: Square::new(x, y),
            });
        }
    }

    // ==================== Win Conditions ====================

    /// Whether `player` has won on the current board.
    ///
    /// Occupation: every cell of the opponent's root span is held by
    /// `player`. Annihilation: no opposing piece stands anywhere outside
    /// `player`'s own root zone.
    pub fn is_win(&self, player: Player) -> bool {
        let opponent = player.opponent();

        let opponent_root_row = self.board.root_row(opponent);
        let occupation = self.board.zone_columns().all(|x| {
            self.board
                .occupant(x, opponent_root_row)
                .is_some_and(|p| p.owner == player)
        });
        if occupation {
            return true;
        }

        self.board.iter().all(|(sq, cell)| {
            self.board.in_zone(sq.x, sq.y, player)
                || !cell.occupant.is_some_and(|p| p.owner == opponent)
        })
    }

    // ==================== Snapshot ====================

    /// Flatten the session into a JSON-friendly snapshot for shells.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            current_player: self.current_player,
            finished: self.is_finished(),
            winner: self.winner(),
            cells: self
                .board
                .iter()
                .filter(|(_, cell)| cell.zone.is_some() || cell.occupant.is_some())
                .map(|(sq, cell)| CellSnapshot {
                    x: sq.x,
                    y: sq.y,
                    zone: cell.zone,
                    piece: cell.occupant,
                })
                .collect(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

/// JSON-friendly session snapshot: only cells carrying a zone marker or a
/// piece are listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub width: usize,
    pub height: usize,
    pub current_player: Player,
    pub finished: bool,
    pub winner: Option<Player>,
    pub cells: Vec<CellSnapshot>,
}

/// One non-empty cell in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub x: usize,
    pub y: usize,
    pub zone: Option<Player>,
    pub piece: Option<Piece>,
}
