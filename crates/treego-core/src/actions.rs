//! Placement outcomes reported back to the presentation shell.
//!
//! A placement attempt is either rejected outright (no state change) or
//! accepted, in which case the outcome lists everything that happened as a
//! consequence: pieces shoved by chain pushes, pieces removed by line
//! elimination, and a winner if the move ended the game.

use crate::board::{Piece, Player, Square};
use serde::{Deserialize, Serialize};

/// A single piece displaced one step by a chain push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushedPiece {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// A piece removed by line elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminatedPiece {
    pub piece: Piece,
    pub at: Square,
}

/// The result of one `attempt_place` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOutcome {
    /// False when the move violated a rule; nothing else is populated and
    /// no state changed.
    pub accepted: bool,
    /// Pieces displaced by chain pushes, in push-processing order.
    pub pushed: Vec<PushedPiece>,
    /// Pieces removed by line elimination, in scan order.
    pub eliminated: Vec<EliminatedPiece>,
    /// Set when this placement ended the game.
    pub winner: Option<Player>,
}

impl PlaceOutcome {
    /// An outcome for a silently rejected move.
    pub fn rejected() -> Self {
        Self {
            accepted: false,
            pushed: Vec::new(),
            eliminated: Vec::new(),
            winner: None,
        }
    }
}
