//! TreeGo - a two-player push-and-grow board game engine
//!
//! This crate provides the core game logic for TreeGo, including:
//! - The board grid with root zones and starting pieces
//! - Move legality (growth adjacency and the Branch placement window)
//! - Chain-push resolution and line elimination
//! - Special-piece cooldowns and the two win conditions
//!
//! # Architecture
//!
//! The engine is pure and platform-agnostic: no I/O, no timers, no
//! randomness. A presentation shell (terminal, GUI, or anything else)
//! owns the event loop, maps pointer or keyboard input to board
//! coordinates, and drives a [`GameSession`] one placement at a time.
//! Every rule violation is a silent rejection; the shell only ever sees
//! "this move was not accepted".
//!
//! # Modules
//!
//! - [`board`]: the cell grid, zones, pieces, and coordinates
//! - [`player`]: per-player special-piece availability tracking
//! - [`actions`]: placement outcomes reported to the shell
//! - [`game`]: the session state machine and the rules pipeline

pub mod actions;
pub mod board;
pub mod game;
pub mod player;

// Re-export commonly used types
pub use actions::{EliminatedPiece, PlaceOutcome, PushedPiece};
pub use board::{
    Board, BoardError, Cell, Piece, Player, Rank, Square, DEFAULT_BOARD_HEIGHT,
    DEFAULT_BOARD_WIDTH,
};
pub use game::{CellSnapshot, GameSession, SessionPhase, SessionSnapshot};
pub use player::{Availability, SpecialPieces};
