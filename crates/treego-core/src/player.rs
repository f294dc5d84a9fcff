//! Per-player special-piece tracking.
//!
//! Branch and Trunk are one-at-a-time pieces. Each slot cycles through
//! three states: `Available` until placed, `InPlay` while on the board, and
//! `Cooldown` once eliminated. The cooldown lasts until the owner's next
//! successful placement, so a lost special piece sits out exactly one full
//! turn before it can be placed again. Leaves are never tracked.

use crate::board::Rank;
use serde::{Deserialize, Serialize};

/// Where a special piece currently sits in its usage cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// May be placed this turn.
    #[default]
    Available,
    /// Standing on the board; cannot be placed again.
    InPlay,
    /// Eliminated; becomes available after the owner's next placement.
    Cooldown,
}

/// One player's Branch and Trunk slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPieces {
    pub branch: Availability,
    pub trunk: Availability,
}

impl SpecialPieces {
    /// Availability of the given rank. Leaves are always placeable.
    pub fn availability(&self, rank: Rank) -> Availability {
        match rank {
            Rank::Leaf => Availability::Available,
            Rank::Branch => self.branch,
            Rank::Trunk => self.trunk,
        }
    }

    /// Record a state change for a special rank. No-op for Leaf.
    pub fn set(&mut self, rank: Rank, state: Availability) {
        match rank {
            Rank::Leaf => {}
            Rank::Branch => self.branch = state,
            Rank::Trunk => self.trunk = state,
        }
    }

    /// Cooldown decay: both slots leave `Cooldown` after the owner
    /// completes a placement. Slots in other states are untouched.
    pub fn refresh(&mut self) {
        if self.branch == Availability::Cooldown {
            self.branch = Availability::Available;
        }
        if self.trunk == Availability::Cooldown {
            self.trunk = Availability::Available;
        }
    }
}
