//! What a turn can do, and what it did.

use serde::{Deserialize, Serialize};

use crate::tiles::Tile;

/// Play the tile at `hand_index` on the open end showing `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayAction {
    pub hand_index: usize,
    pub end: u8,
}

impl PlayAction {
    #[must_use]
    pub const fn new(hand_index: usize, end: u8) -> Self {
        Self { hand_index, end }
    }
}

impl std::fmt::Display for PlayAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.hand_index, self.end)
    }
}

impl From<(usize, u8)> for PlayAction {
    fn from((hand_index, end): (usize, u8)) -> Self {
        Self { hand_index, end }
    }
}

/// The result of one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// A tile left the hand for the board.
    Played { action: PlayAction, tile: Tile },
    /// No legal play; a tile was drawn from the boneyard.
    Drew(Tile),
    /// No legal play and nothing left to draw. The hand is unchanged.
    BoneyardEmpty,
}

impl TurnOutcome {
    #[must_use]
    pub fn is_play(&self) -> bool {
        matches!(self, TurnOutcome::Played { .. })
    }
}

impl std::fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnOutcome::Played { action, tile } => write!(f, "play {} on {}", tile, action.end),
            TurnOutcome::Drew(tile) => write!(f, "draw {}", tile),
            TurnOutcome::BoneyardEmpty => write!(f, "pass (boneyard empty)"),
        }
    }
}
