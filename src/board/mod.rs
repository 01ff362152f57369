//! The board: placed tiles and the ends still open for play.
//!
//! ## States
//!
//! The board moves through three states each round, keyed by how many tiles
//! have been placed:
//!
//! - **Empty** (0 tiles): only the round double `r|r` or the spinner double
//!   `S|S` may open. It exposes two `r` ends.
//! - **Opening** (1-2 tiles): the next two tiles must be non-doubles carrying
//!   an `r` or spinner end, played on `r`. With chickenfoot branches enabled,
//!   the third tile opens two more `r` lines.
//! - **Open play** (3+ tiles): tiles go on any exposed end. A double becomes
//!   *pending*: every following placement must go on one of its branches
//!   until `branch_capacity` of them have been filled.
//!
//! ## Exposed ends
//!
//! Open ends are kept as a multiset of values. Placing an ordinary tile
//! swaps the matched value for the tile's other end, so the multiset only
//! grows at the opening double, at the third opening tile (chickenfoot) and
//! when a double opens its branches.
//!
//! ```
//! use spinner_dominoes::board::Board;
//! use spinner_dominoes::tiles::Tile;
//!
//! let mut board = Board::new(5, false);
//! board.accept_tile(Tile::new(5, 5), 5).unwrap();
//! assert_eq!(board.usable_ends().as_slice(), &[5]);
//!
//! board.accept_tile(Tile::new(5, 2), 5).unwrap();
//! board.accept_tile(Tile::new(5, 8), 5).unwrap();
//! assert_eq!(board.usable_ends().as_slice(), &[2, 8]);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::core::CHICKENFOOT_BRANCHES;
use crate::error::{Result, SpinnerError};
use crate::tiles::{End, Tile};

/// A multiset (or set) of open end values. Four slots cover every board
/// without pending chickenfoot branches.
pub type Ends = SmallVec<[u8; 4]>;

/// Which rule set the next placement is judged by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Empty,
    Opening,
    OpenPlay,
}

/// A double waiting for its branches to be filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDouble {
    /// The end value every branch must be played on.
    pub value: u8,
    /// Branches filled so far.
    pub filled: usize,
}

/// Board state for one round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    round: u8,
    chickenfoot: bool,
    branch_capacity: usize,
    placed: Vec<Tile>,
    exposed: Ends,
    pending: Option<PendingDouble>,
}

impl Board {
    /// An empty board for `round`.
    #[must_use]
    pub fn new(round: u8, chickenfoot: bool) -> Self {
        Self {
            round,
            chickenfoot,
            branch_capacity: if chickenfoot { CHICKENFOOT_BRANCHES } else { 1 },
            placed: Vec::new(),
            exposed: SmallVec::new(),
            pending: None,
        }
    }

    /// Clear the board for a new round.
    pub fn reset(&mut self, round: u8) {
        self.round = round;
        self.placed.clear();
        self.exposed.clear();
        self.pending = None;
    }

    #[must_use]
    pub fn round(&self) -> u8 {
        self.round
    }

    #[must_use]
    pub fn branch_capacity(&self) -> usize {
        self.branch_capacity
    }

    /// Tiles placed this round, in placement order.
    #[must_use]
    pub fn placed(&self) -> &[Tile] {
        &self.placed
    }

    /// Every open end, duplicates included, in no particular order.
    #[must_use]
    pub fn exposed_ends(&self) -> &[u8] {
        &self.exposed
    }

    #[must_use]
    pub fn pending_double(&self) -> Option<PendingDouble> {
        self.pending
    }

    #[must_use]
    pub fn state(&self) -> BoardState {
        match self.placed.len() {
            0 => BoardState::Empty,
            1 | 2 => BoardState::Opening,
            _ => BoardState::OpenPlay,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// The end values a tile may be played on right now, sorted and deduplicated.
    ///
    /// - a pending double restricts play to its own value
    /// - an empty board has none (only the opening double may be placed)
    /// - during the opening only the round value is usable
    #[must_use]
    pub fn usable_ends(&self) -> Ends {
        if let Some(pending) = self.pending {
            return smallvec![pending.value];
        }
        match self.state() {
            BoardState::Empty => SmallVec::new(),
            BoardState::Opening => smallvec![self.round],
            BoardState::OpenPlay => {
                let mut ends = self.exposed.clone();
                ends.sort_unstable();
                ends.dedup();
                ends
            }
        }
    }

    /// Place `tile` on the open end showing `end`.
    ///
    /// Fails without changing the board if the placement breaks the rules
    /// of the current state.
    pub fn accept_tile(&mut self, tile: Tile, end: u8) -> Result<()> {
        let round = self.round;

        match self.state() {
            BoardState::Empty => {
                let opens = tile.is_double()
                    && (tile.low() == End::Pips(round) || tile.is_spinner());
                if !opens {
                    return Err(SpinnerError::IllegalOpeningTile { round, tile });
                }
                self.placed.push(tile);
                self.exposed = smallvec![round, round];
            }

            BoardState::Opening => {
                let position = self.placed.len() + 1;
                if !tile.has_pips(round) && !tile.is_spinner() {
                    return Err(SpinnerError::OpeningTileMismatch { round, position, tile });
                }
                if tile.is_double() {
                    return Err(SpinnerError::DoubleDuringOpening { round, position, tile });
                }
                if end != round {
                    return Err(SpinnerError::EndNotExposed {
                        end,
                        usable: vec![round],
                    });
                }
                self.replace_end(tile, end)?;
                if self.placed.len() == 3 && self.chickenfoot {
                    self.exposed.extend([round, round]);
                }
            }

            BoardState::OpenPlay => match self.pending {
                Some(pending) => self.close_branch(pending, tile, end)?,
                None if tile.is_double() => self.open_double(tile, end)?,
                None => {
                    if !self.exposed.contains(&end) {
                        return Err(self.end_not_exposed(end));
                    }
                    self.replace_end(tile, end)?;
                }
            },
        }

        trace!(
            round,
            %tile,
            end,
            exposed = ?self.exposed.as_slice(),
            pending = ?self.pending,
            "tile accepted"
        );
        Ok(())
    }

    /// Place a double on `end` and open its branches.
    fn open_double(&mut self, tile: Tile, end: u8) -> Result<()> {
        if !tile.matches(end) {
            return Err(SpinnerError::TileDoesNotMatchEnd { tile, end });
        }
        let slot = self
            .exposed
            .iter()
            .position(|&e| e == end)
            .ok_or_else(|| self.end_not_exposed(end))?;

        self.exposed.swap_remove(slot);
        self.exposed
            .extend(std::iter::repeat(end).take(self.branch_capacity));
        self.placed.push(tile);
        self.pending = Some(PendingDouble { value: end, filled: 0 });
        Ok(())
    }

    /// Fill one branch of the pending double.
    fn close_branch(&mut self, pending: PendingDouble, tile: Tile, end: u8) -> Result<()> {
        if end != pending.value {
            return Err(SpinnerError::PendingDoubleMismatch {
                pending: pending.value,
                end,
            });
        }
        if !tile.matches(end) {
            return Err(SpinnerError::TileDoesNotMatchEnd { tile, end });
        }

        if tile.is_double() {
            // Only reachable around the spinner double; the branch value stays exposed.
            self.placed.push(tile);
        } else {
            self.replace_end(tile, end)?;
        }

        let filled = pending.filled + 1;
        self.pending = if filled >= self.branch_capacity {
            None
        } else {
            Some(PendingDouble { filled, ..pending })
        };
        Ok(())
    }

    /// Swap one exposed `end` for the tile's other end.
    fn replace_end(&mut self, tile: Tile, end: u8) -> Result<()> {
        if tile.is_double() {
            return Err(SpinnerError::DoubleOnSingleEndPath { tile });
        }
        let counterpart = tile
            .counterpart(end)
            .ok_or(SpinnerError::TileDoesNotMatchEnd { tile, end })?;
        let slot = self
            .exposed
            .iter()
            .position(|&e| e == end)
            .ok_or_else(|| self.end_not_exposed(end))?;

        self.exposed[slot] = counterpart;
        self.placed.push(tile);
        Ok(())
    }

    fn end_not_exposed(&self, end: u8) -> SpinnerError {
        SpinnerError::EndNotExposed {
            end,
            usable: self.usable_ends().to_vec(),
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board Tiles: ")?;
        crate::tiles::tile_set::write_tiles(f, &self.placed)?;
        write!(f, "\nExposed ends: {:?}", self.exposed.as_slice())?;
        if let Some(pending) = self.pending {
            write!(f, " (double {} pending, {} filled)", pending.value, pending.filled)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(round: u8, chickenfoot: bool) -> Board {
        let mut board = Board::new(round, chickenfoot);
        board.accept_tile(Tile::new(round, round), round).unwrap();
        board
    }

    fn sorted(ends: &[u8]) -> Vec<u8> {
        let mut v = ends.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_empty_board_has_no_usable_ends() {
        let board = Board::new(4, false);
        assert_eq!(board.state(), BoardState::Empty);
        assert!(board.usable_ends().is_empty());
    }

    #[test]
    fn test_opening_requires_round_double() {
        let mut board = Board::new(4, false);
        let err = board.accept_tile(Tile::new(3, 3), 4).unwrap_err();
        assert_eq!(
            err,
            SpinnerError::IllegalOpeningTile {
                round: 4,
                tile: Tile::new(3, 3)
            }
        );
        assert!(board.is_empty());

        assert!(board.accept_tile(Tile::new(4, 2), 4).is_err());
    }

    #[test]
    fn test_spinner_double_opens() {
        let mut board = Board::new(4, false);
        board.accept_tile(Tile::spinner_double(), 4).unwrap();
        assert_eq!(board.state(), BoardState::Opening);
        assert_eq!(board.exposed_ends(), &[4, 4]);
        assert_eq!(board.usable_ends().as_slice(), &[4]);
    }

    #[test]
    fn test_opening_rejects_double_and_wrong_tile() {
        let mut board = opened(4, false);

        let err = board.accept_tile(Tile::new(1, 2), 4).unwrap_err();
        assert!(matches!(err, SpinnerError::OpeningTileMismatch { position: 2, .. }));

        let err = board.accept_tile(Tile::spinner_double(), 4).unwrap_err();
        assert!(matches!(err, SpinnerError::DoubleDuringOpening { .. }));

        let err = board.accept_tile(Tile::new(4, 6), 6).unwrap_err();
        assert!(matches!(err, SpinnerError::EndNotExposed { end: 6, .. }));

        assert_eq!(board.placed().len(), 1);
    }

    #[test]
    fn test_opening_spinner_tile_exposes_numeric_end() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::spinner(1), 4).unwrap();
        assert_eq!(sorted(board.exposed_ends()), vec![1, 4]);
        assert_eq!(board.usable_ends().as_slice(), &[4]);
    }

    #[test]
    fn test_third_tile_opens_chickenfoot_lines() {
        let mut board = opened(4, true);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        assert_eq!(board.exposed_ends().len(), 2);
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        assert_eq!(board.state(), BoardState::OpenPlay);
        assert_eq!(sorted(board.exposed_ends()), vec![1, 2, 4, 4]);
        assert_eq!(board.usable_ends().as_slice(), &[1, 2, 4]);
    }

    #[test]
    fn test_third_tile_without_chickenfoot() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();
        assert_eq!(sorted(board.exposed_ends()), vec![1, 2]);
    }

    #[test]
    fn test_open_play_replaces_matched_end() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        board.accept_tile(Tile::new(2, 7), 2).unwrap();
        assert_eq!(sorted(board.exposed_ends()), vec![1, 7]);

        let err = board.accept_tile(Tile::new(3, 5), 3).unwrap_err();
        assert_eq!(
            err,
            SpinnerError::EndNotExposed {
                end: 3,
                usable: vec![1, 7]
            }
        );
    }

    #[test]
    fn test_tile_must_carry_end() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        let err = board.accept_tile(Tile::new(3, 5), 2).unwrap_err();
        assert!(matches!(err, SpinnerError::TileDoesNotMatchEnd { end: 2, .. }));
        assert_eq!(board.placed().len(), 3);
    }

    #[test]
    fn test_double_pending_until_single_branch_filled() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        board.accept_tile(Tile::new(2, 2), 2).unwrap();
        assert_eq!(
            board.pending_double(),
            Some(PendingDouble { value: 2, filled: 0 })
        );
        assert_eq!(board.usable_ends().as_slice(), &[2]);
        assert_eq!(sorted(board.exposed_ends()), vec![1, 2]);

        let err = board.accept_tile(Tile::new(1, 6), 1).unwrap_err();
        assert_eq!(err, SpinnerError::PendingDoubleMismatch { pending: 2, end: 1 });

        board.accept_tile(Tile::new(2, 6), 2).unwrap();
        assert_eq!(board.pending_double(), None);
        assert_eq!(board.usable_ends().as_slice(), &[1, 6]);
    }

    #[test]
    fn test_chickenfoot_double_needs_three_branches() {
        let mut board = opened(4, true);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        board.accept_tile(Tile::new(1, 1), 1).unwrap();
        // One `1` end became three branches.
        assert_eq!(sorted(board.exposed_ends()), vec![1, 1, 1, 2, 4, 4]);

        for (i, other) in [3u8, 5, 6].into_iter().enumerate() {
            assert_eq!(board.usable_ends().as_slice(), &[1]);
            assert_eq!(board.pending_double().map(|p| p.filled), Some(i));
            board.accept_tile(Tile::new(1, other), 1).unwrap();
        }

        assert_eq!(board.pending_double(), None);
        assert_eq!(board.usable_ends().as_slice(), &[2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_spinner_double_fills_a_branch() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();
        board.accept_tile(Tile::new(2, 2), 2).unwrap();

        board.accept_tile(Tile::spinner_double(), 2).unwrap();
        assert_eq!(board.pending_double(), None);
        assert_eq!(sorted(board.exposed_ends()), vec![1, 2]);
    }

    #[test]
    fn test_spinner_double_opens_pending_on_chosen_end() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        board.accept_tile(Tile::spinner_double(), 1).unwrap();
        assert_eq!(board.usable_ends().as_slice(), &[1]);
    }

    #[test]
    fn test_double_must_go_on_exposed_end() {
        let mut board = opened(4, false);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 2), 4).unwrap();

        let err = board.accept_tile(Tile::new(5, 5), 5).unwrap_err();
        assert!(matches!(err, SpinnerError::EndNotExposed { end: 5, .. }));
        assert_eq!(board.pending_double(), None);
    }

    #[test]
    fn test_single_end_path_rejects_doubles() {
        let mut board = opened(4, false);
        let err = board.replace_end(Tile::new(4, 4), 4).unwrap_err();
        assert!(matches!(err, SpinnerError::DoubleOnSingleEndPath { .. }));
    }

    #[test]
    fn test_usable_ends_idempotent() {
        let mut board = opened(4, true);
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        board.accept_tile(Tile::new(4, 1), 4).unwrap();
        assert_eq!(board.usable_ends(), board.usable_ends());
    }

    #[test]
    fn test_reset() {
        let mut board = opened(4, true);
        board.reset(3);
        assert!(board.is_empty());
        assert!(board.exposed_ends().is_empty());
        assert_eq!(board.round(), 3);
        assert_eq!(board.branch_capacity(), CHICKENFOOT_BRANCHES);
    }

    #[test]
    fn test_display() {
        let board = opened(2, false);
        assert_eq!(format!("{}", board), "Board Tiles: 2|2\nExposed ends: [2, 2]");
    }
}
