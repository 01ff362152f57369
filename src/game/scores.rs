//! Per-round score matrix and the final result.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Raw points left in hand, indexed `[round][player]`.
///
/// Rows exist for every round number from 0 to the starting round; rounds
/// that were never played stay at zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    rows: Vec<PlayerMap<u32>>,
}

impl ScoreSheet {
    /// An all-zero sheet for rounds `0..=start_round`.
    #[must_use]
    pub fn new(start_round: u8, player_count: usize) -> Self {
        Self {
            rows: vec![PlayerMap::with_value(player_count, 0); start_round as usize + 1],
        }
    }

    /// Store the scores of `round`, replacing anything recorded before.
    pub fn record(&mut self, round: u8, scores: PlayerMap<u32>) {
        self.rows[round as usize] = scores;
    }

    #[must_use]
    pub fn round(&self, round: u8) -> &PlayerMap<u32> {
        &self.rows[round as usize]
    }

    /// Rows in round-number order.
    #[must_use]
    pub fn rows(&self) -> &[PlayerMap<u32>] {
        &self.rows
    }

    /// Cumulative totals across all rounds.
    #[must_use]
    pub fn totals(&self) -> PlayerMap<u32> {
        let player_count = self.rows[0].player_count();
        PlayerMap::new(player_count, |p| self.rows.iter().map(|row| row[p]).sum())
    }

    /// Every seat tied for the lowest score in `round`.
    #[must_use]
    pub fn lowest_in_round(&self, round: u8) -> Vec<PlayerId> {
        lowest(self.round(round))
    }

    /// The seat with the lowest cumulative total; ties go to the lowest seat.
    #[must_use]
    pub fn leader(&self) -> PlayerId {
        lowest(&self.totals())
            .first()
            .copied()
            .unwrap_or(PlayerId::new(0))
    }
}

fn lowest(scores: &PlayerMap<u32>) -> Vec<PlayerId> {
    let Some(min) = scores.values().min().copied() else {
        return Vec::new();
    };
    scores
        .iter()
        .filter(|&(_, &s)| s == min)
        .map(|(p, _)| p)
        .collect()
}

impl std::fmt::Display for ScoreSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (round, row) in self.rows.iter().enumerate() {
            writeln!(f, "Round {:>2}: {:?}", round, row.as_slice())?;
        }
        write!(f, "Total   : {:?}", self.totals().as_slice())
    }
}

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Lowest cumulative score.
    pub winner: PlayerId,
    /// Cumulative score of every seat.
    pub totals: PlayerMap<u32>,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}
