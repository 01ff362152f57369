//! Observation encoders for the step interface.
//!
//! The engine does not fix how a learner sees the game. An encoder turns
//! the current game into whatever state representation the learner wants.

use crate::error::{Result, SpinnerError};
use crate::game::SpinnerGame;

/// Turns a game into a learner's state.
pub trait StateEncoder {
    /// The state type handed to the learner.
    type State;

    /// Encode the game as the observed seat sees it now.
    fn encode(&self, game: &SpinnerGame) -> Result<Self::State>;

    /// Number of distinct states, for tabular learners. `None` if unbounded.
    fn state_count(&self) -> Option<usize>;
}

/// The usable ends themselves, sorted and deduplicated.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsableEnds;

impl StateEncoder for UsableEnds {
    type State = Vec<u8>;

    fn encode(&self, game: &SpinnerGame) -> Result<Vec<u8>> {
        Ok(game.usable_ends().to_vec())
    }

    fn state_count(&self) -> Option<usize> {
        None
    }
}

/// Tabular encoding of at most two single-digit usable ends.
///
/// | usable ends | state       |
/// |-------------|-------------|
/// | none        | 110         |
/// | `[e]`       | `100 + e`   |
/// | `[a, b]`    | `10*a + b`  |
///
/// More than two ends, or an end above 9, cannot be encoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoExposedEnds;

impl TwoExposedEnds {
    /// Number of states: 0..=110.
    pub const STATES: usize = 111;

    /// Encode a sorted, deduplicated set of usable ends.
    pub fn encode_ends(ends: &[u8]) -> Result<usize> {
        let unencodable = || SpinnerError::UnencodableState {
            usable: ends.to_vec(),
        };
        if ends.iter().any(|&e| e > 9) {
            return Err(unencodable());
        }
        match *ends {
            [] => Ok(110),
            [e] => Ok(100 + e as usize),
            [a, b] => Ok(a as usize * 10 + b as usize),
            _ => Err(unencodable()),
        }
    }
}

impl StateEncoder for TwoExposedEnds {
    type State = usize;

    fn encode(&self, game: &SpinnerGame) -> Result<usize> {
        Self::encode_ends(&game.usable_ends())
    }

    fn state_count(&self) -> Option<usize> {
        Some(Self::STATES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_exposed_ends_codes() {
        assert_eq!(TwoExposedEnds::encode_ends(&[]), Ok(110));
        assert_eq!(TwoExposedEnds::encode_ends(&[7]), Ok(107));
        assert_eq!(TwoExposedEnds::encode_ends(&[0]), Ok(100));
        assert_eq!(TwoExposedEnds::encode_ends(&[3, 8]), Ok(38));
        assert_eq!(TwoExposedEnds::encode_ends(&[0, 9]), Ok(9));
    }

    #[test]
    fn test_two_exposed_ends_rejects_more() {
        assert_eq!(
            TwoExposedEnds::encode_ends(&[1, 2, 3]),
            Err(SpinnerError::UnencodableState { usable: vec![1, 2, 3] })
        );
        assert!(TwoExposedEnds::encode_ends(&[12]).is_err());
    }

    #[test]
    fn test_state_counts() {
        assert_eq!(TwoExposedEnds.state_count(), Some(111));
        assert_eq!(UsableEnds.state_count(), None);
    }
}
