//! Round and game lifecycle.
//!
//! [`SpinnerGame`] owns the board, boneyard, seats and score sheet, runs
//! turns in seat order, detects round and game completion, and sets up each
//! following round.

mod scores;
mod spinner;

pub use scores::{GameResult, ScoreSheet};
pub use spinner::SpinnerGame;
