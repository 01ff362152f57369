//! # spinner-dominoes
//!
//! Rules engine for Spinner, a chickenfoot-style dominoes game, with a step
//! interface for reinforcement-learning agents.
//!
//! ## The game
//!
//! Players hold two-ended tiles and lay them on a shared board by matching
//! end values. Rounds count down from the highest pip value; round `r` opens
//! with the `r|r` double (or the spinner double). Spinner ends are wild.
//! Doubles open branches that must be filled before play moves elsewhere,
//! three of them when chickenfoot branches are enabled. Tiles left in hand
//! when a round ends score against their holder, and the lowest total after
//! the last round wins.
//!
//! ## Modules
//!
//! - `core`: seats, the seeded RNG, configuration
//! - `tiles`: tiles, the master tile set, the boneyard
//! - `board`: the board state machine (exposed ends, opening, pending doubles)
//! - `players`: legal plays, turn execution, decision strategies
//! - `game`: round and game orchestration, scoring
//! - `env`: reset/step interface for an external controller

pub mod error;
pub mod core;
pub mod tiles;
pub mod board;
pub mod players;
pub mod game;
pub mod env;

// Re-export commonly used types
pub use crate::error::{Result, SpinnerError};

pub use crate::core::{GameConfig, GameRng, PlayerConfig, PlayerId, PlayerMap};

pub use crate::tiles::{Boneyard, End, Tile, TileSet, SPINNER_BONUS};

pub use crate::board::{Board, BoardState, PendingDouble};

pub use crate::players::{
    AgentDecision, DecisionContext, DecisionPolicy, PlayAction, Player, Strategy, TurnOutcome,
};

pub use crate::game::{GameResult, ScoreSheet, SpinnerGame};

pub use crate::env::{ActionSpace, SpinnerEnv, StateEncoder, Step, TwoExposedEnds, UsableEnds};
