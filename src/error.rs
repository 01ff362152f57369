//! Error type shared by every engine operation.
//!
//! Almost every variant is a contract violation: the caller asked the engine
//! to do something the rules forbid. Those are never retried; the current
//! turn (and usually the whole run) is abandoned. Running out of boneyard
//! tiles or having no legal play are ordinary outcomes and never show up here.

use crate::core::PlayerId;
use crate::players::{PlayAction, Strategy};
use crate::tiles::Tile;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpinnerError>;

/// Everything that can go wrong while configuring or running a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SpinnerError {
    /// The configuration cannot describe a playable game.
    #[display("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A strategy identifier that no policy answers to.
    #[display("Unknown player strategy '{id}'")]
    UnknownStrategy { id: String },

    /// The first tile of a round was not the round double or the spinner double.
    #[display("First tile of round {round} must be {round}|{round} or S|S, not {tile}")]
    IllegalOpeningTile { round: u8, tile: Tile },

    /// Tiles 2 and 3 of a round must carry the round value or a spinner end.
    #[display("Round {round} tile {position} must have a {round} or S end, not {tile}")]
    OpeningTileMismatch { round: u8, position: usize, tile: Tile },

    /// Tiles 2 and 3 of a round may not be doubles.
    #[display("Round {round} tile {position} cannot be a double, not {tile}")]
    DoubleDuringOpening { round: u8, position: usize, tile: Tile },

    /// The requested end is not currently open for play.
    #[display("Cannot play on end {end}, usable ends are {usable:?}")]
    EndNotExposed { end: u8, usable: Vec<u8> },

    /// A branch closure was attempted on some end other than the pending double's.
    #[display("Double {pending} is waiting for branches, cannot play on end {end}")]
    PendingDoubleMismatch { pending: u8, end: u8 },

    /// The tile has no end that can attach to the requested value.
    #[display("Tile {tile} cannot be played on end {end}")]
    TileDoesNotMatchEnd { tile: Tile, end: u8 },

    /// Doubles have their own placement rule and never replace a single end.
    #[display("Double {tile} cannot be placed through the single-end update")]
    DoubleOnSingleEndPath { tile: Tile },

    /// A placement was requested from a player holding no tiles.
    #[display("{player} has an empty hand, nothing to place")]
    EmptyHand { player: PlayerId },

    /// An action referred to a hand slot that does not exist.
    #[display("Hand index {index} out of range for a hand of {hand_size}")]
    HandIndexOutOfRange { index: usize, hand_size: usize },

    /// The chosen action is not one of the legal actions offered.
    #[display("Action {action} is not among the legal actions")]
    IllegalAction { action: PlayAction },

    /// An agent seat had to choose between several plays and no choice was supplied.
    #[display("{player} is agent driven and needs a decision")]
    AgentDecisionRequired { player: PlayerId },

    /// A decision was supplied to a seat that chooses for itself.
    #[display("{player} plays with strategy {strategy} and cannot take an agent decision")]
    UnexpectedAgentDecision { player: PlayerId, strategy: Strategy },

    /// A turn was requested after the final round finished.
    #[display("The game is over")]
    GameOver,

    /// A turn was requested in a finished round that has not been replaced yet.
    #[display("Round {round} is over, set up the next round first")]
    RoundOver { round: u8 },

    /// A new round was requested before the current one finished.
    #[display("Round {round} is still in progress")]
    RoundInProgress { round: u8 },

    /// The step interface was driven while no agent seat is waiting.
    #[display("{player} is not an agent waiting for a decision")]
    NotAgentTurn { player: PlayerId },

    /// An integer agent action outside the action space.
    #[display("Action index {index} out of range for {count} actions")]
    ActionIndexOutOfRange { index: usize, count: usize },

    /// The state encoder has no code for the current board.
    #[display("Cannot encode usable ends {usable:?}")]
    UnencodableState { usable: Vec<u8> },
}

impl std::error::Error for SpinnerError {}

impl SpinnerError {
    /// Shorthand for [`SpinnerError::InvalidConfig`].
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for SpinnerError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parse error: {}", err))
    }
}
