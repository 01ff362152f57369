//! Decision strategies for choosing between several legal plays.
//!
//! Every strategy answers the same question through [`DecisionPolicy`]:
//! given the legal actions and the turn's context, which one? Policies are
//! only consulted when there are at least two actions; a single legal play is
//! made automatically and no legal play means drawing.
//!
//! | identifier  | policy |
//! |-------------|--------|
//! | `play_high` | [`MaxValue`]: highest-value tile, random tie-break |
//! | `play_low`  | [`MinValue`]: lowest-value tile, random tie-break |
//! | `random`    | [`UniformRandom`] |
//! | `agent`     | [`Supplied`]: the caller passes the choice in per turn |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::action::PlayAction;
use crate::core::{GameRng, PlayerId};
use crate::error::SpinnerError;
use crate::tiles::Tile;

/// What a policy may look at when choosing.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub player: PlayerId,
    pub round: u8,
    pub hand: &'a [Tile],
    pub usable_ends: &'a [u8],
}

impl DecisionContext<'_> {
    /// Value of the tile an action would play.
    #[must_use]
    pub fn tile_value(&self, action: &PlayAction) -> Option<u32> {
        self.hand.get(action.hand_index).map(Tile::value)
    }
}

/// Chooses one action from a list of legal ones.
pub trait DecisionPolicy {
    /// Returns `None` only if nothing in `actions` is acceptable.
    fn select(
        &self,
        actions: &[PlayAction],
        ctx: &DecisionContext<'_>,
        rng: &mut GameRng,
    ) -> Option<PlayAction>;
}

/// Play the highest-value tile.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxValue;

/// Play the lowest-value tile.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinValue;

/// Play anything, uniformly.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformRandom;

/// A choice made outside the engine, checked against the legal list.
#[derive(Clone, Copy, Debug)]
pub struct Supplied(pub PlayAction);

fn select_extreme(
    actions: &[PlayAction],
    ctx: &DecisionContext<'_>,
    rng: &mut GameRng,
    prefer_high: bool,
) -> Option<PlayAction> {
    let valued: Vec<(PlayAction, u32)> = actions
        .iter()
        .filter_map(|a| ctx.tile_value(a).map(|v| (*a, v)))
        .collect();

    let values = valued.iter().map(|&(_, v)| v);
    let target = if prefer_high { values.max()? } else { values.min()? };

    let tied: Vec<PlayAction> = valued
        .into_iter()
        .filter(|&(_, v)| v == target)
        .map(|(a, _)| a)
        .collect();
    rng.choose(&tied).copied()
}

impl DecisionPolicy for MaxValue {
    fn select(
        &self,
        actions: &[PlayAction],
        ctx: &DecisionContext<'_>,
        rng: &mut GameRng,
    ) -> Option<PlayAction> {
        select_extreme(actions, ctx, rng, true)
    }
}

impl DecisionPolicy for MinValue {
    fn select(
        &self,
        actions: &[PlayAction],
        ctx: &DecisionContext<'_>,
        rng: &mut GameRng,
    ) -> Option<PlayAction> {
        select_extreme(actions, ctx, rng, false)
    }
}

impl DecisionPolicy for UniformRandom {
    fn select(
        &self,
        actions: &[PlayAction],
        _ctx: &DecisionContext<'_>,
        rng: &mut GameRng,
    ) -> Option<PlayAction> {
        rng.choose(actions).copied()
    }
}

impl DecisionPolicy for Supplied {
    fn select(
        &self,
        actions: &[PlayAction],
        _ctx: &DecisionContext<'_>,
        _rng: &mut GameRng,
    ) -> Option<PlayAction> {
        actions.iter().find(|&&a| a == self.0).copied()
    }
}

/// Strategy identifier of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    PlayHigh,
    PlayLow,
    Random,
    /// Decisions come from outside the engine (a learner, a UI).
    Agent,
}

impl Strategy {
    /// The built-in policy, or `None` for externally driven seats.
    #[must_use]
    pub fn policy(self) -> Option<&'static dyn DecisionPolicy> {
        match self {
            Strategy::PlayHigh => Some(&MaxValue),
            Strategy::PlayLow => Some(&MinValue),
            Strategy::Random => Some(&UniformRandom),
            Strategy::Agent => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::PlayHigh => "play_high",
            Strategy::PlayLow => "play_low",
            Strategy::Random => "random",
            Strategy::Agent => "agent",
        }
    }
}

impl FromStr for Strategy {
    type Err = SpinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play_high" => Ok(Strategy::PlayHigh),
            "play_low" => Ok(Strategy::PlayLow),
            "random" => Ok(Strategy::Random),
            "agent" => Ok(Strategy::Agent),
            other => Err(SpinnerError::UnknownStrategy { id: other.to_string() }),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An agent's answer to a disambiguation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentDecision {
    /// Make exactly this play.
    Play(PlayAction),
    /// Let a built-in policy choose this time.
    Delegate(Strategy),
}
