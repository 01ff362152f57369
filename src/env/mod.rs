//! Step interface for an external controller such as a learning agent.
//!
//! The environment runs every seat it can on its own and stops whenever an
//! agent seat has to choose between two or more plays:
//!
//! ```
//! use spinner_dominoes::core::{GameConfig, PlayerConfig};
//! use spinner_dominoes::env::{ActionSpace, SpinnerEnv, TwoExposedEnds};
//!
//! let config = GameConfig::new(6)
//!     .with_end_round(5)
//!     .with_player(PlayerConfig::new("agent"))
//!     .with_player(PlayerConfig::new("random"));
//!
//! let mut env = SpinnerEnv::new(config, 3, TwoExposedEnds, ActionSpace::Hierarchical).unwrap();
//! let mut step = env.reset().unwrap();
//! while !step.done {
//!     step = env.execute_index(2).unwrap(); // always delegate to play_high
//! }
//! assert!(step.reward == 0.0 || step.reward == 100.0);
//! ```

pub mod encoder;

pub use encoder::{StateEncoder, TwoExposedEnds, UsableEnds};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameConfig, PlayerId};
use crate::error::{Result, SpinnerError};
use crate::game::SpinnerGame;
use crate::players::{AgentDecision, Strategy};

/// Reward for the observed seat winning the game.
pub const WIN_REWARD: f32 = 100.0;

/// What the controller sees after each step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step<S> {
    pub state: S,
    pub reward: f32,
    pub done: bool,
}

/// How integer actions map to agent decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Index into the current seat's legal plays.
    Direct,
    /// Pick a policy for this turn: `0 = play_low`, `1 = random`, `2 = play_high`.
    Hierarchical,
}

impl ActionSpace {
    const POLICIES: [Strategy; 3] = [Strategy::PlayLow, Strategy::Random, Strategy::PlayHigh];

    /// Size of the action space, for tabular learners. `None` for `Direct`,
    /// which changes every turn.
    #[must_use]
    pub fn action_count(self) -> Option<usize> {
        match self {
            ActionSpace::Direct => None,
            ActionSpace::Hierarchical => Some(Self::POLICIES.len()),
        }
    }
}

/// A game wrapped for step-by-step control of its agent seat.
#[derive(Clone, Debug)]
pub struct SpinnerEnv<E> {
    game: SpinnerGame,
    encoder: E,
    action_space: ActionSpace,
    observed: PlayerId,
}

impl<E: StateEncoder> SpinnerEnv<E> {
    /// The observed seat is the first agent seat, or seat 0 without one.
    pub fn new(config: GameConfig, seed: u64, encoder: E, action_space: ActionSpace) -> Result<Self> {
        let observed = config
            .players
            .iter()
            .position(|p| p.strategy == Strategy::Agent.as_str())
            .map_or(PlayerId::new(0), |i| PlayerId::new(i as u8));

        Ok(Self {
            game: SpinnerGame::new(config, seed)?,
            encoder,
            action_space,
            observed,
        })
    }

    #[must_use]
    pub fn game(&self) -> &SpinnerGame {
        &self.game
    }

    #[must_use]
    pub fn observed(&self) -> PlayerId {
        self.observed
    }

    #[must_use]
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    #[must_use]
    pub fn action_space(&self) -> ActionSpace {
        self.action_space
    }

    /// Restart the game and run it to the first agent decision.
    pub fn reset(&mut self) -> Result<Step<E::State>> {
        self.game.reset();
        self.game.play_until_agent_input()?;
        let step = self.observe()?;
        debug!(reward = step.reward, done = step.done, "environment reset");
        Ok(step)
    }

    /// Apply the agent's decision and run to its next decision.
    pub fn execute_action(&mut self, decision: AgentDecision) -> Result<Step<E::State>> {
        let outcome = self.game.apply_agent_decision(decision)?;
        debug!(?decision, %outcome, "agent action executed");
        self.game.play_until_agent_input()?;
        self.observe()
    }

    /// Decode an integer action through the action space, then execute it.
    pub fn execute_index(&mut self, index: usize) -> Result<Step<E::State>> {
        let decision = self.decode(index)?;
        self.execute_action(decision)
    }

    /// Map an integer action to a decision for the current turn.
    pub fn decode(&self, index: usize) -> Result<AgentDecision> {
        match self.action_space {
            ActionSpace::Hierarchical => ActionSpace::POLICIES
                .get(index)
                .map(|&s| AgentDecision::Delegate(s))
                .ok_or(SpinnerError::ActionIndexOutOfRange {
                    index,
                    count: ActionSpace::POLICIES.len(),
                }),
            ActionSpace::Direct => {
                let actions = self
                    .game
                    .current_player()
                    .legal_actions(self.game.board());
                actions
                    .get(index)
                    .map(|&a| AgentDecision::Play(a))
                    .ok_or(SpinnerError::ActionIndexOutOfRange {
                        index,
                        count: actions.len(),
                    })
            }
        }
    }

    fn observe(&self) -> Result<Step<E::State>> {
        let done = self.game.is_game_done();
        let reward = if done && self.game.winner() == self.observed {
            WIN_REWARD
        } else {
            0.0
        };
        Ok(Step {
            state: self.encoder.encode(&self.game)?,
            reward,
            done,
        })
    }
}
