//! A seat: its hand, its legal plays and its turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action::{PlayAction, TurnOutcome};
use super::strategy::{AgentDecision, DecisionContext, DecisionPolicy, Strategy, Supplied};
use crate::board::{Board, BoardState};
use crate::core::{GameRng, PlayerId};
use crate::error::{Result, SpinnerError};
use crate::tiles::{Boneyard, End, Tile};

/// One seat at the table.
///
/// The hand is kept in tile-set order so it always displays the same way;
/// hand indices in [`PlayAction`] refer to that order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    strategy: Strategy,
    verbose: bool,
    hand: Vec<Tile>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, strategy: Strategy) -> Self {
        Self {
            id,
            strategy,
            verbose: false,
            hand: Vec::new(),
        }
    }

    /// Log this seat's turns at info level.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replace the hand (test and setup helper).
    #[must_use]
    pub fn with_hand(mut self, hand: Vec<Tile>) -> Self {
        self.hand = hand;
        self.sort_hand();
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn reset_hand(&mut self) {
        self.hand.clear();
    }

    /// Add a tile, keeping display order.
    pub fn receive(&mut self, tile: Tile) {
        self.hand.push(tile);
        self.sort_hand();
    }

    /// Sum of the tile values left in hand; 0 for an empty hand.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.hand.iter().map(Tile::value).sum()
    }

    /// Every legal (hand index, end) play against `board`.
    ///
    /// On an empty board only the round double or the spinner double may be
    /// played. Afterwards each non-double tile yields one action per end
    /// showing a usable value, and a spinner tile one action per usable end.
    /// Doubles only become playable once the opening is over.
    #[must_use]
    pub fn legal_actions(&self, board: &Board) -> Vec<PlayAction> {
        let round = board.round();
        let mut actions = Vec::new();

        if board.state() == BoardState::Empty {
            for (index, tile) in self.hand.iter().enumerate() {
                if tile.is_double() && (tile.low() == End::Pips(round) || tile.is_spinner()) {
                    actions.push(PlayAction::new(index, round));
                }
            }
            return actions;
        }

        let usable = board.usable_ends();
        let open_play = board.state() == BoardState::OpenPlay;

        for (index, tile) in self.hand.iter().enumerate() {
            if tile.is_double() && !open_play {
                continue;
            }

            if tile.is_spinner() {
                actions.extend(usable.iter().map(|&end| PlayAction::new(index, end)));
                continue;
            }

            if let End::Pips(low) = tile.low() {
                if usable.contains(&low) {
                    actions.push(PlayAction::new(index, low));
                }
            }
            if !tile.is_double() {
                if let End::Pips(high) = tile.high() {
                    if usable.contains(&high) {
                        actions.push(PlayAction::new(index, high));
                    }
                }
            }
        }
        actions
    }

    /// Is this an agent seat facing a real choice?
    #[must_use]
    pub fn needs_agent_input(&self, board: &Board) -> bool {
        self.strategy == Strategy::Agent && self.legal_actions(board).len() >= 2
    }

    /// Play one turn.
    ///
    /// No legal play draws a tile (or passes on an empty boneyard); a single
    /// legal play is made automatically; otherwise the seat's strategy picks.
    /// Agent seats must pass `decision` whenever they have two or more legal
    /// plays, and other seats must never pass one.
    pub fn play_turn(
        &mut self,
        board: &mut Board,
        boneyard: &mut Boneyard,
        rng: &mut GameRng,
        decision: Option<AgentDecision>,
    ) -> Result<TurnOutcome> {
        if decision.is_some() && self.strategy != Strategy::Agent {
            return Err(SpinnerError::UnexpectedAgentDecision {
                player: self.id,
                strategy: self.strategy,
            });
        }

        let actions = self.legal_actions(board);

        let outcome = match actions.len() {
            0 => match self.draw(boneyard, rng) {
                Some(tile) => TurnOutcome::Drew(tile),
                None => TurnOutcome::BoneyardEmpty,
            },
            1 => {
                let action = actions[0];
                let tile = self.place(action, board)?;
                TurnOutcome::Played { action, tile }
            }
            _ => {
                let action = self.choose(&actions, board, rng, decision)?;
                let tile = self.place(action, board)?;
                TurnOutcome::Played { action, tile }
            }
        };

        if self.verbose {
            info!(
                player = %self.id,
                round = board.round(),
                strategy = %self.strategy,
                options = actions.len(),
                %outcome,
                hand = ?self.hand.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "turn"
            );
        } else {
            debug!(player = %self.id, options = actions.len(), %outcome, "turn");
        }

        Ok(outcome)
    }

    fn choose(
        &self,
        actions: &[PlayAction],
        board: &Board,
        rng: &mut GameRng,
        decision: Option<AgentDecision>,
    ) -> Result<PlayAction> {
        let usable = board.usable_ends();
        let ctx = DecisionContext {
            player: self.id,
            round: board.round(),
            hand: &self.hand,
            usable_ends: usable.as_slice(),
        };

        let required = SpinnerError::AgentDecisionRequired { player: self.id };

        match (self.strategy, decision) {
            (Strategy::Agent, Some(AgentDecision::Play(action))) => Supplied(action)
                .select(actions, &ctx, rng)
                .ok_or(SpinnerError::IllegalAction { action }),
            (Strategy::Agent, Some(AgentDecision::Delegate(delegate))) => delegate
                .policy()
                .and_then(|policy| policy.select(actions, &ctx, rng))
                .ok_or(required),
            (strategy, _) => strategy
                .policy()
                .and_then(|policy| policy.select(actions, &ctx, rng))
                .ok_or(required),
        }
    }

    /// Move the tile named by `action` from the hand to the board.
    ///
    /// The hand only changes once the board has accepted the tile.
    pub fn place(&mut self, action: PlayAction, board: &mut Board) -> Result<Tile> {
        if self.hand.is_empty() {
            return Err(SpinnerError::EmptyHand { player: self.id });
        }
        let tile = *self
            .hand
            .get(action.hand_index)
            .ok_or(SpinnerError::HandIndexOutOfRange {
                index: action.hand_index,
                hand_size: self.hand.len(),
            })?;

        board.accept_tile(tile, action.end)?;
        self.hand.remove(action.hand_index);
        Ok(tile)
    }

    /// Draw one random tile from the boneyard into the hand.
    pub fn draw(&mut self, boneyard: &mut Boneyard, rng: &mut GameRng) -> Option<Tile> {
        let tile = boneyard.draw(rng);
        match tile {
            Some(tile) => self.receive(tile),
            None => debug!(player = %self.id, "boneyard empty"),
        }
        tile
    }

    fn sort_hand(&mut self) {
        self.hand.sort_by_key(Tile::seq);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hand ", self.id)?;
        crate::tiles::tile_set::write_tiles(f, &self.hand)
    }
}
