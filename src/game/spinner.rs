//! Round and game orchestration.

use tracing::{debug, info, instrument};

use super::scores::{GameResult, ScoreSheet};
use crate::board::{Board, Ends};
use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap};
use crate::error::{Result, SpinnerError};
use crate::players::{AgentDecision, Player, Strategy, TurnOutcome};
use crate::tiles::{Boneyard, TileSet};

/// A complete game of Spinner.
///
/// Rounds count down from `max_pips` to `end_round`. Each round deals fresh
/// hands from the master tile set; seats take turns in order until somebody
/// empties their hand or nobody can move and the boneyard is empty. Tiles
/// left in hand score against their holder, and the lowest total after the
/// last round wins.
///
/// ```
/// use spinner_dominoes::core::{GameConfig, PlayerConfig};
/// use spinner_dominoes::game::SpinnerGame;
///
/// let config = GameConfig::new(4)
///     .with_end_round(2)
///     .with_hand_size(3)
///     .with_player(PlayerConfig::new("play_high"))
///     .with_player(PlayerConfig::new("play_low"));
///
/// let mut game = SpinnerGame::new(config, 7).unwrap();
/// let result = game.play_game().unwrap();
/// assert!(game.is_game_done());
/// assert_eq!(result.totals.player_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct SpinnerGame {
    config: GameConfig,
    tile_set: TileSet,
    board: Board,
    players: Vec<Player>,
    boneyard: Boneyard,
    scores: ScoreSheet,
    start_round: u8,
    end_round: u8,
    round: u8,
    current: PlayerId,
    round_done: bool,
    game_done: bool,
    rng: GameRng,
}

impl SpinnerGame {
    /// Build a game from `config` and deal the first round.
    ///
    /// Fails on an invalid config or an unknown strategy identifier.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let tile_set = TileSet::generate(config.max_pips, config.include_spinner)?;

        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                let strategy: Strategy = seat.strategy.parse()?;
                Ok(Player::new(PlayerId::new(i as u8), strategy).with_verbose(seat.verbose))
            })
            .collect::<Result<Vec<_>>>()?;

        let start_round = tile_set.max_pips();
        // validate() keeps end_round within 0..=max_pips.
        let end_round = config.end_round as u8;

        let mut game = Self {
            board: Board::new(start_round, config.allow_chickenfoot_branches),
            scores: ScoreSheet::new(start_round, players.len()),
            boneyard: Boneyard::default(),
            config,
            tile_set,
            players,
            start_round,
            end_round,
            round: start_round,
            current: PlayerId::new(0),
            round_done: false,
            game_done: false,
            rng: GameRng::new(seed),
        };
        game.start_game();
        Ok(game)
    }

    /// Start over from the first round, keeping the config and RNG stream.
    pub fn reset(&mut self) {
        debug!("resetting game");
        self.start_game();
    }

    fn start_game(&mut self) {
        self.round = self.start_round;
        self.scores = ScoreSheet::new(self.start_round, self.players.len());
        self.current = PlayerId::new(self.rng.gen_index(self.players.len()) as u8);
        self.begin_round();
    }

    /// Fresh board, shuffled boneyard and new hands for `self.round`.
    fn begin_round(&mut self) {
        self.board.reset(self.round);
        self.tile_set.shuffle(&mut self.rng);
        self.boneyard = self.tile_set.boneyard();

        for player in &mut self.players {
            player.reset_hand();
            for _ in 0..self.config.initial_hand_size {
                player.draw(&mut self.boneyard, &mut self.rng);
            }
        }

        self.update_done();
        if self.round_done {
            // The whole set was dealt and nobody holds an opener.
            self.finish_round();
        }
        debug!(
            round = self.round,
            starter = %self.current,
            boneyard = self.boneyard.len(),
            "round dealt"
        );
    }

    /// Play the current seat's turn and pass play to the next seat.
    ///
    /// `decision` is only for agent seats facing two or more legal plays.
    /// When the turn finishes the round, its scores are recorded.
    pub fn play_turn(&mut self, decision: Option<AgentDecision>) -> Result<TurnOutcome> {
        if self.game_done {
            return Err(SpinnerError::GameOver);
        }
        if self.round_done {
            return Err(SpinnerError::RoundOver { round: self.round });
        }

        let player = &mut self.players[self.current.index()];
        let outcome = player.play_turn(&mut self.board, &mut self.boneyard, &mut self.rng, decision)?;

        self.update_done();
        if self.round_done {
            self.finish_round();
        }
        self.current = self.current.next(self.players.len());
        Ok(outcome)
    }

    /// Play turns until the current round finishes; returns its scores.
    ///
    /// Agent seats cannot be driven from here: hitting one that needs a
    /// decision is an error. Use [`SpinnerGame::play_until_agent_input`] for
    /// games with agent seats.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn play_round(&mut self) -> Result<PlayerMap<u32>> {
        while !self.round_done {
            self.play_turn(None)?;
        }
        Ok(self.scores.round(self.round).clone())
    }

    /// Play every remaining round.
    #[instrument(skip(self))]
    pub fn play_game(&mut self) -> Result<GameResult> {
        while !self.game_done {
            self.play_round()?;
            if !self.game_done {
                self.setup_new_round()?;
            }
        }
        let result = self.result();
        info!(winner = %result.winner, totals = ?result.totals.as_slice(), "game finished");
        Ok(result)
    }

    /// Move on to the next round once the current one is finished.
    ///
    /// The new round starts with a random seat among those that scored
    /// lowest in the round just played.
    pub fn setup_new_round(&mut self) -> Result<()> {
        if self.game_done {
            return Err(SpinnerError::GameOver);
        }
        if !self.round_done {
            return Err(SpinnerError::RoundInProgress { round: self.round });
        }

        let lowest = self.scores.lowest_in_round(self.round);
        self.current = self.rng.choose(&lowest).copied().unwrap_or(self.current);
        self.round -= 1;
        self.begin_round();
        Ok(())
    }

    /// Run turns (and round changes) until an agent seat must decide or the
    /// game ends.
    pub fn play_until_agent_input(&mut self) -> Result<()> {
        while !self.game_done {
            if self.round_done {
                self.setup_new_round()?;
                continue;
            }
            if self.current_player().needs_agent_input(&self.board) {
                break;
            }
            self.play_turn(None)?;
        }
        Ok(())
    }

    /// Resume a turn that was waiting for an agent's decision.
    pub fn apply_agent_decision(&mut self, decision: AgentDecision) -> Result<TurnOutcome> {
        if !self.awaiting_agent() {
            return Err(SpinnerError::NotAgentTurn {
                player: self.current,
            });
        }
        self.play_turn(Some(decision))
    }

    /// Is the current seat an agent with a choice to make?
    #[must_use]
    pub fn awaiting_agent(&self) -> bool {
        !self.game_done
            && !self.round_done
            && self.current_player().needs_agent_input(&self.board)
    }

    /// A round is over when a hand is empty, or when the boneyard is empty
    /// and nobody has a legal play.
    #[must_use]
    pub fn is_round_done(&self) -> bool {
        if self.players.iter().any(|p| p.hand().is_empty()) {
            return true;
        }
        self.boneyard.is_empty()
            && self
                .players
                .iter()
                .all(|p| p.legal_actions(&self.board).is_empty())
    }

    fn update_done(&mut self) {
        self.round_done = self.is_round_done();
        self.game_done = self.round_done && self.round == self.end_round;
    }

    fn finish_round(&mut self) {
        let scores: PlayerMap<u32> = self.players.iter().map(Player::score).collect();
        info!(round = self.round, scores = ?scores.as_slice(), "round finished");
        self.scores.record(self.round, scores);
    }

    /// Lowest cumulative total so far; ties go to the lowest seat.
    #[must_use]
    pub fn winner(&self) -> PlayerId {
        self.scores.leader()
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        GameResult {
            winner: self.winner(),
            totals: self.scores.totals(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn round(&self) -> u8 {
        self.round
    }

    #[must_use]
    pub fn end_round(&self) -> u8 {
        self.end_round
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.round_done
    }

    #[must_use]
    pub fn is_game_done(&self) -> bool {
        self.game_done
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn usable_ends(&self) -> Ends {
        self.board.usable_ends()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current.index()]
    }

    #[must_use]
    pub fn boneyard_len(&self) -> usize {
        self.boneyard.len()
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreSheet {
        &self.scores
    }

    #[must_use]
    pub fn tile_set(&self) -> &TileSet {
        &self.tile_set
    }
}

impl std::fmt::Display for SpinnerGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "---Game Status---")?;
        writeln!(f, "Round: {}", self.round)?;
        writeln!(f, "Current Player: {}", self.current.0)?;
        writeln!(f, "Boneyard: {}", self.boneyard)?;
        writeln!(f, "{}", self.board)?;
        for player in &self.players {
            writeln!(f, "{}", player)?;
        }
        Ok(())
    }
}
