//! Game configuration.
//!
//! A `GameConfig` fixes everything about a game that does not change while
//! it runs: pip range, optional rules, deal size, the terminal round and the
//! seats. It can be built in code or loaded from TOML:
//!
//! ```
//! use spinner_dominoes::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     max_pips = 6
//!     include_spinner = true
//!     initial_hand_size = 4
//!     end_round = 3
//!
//!     [[players]]
//!     strategy = "play_high"
//!
//!     [[players]]
//!     strategy = "random"
//!     verbose = true
//! "#).unwrap();
//!
//! assert_eq!(config.players.len(), 2);
//! assert_eq!(config.branch_capacity(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpinnerError};

/// Number of chickenfoot branches a double opens.
pub const CHICKENFOOT_BRANCHES: usize = 3;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Strategy identifier: `play_high`, `play_low`, `random` or `agent`.
    pub strategy: String,

    /// Log this seat's turns at info level.
    #[serde(default)]
    pub verbose: bool,
}

impl PlayerConfig {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            verbose: false,
        }
    }

    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Highest numeric end value. Also the first round's number.
    pub max_pips: i32,

    /// Add the spinner tiles (`n|S` for every pip value, plus `S|S`).
    pub include_spinner: bool,

    /// Doubles open three branches instead of one, and the opening triple
    /// opens two extra lines.
    pub allow_chickenfoot_branches: bool,

    /// Tiles dealt to each seat at the start of a round.
    pub initial_hand_size: usize,

    /// Last round played (inclusive). Rounds count down from `max_pips`.
    pub end_round: i32,

    /// Seats in turn order.
    pub players: Vec<PlayerConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_pips: 9,
            include_spinner: false,
            allow_chickenfoot_branches: false,
            initial_hand_size: 5,
            end_round: 5,
            players: Vec::new(),
        }
    }
}

impl GameConfig {
    /// A config with the given pip range, playing every round down to 0.
    pub fn new(max_pips: i32) -> Self {
        Self {
            max_pips,
            end_round: 0,
            ..Self::default()
        }
    }

    /// Parse a TOML document. The result is validated.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_spinner(mut self, include: bool) -> Self {
        self.include_spinner = include;
        self
    }

    #[must_use]
    pub fn with_chickenfoot(mut self, allow: bool) -> Self {
        self.allow_chickenfoot_branches = allow;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_end_round(mut self, round: i32) -> Self {
        self.end_round = round;
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.players.push(player);
        self
    }

    /// Branches a double must have filled before play moves on.
    #[must_use]
    pub fn branch_capacity(&self) -> usize {
        if self.allow_chickenfoot_branches {
            CHICKENFOOT_BRANCHES
        } else {
            1
        }
    }

    /// Size of the complete tile set this config generates.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let values = self.max_pips.max(0) as usize + 1;
        let numeric = values * (values + 1) / 2;
        if self.include_spinner {
            numeric + values + 1
        } else {
            numeric
        }
    }

    /// Check the config describes a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.max_pips < 0 {
            return Err(SpinnerError::config(format!(
                "max_pips must not be negative, got {}",
                self.max_pips
            )));
        }
        if self.max_pips >= u8::MAX as i32 {
            return Err(SpinnerError::config(format!(
                "max_pips must be below {}, got {}",
                u8::MAX,
                self.max_pips
            )));
        }
        if self.end_round < 0 || self.end_round > self.max_pips {
            return Err(SpinnerError::config(format!(
                "end_round must be within 0..={}, got {}",
                self.max_pips, self.end_round
            )));
        }
        if self.players.is_empty() {
            return Err(SpinnerError::config("at least one player is required"));
        }
        if self.players.len() > u8::MAX as usize {
            return Err(SpinnerError::config(format!(
                "at most {} players supported, got {}",
                u8::MAX,
                self.players.len()
            )));
        }
        if self.initial_hand_size == 0 {
            return Err(SpinnerError::config("initial_hand_size must be at least 1"));
        }
        let dealt = self.initial_hand_size * self.players.len();
        if dealt > self.tile_count() {
            return Err(SpinnerError::config(format!(
                "dealing {} tiles to {} players needs {} tiles, the set has {}",
                self.initial_hand_size,
                self.players.len(),
                dealt,
                self.tile_count()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_seats(config: GameConfig) -> GameConfig {
        config
            .with_player(PlayerConfig::new("random"))
            .with_player(PlayerConfig::new("play_low"))
    }

    #[test]
    fn test_builder() {
        let config = two_seats(GameConfig::new(6))
            .with_spinner(true)
            .with_chickenfoot(true)
            .with_hand_size(7)
            .with_end_round(2);

        assert_eq!(config.max_pips, 6);
        assert!(config.include_spinner);
        assert_eq!(config.initial_hand_size, 7);
        assert_eq!(config.end_round, 2);
        assert_eq!(config.branch_capacity(), CHICKENFOOT_BRANCHES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tile_count() {
        assert_eq!(GameConfig::new(6).tile_count(), 28);
        assert_eq!(GameConfig::new(6).with_spinner(true).tile_count(), 36);
        assert_eq!(GameConfig::new(0).tile_count(), 1);
    }

    #[test]
    fn test_negative_max_pips_rejected() {
        let config = two_seats(GameConfig::new(-1));
        assert!(matches!(
            config.validate(),
            Err(SpinnerError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_end_round_above_start_rejected() {
        let config = two_seats(GameConfig::new(3)).with_end_round(4);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_players_rejected() {
        assert!(GameConfig::new(3).validate().is_err());
    }

    #[test]
    fn test_oversized_deal_rejected() {
        // Double-three set has 10 tiles.
        let config = two_seats(GameConfig::new(3)).with_hand_size(6);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [[players]]
            strategy = "agent"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_pips, 9);
        assert_eq!(config.end_round, 5);
        assert_eq!(config.initial_hand_size, 5);
        assert!(!config.players[0].verbose);
    }

    #[test]
    fn test_toml_parse_error() {
        let err = GameConfig::from_toml_str("max_pips = \"nine\"").unwrap_err();
        assert!(matches!(err, SpinnerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let config = two_seats(GameConfig::new(4)).with_spinner(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
