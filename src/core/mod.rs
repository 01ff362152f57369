//! Core engine types: seats, RNG, configuration.
//!
//! These are the game-independent pieces the tile, board and orchestration
//! modules are built on.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, PlayerConfig, CHICKENFOOT_BRANCHES};
