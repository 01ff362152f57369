//! Seats, their legal plays, and the strategies that choose between them.

pub mod action;
pub mod strategy;
pub mod player;

pub use action::{PlayAction, TurnOutcome};
pub use strategy::{
    AgentDecision, DecisionContext, DecisionPolicy, MaxValue, MinValue, Strategy, Supplied,
    UniformRandom,
};
pub use player::Player;
