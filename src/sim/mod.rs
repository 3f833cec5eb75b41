//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One grid cell of movement per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod state;
pub mod step;

pub use state::{
    BoardSize, Difficulty, Direction, GameMode, GameState, GameStatus, Position,
};
pub use step::{place_food, step, StepOutcome};
