//! Grid Snake - a browser-playable grid snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state model, per-tick step function)
//! - `engine`: Lifecycle controller driving the simulation from an external scheduler
//! - `platform`: Browser/native adapter contracts (drawing, scheduling, storage)

pub mod engine;
pub mod platform;
pub mod sim;

pub use engine::GameEngine;

/// Game configuration constants
pub mod consts {
    /// Side length of one board cell in canvas pixels
    pub const CELL_SIZE: u32 = 20;

    /// Snake length at spawn
    pub const INITIAL_SNAKE_LEN: usize = 3;
    /// Points awarded per food eaten
    pub const FOOD_POINTS: u32 = 10;
    /// Score needed to advance one level
    pub const POINTS_PER_LEVEL: u32 = 100;

    /// Tick interval reduction per level gained (ms)
    pub const SPEED_STEP_MS: f64 = 10.0;
    /// Floor for the tick interval (ms) - leveling never pushes the game past this rate
    pub const MIN_TICK_MS: f64 = 50.0;

    /// Bounded attempts for random food placement before accepting the last candidate
    pub const FOOD_PLACE_ATTEMPTS: u32 = 32;

    /// LocalStorage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "snake_high_score";
    /// LocalStorage key for the saved-session snapshot
    pub const SESSION_KEY: &str = "snake_session";
}
