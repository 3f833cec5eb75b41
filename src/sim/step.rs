//! Per-tick simulation step
//!
//! Advances the game by exactly one cell of movement. This module must stay
//! pure and deterministic: seeded RNG only, no platform dependencies.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{BoardSize, GameState, GameStatus, Position};
use crate::consts::*;

/// What a single step did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Plain movement, no food, no collision
    Moved,
    /// Head landed on food: snake grew and score increased
    Ate,
    /// Wall or self collision: status is now GameOver
    Died,
    /// Step was requested while not playing
    Ignored,
}

/// Advance the game state by one tick.
///
/// Order per tick: resolve buffered direction, move the head, check wall and
/// self collision, resolve food, recompute the level.
pub fn step(state: &mut GameState, rng: &mut Pcg32) -> StepOutcome {
    if state.status != GameStatus::Playing {
        return StepOutcome::Ignored;
    }

    // Reversal requests are dropped once the snake has a neck to run into
    if state.snake.len() <= 1 || state.next_direction != state.direction.opposite() {
        state.direction = state.next_direction;
    } else {
        state.next_direction = state.direction;
    }

    let (dx, dy) = state.direction.delta();
    let head = state.head();
    let new_head = Position::new(head.x + dx, head.y + dy);

    // Wall collision, then self collision against the pre-existing body.
    // The tail cell still counts: it has not vacated yet at check time.
    if !state.board.contains(new_head) || state.snake.contains(&new_head) {
        state.status = GameStatus::GameOver;
        return StepOutcome::Died;
    }

    state.snake.insert(0, new_head);

    let outcome = if new_head == state.food {
        state.score += FOOD_POINTS;
        state.food = place_food(&state.snake, state.board, rng);
        StepOutcome::Ate
    } else {
        state.snake.pop();
        StepOutcome::Moved
    };

    state.level = GameState::level_for_score(state.score);
    outcome
}

/// Pick a random food cell not occupied by the snake.
///
/// Uniform draws with bounded retries; when the board is nearly full and every
/// attempt lands on the snake, the last candidate is accepted rather than
/// looping forever. On an almost-full board this can drop food on the snake.
pub fn place_food(snake: &[Position], board: BoardSize, rng: &mut Pcg32) -> Position {
    let mut candidate = Position::new(0, 0);
    for _ in 0..FOOD_PLACE_ATTEMPTS {
        candidate = Position::new(
            rng.random_range(0..board.width),
            rng.random_range(0..board.height),
        );
        if !snake.contains(&candidate) {
            return candidate;
        }
    }
    candidate
}
