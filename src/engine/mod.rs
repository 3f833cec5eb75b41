//! Lifecycle controller
//!
//! `GameEngine` owns the `GameState` and wires the deterministic simulation
//! to the injected platform adapters: a drawing surface, a tick scheduler,
//! a score store, and an optional game-over callback. The engine never owns
//! a clock; it is driven by repeated `update(dt)` calls from the embedding
//! environment and time-gates simulation steps against the current interval.

mod render;

use anyhow::ensure;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::platform::{DrawSurface, ScoreStore, TickScheduler};
use crate::sim::{step, BoardSize, Difficulty, Direction, GameState, GameStatus, StepOutcome};

/// Invoked with the final score, exactly once per game-over transition
pub type GameOverCallback = Box<dyn FnMut(u32)>;

pub struct GameEngine {
    state: GameState,
    rng: Pcg32,
    surface: Box<dyn DrawSurface>,
    scheduler: Box<dyn TickScheduler>,
    store: Box<dyn ScoreStore>,
    on_game_over: Option<GameOverCallback>,
    /// Elapsed time not yet consumed by a tick (ms)
    elapsed_ms: f64,
}

impl GameEngine {
    /// Construct the engine against a drawing surface.
    ///
    /// Fails fast when the surface cannot hold a playable board; this is the
    /// only error that propagates to the caller. A missing or unparseable
    /// stored high score degrades to 0.
    pub fn new(
        surface: Box<dyn DrawSurface>,
        scheduler: Box<dyn TickScheduler>,
        store: Box<dyn ScoreStore>,
        difficulty: Difficulty,
        seed: u64,
        on_game_over: Option<GameOverCallback>,
    ) -> anyhow::Result<Self> {
        let board = BoardSize::from_pixels(surface.width_px(), surface.height_px());
        // The centered spawn needs room to the left of the head plus at least
        // one free cell for food
        ensure!(
            board.width >= 2 * INITIAL_SNAKE_LEN as i32 && board.height >= 2,
            "drawing surface too small for a playable board ({}x{} cells)",
            board.width,
            board.height,
        );

        let high_score = match store.get(HIGH_SCORE_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("stored high score {raw:?} is not a number, defaulting to 0");
                0
            }),
            None => 0,
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(board, difficulty, high_score, &mut rng);
        log::info!(
            "engine ready: board {}x{}, difficulty {:?}, high score {}",
            board.width,
            board.height,
            difficulty,
            high_score
        );

        Ok(Self {
            state,
            rng,
            surface,
            scheduler,
            store,
            on_game_over,
            elapsed_ms: 0.0,
        })
    }

    /// Start from idle with a fresh session, or resume from pause as-is.
    pub fn start_game(&mut self) {
        match self.state.status {
            GameStatus::Idle => {
                self.reinit_state();
                self.state.status = GameStatus::Playing;
                self.elapsed_ms = 0.0;
                self.scheduler.request();
            }
            GameStatus::Paused => {
                self.state.status = GameStatus::Playing;
                self.scheduler.request();
            }
            GameStatus::Playing | GameStatus::GameOver => {}
        }
    }

    /// Suspend gameplay, keeping state intact for resume.
    pub fn pause_game(&mut self) {
        if self.state.status == GameStatus::Playing {
            self.state.status = GameStatus::Paused;
            self.scheduler.cancel();
        }
    }

    /// End the session explicitly. Persists the high score and fires the
    /// game-over notification.
    pub fn end_game(&mut self) {
        if matches!(self.state.status, GameStatus::Playing | GameStatus::Paused) {
            self.state.status = GameStatus::GameOver;
            self.finish_game();
        }
    }

    /// Back to idle with a wholly fresh state; the high score survives.
    pub fn reset_game(&mut self) {
        self.scheduler.cancel();
        self.reinit_state();
        self.elapsed_ms = 0.0;
    }

    /// Buffer a direction change for the next tick. Accepted in any status;
    /// last write within a tick window wins.
    pub fn change_direction(&mut self, direction: Direction) {
        self.state.next_direction = direction;
    }

    /// Per-callback entry point. Consumes elapsed time against the current
    /// tick interval and runs the steps it covers; no-op unless playing.
    pub fn update(&mut self, dt_ms: f64) {
        if self.state.status != GameStatus::Playing {
            return;
        }

        // Cap a stalled tab's backlog to a few ticks worth of time
        self.elapsed_ms += dt_ms.clamp(0.0, 250.0);

        while self.state.status == GameStatus::Playing
            && self.elapsed_ms >= self.state.tick_interval_ms()
        {
            self.elapsed_ms -= self.state.tick_interval_ms();
            if step(&mut self.state, &mut self.rng) == StepOutcome::Died {
                self.finish_game();
            }
        }

        if self.state.status == GameStatus::Playing {
            self.scheduler.request();
        }
    }

    /// Draw the current state through the surface primitives.
    pub fn render(&mut self) {
        render::draw(self.surface.as_mut(), &self.state);
    }

    /// Defensive copy of the full game state.
    pub fn game_state(&self) -> GameState {
        self.state.clone()
    }

    /// Serialize the current session for a browser save slot.
    pub fn session_snapshot(&self) -> Option<String> {
        serde_json::to_string(&self.state).ok()
    }

    /// Restore a previously saved session. The session comes back paused so
    /// the player resumes with `start_game()`. Returns false (leaving the
    /// engine untouched) on malformed JSON or a snapshot from a different
    /// board size; the session high score never regresses the stored one.
    pub fn restore_session(&mut self, json: &str) -> bool {
        let mut loaded: GameState = match serde_json::from_str(json) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("saved session is malformed, ignoring: {err}");
                return false;
            }
        };
        if loaded.board != self.state.board {
            log::warn!(
                "saved session board {}x{} does not match surface, ignoring",
                loaded.board.width,
                loaded.board.height
            );
            return false;
        }
        if loaded.snake.is_empty() {
            log::warn!("saved session has no snake, ignoring");
            return false;
        }
        loaded.high_score = loaded.high_score.max(self.state.high_score);
        loaded.status = GameStatus::Paused;
        self.state = loaded;
        self.elapsed_ms = 0.0;
        self.scheduler.cancel();
        true
    }

    fn reinit_state(&mut self) {
        self.state = GameState::new(
            self.state.board,
            self.state.difficulty,
            self.state.high_score,
            &mut self.rng,
        );
    }

    /// Shared tail of both game-over paths (explicit end and collision).
    /// Status is already GameOver when we get here.
    fn finish_game(&mut self) {
        self.scheduler.cancel();
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.store.set(HIGH_SCORE_KEY, self.state.high_score);
            log::info!("new high score: {}", self.state.high_score);
        }
        let score = self.state.score;
        if let Some(cb) = self.on_game_over.as_mut() {
            cb(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scheduler::CountingScheduler;
    use crate::platform::storage::MemoryStore;
    use crate::platform::surface::RecordingSurface;
    use crate::sim::Position;
    use std::cell::Cell;
    use std::rc::Rc;

    const SEED: u64 = 99;

    fn engine_with(
        store: MemoryStore,
        scheduler: CountingScheduler,
        on_game_over: Option<GameOverCallback>,
    ) -> GameEngine {
        GameEngine::new(
            Box::new(RecordingSurface::new(400, 400)),
            Box::new(scheduler),
            Box::new(store),
            Difficulty::Normal,
            SEED,
            on_game_over,
        )
        .unwrap()
    }

    fn engine() -> GameEngine {
        engine_with(MemoryStore::new(), CountingScheduler::default(), None)
    }

    #[test]
    fn test_construction_fails_on_tiny_surface() {
        let result = GameEngine::new(
            Box::new(RecordingSurface::new(10, 10)),
            Box::new(CountingScheduler::default()),
            Box::new(MemoryStore::new()),
            Difficulty::Normal,
            SEED,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_high_score_read_at_construction() {
        let engine = engine_with(
            MemoryStore::with(HIGH_SCORE_KEY, "420"),
            CountingScheduler::default(),
            None,
        );
        assert_eq!(engine.game_state().high_score, 420);
    }

    #[test]
    fn test_unparseable_high_score_defaults_to_zero() {
        let engine = engine_with(
            MemoryStore::with(HIGH_SCORE_KEY, "not-a-number"),
            CountingScheduler::default(),
            None,
        );
        assert_eq!(engine.game_state().high_score, 0);
    }

    #[test]
    fn test_game_state_is_a_defensive_copy() {
        let engine = engine();
        let mut copy = engine.game_state();
        copy.snake.clear();
        copy.score = 9999;
        let fresh = engine.game_state();
        assert_eq!(fresh.snake.len(), 3);
        assert_eq!(fresh.score, 0);
    }

    #[test]
    fn test_start_schedules_and_pause_cancels() {
        let scheduler = CountingScheduler::default();
        let mut engine = engine_with(MemoryStore::new(), scheduler.clone(), None);

        engine.start_game();
        assert_eq!(engine.game_state().status, GameStatus::Playing);
        assert_eq!(scheduler.requests.get(), 1);

        engine.pause_game();
        assert_eq!(engine.game_state().status, GameStatus::Paused);
        assert_eq!(scheduler.cancels.get(), 1);
    }

    #[test]
    fn test_resume_keeps_state() {
        // Scenario E
        let mut engine = engine();
        engine.start_game();
        engine.update(150.0); // exactly one tick
        let before = engine.game_state();
        assert_eq!(before.head(), Position::new(11, 10));

        engine.pause_game();
        engine.start_game();
        let after = engine.game_state();
        assert_eq!(after.status, GameStatus::Playing);
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.food, before.food);
        assert_eq!(after.score, before.score);
    }

    #[test]
    fn test_update_is_time_gated() {
        let mut engine = engine();
        engine.start_game();
        let spawn_head = engine.game_state().head();

        engine.update(100.0); // below the 150ms interval
        assert_eq!(engine.game_state().head(), spawn_head);

        engine.update(50.0); // accumulates to one tick
        assert_eq!(engine.game_state().head(), Position::new(11, 10));
    }

    #[test]
    fn test_update_noop_when_not_playing() {
        let mut engine = engine();
        let before = engine.game_state();
        engine.update(10_000.0);
        assert_eq!(engine.game_state().snake, before.snake);
        assert_eq!(engine.game_state().status, GameStatus::Idle);
    }

    #[test]
    fn test_direction_changes_buffer_last_write_wins() {
        let mut engine = engine();
        engine.start_game();
        engine.change_direction(Direction::Down);
        engine.change_direction(Direction::Up);
        engine.update(150.0);
        assert_eq!(engine.game_state().direction, Direction::Up);
        assert_eq!(engine.game_state().head(), Position::new(10, 9));
    }

    #[test]
    fn test_end_game_persists_and_notifies_once() {
        let seen = Rc::new(Cell::new(0u32));
        let calls = Rc::new(Cell::new(0u32));
        let cb: GameOverCallback = {
            let seen = seen.clone();
            let calls = calls.clone();
            Box::new(move |score: u32| {
                seen.set(score);
                calls.set(calls.get() + 1);
            })
        };
        let mut engine = engine_with(MemoryStore::new(), CountingScheduler::default(), Some(cb));

        engine.start_game();
        engine.update(150.0);
        engine.end_game();
        engine.end_game(); // second call must not re-notify

        assert_eq!(engine.game_state().status, GameStatus::GameOver);
        assert_eq!(calls.get(), 1);
        assert_eq!(seen.get(), engine.game_state().score);
    }

    #[test]
    fn test_wall_collision_during_update_ends_game() {
        let scheduler = CountingScheduler::default();
        let calls = Rc::new(Cell::new(0u32));
        let cb: GameOverCallback = {
            let calls = calls.clone();
            Box::new(move |_score: u32| calls.set(calls.get() + 1))
        };
        let mut engine = engine_with(MemoryStore::new(), scheduler.clone(), Some(cb));

        engine.start_game();
        // Board is 20 cells wide, head starts at x=10 heading right:
        // 9 ticks reach the wall cell, the 10th dies on x=20.
        for _ in 0..12 {
            engine.update(150.0);
        }
        assert_eq!(engine.game_state().status, GameStatus::GameOver);
        assert_eq!(calls.get(), 1);
        assert!(scheduler.cancels.get() >= 1);
    }

    #[test]
    fn test_high_score_survives_reset() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, 30);
        let mut engine = engine_with(store, CountingScheduler::default(), None);

        engine.start_game();
        engine.end_game();
        engine.reset_game();

        let state = engine.game_state();
        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 30);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_session_snapshot_roundtrip() {
        let mut engine = engine();
        engine.start_game();
        engine.change_direction(Direction::Down);
        engine.update(300.0); // two ticks
        engine.pause_game();
        let saved = engine.game_state();
        let json = engine.session_snapshot().unwrap();

        // A fresh engine on the same surface picks the session back up
        let mut resumed = self::engine();
        assert!(resumed.restore_session(&json));
        let state = resumed.game_state();
        assert_eq!(state.status, GameStatus::Paused);
        assert_eq!(state.snake, saved.snake);
        assert_eq!(state.food, saved.food);
        assert_eq!(state.score, saved.score);
        assert_eq!(state.direction, saved.direction);

        resumed.start_game();
        assert_eq!(resumed.game_state().status, GameStatus::Playing);
    }

    #[test]
    fn test_restore_session_rejects_garbage() {
        let mut engine = engine();
        let before = engine.game_state();
        assert!(!engine.restore_session("not json"));
        assert!(!engine.restore_session("{\"score\":1}"));
        assert_eq!(engine.game_state().snake, before.snake);
        assert_eq!(engine.game_state().status, GameStatus::Idle);
    }

    #[test]
    fn test_restore_session_rejects_mismatched_board() {
        let mut small = GameEngine::new(
            Box::new(RecordingSurface::new(200, 200)),
            Box::new(CountingScheduler::default()),
            Box::new(MemoryStore::new()),
            Difficulty::Normal,
            SEED,
            None,
        )
        .unwrap();
        small.start_game();
        let json = small.session_snapshot().unwrap();

        let mut engine = engine(); // 400x400 surface, 20x20 board
        assert!(!engine.restore_session(&json));
        assert_eq!(engine.game_state().status, GameStatus::Idle);
    }

    #[test]
    fn test_restore_session_keeps_best_high_score() {
        let mut engine = engine();
        engine.start_game();
        let json = engine.session_snapshot().unwrap();

        let mut richer = engine_with(
            MemoryStore::with(HIGH_SCORE_KEY, "500"),
            CountingScheduler::default(),
            None,
        );
        assert!(richer.restore_session(&json));
        assert_eq!(richer.game_state().high_score, 500);
    }

    #[test]
    fn test_start_after_game_over_requires_reset() {
        let mut engine = engine();
        engine.start_game();
        engine.end_game();

        engine.start_game();
        assert_eq!(engine.game_state().status, GameStatus::GameOver);

        engine.reset_game();
        engine.start_game();
        assert_eq!(engine.game_state().status, GameStatus::Playing);
    }
}
