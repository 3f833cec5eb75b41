//! Game state and core simulation types
//!
//! The `GameState` here is the single source of truth for a session. The
//! engine owns it exclusively; everything handed outward is a clone.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::place_food;
use crate::consts::*;

/// A board cell coordinate, 0-based, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Movement direction, one cell per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The exact reverse of this direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector applied to the head each tick
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Current phase of gameplay - drives tick scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Constructed or reset, waiting for start
    Idle,
    /// Active gameplay, ticks scheduled
    Playing,
    /// Gameplay suspended, state retained for resume
    Paused,
    /// Run ended by collision or explicit end
    GameOver,
}

/// Game mode. Classic is the single-food base mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
}

/// Difficulty selects the base tick interval before leveling kicks in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Base tick interval in milliseconds at level 1
    pub fn base_interval_ms(self) -> f64 {
        match self {
            Difficulty::Easy => 200.0,
            Difficulty::Normal => 150.0,
            Difficulty::Hard => 100.0,
        }
    }
}

/// Board dimensions in cells, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: i32,
    pub height: i32,
}

impl BoardSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Board dimensions derived from a pixel surface (integer floor division)
    pub fn from_pixels(width_px: u32, height_px: u32) -> Self {
        Self {
            width: (width_px / CELL_SIZE) as i32,
            height: (height_px / CELL_SIZE) as i32,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub status: GameStatus,
    /// Session score
    pub score: u32,
    /// Best score seen by this engine instance
    pub high_score: u32,
    /// Derived difficulty tier: score / 100 + 1
    pub level: u32,
    /// Snake body, head first, tail last
    pub snake: Vec<Position>,
    /// The single active food cell
    pub food: Position,
    /// Direction applied on the current tick
    pub direction: Direction,
    /// Buffered direction request, adopted at the next tick boundary
    pub next_direction: Direction,
    /// Board dimensions in cells
    pub board: BoardSize,
    /// Game mode
    pub mode: GameMode,
    /// Difficulty selected at construction
    pub difficulty: Difficulty,
}

impl GameState {
    /// Create a fresh idle state: snake centered, food placed off the snake.
    pub fn new(board: BoardSize, difficulty: Difficulty, high_score: u32, rng: &mut Pcg32) -> Self {
        let snake = spawn_snake(board);
        let food = place_food(&snake, board, rng);
        Self {
            status: GameStatus::Idle,
            score: 0,
            high_score,
            level: 1,
            snake,
            food,
            direction: Direction::Right,
            next_direction: Direction::Right,
            board,
            mode: GameMode::Classic,
            difficulty,
        }
    }

    /// Head of the snake. The body is never empty once constructed.
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    /// Tick interval for the current level, clamped to the floor
    pub fn tick_interval_ms(&self) -> f64 {
        let base = self.difficulty.base_interval_ms();
        (base - (self.level.saturating_sub(1)) as f64 * SPEED_STEP_MS).max(MIN_TICK_MS)
    }

    /// Level derived from a score
    pub fn level_for_score(score: u32) -> u32 {
        score / POINTS_PER_LEVEL + 1
    }
}

/// Three horizontally aligned segments centered on the board, head rightmost.
fn spawn_snake(board: BoardSize) -> Vec<Position> {
    let cx = board.width / 2;
    let cy = board.height / 2;
    (0..INITIAL_SNAKE_LEN as i32)
        .map(|i| Position::new(cx - i, cy))
        .collect()
}
