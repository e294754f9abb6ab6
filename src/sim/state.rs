//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Coordinates are pixels,
//! always a multiple of the configured cell size.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::food::place_food;
use crate::config::GameConfig;
use crate::consts::INITIAL_INTERVAL_MS;

/// One occupied grid cell, in pixel coordinates
pub type Segment = IVec2;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// No heading yet (fresh board)
    #[default]
    None,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Unit step in grid cells (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::None => IVec2::ZERO,
        }
    }
}

/// Current phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Board laid out, waiting for start or first direction
    #[default]
    Idle,
    /// Tick loop active
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// Snake covers every cell, nowhere left for food
    BoardFull,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Board layout
    pub config: GameConfig,
    /// Body segments, head first
    pub snake: VecDeque<Segment>,
    /// Direction committed on the last tick
    pub direction: Direction,
    /// Most recent accepted input, committed on the next tick
    pub next_direction: Direction,
    /// Food cell
    pub food: Segment,
    /// Score of the current run
    pub score: u64,
    /// Tick interval in milliseconds
    pub interval_ms: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks simulated since the last reset
    pub ticks: u64,
    /// Food placement RNG
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh Idle board
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            snake: VecDeque::new(),
            direction: Direction::None,
            next_direction: Direction::None,
            food: IVec2::ZERO,
            score: 0,
            interval_ms: INITIAL_INTERVAL_MS,
            phase: GamePhase::Idle,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.reset();
        state
    }

    /// Lay out a new run: single centred segment, fresh food, zero score.
    /// The tick interval carries over, as does the RNG stream so successive
    /// runs differ.
    pub fn reset(&mut self) {
        self.snake.clear();
        self.snake.push_back(self.config.center());
        self.direction = Direction::None;
        self.next_direction = Direction::None;
        self.score = 0;
        self.phase = GamePhase::Idle;
        self.ticks = 0;
        // Valid configs have at least two cells, so a one-segment snake leaves room
        self.food = place_food(&mut self.rng, &self.config, &self.snake)
            .unwrap_or_else(|| self.config.center());
    }

    /// Get the head position
    pub fn head(&self) -> Segment {
        self.snake[0]
    }

    /// Get the tail position
    pub fn tail(&self) -> Segment {
        self.snake[self.snake.len() - 1]
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Segment) -> bool {
        pos.x >= 0
            && pos.x < self.config.width_px()
            && pos.y >= 0
            && pos.y < self.config.height_px()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Segment) -> bool {
        self.snake.contains(&pos)
    }

    /// Whether the tick loop should be driving this state
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Queue a direction for the next tick.
    ///
    /// Reversals of the committed direction are dropped; while nothing is
    /// committed every direction is accepted. Later requests overwrite
    /// earlier ones within the same tick.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        if requested == Direction::None || self.direction.is_opposite(requested) {
            return false;
        }
        self.next_direction = requested;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 12345)
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::None.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::None));
    }

    #[test]
    fn test_new_state_layout() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), IVec2::new(200, 200));
        assert_eq!(state.tail(), state.head());
        assert_eq!(state.score, 0);
        assert_eq!(state.interval_ms, INITIAL_INTERVAL_MS);
        assert_eq!(state.direction, Direction::None);
        assert!(!state.is_occupied_by_snake(state.food));
        assert_eq!(state.food.x % 20, 0);
        assert_eq!(state.food.y % 20, 0);
    }

    #[test]
    fn test_bounds_checking() {
        let state = state();
        assert!(state.is_in_bounds(IVec2::new(0, 0)));
        assert!(state.is_in_bounds(IVec2::new(380, 380)));
        assert!(!state.is_in_bounds(IVec2::new(-20, 0)));
        assert!(!state.is_in_bounds(IVec2::new(400, 0)));
        assert!(!state.is_in_bounds(IVec2::new(0, 400)));
        assert!(!state.is_in_bounds(IVec2::new(0, -20)));
    }

    #[test]
    fn test_reversal_rejected_once_committed() {
        let mut state = state();
        state.direction = Direction::Right;

        assert!(!state.request_direction(Direction::Left));
        assert_eq!(state.next_direction, Direction::None);

        assert!(state.request_direction(Direction::Up));
        assert_eq!(state.next_direction, Direction::Up);
    }

    #[test]
    fn test_any_direction_accepted_before_commit() {
        let mut state = state();
        assert!(state.request_direction(Direction::Left));
        assert!(state.request_direction(Direction::Right));
        // Last request wins
        assert_eq!(state.next_direction, Direction::Right);
    }

    #[test]
    fn test_reset_keeps_interval() {
        let mut state = state();
        state.interval_ms = 85;
        state.reset();
        assert_eq!(state.interval_ms, 85);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_keeps_rng_stream() {
        let mut a = state();
        let first_food = a.food;
        let mut seen_other = false;
        for _ in 0..10 {
            a.reset();
            if a.food != first_food {
                seen_other = true;
            }
        }
        assert!(seen_other);
    }
}
