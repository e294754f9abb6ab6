//! Canvas Snake - classic grid Snake for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, food, scoring)
//! - `game`: State machine tying the simulation to its collaborators
//! - `renderer`: Render sinks (HTML canvas, log)
//! - `platform`: Browser/native platform abstraction (timers, input)
//! - `highscores`: Persisted best score
//! - `config`: Grid geometry and seeding

pub mod config;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use game::Game;
pub use highscores::{HighScore, HighScoreStore, MemoryStore, StorageError};

/// Game rule constants
pub mod consts {
    /// Edge length of one grid cell in pixels
    pub const CELL_SIZE: i32 = 20;
    /// Default grid dimensions in cells (400x400 canvas)
    pub const GRID_CELLS: i32 = 20;

    /// Points awarded per food eaten
    pub const FOOD_REWARD: u64 = 10;

    /// Starting tick interval (ms)
    pub const INITIAL_INTERVAL_MS: u32 = 100;
    /// Tick interval never drops to or below this before a speed-up
    pub const MIN_INTERVAL_MS: u32 = 50;
    /// Interval reduction per speed-up (ms)
    pub const SPEED_STEP_MS: u32 = 5;
    /// Speed up every time the score hits a multiple of this
    pub const SPEED_UP_EVERY: u64 = 50;

    /// Random placement attempts before falling back to a free-cell scan
    pub const FOOD_SAMPLE_ATTEMPTS: u32 = 64;
}
