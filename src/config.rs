//! Grid geometry and run seeding
//!
//! Optional overrides are JSON (LocalStorage on the web, `SNAKE_CONFIG`
//! natively); anything missing falls back to the classic 20x20 board of
//! 20 px cells.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, GRID_CELLS};

/// Board layout and RNG seed for a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one cell in pixels
    pub cell_size: i32,
    /// Board width in cells
    pub grid_width: i32,
    /// Board height in cells
    pub grid_height: i32,
    /// Fixed seed for reproducible runs (None = seed from the clock)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            grid_width: GRID_CELLS,
            grid_height: GRID_CELLS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Fit a grid of `cell_size` cells into a canvas of the given pixel size
    /// Falls back to the default board if the canvas holds fewer than two cells.
    pub fn from_canvas(width_px: u32, height_px: u32, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        let cells = |px: u32| i32::try_from(px).unwrap_or(i32::MAX) / cell_size;
        let config = Self {
            cell_size,
            grid_width: cells(width_px),
            grid_height: cells(height_px),
            seed: None,
        };
        if config.is_valid() {
            config
        } else {
            log::warn!(
                "Canvas {}x{} too small for the board, using defaults",
                width_px,
                height_px
            );
            Self::default()
        }
    }

    /// Board width in pixels
    pub fn width_px(&self) -> i32 {
        self.grid_width * self.cell_size
    }

    /// Board height in pixels
    pub fn height_px(&self) -> i32 {
        self.grid_height * self.cell_size
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.grid_width.max(0) as usize) * (self.grid_height.max(0) as usize)
    }

    /// Pixel coordinate of the centre cell (rounded down)
    pub fn center(&self) -> IVec2 {
        IVec2::new(
            (self.grid_width / 2) * self.cell_size,
            (self.grid_height / 2) * self.cell_size,
        )
    }

    /// Whether the layout describes a usable board: room for the snake plus
    /// one food cell, and pixel extents that fit in an `i32`
    pub fn is_valid(&self) -> bool {
        if self.cell_size <= 0 || self.grid_width <= 0 || self.grid_height <= 0 {
            return false;
        }
        let fits = self.grid_width.checked_mul(self.cell_size).is_some()
            && self.grid_height.checked_mul(self.cell_size).is_some();
        let cells = (self.grid_width as i64) * (self.grid_height as i64);
        fits && cells >= 2
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "snake_config";

    /// Parse a JSON override, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<GameConfig>(json) {
            Ok(config) if config.is_valid() => config,
            Ok(config) => {
                log::warn!("Ignoring invalid config override: {:?}", config);
                Self::default()
            }
            Err(e) => {
                log::warn!("Unreadable config override: {}", e);
                Self::default()
            }
        }
    }

    /// Read a stored config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_override() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        log::info!("Loaded config override from LocalStorage");
        Some(Self::from_json(&json))
    }

    /// Read a config override from the `SNAKE_CONFIG` environment variable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_override() -> Option<Self> {
        let json = std::env::var("SNAKE_CONFIG").ok()?;
        log::info!("Loaded config override from SNAKE_CONFIG");
        Some(Self::from_json(&json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width_px(), 400);
        assert_eq!(config.height_px(), 400);
        assert_eq!(config.cell_count(), 400);
        assert_eq!(config.center(), IVec2::new(200, 200));
    }

    #[test]
    fn test_from_canvas() {
        let config = GameConfig::from_canvas(400, 300, 20);
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
        // 15 / 2 = 7 cells down
        assert_eq!(config.center(), IVec2::new(200, 140));
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = GameConfig::from_json(r#"{"grid_width": 10, "seed": 7}"#);
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, GRID_CELLS);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_single_cell_board_rejected() {
        let json = r#"{"grid_width": 1, "grid_height": 1}"#;
        assert_eq!(GameConfig::from_json(json), GameConfig::default());

        // Two cells is the smallest playable board
        let config = GameConfig::from_json(r#"{"grid_width": 2, "grid_height": 1}"#);
        assert_eq!(config.cell_count(), 2);
    }

    #[test]
    fn test_oversized_board_rejected() {
        let json = r#"{"grid_width": 1000000000}"#;
        let config = GameConfig::from_json(json);
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.width_px(), 400);

        let json = r#"{"cell_size": 2000000000, "grid_width": 2}"#;
        assert_eq!(GameConfig::from_json(json), GameConfig::default());
    }

    #[test]
    fn test_tiny_canvas_falls_back() {
        assert_eq!(GameConfig::from_canvas(20, 20, 20), GameConfig::default());
        assert_eq!(GameConfig::from_canvas(0, 0, 20), GameConfig::default());
    }

    #[test]
    fn test_food_never_on_snake_for_smallest_board() {
        let config = GameConfig::from_json(r#"{"grid_width": 2, "grid_height": 1}"#);
        let state = crate::sim::GameState::new(config, 9);
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert_eq!(GameConfig::from_json("not json"), GameConfig::default());
        assert_eq!(
            GameConfig::from_json(r#"{"cell_size": 0}"#),
            GameConfig::default()
        );
    }
}
