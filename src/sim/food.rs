//! Food placement
//!
//! Rejection sampling over the whole board, capped at a fixed number of
//! attempts. When the snake is long enough that sampling keeps missing, the
//! free cells are enumerated once and one is picked uniformly, so placement
//! always finishes in bounded time.

use std::collections::VecDeque;

use glam::IVec2;
use rand::Rng;

use super::state::Segment;
use crate::config::GameConfig;
use crate::consts::FOOD_SAMPLE_ATTEMPTS;

/// Pick a random cell not covered by `snake`. Returns None when the board is full.
pub fn place_food<R: Rng>(
    rng: &mut R,
    config: &GameConfig,
    snake: &VecDeque<Segment>,
) -> Option<Segment> {
    if snake.len() >= config.cell_count() {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let cell = random_cell(rng, config);
        if !snake.contains(&cell) {
            return Some(cell);
        }
    }

    let free: Vec<Segment> = all_cells(config)
        .filter(|cell| !snake.contains(cell))
        .collect();
    if free.is_empty() {
        return None;
    }
    log::debug!("Food sampling exhausted, picking from {} free cells", free.len());
    Some(free[rng.random_range(0..free.len())])
}

fn random_cell<R: Rng>(rng: &mut R, config: &GameConfig) -> Segment {
    IVec2::new(
        rng.random_range(0..config.grid_width) * config.cell_size,
        rng.random_range(0..config.grid_height) * config.cell_size,
    )
}

fn all_cells(config: &GameConfig) -> impl Iterator<Item = Segment> + '_ {
    (0..config.grid_height).flat_map(move |y| {
        (0..config.grid_width).map(move |x| IVec2::new(x * config.cell_size, y * config.cell_size))
    })
}
