//! Fixed-interval simulation tick
//!
//! Advances the board by one cell. Side effects outside the board (timers,
//! persistence, drawing) are reported as events for the caller to apply.

use super::food::place_food;
use super::state::{Direction, GameOverCause, GamePhase, GameState, Segment};
use crate::consts::*;

/// Something the outside world needs to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Head landed on food; carries the new score
    FoodEaten { score: u64 },
    /// Tick interval shortened; the tick source must be re-armed
    SpeedChanged { interval_ms: u32 },
    /// Run ended this tick
    GameOver { cause: GameOverCause, score: u64 },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Stale timer fires after game over or restart are ignored
    if state.phase != GamePhase::Running {
        return events;
    }

    state.ticks += 1;
    state.direction = state.next_direction;
    if state.direction == Direction::None {
        return events;
    }

    let new_head = state.head() + state.direction.delta() * state.config.cell_size;
    let grows = new_head == state.food;

    if let Some(cause) = check_collision(state, new_head, grows) {
        return end_run(state, cause, events);
    }

    state.snake.push_front(new_head);

    if !grows {
        state.snake.pop_back();
        return events;
    }

    state.score += FOOD_REWARD;
    events.push(GameEvent::FoodEaten { score: state.score });

    match place_food(&mut state.rng, &state.config, &state.snake) {
        Some(food) => state.food = food,
        None => return end_run(state, GameOverCause::BoardFull, events),
    }

    if state.score % SPEED_UP_EVERY == 0 && state.interval_ms > MIN_INTERVAL_MS {
        state.interval_ms = state.interval_ms.saturating_sub(SPEED_STEP_MS);
        log::info!("Speed up: tick every {} ms", state.interval_ms);
        events.push(GameEvent::SpeedChanged {
            interval_ms: state.interval_ms,
        });
    }

    events
}

/// Check whether moving the head to `new_head` ends the run.
///
/// On a non-growing move the tail cell is vacated in the same tick, so the
/// head may move into it.
pub fn check_collision(
    state: &GameState,
    new_head: Segment,
    grows: bool,
) -> Option<GameOverCause> {
    if !state.is_in_bounds(new_head) {
        return Some(GameOverCause::Wall);
    }

    let solid = if grows {
        state.snake.len()
    } else {
        state.snake.len() - 1
    };
    if state.snake.iter().take(solid).any(|s| *s == new_head) {
        return Some(GameOverCause::SelfCollision);
    }

    None
}

fn end_run(
    state: &mut GameState,
    cause: GameOverCause,
    mut events: Vec<GameEvent>,
) -> Vec<GameEvent> {
    state.phase = GamePhase::GameOver;
    log::info!("Game over ({:?}) with score {}", cause, state.score);
    events.push(GameEvent::GameOver {
        cause,
        score: state.score,
    });
    events
}
