//! Rendering module
//!
//! The game hands a `Frame` snapshot to a `RenderSink` after every state
//! change. The browser build draws to a 2D canvas; native builds log an
//! ASCII picture of the board.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use std::collections::VecDeque;

use crate::sim::{GamePhase, GameState, Segment};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Body segments, head first
    pub snake: &'a VecDeque<Segment>,
    /// None once the snake covers the whole board
    pub food: Option<Segment>,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    pub cell_size: i32,
    pub width_px: i32,
    pub height_px: i32,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a GameState, high_score: u64) -> Self {
        Self {
            snake: &state.snake,
            food: (!state.is_occupied_by_snake(state.food)).then_some(state.food),
            score: state.score,
            high_score,
            phase: state.phase,
            cell_size: state.config.cell_size,
            width_px: state.config.width_px(),
            height_px: state.config.height_px(),
        }
    }
}

/// Consumer of frames
pub trait RenderSink {
    /// Draw the board
    fn draw(&mut self, frame: &Frame<'_>);
    /// Draw the board with the game-over overlay and final score
    fn draw_game_over(&mut self, frame: &Frame<'_>);
}

/// Render the board as text: `@` head, `o` body, `*` food, `.` empty
pub fn ascii(frame: &Frame<'_>) -> String {
    let cell = frame.cell_size.max(1);
    let cols = (frame.width_px / cell).max(0) as usize;
    let rows = (frame.height_px / cell).max(0) as usize;
    let mut grid = vec![vec!['.'; cols]; rows];

    let mut put = |pos: Segment, ch: char| {
        let (x, y) = (pos.x / cell, pos.y / cell);
        if x >= 0 && y >= 0 && (x as usize) < cols && (y as usize) < rows {
            grid[y as usize][x as usize] = ch;
        }
    };
    if let Some(food) = frame.food {
        put(food, '*');
    }
    for (i, segment) in frame.snake.iter().enumerate().rev() {
        put(*segment, if i == 0 { '@' } else { 'o' });
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sink for headless runs
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        log::debug!(
            "frame {} score {} (best {})\n{}",
            self.frames,
            frame.score,
            frame.high_score,
            ascii(frame)
        );
    }

    fn draw_game_over(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        log::info!("Game Over! Score: {}\n{}", frame.score, ascii(frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_ascii_board() {
        let snake: VecDeque<Segment> =
            VecDeque::from(vec![IVec2::new(20, 0), IVec2::new(0, 0)]);
        let frame = Frame {
            snake: &snake,
            food: Some(IVec2::new(40, 20)),
            score: 0,
            high_score: 0,
            phase: GamePhase::Running,
            cell_size: 20,
            width_px: 60,
            height_px: 40,
        };
        assert_eq!(ascii(&frame), "o@.\n..*");
    }

    #[test]
    fn test_full_board_frame_has_no_food() {
        let config = crate::GameConfig {
            cell_size: 20,
            grid_width: 2,
            grid_height: 1,
            seed: None,
        };
        let mut state = GameState::new(config, 3);
        state.phase = GamePhase::Running;
        state.snake = VecDeque::from(vec![IVec2::new(0, 0)]);
        state.food = IVec2::new(20, 0);
        state.next_direction = crate::sim::Direction::Right;
        crate::sim::tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frame = Frame::capture(&state, 0);
        assert_eq!(frame.food, None);
        assert_eq!(ascii(&frame), "o@");
    }

    #[test]
    fn test_frame_shows_free_food() {
        let state = GameState::new(crate::GameConfig::default(), 1);
        let frame = Frame::capture(&state, 0);
        assert_eq!(frame.food, Some(state.food));
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let state = GameState::new(crate::GameConfig::default(), 1);
        let mut sink = LogRenderer::new();
        let frame = Frame::capture(&state, 0);
        sink.draw(&frame);
        sink.draw_game_over(&frame);
        assert_eq!(sink.frames(), 2);
    }
}
