//! The game state machine
//!
//! `Game` owns the board plus its three collaborators (tick source, render
//! sink, high-score store) and applies the events each tick produces:
//!
//! ```text
//! Idle --start / first direction--> Running --collision--> GameOver
//!   ^                                                          |
//!   +------------------------- restart ------------------------+
//! ```

use crate::config::GameConfig;
use crate::highscores::{HighScore, HighScoreStore};
use crate::platform::{TickSource, direction_for_key};
use crate::renderer::{Frame, RenderSink};
use crate::sim::{Direction, GameEvent, GamePhase, GameState, tick};

pub struct Game {
    state: GameState,
    high_score: HighScore,
    ticker: Box<dyn TickSource>,
    renderer: Box<dyn RenderSink>,
}

impl Game {
    /// Build a game on a fresh Idle board and draw it
    pub fn new(
        config: GameConfig,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        ticker: Box<dyn TickSource>,
        renderer: Box<dyn RenderSink>,
    ) -> Self {
        let mut game = Self {
            state: GameState::new(config, seed),
            high_score: HighScore::load(store),
            ticker,
            renderer,
        };
        game.render();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Best score across sessions
    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Lay out a new board (Idle) and draw it
    pub fn initialize(&mut self) {
        self.state.reset();
        self.render();
    }

    /// Begin ticking. No-op while running; after a game over a new board is laid out first.
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running => return,
            GamePhase::GameOver => self.state.reset(),
            GamePhase::Idle => {}
        }
        self.state.phase = GamePhase::Running;
        self.ticker.arm(self.state.interval_ms);
        log::info!("Game started ({} ms per tick)", self.state.interval_ms);
        self.render();
    }

    /// Stop ticking and lay out a new Idle board
    pub fn restart(&mut self) {
        self.ticker.stop();
        self.state.phase = GamePhase::Idle;
        self.initialize();
        log::info!("Game restarted");
    }

    /// Queue a direction for the next tick. The first accepted direction on
    /// an Idle board starts the game. Ignored after a game over.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase == GamePhase::GameOver {
            return false;
        }
        let accepted = self.state.request_direction(direction);
        if accepted && self.state.phase == GamePhase::Idle {
            self.start();
        }
        accepted
    }

    /// Feed a `KeyboardEvent.key`; returns true if it named a direction
    pub fn handle_key(&mut self, key: &str) -> bool {
        match direction_for_key(key) {
            Some(direction) => {
                self.request_direction(direction);
                true
            }
            None => false,
        }
    }

    /// Advance one tick and apply its side effects
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            return;
        }

        for event in tick(&mut self.state) {
            match event {
                GameEvent::FoodEaten { score } => {
                    if self.high_score.submit(score) {
                        log::info!("New high score: {}", score);
                    }
                }
                GameEvent::SpeedChanged { interval_ms } => self.ticker.arm(interval_ms),
                GameEvent::GameOver { .. } => {
                    self.ticker.stop();
                    let frame = Frame::capture(&self.state, self.high_score.best());
                    self.renderer.draw_game_over(&frame);
                    return;
                }
            }
        }

        self.render();
    }

    fn render(&mut self) {
        let frame = Frame::capture(&self.state, self.high_score.best());
        self.renderer.draw(&frame);
    }
}
