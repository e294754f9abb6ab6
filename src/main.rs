//! Canvas Snake entry point
//!
//! On the web, wires the canvas, keyboard and buttons to the game. Natively,
//! plays a headless demo game with a simple autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use canvas_snake::consts::CELL_SIZE;
    use canvas_snake::highscores::LocalStorageStore;
    use canvas_snake::platform::IntervalTimer;
    use canvas_snake::renderer::CanvasRenderer;
    use canvas_snake::{Game, GameConfig};

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Canvas Snake starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
            .dyn_into()?;

        // A stored override sizes the canvas; otherwise the canvas sizes the grid
        let config = match GameConfig::load_override() {
            Some(config) => {
                canvas.set_width(config.width_px() as u32);
                canvas.set_height(config.height_px() as u32);
                config
            }
            None => GameConfig::from_canvas(canvas.width(), canvas.height(), CELL_SIZE),
        };
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!(
            "Board {}x{} cells, seed {}",
            config.grid_width,
            config.grid_height,
            seed
        );

        let renderer = CanvasRenderer::new(canvas)?;
        let game = Rc::new_cyclic(|weak| {
            RefCell::new(Game::new(
                config,
                seed,
                Box::new(LocalStorageStore::new()),
                Box::new(IntervalTimer::new(weak.clone())),
                Box::new(renderer),
            ))
        });

        setup_keyboard(&window, game.clone())?;
        setup_buttons(&document, game)?;

        log::info!("Canvas Snake ready");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().handle_key(&event.key()) {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("No #startBtn - game starts on first arrow key only");
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("No #restartBtn");
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_2(&JsValue::from_str("Canvas Snake failed to start:"), &e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_snake::highscores::MemoryStore;
    use canvas_snake::platform::{ManualTicker, TickSource};
    use canvas_snake::renderer::LogRenderer;
    use canvas_snake::sim::GamePhase;
    use canvas_snake::{Game, GameConfig};

    /// Upper bound on demo length
    const MAX_TICKS: u64 = 5_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Canvas Snake (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for the web version");

    let config = GameConfig::load_override().unwrap_or_default();
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let ticker = ManualTicker::new();
    let mut game = Game::new(
        config,
        seed,
        Box::new(MemoryStore::new()),
        Box::new(ticker.clone()),
        Box::new(LogRenderer::new()),
    );

    while game.state().ticks < MAX_TICKS && game.phase() != GamePhase::GameOver {
        let direction = autopilot::steer(game.state());
        game.request_direction(direction);
        game.tick();
    }

    log::info!(
        "Demo finished after {} ticks: score {}, length {}, final interval {} ms",
        game.state().ticks,
        game.state().score,
        game.state().snake.len(),
        ticker.interval().unwrap_or(game.state().interval_ms)
    );
}

/// Greedy demo driver: head for the food, never step into a wall or the body
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use canvas_snake::sim::{Direction, GameState, check_collision};

    const CANDIDATES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn steer(state: &GameState) -> Direction {
        let head = state.head();
        CANDIDATES
            .into_iter()
            .filter(|d| !state.direction.is_opposite(*d))
            .filter_map(|d| {
                let next = head + d.delta() * state.config.cell_size;
                let grows = next == state.food;
                check_collision(state, next, grows)
                    .is_none()
                    .then(|| (d, (state.food - next).abs().element_sum()))
            })
            .min_by_key(|(_, dist)| *dist)
            .map(|(d, _)| d)
            .unwrap_or(match state.direction {
                Direction::None => Direction::Right,
                current => current,
            })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use canvas_snake::GameConfig;
        use canvas_snake::sim::{GamePhase, tick};
        use glam::IVec2;

        #[test]
        fn test_steers_toward_food() {
            let mut state = GameState::new(GameConfig::default(), 7);
            state.food = IVec2::new(260, 200);
            assert_eq!(steer(&state), Direction::Right);

            state.food = IVec2::new(200, 40);
            assert_eq!(steer(&state), Direction::Up);
        }

        #[test]
        fn test_autopilot_scores() {
            let mut state = GameState::new(GameConfig::default(), 11);
            state.phase = GamePhase::Running;
            for _ in 0..500 {
                let direction = steer(&state);
                state.request_direction(direction);
                tick(&mut state);
                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
            assert!(state.score >= 50, "score {}", state.score);
        }
    }
}
