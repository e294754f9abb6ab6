//! `setInterval`-backed tick source

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::TickSource;
use crate::game::Game;

/// Drives `Game::tick` from a browser interval.
///
/// Holds only a weak reference to the game, which owns this timer.
pub struct IntervalTimer {
    callback: Closure<dyn FnMut()>,
    handle: Option<i32>,
    interval_ms: Option<u32>,
}

impl IntervalTimer {
    pub fn new(game: Weak<RefCell<Game>>) -> Self {
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().tick();
            }
        });
        Self {
            callback,
            handle: None,
            interval_ms: None,
        }
    }
}

impl TickSource for IntervalTimer {
    fn arm(&mut self, interval_ms: u32) {
        self.stop();

        let Some(window) = web_sys::window() else {
            log::error!("No window - cannot schedule ticks");
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.interval_ms = Some(interval_ms);
                log::debug!("Tick interval armed at {} ms", interval_ms);
            }
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
        self.interval_ms = None;
    }

    fn interval(&self) -> Option<u32> {
        self.interval_ms
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
