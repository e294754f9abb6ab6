//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Tick scheduling (`setInterval` on web, manual stepping natively)
//! - Keyboard input mapping

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod timer;

pub use input::direction_for_key;
#[cfg(target_arch = "wasm32")]
pub use timer::IntervalTimer;

use std::cell::Cell;
use std::rc::Rc;

/// Repeating tick schedule owned by the game.
///
/// At most one schedule is live at a time: `arm` replaces whatever was
/// running, `stop` is safe to call any number of times.
pub trait TickSource {
    /// Fire every `interval_ms`, cancelling any previous schedule first
    fn arm(&mut self, interval_ms: u32);
    /// Cancel the schedule
    fn stop(&mut self);
    /// Interval of the live schedule, if any
    fn interval(&self) -> Option<u32>;
}

/// Tick source that never fires on its own; the owner calls `Game::tick`.
///
/// Clones share state so a handle kept outside the game sees every re-arm.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    interval: Rc<Cell<Option<u32>>>,
    arms: Rc<Cell<u32>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the schedule has been (re)armed
    pub fn arm_count(&self) -> u32 {
        self.arms.get()
    }
}

impl TickSource for ManualTicker {
    fn arm(&mut self, interval_ms: u32) {
        self.interval.set(Some(interval_ms));
        self.arms.set(self.arms.get() + 1);
    }

    fn stop(&mut self) {
        self.interval.set(None);
    }

    fn interval(&self) -> Option<u32> {
        self.interval.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_ticker_rearm_and_stop() {
        let handle = ManualTicker::new();
        let mut ticker = handle.clone();

        ticker.arm(100);
        ticker.arm(95);
        assert_eq!(handle.interval(), Some(95));
        assert_eq!(handle.arm_count(), 2);

        ticker.stop();
        ticker.stop();
        assert_eq!(handle.interval(), None);
    }
}
