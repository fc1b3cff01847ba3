//! Per-frame exponential smoothing of the visual offset.
//!
//! The loop is an explicit task with a visibility-gated start/stop contract.
//! The front-end schedules one animation frame per `tick` that returns `true`
//! and cancels its pending frame request synchronously on `stop`.

use crate::constants::SMOOTHING_FACTOR;
use crate::offset::{Offset, OffsetStore};

#[derive(Clone, Debug)]
pub struct SmoothingLoop {
    factor: f32,
    running: bool,
    ticks: u64,
}

impl Default for SmoothingLoop {
    fn default() -> Self {
        Self::new(SMOOTHING_FACTOR)
    }
}

impl SmoothingLoop {
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            running: false,
            ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames stepped since the last `start`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns true if the loop was idle and a first frame should be requested.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.ticks = 0;
        true
    }

    /// Returns true if a pending frame request must be cancelled.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Step the visual offset once. Returns the new visual offset and whether
    /// another frame should be scheduled; a stopped loop leaves the store
    /// untouched.
    pub fn tick(&mut self, store: &mut OffsetStore) -> (Offset, bool) {
        if !self.running {
            return (store.visual(), false);
        }
        self.ticks += 1;
        (store.step_visual(self.factor), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_loop_does_not_move_visual() {
        let mut store = OffsetStore::new();
        store.set_target(Offset::new(1.0, 0.0, 0.0, 0.0));
        let mut sm = SmoothingLoop::default();
        let (visual, again) = sm.tick(&mut store);
        assert_eq!(visual, Offset::ZERO);
        assert!(!again);
    }

    #[test]
    fn start_stop_are_idempotent() {
        let mut sm = SmoothingLoop::default();
        assert!(sm.start());
        assert!(!sm.start());
        assert!(sm.stop());
        assert!(!sm.stop());
    }
}
