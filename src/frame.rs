//! Browser scheduling handles: `requestAnimationFrame` and `setTimeout`.
//!
//! Each handle owns one persistent callback created up front, so re-arming or
//! cancelling never drops a closure while it may be running.

use instant::Duration;
use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Animation-frame task. `request` schedules the callback for the next frame
/// (at most one outstanding request), `cancel` revokes it synchronously.
pub struct FrameLoop {
    callback: Closure<dyn FnMut()>,
    pending: Cell<Option<i32>>,
}

impl FrameLoop {
    pub fn new(tick: impl FnMut() + 'static) -> Self {
        Self {
            callback: Closure::wrap(Box::new(tick) as Box<dyn FnMut()>),
            pending: Cell::new(None),
        }
    }

    pub fn request(&self) {
        if self.pending.get().is_some() {
            return;
        }
        if let Some(w) = web::window() {
            match w.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
                Ok(id) => self.pending.set(Some(id)),
                Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    /// Call first thing in the tick so a follow-up request can be made.
    pub fn fired(&self) {
        self.pending.set(None);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One-shot timer whose deadline can be pushed back. Arming while armed
/// replaces the previous deadline.
pub struct Timer {
    callback: Closure<dyn FnMut()>,
    pending: Cell<Option<i32>>,
}

impl Timer {
    pub fn new(on_fire: impl FnMut() + 'static) -> Self {
        Self {
            callback: Closure::wrap(Box::new(on_fire) as Box<dyn FnMut()>),
            pending: Cell::new(None),
        }
    }

    pub fn arm(&self, delay: Duration) {
        self.cancel();
        let Some(w) = web::window() else {
            return;
        };
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            ms,
        ) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::error!("[frame] setTimeout failed: {:?}", e),
        }
    }

    pub fn fired(&self) {
        self.pending.set(None);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}
