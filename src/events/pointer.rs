//! Scoped window mouse listeners. Attached on construction, detached on drop,
//! so a listener set lives exactly as long as the state that needs it.

use crate::gizmo::GizmoShell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct WindowListener {
    event: &'static str,
    closure: Closure<dyn FnMut(web::MouseEvent)>,
}

impl WindowListener {
    pub fn attach(event: &'static str, handler: impl FnMut(web::MouseEvent) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::MouseEvent)>);
        if let Some(w) = web::window() {
            _ = w.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
        Self { event, closure }
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            _ = w.remove_event_listener_with_callback(
                self.event,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// The down/move/up trio.
pub struct PointerListeners {
    _down: WindowListener,
    _move: WindowListener,
    _up: WindowListener,
}

impl PointerListeners {
    pub fn attach(
        on_down: impl FnMut(web::MouseEvent) + 'static,
        on_move: impl FnMut(web::MouseEvent) + 'static,
        on_up: impl FnMut(web::MouseEvent) + 'static,
    ) -> Self {
        Self {
            _down: WindowListener::attach("mousedown", on_down),
            _move: WindowListener::attach("mousemove", on_move),
            _up: WindowListener::attach("mouseup", on_up),
        }
    }

    /// Listeners routed to the gizmo while it is active.
    pub fn for_gizmo(shell: Weak<GizmoShell>) -> Self {
        let down = shell.clone();
        let moved = shell.clone();
        let up = shell;
        Self::attach(
            move |ev| {
                if let Some(s) = down.upgrade() {
                    s.on_window_down(&ev);
                }
            },
            move |ev| {
                if let Some(s) = moved.upgrade() {
                    s.on_window_move(&ev);
                }
            },
            move |ev| {
                if let Some(s) = up.upgrade() {
                    s.on_window_up(&ev);
                }
            },
        )
    }
}

#[inline]
pub fn client_pos(ev: &web::MouseEvent) -> glam::Vec2 {
    glam::Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
