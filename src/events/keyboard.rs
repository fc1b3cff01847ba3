use super::keys::{key_action, KeyAction};
use crate::menu::MenuShell;
use std::rc::Rc;
use web_sys as web;

// Escape closes the picker; the gizmo has explicit save/cancel buttons instead
pub fn wire_global_keydown(menu: Rc<MenuShell>) {
    if let Some(window) = web::window() {
        crate::dom::listen(&window, "keydown", move |ev: web::KeyboardEvent| {
            if let Some(KeyAction::CloseMenu) = key_action(&ev.key()) {
                menu.close();
                ev.prevent_default();
            }
        });
    }
}
