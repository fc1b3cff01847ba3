#![cfg(target_arch = "wasm32")]
use overlay_core::{HostEvent, Strings};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod gizmo;
mod host;
mod menu;
mod overlay;
mod storage;

use gizmo::GizmoShell;
use host::NuiBridge;
use menu::MenuShell;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("emote-overlay starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let host = Rc::new(NuiBridge::new());
    let gizmo = GizmoShell::new(&document, host.clone())?;
    let menu = MenuShell::new(&document, host)?;

    events::wire_global_keydown(menu.clone());
    host::wire_message_listener(move |event| dispatch(&menu, &gizmo, event));

    log::info!("[host] listening for messages");
    Ok(())
}

fn dispatch(menu: &Rc<MenuShell>, gizmo: &Rc<GizmoShell>, event: HostEvent) {
    match event {
        HostEvent::SetVisible { status, locale } => {
            if let Some(code) = locale.as_deref() {
                let strings = Strings::for_locale(code);
                menu.set_locale(strings);
                gizmo.set_locale(strings);
            }
            menu.set_visible(status);
        }
        HostEvent::LoadEmotes { all, categories } => menu.load_emotes(all, categories),
        HostEvent::ResetSettings => menu.reset_settings(),
        HostEvent::ShowGizmo { status } => gizmo.show(status),
        HostEvent::GizmoProjection(tick) => gizmo.projection(&tick),
        HostEvent::Unknown => {}
    }
}
