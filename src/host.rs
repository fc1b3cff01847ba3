//! NUI bridge: inbound `message` events and outbound `fetch` commands.

use crate::constants::DEFAULT_RESOURCE_NAME;
use crate::dom;
use overlay_core::{parse_response, HostBridge, HostCommand, HostEvent};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = GetParentResourceName)]
    fn get_parent_resource_name() -> Result<String, JsValue>;
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

#[derive(Clone, Debug)]
pub struct NuiBridge {
    resource: String,
}

impl NuiBridge {
    pub fn new() -> Self {
        let resource = get_parent_resource_name().unwrap_or_else(|_| {
            log::warn!("[host] GetParentResourceName unavailable, using {}", DEFAULT_RESOURCE_NAME);
            DEFAULT_RESOURCE_NAME.to_string()
        });
        Self { resource }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("https://{}/{}", self.resource, action)
    }

    /// Send `command` and decode the reply. Empty replies decode to `{}`.
    pub async fn request(&self, command: &HostCommand) -> anyhow::Result<Value> {
        post(self.endpoint(command.action()), command.payload().to_string()).await
    }
}

async fn post(url: String, body: String) -> anyhow::Result<Value> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));
    let request = web::Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json; charset=UTF-8")
        .map_err(js_err)?;
    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(parse_response(&text.as_string().unwrap_or_default())?)
}

impl HostBridge for NuiBridge {
    fn send(&self, command: HostCommand) {
        let action = command.action();
        let url = self.endpoint(action);
        let body = command.payload().to_string();
        spawn_local(async move {
            if let Err(e) = post(url, body).await {
                log::warn!("[host] {} failed: {:?}", action, e);
            }
        });
    }
}

/// Route every window `message` carrying a known action to `handler`.
pub fn wire_message_listener(mut handler: impl FnMut(HostEvent) + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(&window, "message", move |ev: web::MessageEvent| {
        let raw = match js_sys::JSON::stringify(&ev.data()) {
            Ok(s) => String::from(s),
            Err(_) => return,
        };
        match HostEvent::parse(&raw) {
            Ok(HostEvent::Unknown) => {}
            Ok(event) => handler(event),
            Err(e) => log::debug!("[host] ignoring message: {}", e),
        }
    });
}
