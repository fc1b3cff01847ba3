use overlay_core::{KeyValueStore, OverlayError, Result};
use web_sys as web;

/// `window.localStorage` as a flat key-value store.
pub struct LocalStore {
    storage: web::Storage,
}

impl LocalStore {
    pub fn open() -> Option<Self> {
        let storage = web::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

fn storage_err(e: wasm_bindgen::JsValue) -> OverlayError {
    OverlayError::Storage(format!("{:?}", e))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_err)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_err)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_err)
    }
}
