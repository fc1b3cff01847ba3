//! User preferences persisted in a flat string key-value store.

use crate::constants::*;
use crate::debounce::Debouncer;
use crate::error::{OverlayError, Result};
use crate::favorites::Favorites;
use crate::panel::PanelPosition;
use fnv::FnvHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use instant::{Duration, Instant};
use std::cell::RefCell;

/// Backing store, e.g. the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and environments without storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<FnvHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Read `key` as JSON, falling back to `default` when missing or corrupt.
pub fn load_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[prefs] ignoring corrupt value for {}: {}", key, e);
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            log::warn!("[prefs] read failed for {}: {}", key, e);
            default
        }
    }
}

pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(OverlayError::from)?;
    store.set(key, &raw)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Preferences {
    pub favorites: Favorites,
    pub compact: bool,
    pub compact_position: PanelPosition,
    pub scroll_positions: FnvHashMap<String, f64>,
}

impl Preferences {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let favorites: Vec<String> = load_or(store, FAVORITES_KEY, Vec::new());
        Self {
            favorites: Favorites::new(favorites),
            compact: load_or(store, COMPACT_STATE_KEY, false),
            compact_position: load_or(store, COMPACT_POSITION_KEY, PanelPosition::default()),
            scroll_positions: load_or(store, SCROLL_POSITIONS_KEY, FnvHashMap::default()),
        }
    }

    pub fn save_favorites(&self, store: &dyn KeyValueStore) -> Result<()> {
        save(store, FAVORITES_KEY, &self.favorites.names())
    }

    pub fn save_compact(&self, store: &dyn KeyValueStore) -> Result<()> {
        save(store, COMPACT_STATE_KEY, &self.compact)?;
        save(store, COMPACT_POSITION_KEY, &self.compact_position)
    }

    pub fn save_scroll_positions(&self, store: &dyn KeyValueStore) -> Result<()> {
        save(store, SCROLL_POSITIONS_KEY, &self.scroll_positions)
    }

    /// Back to defaults; stored keys are dropped.
    pub fn reset(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        *self = Self::default();
        log::info!("[prefs] reset to defaults");
        for key in [
            FAVORITES_KEY,
            COMPACT_STATE_KEY,
            COMPACT_POSITION_KEY,
            SCROLL_POSITIONS_KEY,
        ] {
            store.remove(key)?;
        }
        Ok(())
    }

    pub fn scroll_for(&self, category: &str) -> f64 {
        self.scroll_positions.get(category).copied().unwrap_or(0.0)
    }
}

/// Debounced scroll memory. The category is captured at scroll time, so a
/// category switch inside the quiet window cannot misfile the offset.
#[derive(Clone, Debug)]
pub struct ScrollSaver {
    pending: Debouncer<(String, f64)>,
}

impl Default for ScrollSaver {
    fn default() -> Self {
        Self::new(Duration::from_millis(SCROLL_SAVE_DEBOUNCE_MS))
    }
}

impl ScrollSaver {
    pub fn new(window: Duration) -> Self {
        Self {
            pending: Debouncer::new(window),
        }
    }

    /// Record a scroll of `category` and return the delay until it is due.
    pub fn scrolled(&mut self, category: &str, top: f64, now: Instant) -> Duration {
        self.pending.push((category.to_string(), top), now);
        self.pending.remaining(now).unwrap_or_default()
    }

    /// Move a due offset into `prefs`. True when `prefs` changed.
    pub fn poll(&mut self, now: Instant, prefs: &mut Preferences) -> bool {
        match self.pending.poll(now) {
            Some((category, top)) => record(prefs, category, top),
            None => false,
        }
    }

    /// Move the pending offset into `prefs` immediately.
    pub fn flush(&mut self, prefs: &mut Preferences) -> bool {
        match self.pending.take() {
            Some((category, top)) => record(prefs, category, top),
            None => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.remaining(now)
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}

fn record(prefs: &mut Preferences, category: String, top: f64) -> bool {
    prefs.scroll_positions.insert(category, top) != Some(top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_store() {
        let store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs.favorites.toggle("wave");
        prefs.compact = true;
        prefs.compact_position = PanelPosition { x: 12.0, y: -4.0 };
        prefs.scroll_positions.insert("Dances".into(), 480.0);
        prefs.save_favorites(&store).unwrap();
        prefs.save_compact(&store).unwrap();
        prefs.save_scroll_positions(&store).unwrap();

        let loaded = Preferences::load(&store);
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.scroll_for("Dances"), 480.0);
        assert_eq!(loaded.scroll_for("Walks"), 0.0);
    }

    #[test]
    fn corrupt_values_fall_back() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json").unwrap();
        store.set(COMPACT_STATE_KEY, "\"yes\"").unwrap();
        let prefs = Preferences::load(&store);
        assert!(prefs.favorites.is_empty());
        assert!(!prefs.compact);
    }

    #[test]
    fn reset_clears_store() {
        let store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs.favorites.toggle("wave");
        prefs.save_favorites(&store).unwrap();
        prefs.reset(&store).unwrap();
        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
        assert_eq!(Preferences::load(&store), Preferences::default());
    }
}
