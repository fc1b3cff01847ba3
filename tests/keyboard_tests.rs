// Host-side tests for pure keyboard functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/events/keys.rs");
}

use keys::*;

#[test]
fn escape_closes_the_menu() {
    assert_eq!(key_action("Escape"), Some(KeyAction::CloseMenu));
    // legacy key name still reported by some embedded browsers
    assert_eq!(key_action("Esc"), Some(KeyAction::CloseMenu));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["Enter", "e", "Backspace", "escape", ""] {
        assert_eq!(key_action(key), None, "{key:?}");
    }
}
