// Key mapping for the overlay. Pure so it can be tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Hide the picker and tell the host, even if it is already hidden: the
    /// game may still hold input focus for the page.
    CloseMenu,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" | "Esc" => Some(KeyAction::CloseMenu),
        _ => None,
    }
}
