//! Quick-emote slots and the context menu that assigns them.

use crate::constants::CONTEXT_MENU_EDGE_MARGIN;
use crate::host::HostCommand;
use glam::Vec2;
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;

/// One slot as reported by the host. Slots are numbered from 1 by position.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct KeybindSlot {
    #[serde(default)]
    pub emote: Option<String>,
}

impl KeybindSlot {
    pub fn is_occupied(&self) -> bool {
        self.emote.as_deref().is_some_and(|e| !e.is_empty())
    }
}

pub type Slots = SmallVec<[KeybindSlot; 8]>;

/// Decode a `getKeybinds` response. Anything other than a list yields no
/// slots; unreadable entries become empty slots so numbering is preserved.
pub fn slots_from_response(value: &Value) -> Slots {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
            .collect(),
        _ => Slots::new(),
    }
}

/// Menu opened over an emote, listing quick slots.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
    pub emote: String,
    pub label: String,
    pub slots: Slots,
    pub anchor: Vec2,
}

impl ContextMenu {
    pub fn new(emote: &str, label: &str, slots: Slots, anchor: Vec2) -> Self {
        Self {
            emote: emote.to_string(),
            label: label.to_string(),
            slots,
            anchor,
        }
    }

    /// 1-based slot numbers paired with their slot.
    pub fn numbered(&self) -> impl Iterator<Item = (u32, &KeybindSlot)> {
        self.slots.iter().enumerate().map(|(i, s)| (i as u32 + 1, s))
    }

    pub fn bind(&self, slot: u32) -> Option<HostCommand> {
        self.slot(slot).map(|_| HostCommand::BindEmote {
            key: slot,
            emote: self.emote.clone(),
        })
    }

    /// Only an occupied slot can be cleared.
    pub fn delete(&self, slot: u32) -> Option<HostCommand> {
        self.slot(slot)
            .filter(|s| s.is_occupied())
            .map(|_| HostCommand::DeleteEmoteBind { key: slot })
    }

    fn slot(&self, number: u32) -> Option<&KeybindSlot> {
        number
            .checked_sub(1)
            .and_then(|i| self.slots.get(i as usize))
    }
}

/// Place a menu of `size` at `click` (viewport coords) relative to its
/// parent's origin, pulled back inside the viewport and never negative.
pub fn menu_position(click: Vec2, size: Vec2, viewport: Vec2, parent_origin: Vec2) -> Vec2 {
    let mut pos = click - parent_origin;
    if pos.x + size.x > viewport.x {
        pos.x = viewport.x - size.x - CONTEXT_MENU_EDGE_MARGIN - parent_origin.x;
    }
    if pos.y + size.y > viewport.y {
        pos.y = viewport.y - size.y - CONTEXT_MENU_EDGE_MARGIN - parent_origin.y;
    }
    pos.max(Vec2::ZERO)
}
