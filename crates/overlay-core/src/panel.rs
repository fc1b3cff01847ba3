//! Compact-mode panel dragging by its header.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Panel translation in CSS pixels, persisted as `{x, y}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelPosition {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for PanelPosition {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<PanelPosition> for Vec2 {
    fn from(p: PanelPosition) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct PanelGrab {
    pointer_start: Vec2,
    element_start: Vec2,
}

#[derive(Clone, Debug, Default)]
pub struct PanelDrag {
    grab: Option<PanelGrab>,
}

impl PanelDrag {
    /// Start dragging when the press landed on the header.
    pub fn press(&mut self, on_header: bool, pointer: Vec2, current: PanelPosition) -> bool {
        if !on_header {
            return false;
        }
        self.grab = Some(PanelGrab {
            pointer_start: pointer,
            element_start: current.into(),
        });
        true
    }

    pub fn moved(&self, pointer: Vec2) -> Option<PanelPosition> {
        self.grab
            .map(|g| (g.element_start + (pointer - g.pointer_start)).into())
    }

    pub fn release(&mut self) -> bool {
        self.grab.take().is_some()
    }
}
