//! Host-reported projection of the manipulated object onto the screen.
//!
//! The host pushes one tick per frame. Ticks drive where the gizmo sits, how
//! big it is and whether it is visible; they never feed back into offsets.

use crate::constants::{INITIAL_CAMERA_DISTANCE, MIN_GIZMO_SCALE, SCALE_FALLOFF_DISTANCE};
use serde::Deserialize;

/// Raw tick as sent by the host. Every field is optional so malformed ticks
/// decode and then leave the previous placement alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct ProjectionTick {
    #[serde(rename = "screenX", default)]
    pub screen_x: Option<f32>,
    #[serde(rename = "screenY", default)]
    pub screen_y: Option<f32>,
    #[serde(rename = "onScreen", default)]
    pub on_screen: Option<bool>,
    #[serde(rename = "camDist", alias = "cameraDistance", default)]
    pub cam_dist: Option<f32>,
}

/// Widget placement in viewport percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x_pct: f32,
    pub y_pct: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x_pct: 0.0,
            y_pct: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl Placement {
    /// CSS transform that centers the widget on the projected point.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}vw, {}vh) translate(-50%, -50%) scale({})",
            self.x_pct, self.y_pct, self.scale
        )
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Shrinks with distance but never below `MIN_GIZMO_SCALE`.
#[inline]
pub fn scale_for_distance(cam_dist: f32) -> f32 {
    (1.0 - cam_dist / SCALE_FALLOFF_DISTANCE).max(MIN_GIZMO_SCALE)
}

#[derive(Clone, Debug)]
pub struct ProjectionUpdater {
    placement: Placement,
    cam_dist: f32,
}

impl Default for ProjectionUpdater {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            cam_dist: INITIAL_CAMERA_DISTANCE,
        }
    }
}

impl ProjectionUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Fold one tick into the current placement and return it.
    pub fn apply(&mut self, tick: &ProjectionTick) -> Placement {
        if let Some(d) = tick.cam_dist.filter(|d| d.is_finite()) {
            self.cam_dist = d;
        }
        match tick.on_screen {
            Some(true) => {
                if let (Some(x), Some(y)) = (tick.screen_x, tick.screen_y) {
                    if x.is_finite() && y.is_finite() {
                        self.placement.x_pct = x * 100.0;
                        self.placement.y_pct = y * 100.0;
                    }
                }
                self.placement.scale = scale_for_distance(self.cam_dist);
                self.placement.opacity = 1.0;
            }
            // stays mounted, only hidden
            Some(false) => self.placement.opacity = 0.0,
            None => {}
        }
        self.placement
    }
}
