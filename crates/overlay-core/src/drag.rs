//! Drag sessions: pointer gestures on a gizmo handle mapped to target offsets.

use crate::constants::*;
use crate::error::OverlayError;
use crate::math::{clamp, pointer_angle_deg};
use crate::offset::Offset;
use glam::Vec2;
use std::fmt;
use std::str::FromStr;

/// One of the four draggable regions of the gizmo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    RotZ,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::RotZ];

    /// Name used in DOM data attributes and on the host wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::RotZ => "rotZ",
        }
    }

    pub fn base_color(&self) -> &'static str {
        match self {
            Axis::X => COLOR_X,
            Axis::Y => COLOR_Y,
            Axis::Z => COLOR_Z,
            Axis::RotZ => COLOR_ROT_Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            "rotZ" => Ok(Axis::RotZ),
            other => Err(OverlayError::UnknownHandle(other.to_string())),
        }
    }
}

/// Pointer-to-offset mapping tunables.
#[derive(Clone, Copy, Debug)]
pub struct DragParams {
    pub max_delta_px: f32,
    pub sensitivity: f32,
}

impl Default for DragParams {
    fn default() -> Self {
        Self {
            max_delta_px: MAX_DRAG_DELTA_PX,
            sensitivity: POSITION_SENSITIVITY,
        }
    }
}

/// State captured on pointer-down over a handle. Lives until pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub axis: Axis,
    pub pointer_start: Vec2,
    pub angle_start: f32,
    pub offsets_at_start: Offset,
}

impl DragSession {
    /// Candidate target for the current pointer position. `center` is the
    /// gizmo's screen-space center, only consulted for rotation.
    pub fn offset_for(&self, pointer: Vec2, center: Vec2, params: &DragParams) -> Offset {
        let initial = self.offsets_at_start;
        let mut next = initial;
        match self.axis {
            Axis::RotZ => {
                let delta_angle = pointer_angle_deg(center, pointer) - self.angle_start;
                next.rot_z = initial.rot_z + delta_angle;
            }
            axis => {
                // clamp raw screen delta first, then scale
                let max = params.max_delta_px;
                let dx = clamp(pointer.x - self.pointer_start.x, -max, max);
                let dy = clamp(pointer.y - self.pointer_start.y, -max, max);
                match axis {
                    Axis::X => next.x = initial.x + dx * params.sensitivity,
                    Axis::Y => next.y = initial.y + dy * params.sensitivity,
                    Axis::Z => next.z = initial.z - dy * params.sensitivity,
                    Axis::RotZ => {}
                }
            }
        }
        next.clamped()
    }
}

/// Owns the (at most one) live drag session plus hover highlight state.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    hovered: Option<Axis>,
    params: DragParams,
}

impl DragController {
    pub fn new(params: DragParams) -> Self {
        Self {
            session: None,
            hovered: None,
            params,
        }
    }

    pub fn active_axis(&self) -> Option<Axis> {
        self.session.map(|s| s.axis)
    }

    /// Start a session on `axis`. Ignored while another session is live.
    pub fn begin(&mut self, axis: Axis, pointer: Vec2, center: Vec2, current: Offset) -> bool {
        if let Some(live) = &self.session {
            log::debug!("[gizmo] ignoring {} press, {} drag still live", axis, live.axis);
            return false;
        }
        let angle_start = match axis {
            Axis::RotZ => pointer_angle_deg(center, pointer),
            _ => 0.0,
        };
        self.session = Some(DragSession {
            axis,
            pointer_start: pointer,
            angle_start,
            offsets_at_start: current,
        });
        log::debug!("[gizmo] begin drag on {}", axis);
        true
    }

    /// New target for a pointer move, or `None` when no session is live.
    pub fn update(&self, pointer: Vec2, center: Vec2) -> Option<Offset> {
        self.session
            .as_ref()
            .map(|s| s.offset_for(pointer, center, &self.params))
    }

    /// Drop the session unconditionally. Returns the axis that was active.
    pub fn end(&mut self) -> Option<Axis> {
        let ended = self.session.take().map(|s| s.axis);
        if let Some(axis) = ended {
            log::debug!("[gizmo] end drag on {}", axis);
        }
        ended
    }

    pub fn hover_enter(&mut self, axis: Axis) {
        self.hovered = Some(axis);
    }

    pub fn hover_leave(&mut self) {
        self.hovered = None;
    }

    pub fn is_highlighted(&self, axis: Axis) -> bool {
        self.active_axis() == Some(axis) || self.hovered == Some(axis)
    }

    pub fn handle_color(&self, axis: Axis) -> &'static str {
        if self.is_highlighted(axis) {
            COLOR_HIGHLIGHT
        } else {
            axis.base_color()
        }
    }

    /// Forget session and hover; used on deactivation.
    pub fn clear(&mut self) {
        self.session = None;
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn axis_names_parse() {
        for axis in Axis::ALL {
            assert_eq!(axis.as_str().parse::<Axis>().unwrap(), axis);
        }
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn x_drag_scales_by_sensitivity() {
        let mut drag = DragController::default();
        assert!(drag.begin(Axis::X, v(10.0, 10.0), v(0.0, 0.0), Offset::ZERO));
        let o = drag.update(v(110.0, 60.0), v(0.0, 0.0)).unwrap();
        assert!((o.x - 0.5).abs() < 1e-6);
        assert_eq!(o.y, 0.0);
    }

    #[test]
    fn delta_is_clamped_before_scaling() {
        let mut drag = DragController::default();
        drag.begin(Axis::Y, v(0.0, 0.0), v(0.0, 0.0), Offset::ZERO);
        let o = drag.update(v(0.0, 1000.0), v(0.0, 0.0)).unwrap();
        assert!((o.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn z_follows_negated_vertical_delta() {
        let mut drag = DragController::default();
        drag.begin(Axis::Z, v(0.0, 100.0), v(0.0, 0.0), Offset::ZERO);
        let up = drag.update(v(0.0, 0.0), v(0.0, 0.0)).unwrap();
        assert!((up.z - 0.5).abs() < 1e-6);
        let down = drag.update(v(0.0, 200.0), v(0.0, 0.0)).unwrap();
        assert_eq!(down.z, 0.0);
    }

    #[test]
    fn highlight_covers_drag_and_hover() {
        let mut drag = DragController::default();
        drag.hover_enter(Axis::Y);
        drag.begin(Axis::X, v(0.0, 0.0), v(0.0, 0.0), Offset::ZERO);
        assert_eq!(drag.handle_color(Axis::X), COLOR_HIGHLIGHT);
        assert_eq!(drag.handle_color(Axis::Y), COLOR_HIGHLIGHT);
        assert_eq!(drag.handle_color(Axis::Z), COLOR_Z);
        drag.clear();
        assert_eq!(drag.handle_color(Axis::X), COLOR_X);
    }
}
