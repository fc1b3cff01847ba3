//! Small numeric helpers used by the drag mapping and the smoothing loop.

use glam::Vec2;

/// Linear interpolation from `start` toward `end` by `amt`.
#[inline]
pub fn lerp(start: f32, end: f32, amt: f32) -> f32 {
    (1.0 - amt) * start + amt * end
}

/// Clamp `val` into `[min, max]`. Unlike `f32::clamp` this never panics when
/// the bounds are inverted; `min` wins.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(val))
}

/// Angle of `pointer` around `center` in degrees, screen coordinates (y down).
#[inline]
pub fn pointer_angle_deg(center: Vec2, pointer: Vec2) -> f32 {
    let d = pointer - center;
    d.y.atan2(d.x).to_degrees()
}
