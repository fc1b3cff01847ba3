//! Offset values and the store that owns the target/visual pair.

use crate::constants::{MAX_OFFSET, MIN_HEIGHT};
use crate::math::{clamp, lerp};
use serde::{Deserialize, Serialize};

/// Position and yaw delta applied to the host-controlled object.
///
/// `x`/`y` are lateral/forward units, `z` is height, `rot_z` is cumulative yaw
/// in degrees and is never wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(rename = "rotZ")]
    pub rot_z: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        rot_z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32, rot_z: f32) -> Self {
        Self { x, y, z, rot_z }
    }

    /// Clamp translation into the allowed box. Rotation is left alone.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp(self.x, -MAX_OFFSET, MAX_OFFSET),
            y: clamp(self.y, -MAX_OFFSET, MAX_OFFSET),
            z: clamp(self.z, MIN_HEIGHT, MAX_OFFSET),
            rot_z: self.rot_z,
        }
    }

    /// Component-wise step toward `target` by `amt`.
    pub fn lerp_toward(self, target: Offset, amt: f32) -> Self {
        Self {
            x: lerp(self.x, target.x, amt),
            y: lerp(self.y, target.y, amt),
            z: lerp(self.z, target.z, amt),
            rot_z: lerp(self.rot_z, target.rot_z, amt),
        }
    }

    pub fn is_within_limits(&self) -> bool {
        (-MAX_OFFSET..=MAX_OFFSET).contains(&self.x)
            && (-MAX_OFFSET..=MAX_OFFSET).contains(&self.y)
            && (MIN_HEIGHT..=MAX_OFFSET).contains(&self.z)
    }
}

/// Sole owner of the authoritative target offset and the smoothed visual one.
///
/// Writes replace the whole `Offset` value, so readers never observe a
/// partially updated axis.
#[derive(Clone, Debug, Default)]
pub struct OffsetStore {
    target: Offset,
    visual: Offset,
    revision: u64,
}

impl OffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Offset {
        self.target
    }

    pub fn visual(&self) -> Offset {
        self.visual
    }

    /// Bumped on every target write; lets observers detect changes cheaply.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the target. Returns true when the value actually changed.
    pub fn set_target(&mut self, offset: Offset) -> bool {
        if offset == self.target {
            return false;
        }
        self.target = offset;
        self.revision += 1;
        true
    }

    /// Zero both offsets.
    pub fn reset(&mut self) {
        self.target = Offset::ZERO;
        self.visual = Offset::ZERO;
        self.revision += 1;
    }

    /// Advance the visual offset one smoothing step toward the target.
    pub fn step_visual(&mut self, factor: f32) -> Offset {
        self.visual = self.visual.lerp_toward(self.target, factor);
        self.visual
    }
}
