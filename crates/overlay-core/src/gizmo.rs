//! Positioning gizmo lifecycle: the hidden/active state machine that owns the
//! offset store, the drag controller, the smoothing loop, the host sync
//! debouncer and the projection updater.
//!
//! The controller never touches the DOM or a clock. The front-end feeds it
//! pointer events, animation frames, timer expiries and host messages, and
//! uses the returned [`Transition`] to attach or detach its global listeners
//! exactly once per activation.

use crate::constants::{PRIMARY_BUTTON, SECONDARY_BUTTON, SMOOTHING_FACTOR, SYNC_QUIET_WINDOW_MS};
use crate::debounce::Debouncer;
use crate::drag::{Axis, DragController, DragParams};
use crate::host::{HostBridge, HostCommand};
use crate::offset::{Offset, OffsetStore};
use crate::projection::{Placement, ProjectionTick, ProjectionUpdater};
use crate::smoothing::SmoothingLoop;
use glam::Vec2;
use instant::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct GizmoParams {
    pub drag: DragParams,
    pub smoothing_factor: f32,
    pub sync_window: Duration,
}

impl Default for GizmoParams {
    fn default() -> Self {
        Self {
            drag: DragParams::default(),
            smoothing_factor: SMOOTHING_FACTOR,
            sync_window: Duration::from_millis(SYNC_QUIET_WINDOW_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GizmoState {
    Hidden,
    Active,
}

/// Outcome of a lifecycle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Activated,
    Deactivated,
    Unchanged,
}

/// Why the gizmo closed; decides which command, if any, goes to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    HostHidden,
    Saved,
    Cancelled,
}

pub struct GizmoController {
    state: GizmoState,
    store: OffsetStore,
    drag: DragController,
    smoothing: SmoothingLoop,
    sync: Debouncer<Offset>,
    projection: ProjectionUpdater,
    camera_control: bool,
    epoch: u64,
}

impl Default for GizmoController {
    fn default() -> Self {
        Self::new(GizmoParams::default())
    }
}

impl GizmoController {
    pub fn new(params: GizmoParams) -> Self {
        Self {
            state: GizmoState::Hidden,
            store: OffsetStore::new(),
            drag: DragController::new(params.drag),
            smoothing: SmoothingLoop::new(params.smoothing_factor),
            sync: Debouncer::new(params.sync_window),
            projection: ProjectionUpdater::new(),
            camera_control: false,
            epoch: 0,
        }
    }

    pub fn state(&self) -> GizmoState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GizmoState::Active
    }

    pub fn target(&self) -> Offset {
        self.store.target()
    }

    pub fn visual(&self) -> Offset {
        self.store.visual()
    }

    pub fn active_axis(&self) -> Option<Axis> {
        self.drag.active_axis()
    }

    pub fn handle_color(&self, axis: Axis) -> &'static str {
        self.drag.handle_color(axis)
    }

    pub fn camera_control(&self) -> bool {
        self.camera_control
    }

    pub fn placement(&self) -> Placement {
        self.projection.placement()
    }

    pub fn is_animating(&self) -> bool {
        self.smoothing.is_running()
    }

    /// Activation counter. Work started under an older epoch is stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Deadline of the pending host sync, for arming the platform timer.
    pub fn sync_deadline(&self) -> Option<Instant> {
        self.sync.deadline()
    }

    // ---------------- Lifecycle ----------------

    /// Host `showGizmo` signal.
    pub fn show(&mut self, status: bool, now: Instant, host: &dyn HostBridge) -> Transition {
        match (status, self.state) {
            (true, GizmoState::Hidden) => {
                self.activate(now);
                Transition::Activated
            }
            (false, GizmoState::Active) => {
                self.deactivate(CloseReason::HostHidden, host);
                Transition::Deactivated
            }
            _ => Transition::Unchanged,
        }
    }

    /// Commit the current target and close.
    pub fn save(&mut self, host: &dyn HostBridge) -> Transition {
        self.close(CloseReason::Saved, host)
    }

    /// Discard the change and close.
    pub fn cancel(&mut self, host: &dyn HostBridge) -> Transition {
        self.close(CloseReason::Cancelled, host)
    }

    fn close(&mut self, reason: CloseReason, host: &dyn HostBridge) -> Transition {
        if !self.is_active() {
            return Transition::Unchanged;
        }
        self.deactivate(reason, host);
        Transition::Deactivated
    }

    fn activate(&mut self, now: Instant) {
        self.epoch += 1;
        self.state = GizmoState::Active;
        self.store.reset();
        self.drag.clear();
        self.camera_control = false;
        self.smoothing.start();
        // the reset itself is a target change and reaches the host
        self.sync.push(self.store.target(), now);
        log::info!("[gizmo] activated (epoch {})", self.epoch);
    }

    fn deactivate(&mut self, reason: CloseReason, host: &dyn HostBridge) {
        self.drag.clear();
        self.smoothing.stop();
        self.sync.cancel();
        if self.camera_control {
            self.camera_control = false;
            host.send(HostCommand::SetCameraControl { status: false });
        }
        match reason {
            CloseReason::Saved => host.send(HostCommand::SavePositioning),
            CloseReason::Cancelled => host.send(HostCommand::CancelPositioning),
            CloseReason::HostHidden => {}
        }
        self.state = GizmoState::Hidden;
        log::info!("[gizmo] deactivated ({:?}), target {:?}", reason, self.store.target());
    }

    // ---------------- Pointer input ----------------

    /// Press on a handle. Only the primary button drags.
    pub fn handle_down(&mut self, axis: Axis, button: i16, pointer: Vec2, center: Vec2) -> bool {
        if !self.is_active() || button != PRIMARY_BUTTON {
            return false;
        }
        let current = self.store.target();
        self.drag.begin(axis, pointer, center, current)
    }

    /// Window-level press; the secondary button requests camera control.
    pub fn pointer_down(&mut self, button: i16, host: &dyn HostBridge) {
        if self.is_active() && button == SECONDARY_BUTTON {
            self.camera_control = true;
            host.send(HostCommand::SetCameraControl { status: true });
        }
    }

    /// Window-level move. Returns the new target when a drag moved it.
    pub fn pointer_move(&mut self, pointer: Vec2, center: Vec2, now: Instant) -> Option<Offset> {
        if !self.is_active() {
            return None;
        }
        let next = self.drag.update(pointer, center)?;
        if self.store.set_target(next) {
            self.sync.push(next, now);
        }
        Some(next)
    }

    /// Window-level release. Any button ends the drag session.
    pub fn pointer_up(&mut self, button: i16, host: &dyn HostBridge) -> Option<Axis> {
        if !self.is_active() {
            return None;
        }
        if button == SECONDARY_BUTTON {
            self.camera_control = false;
            host.send(HostCommand::SetCameraControl { status: false });
        }
        self.drag.end()
    }

    pub fn hover_enter(&mut self, axis: Axis) {
        self.drag.hover_enter(axis);
    }

    pub fn hover_leave(&mut self) {
        self.drag.hover_leave();
    }

    // ---------------- Scheduled work ----------------

    /// Animation frame. Returns the visual offset and whether to request
    /// another frame.
    pub fn frame(&mut self) -> (Offset, bool) {
        self.smoothing.tick(&mut self.store)
    }

    /// Debounce timer expiry: forward the newest target if it is due.
    pub fn flush_sync(&mut self, now: Instant, host: &dyn HostBridge) -> Option<Offset> {
        if !self.is_active() {
            return None;
        }
        let offset = self.sync.poll(now)?;
        host.send(HostCommand::UpdatePedPosition(offset));
        Some(offset)
    }

    /// Host projection tick.
    pub fn apply_projection(&mut self, tick: &ProjectionTick) -> Placement {
        self.projection.apply(tick)
    }

    /// True when a host response issued under `epoch` may still be applied.
    pub fn accepts(&self, epoch: u64) -> bool {
        self.is_active() && epoch == self.epoch
    }
}

/// Read-out strings for the control panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    pub x: String,
    pub y: String,
    pub z: String,
    pub rotation: String,
}

impl Readout {
    pub fn of(visual: Offset) -> Self {
        Self {
            x: format!("X: {:.2}", visual.x),
            y: format!("Y: {:.2}", visual.y),
            z: format!("Z: {:.2}", visual.z),
            rotation: format!("{:.0}°", visual.rot_z),
        }
    }
}
