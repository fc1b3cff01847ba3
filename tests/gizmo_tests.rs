// Host-side tests for the positioning gizmo controller.
// The web front-end is wasm-only, so these drive `overlay_core` directly.

use glam::Vec2;
use instant::{Duration, Instant};
use overlay_core::constants::{PRIMARY_BUTTON, SECONDARY_BUTTON, SYNC_QUIET_WINDOW_MS};
use overlay_core::{
    Axis, Debouncer, GizmoController, GizmoState, HostCommand, Offset, OffsetStore,
    ProjectionTick, Readout, RecordingHost, SmoothingLoop, Transition,
};
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn active() -> (GizmoController, RecordingHost, Instant) {
    let host = RecordingHost::new();
    let mut g = GizmoController::default();
    let now = Instant::now();
    assert_eq!(g.show(true, now, &host), Transition::Activated);
    (g, host, now)
}

fn drag(g: &mut GizmoController, axis: Axis, from: Vec2, to: Vec2, center: Vec2, now: Instant) {
    assert!(g.handle_down(axis, PRIMARY_BUTTON, from, center));
    g.pointer_move(to, center, now);
    g.pointer_up(PRIMARY_BUTTON, &RecordingHost::new());
}

#[test]
fn translation_drag_clamps_raw_delta_before_scaling() {
    let (mut g, _host, now) = active();
    let c = Vec2::new(500.0, 500.0);
    assert!(g.handle_down(Axis::X, PRIMARY_BUTTON, Vec2::new(0.0, 0.0), c));

    let t = g.pointer_move(Vec2::new(100.0, 0.0), c, now).unwrap();
    assert!((t.x - 0.5).abs() < 1e-6);

    // 1000 px is clamped to 150 px, i.e. 0.75 m
    let t = g.pointer_move(Vec2::new(1000.0, 0.0), c, now).unwrap();
    assert!((t.x - 0.75).abs() < 1e-6);
    assert_eq!(t.y, 0.0);
}

#[test]
fn z_follows_upward_pointer_motion() {
    let (mut g, _host, now) = active();
    let c = Vec2::ZERO;
    assert!(g.handle_down(Axis::Z, PRIMARY_BUTTON, Vec2::new(0.0, 300.0), c));
    let t = g.pointer_move(Vec2::new(0.0, 200.0), c, now).unwrap();
    assert!((t.z - 0.5).abs() < 1e-6);

    // moving down from the start would go negative; floor is 0
    let t = g.pointer_move(Vec2::new(0.0, 400.0), c, now).unwrap();
    assert_eq!(t.z, 0.0);
}

#[test]
fn repeated_sessions_hit_the_outer_limit() {
    let (mut g, _host, now) = active();
    let c = Vec2::ZERO;
    for _ in 0..6 {
        drag(&mut g, Axis::Y, Vec2::ZERO, Vec2::new(0.0, -150.0), c, now);
    }
    assert_eq!(g.target().y, -2.5);
}

#[test]
fn rotation_follows_pointer_angle_around_center() {
    let (mut g, _host, now) = active();
    let c = Vec2::new(100.0, 100.0);
    // seed rotZ = 10 with a first rotation session: 0° -> 10°
    let r = 100.0_f32;
    let ten = 10f32.to_radians();
    drag(
        &mut g,
        Axis::RotZ,
        Vec2::new(200.0, 100.0),
        Vec2::new(100.0 + r * ten.cos(), 100.0 + r * ten.sin()),
        c,
        now,
    );
    assert!((g.target().rot_z - 10.0).abs() < 1e-3);

    assert!(g.handle_down(Axis::RotZ, PRIMARY_BUTTON, Vec2::new(200.0, 100.0), c));
    let t = g.pointer_move(Vec2::new(100.0, 200.0), c, now).unwrap();
    assert!((t.rot_z - 100.0).abs() < 1e-3);
}

#[test]
fn rotation_is_never_clamped() {
    let (mut g, _host, now) = active();
    let c = Vec2::ZERO;
    for _ in 0..5 {
        // quarter turn per session
        drag(&mut g, Axis::RotZ, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), c, now);
    }
    assert!((g.target().rot_z - 450.0).abs() < 1e-2);
}

#[test]
fn second_press_does_not_start_another_session() {
    let (mut g, _host, _now) = active();
    let c = Vec2::ZERO;
    assert!(g.handle_down(Axis::X, PRIMARY_BUTTON, Vec2::ZERO, c));
    assert!(!g.handle_down(Axis::Y, PRIMARY_BUTTON, Vec2::ZERO, c));
    assert_eq!(g.active_axis(), Some(Axis::X));

    assert_eq!(g.pointer_up(PRIMARY_BUTTON, &RecordingHost::new()), Some(Axis::X));
    assert_eq!(g.active_axis(), None);
    assert!(g.handle_down(Axis::Y, PRIMARY_BUTTON, Vec2::ZERO, c));
}

#[test]
fn secondary_button_never_drags() {
    let (mut g, _host, _now) = active();
    assert!(!g.handle_down(Axis::X, SECONDARY_BUTTON, Vec2::ZERO, Vec2::ZERO));
    assert_eq!(g.active_axis(), None);
}

#[test]
fn move_without_session_is_a_no_op() {
    let (mut g, _host, now) = active();
    assert_eq!(g.pointer_move(Vec2::new(50.0, 50.0), Vec2::ZERO, now), None);
    assert_eq!(g.target(), Offset::ZERO);
}

#[test]
fn debouncer_forwards_only_the_last_write() {
    let window = ms(SYNC_QUIET_WINDOW_MS);
    let mut d = Debouncer::new(window);
    let t = Instant::now();
    d.push(1, t);
    d.push(2, t + ms(2));
    let due = d.push(3, t + ms(5));
    assert_eq!(due, t + ms(5) + window);

    assert_eq!(d.poll(t + ms(14)), None);
    assert_eq!(d.poll(due), Some(3));
    assert_eq!(d.poll(due + ms(100)), None);
}

#[test]
fn controller_sync_sends_one_update_per_quiet_window() {
    let (mut g, host, t0) = active();
    // activation reset is itself synced
    assert_eq!(g.flush_sync(t0 + ms(10), &host), Some(Offset::ZERO));
    host.take();

    let t = t0 + ms(100);
    let c = Vec2::ZERO;
    assert!(g.handle_down(Axis::X, PRIMARY_BUTTON, Vec2::ZERO, c));
    g.pointer_move(Vec2::new(20.0, 0.0), c, t);
    g.pointer_move(Vec2::new(40.0, 0.0), c, t + ms(2));
    g.pointer_move(Vec2::new(60.0, 0.0), c, t + ms(5));

    assert_eq!(g.flush_sync(t + ms(12), &host), None);
    let sent = g.flush_sync(t + ms(15), &host).unwrap();
    assert!((sent.x - 0.3).abs() < 1e-6);
    assert_eq!(host.count("updatePedPositionFromUI"), 1);
    assert_eq!(g.flush_sync(t + ms(50), &host), None);
}

#[test]
fn unchanged_target_is_not_resynced() {
    let (mut g, host, t0) = active();
    g.flush_sync(t0 + ms(10), &host);
    host.take();
    let c = Vec2::ZERO;
    assert!(g.handle_down(Axis::X, PRIMARY_BUTTON, Vec2::ZERO, c));
    // y motion on the x handle leaves the target as is
    g.pointer_move(Vec2::new(0.0, 80.0), c, t0 + ms(20));
    assert_eq!(g.sync_deadline(), None);
    assert_eq!(g.flush_sync(t0 + ms(100), &host), None);
}

#[test]
fn smoothing_converges_geometrically() {
    let mut store = OffsetStore::new();
    store.set_target(Offset::new(1.0, 0.0, 0.0, 0.0));
    let mut s = SmoothingLoop::new(0.1);
    s.start();
    let mut last = 0.0_f32;
    for n in 1..=30 {
        let (v, again) = s.tick(&mut store);
        assert!(again);
        let expected = 1.0 - 0.9_f32.powi(n);
        assert!((v.x - expected).abs() < 1e-4, "tick {}: {} vs {}", n, v.x, expected);
        assert!(v.x > last && v.x < 1.0);
        last = v.x;
    }
    assert_eq!(s.ticks(), 30);
}

#[test]
fn activation_resets_offsets() {
    let (mut g, host, now) = active();
    drag(&mut g, Axis::X, Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::ZERO, now);
    for _ in 0..10 {
        g.frame();
    }
    assert!(g.visual().x > 0.0);

    g.show(false, now, &host);
    assert_eq!(g.show(true, now, &host), Transition::Activated);
    assert_eq!(g.target(), Offset::ZERO);
    assert_eq!(g.visual(), Offset::ZERO);
}

#[test]
fn repeated_show_is_idempotent() {
    let (mut g, host, now) = active();
    drag(&mut g, Axis::X, Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::ZERO, now);
    let epoch = g.epoch();
    assert_eq!(g.show(true, now, &host), Transition::Unchanged);
    assert_eq!(g.epoch(), epoch);
    assert!((g.target().x - 0.5).abs() < 1e-6);

    g.show(false, now, &host);
    assert_eq!(g.show(false, now, &host), Transition::Unchanged);
}

#[test]
fn off_screen_hides_without_moving() {
    let (mut g, _host, _now) = active();
    let placed = g.apply_projection(&ProjectionTick {
        screen_x: Some(0.25),
        screen_y: Some(0.75),
        on_screen: Some(true),
        cam_dist: Some(15.0),
    });
    assert_eq!(placed.x_pct, 25.0);
    assert_eq!(placed.y_pct, 75.0);
    assert!((placed.scale - 0.5).abs() < 1e-6);

    let hidden = g.apply_projection(&ProjectionTick {
        screen_x: Some(0.9),
        screen_y: Some(0.9),
        on_screen: Some(false),
        cam_dist: None,
    });
    assert_eq!(hidden.opacity, 0.0);
    assert_eq!(hidden.x_pct, 25.0);
    assert_eq!(hidden.y_pct, 75.0);
}

#[test]
fn missing_camera_distance_keeps_previous_scale() {
    let (mut g, _host, _now) = active();
    g.apply_projection(&ProjectionTick {
        screen_x: Some(0.5),
        screen_y: Some(0.5),
        on_screen: Some(true),
        cam_dist: Some(24.0),
    });
    let p = g.apply_projection(&ProjectionTick {
        screen_x: Some(0.4),
        screen_y: Some(0.5),
        on_screen: Some(true),
        cam_dist: None,
    });
    assert!((p.scale - 0.4).abs() < 1e-6);
    assert!((p.x_pct - 40.0).abs() < 1e-4);
}

#[test]
fn deactivating_mid_drag_tears_down_the_session() {
    let (mut g, host, now) = active();
    let c = Vec2::ZERO;
    assert!(g.handle_down(Axis::X, PRIMARY_BUTTON, Vec2::ZERO, c));
    g.pointer_move(Vec2::new(50.0, 0.0), c, now);
    let before = g.target();

    assert_eq!(g.show(false, now, &host), Transition::Deactivated);
    assert_eq!(g.state(), GizmoState::Hidden);
    assert_eq!(g.active_axis(), None);
    assert!(!g.is_animating());
    assert_eq!(g.pointer_move(Vec2::new(120.0, 0.0), c, now), None);
    assert_eq!(g.target(), before);
    assert_eq!(g.sync_deadline(), None);
}

#[test]
fn camera_control_follows_secondary_button() {
    let (mut g, host, _now) = active();
    g.pointer_down(SECONDARY_BUTTON, &host);
    assert!(g.camera_control());
    g.pointer_up(SECONDARY_BUTTON, &host);
    assert!(!g.camera_control());
    assert_eq!(
        host.take(),
        vec![
            HostCommand::SetCameraControl { status: true },
            HostCommand::SetCameraControl { status: false },
        ]
    );

    // primary clicks never touch the camera
    g.pointer_down(PRIMARY_BUTTON, &host);
    assert!(host.sent().is_empty());
}

#[test]
fn closing_releases_camera_control() {
    let (mut g, host, _now) = active();
    g.pointer_down(SECONDARY_BUTTON, &host);
    host.take();
    assert_eq!(g.cancel(&host), Transition::Deactivated);
    assert_eq!(
        host.take(),
        vec![
            HostCommand::SetCameraControl { status: false },
            HostCommand::CancelPositioning,
        ]
    );
}

#[test]
fn save_and_cancel_only_act_while_active() {
    let host = RecordingHost::new();
    let mut g = GizmoController::default();
    assert_eq!(g.save(&host), Transition::Unchanged);
    assert!(host.sent().is_empty());

    g.show(true, Instant::now(), &host);
    assert_eq!(g.save(&host), Transition::Deactivated);
    assert_eq!(host.take(), vec![HostCommand::SavePositioning]);

    // host-driven hide sends nothing back
    g.show(true, Instant::now(), &host);
    g.show(false, Instant::now(), &host);
    assert!(host.sent().is_empty());
}

#[test]
fn epoch_marks_stale_work() {
    let (mut g, host, now) = active();
    let first = g.epoch();
    assert!(g.accepts(first));
    g.show(false, now, &host);
    assert!(!g.accepts(first));
    g.show(true, now, &host);
    assert!(!g.accepts(first));
    assert!(g.accepts(first + 1));
}

#[test]
fn hovered_and_dragged_handles_highlight() {
    let (mut g, _host, _now) = active();
    let base = g.handle_color(Axis::Y);
    g.hover_enter(Axis::Y);
    assert_ne!(g.handle_color(Axis::Y), base);
    g.hover_leave();
    assert_eq!(g.handle_color(Axis::Y), base);

    g.handle_down(Axis::Y, PRIMARY_BUTTON, Vec2::ZERO, Vec2::ZERO);
    assert_ne!(g.handle_color(Axis::Y), base);
}

#[test]
fn readout_formats_visual_offset() {
    let r = Readout::of(Offset::new(0.126, -1.0, 2.5, 89.6));
    assert_eq!(r.x, "X: 0.13");
    assert_eq!(r.y, "Y: -1.00");
    assert_eq!(r.z, "Z: 2.50");
    assert_eq!(r.rotation, "90°");
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![
        Just(Axis::X),
        Just(Axis::Y),
        Just(Axis::Z),
        Just(Axis::RotZ)
    ]
}

proptest! {
    #[test]
    fn targets_stay_within_limits(
        sessions in prop::collection::vec(
            (axis_strategy(), prop::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0), 1..8)),
            1..12,
        )
    ) {
        let (mut g, host, now) = active();
        let center = Vec2::new(400.0, 300.0);
        for (axis, moves) in sessions {
            prop_assert!(g.handle_down(axis, PRIMARY_BUTTON, Vec2::new(410.0, 300.0), center));
            for (x, y) in moves {
                g.pointer_move(Vec2::new(x, y), center, now);
                let t = g.target();
                prop_assert!(t.x >= -2.5 && t.x <= 2.5);
                prop_assert!(t.y >= -2.5 && t.y <= 2.5);
                prop_assert!(t.z >= 0.0 && t.z <= 2.5);
                prop_assert!(t.is_within_limits());
            }
            g.pointer_up(PRIMARY_BUTTON, &host);
        }
    }
}
