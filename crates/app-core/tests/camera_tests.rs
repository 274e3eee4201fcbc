// Convergence and robustness of the scroll/pointer camera rig.

use glam::{Vec2, Vec3};
use netfield_core::camera::scroll_progress;
use netfield_core::{CameraRig, RigConfig, Smoothing};

const DT: f32 = 1.0 / 60.0;
const VIEWPORT: f32 = 900.0;

fn settle(rig: &mut CameraRig, scroll_y: f32, pointer: Vec2, ticks: usize) {
    for _ in 0..ticks {
        rig.update(scroll_y, VIEWPORT, pointer, DT);
    }
}

#[test]
fn rest_inputs_converge_to_base_pose() {
    let mut rig = CameraRig::default();
    // Start from somewhere else so convergence is actually exercised.
    settle(&mut rig, VIEWPORT, Vec2::new(0.8, -0.6), 300);
    settle(&mut rig, 0.0, Vec2::ZERO, 600);

    let base = rig.config().base_pose();
    let pose = rig.pose();
    assert!((pose.position - base.position).length() < 1e-3);
    assert!(pose.roll.abs() < 1e-3);
    assert_eq!(pose.target, Vec3::ZERO);
}

#[test]
fn full_scroll_converges_to_max_zoom_and_pan() {
    let mut rig = CameraRig::default();
    settle(&mut rig, 2.0 * VIEWPORT, Vec2::ZERO, 600);

    let cfg = rig.config().clone();
    let expected = Vec3::new(0.0, -2.0 * cfg.pan_range, cfg.base_z - 2.0 * cfg.zoom_range);
    assert!((rig.pose().position - expected).length() < 1e-3);
    assert!((expected - cfg.resting_pose(2.0, Vec2::ZERO).position).length() < 1e-6);
}

#[test]
fn scroll_past_limit_saturates() {
    let mut a = CameraRig::default();
    let mut b = CameraRig::default();
    settle(&mut a, 2.0 * VIEWPORT, Vec2::ZERO, 400);
    settle(&mut b, 50.0 * VIEWPORT, Vec2::ZERO, 400);
    assert_eq!(a.pose(), b.pose());
    assert_eq!(scroll_progress(50.0 * VIEWPORT, VIEWPORT, 2.0), 2.0);
}

#[test]
fn more_scroll_moves_closer_and_lower() {
    let cfg = RigConfig::default();
    let mut last = cfg.resting_pose(0.0, Vec2::ZERO).position;
    for step in 1..=8 {
        let p = cfg.resting_pose(step as f32 * 0.25, Vec2::ZERO).position;
        assert!(p.z < last.z);
        assert!(p.y < last.y);
        last = p;
    }
}

#[test]
fn pointer_parallax_and_roll() {
    let mut rig = CameraRig::default();
    settle(&mut rig, 0.0, Vec2::new(1.0, 1.0), 600);
    let pose = rig.pose();
    let cfg = rig.config();
    let expected_x = cfg.pointer_scale * cfg.parallax.x;
    let expected_y = cfg.pointer_scale * cfg.parallax.y;
    assert!((pose.position.x - expected_x).abs() < 1e-3);
    assert!((pose.position.y - expected_y).abs() < 1e-3);
    assert!((pose.roll - expected_x * cfg.tilt_factor).abs() < 1e-4);
}

#[test]
fn roll_follows_pointer_from_the_first_tick() {
    let mut rig = CameraRig::default();
    let tilt = rig.config().tilt_factor;
    let pose = rig.update(0.0, VIEWPORT, Vec2::new(1.0, 0.0), DT);
    // Position has only eased a fraction of the way; roll is already at target.
    assert!(pose.position.x > 0.0 && pose.position.x < 0.5);
    assert!((pose.roll - 2.0 * 1.0 * tilt).abs() < 1e-6);

    let pose = rig.update(0.0, VIEWPORT, Vec2::new(-0.25, 0.7), DT);
    assert!((pose.roll - 2.0 * -0.25 * tilt).abs() < 1e-6);

    // Out-of-range pointers tilt no further than the edge of the screen.
    let pose = rig.update(0.0, VIEWPORT, Vec2::new(9.0, 0.0), DT);
    assert!((pose.roll - 2.0 * tilt).abs() < 1e-6);
}

#[test]
fn non_finite_host_input_keeps_pose_finite() {
    let mut rig = CameraRig::default();
    let bad = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY];
    for &v in &bad {
        rig.update(v, VIEWPORT, Vec2::ZERO, DT);
        rig.update(0.0, v, Vec2::ZERO, DT);
        rig.update(0.0, VIEWPORT, Vec2::new(v, v), DT);
        rig.update(0.0, VIEWPORT, Vec2::ZERO, v);
        let pose = rig.pose();
        assert!(pose.position.is_finite());
        assert!(pose.roll.is_finite());
        assert!(pose.view_matrix().is_finite());
    }
    // Out-of-range pointers are clamped, not extrapolated.
    settle(&mut rig, 0.0, Vec2::new(40.0, -40.0), 600);
    let clamped = rig.config().resting_pose(0.0, Vec2::new(1.0, -1.0));
    assert!((rig.pose().position - clamped.position).length() < 1e-3);
}

#[test]
fn zero_viewport_means_no_scroll() {
    let mut rig = CameraRig::default();
    settle(&mut rig, 5_000.0, Vec2::ZERO, 600);
    let with_height = rig.pose();
    rig.reset();
    for _ in 0..600 {
        rig.update(5_000.0, 0.0, Vec2::ZERO, DT);
    }
    assert!((rig.pose().position - rig.config().base_pose().position).length() < 1e-3);
    assert!(with_height.position.z < rig.pose().position.z);
}

#[test]
fn exponential_default_matches_per_tick_at_reference_rate() {
    let per_tick = RigConfig {
        smoothing: Smoothing::PerTick(0.05),
        ..RigConfig::default()
    };
    let mut a = CameraRig::new(per_tick);
    let mut b = CameraRig::default();
    for _ in 0..90 {
        a.update(VIEWPORT, VIEWPORT, Vec2::new(0.3, 0.2), DT);
        b.update(VIEWPORT, VIEWPORT, Vec2::new(0.3, 0.2), DT);
    }
    assert!((a.pose().position - b.pose().position).length() < 1e-3);
}

#[test]
fn exponential_smoothing_is_refresh_rate_independent() {
    let mut at_60 = CameraRig::default();
    let mut at_120 = CameraRig::default();
    for _ in 0..60 {
        at_60.update(VIEWPORT, VIEWPORT, Vec2::ZERO, 1.0 / 60.0);
    }
    for _ in 0..120 {
        at_120.update(VIEWPORT, VIEWPORT, Vec2::ZERO, 1.0 / 120.0);
    }
    assert!((at_60.pose().position - at_120.pose().position).length() < 1e-3);

    // Per-tick smoothing moves twice as fast at twice the rate.
    let fixed = RigConfig {
        smoothing: Smoothing::PerTick(0.05),
        ..RigConfig::default()
    };
    let mut slow = CameraRig::new(fixed.clone());
    let mut fast = CameraRig::new(fixed);
    for _ in 0..30 {
        slow.update(VIEWPORT, VIEWPORT, Vec2::ZERO, 1.0 / 60.0);
    }
    for _ in 0..60 {
        fast.update(VIEWPORT, VIEWPORT, Vec2::ZERO, 1.0 / 120.0);
    }
    assert!(fast.pose().position.z < slow.pose().position.z);
}
