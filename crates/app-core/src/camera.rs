//! Scroll- and pointer-driven camera rig.
//!
//! Hosts push scroll offset, viewport height and a normalized pointer each
//! tick; the rig eases its pose toward the target those inputs imply.

use crate::clock::clamp_tick_dt;
use crate::constants::*;
use glam::{Mat4, Quat, Vec2, Vec3};

/// How far the pose moves toward its target each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Fixed fraction per tick regardless of `dt`. Visual speed scales with
    /// the display refresh rate.
    PerTick(f32),
    /// `1 − exp(−rate·dt)` per tick, the same speed at any refresh rate.
    Exponential { rate: f32 },
}

impl Smoothing {
    /// Exponential smoothing that matches `fraction`-per-tick at `hz`.
    pub fn matching_per_tick(fraction: f32, hz: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0 - f32::EPSILON);
        Smoothing::Exponential {
            rate: -(1.0 - fraction).ln() * hz,
        }
    }

    /// Blend factor in `[0, 1]` for a tick of `dt` seconds.
    #[inline]
    pub fn alpha(self, dt: f32) -> f32 {
        match self {
            Smoothing::PerTick(fraction) => fraction.clamp(0.0, 1.0),
            Smoothing::Exponential { rate } => (1.0 - (-rate.max(0.0) * dt).exp()).clamp(0.0, 1.0),
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::matching_per_tick(SMOOTHING_PER_TICK, REFERENCE_TICK_HZ)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RigConfig {
    pub base_z: f32,
    pub zoom_range: f32,
    pub pan_range: f32,
    pub max_scroll_progress: f32,
    pub pointer_scale: f32,
    pub parallax: Vec2,
    pub tilt_factor: f32,
    pub smoothing: Smoothing,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            base_z: BASE_Z,
            zoom_range: ZOOM_RANGE,
            pan_range: PAN_RANGE,
            max_scroll_progress: MAX_SCROLL_PROGRESS,
            pointer_scale: POINTER_SCALE,
            parallax: PARALLAX,
            tilt_factor: TILT_FACTOR,
            smoothing: Smoothing::default(),
        }
    }
}

impl RigConfig {
    /// Pose at rest: no scroll, pointer centered.
    pub fn base_pose(&self) -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 0.0, self.base_z),
            target: Vec3::ZERO,
            roll: 0.0,
        }
    }

    /// Pose the rig settles at for steady inputs.
    pub fn resting_pose(&self, scroll_progress: f32, pointer: Vec2) -> CameraPose {
        CameraPose {
            position: self.target_position(scroll_progress, pointer),
            target: Vec3::ZERO,
            roll: self.roll(pointer),
        }
    }

    /// Tilt for a pointer: its scaled horizontal offset times `tilt_factor`.
    fn roll(&self, pointer: Vec2) -> f32 {
        pointer.x * self.pointer_scale * self.tilt_factor
    }

    fn target_position(&self, scroll_progress: f32, pointer: Vec2) -> Vec3 {
        let mouse = pointer * self.pointer_scale * self.parallax;
        Vec3::new(
            mouse.x,
            -scroll_progress * self.pan_range + mouse.y,
            self.base_z - scroll_progress * self.zoom_range,
        )
    }
}

/// Where the camera is, what it looks at, and its tilt about the view axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    /// Radians about the view axis, counter-clockwise as seen by the viewer.
    pub roll: f32,
}

impl CameraPose {
    /// Unit view direction. Falls back to −Z when eye and target coincide.
    pub fn forward(&self) -> Vec3 {
        let f = (self.target - self.position).normalize_or_zero();
        if f == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            f
        }
    }

    /// Up vector after applying `roll` about the view axis.
    pub fn up(&self) -> Vec3 {
        let forward = self.forward();
        let reference = if forward.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
        let right = forward.cross(reference).normalize();
        let up = right.cross(forward);
        Quat::from_axis_angle(-forward, self.roll) * up
    }

    /// Right vector in world space, perpendicular to `forward` and `up`.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up()).normalize()
    }

    /// World-to-view transform (right-handed).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Projection {
    /// Clip-space projection for a viewport of the given aspect ratio.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fovy_radians, aspect, self.znear, self.zfar)
    }
}

/// Scroll depth in viewport heights, saturating at `max`.
///
/// Non-finite inputs and an empty viewport read as "not scrolled".
#[inline]
pub fn scroll_progress(scroll_y: f32, viewport_height: f32, max: f32) -> f32 {
    if !(viewport_height.is_finite() && viewport_height > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / viewport_height).clamp(0.0, max)
}

/// Pointer with non-finite components zeroed and the rest clamped to `[-1, 1]`.
#[inline]
pub fn sanitize_pointer(pointer: Vec2) -> Vec2 {
    let axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(axis(pointer.x), axis(pointer.y))
}

/// Pixel position (origin top-left, y down) on a `width`×`height` surface as
/// a `[-1, 1]` pointer with y up. An empty surface reads as centered.
#[inline]
pub fn pointer_from_pixels(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if !(width > 0.0 && height > 0.0) {
        return Vec2::ZERO;
    }
    sanitize_pointer(Vec2::new(x / width * 2.0 - 1.0, 1.0 - y / height * 2.0))
}

pub struct CameraRig {
    config: RigConfig,
    pose: CameraPose,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigConfig::default())
    }
}

impl CameraRig {
    pub fn new(config: RigConfig) -> Self {
        Self {
            pose: config.base_pose(),
            config,
        }
    }

    /// Ease the pose toward the target implied by this tick's host inputs.
    ///
    /// `pointer` is expected in `[-1, 1]` on both axes with y up.
    pub fn update(&mut self, scroll_y: f32, viewport_height: f32, pointer: Vec2, dt: f32) -> CameraPose {
        let progress = scroll_progress(scroll_y, viewport_height, self.config.max_scroll_progress);
        let pointer = sanitize_pointer(pointer);
        let target = self.config.target_position(progress, pointer);
        let alpha = self.config.smoothing.alpha(clamp_tick_dt(dt));
        self.pose.position += (target - self.pose.position) * alpha;
        // Roll tracks the pointer directly; only the position is eased.
        self.pose.roll = self.config.roll(pointer);
        self.pose
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Snap back to the base pose.
    pub fn reset(&mut self) {
        self.pose = self.config.base_pose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_progress_saturates() {
        assert_eq!(scroll_progress(0.0, 800.0, 2.0), 0.0);
        assert_eq!(scroll_progress(400.0, 800.0, 2.0), 0.5);
        assert_eq!(scroll_progress(10_000.0, 800.0, 2.0), 2.0);
        assert_eq!(scroll_progress(-50.0, 800.0, 2.0), 0.0);
        assert_eq!(scroll_progress(400.0, 0.0, 2.0), 0.0);
        assert_eq!(scroll_progress(f32::NAN, 800.0, 2.0), 0.0);
    }

    #[test]
    fn pixels_map_to_unit_square_y_up() {
        assert_eq!(pointer_from_pixels(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
        assert_eq!(pointer_from_pixels(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_from_pixels(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(pointer_from_pixels(-50.0, 0.0, 800.0, 600.0).x, -1.0);
        assert_eq!(pointer_from_pixels(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn roll_tilts_up_vector() {
        let mut pose = RigConfig::default().base_pose();
        assert!((pose.up() - Vec3::Y).length() < 1e-5);
        pose.roll = std::f32::consts::FRAC_PI_2;
        // Quarter turn counter-clockwise from the viewer: up points to -X.
        assert!((pose.up() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn degenerate_pose_still_has_a_view() {
        let pose = CameraPose {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            roll: 0.0,
        };
        assert_eq!(pose.forward(), Vec3::NEG_Z);
        assert!(pose.view_matrix().is_finite());
    }
}
