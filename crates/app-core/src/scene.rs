//! One mounted visualization: a backdrop, the camera rig that looks at it,
//! and the per-frame hand-off to whatever draws them.
//!
//! Hosts own a [`Scene`] and pass it explicitly into their frame callback.

use crate::backdrop::Backdrop;
use crate::camera::{sanitize_pointer, CameraPose, CameraRig};
use crate::clock::clamp_tick_dt;
use crate::constants::Style;
use glam::Vec2;

/// Everything the host measures once per displayed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HostInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub scroll_y: f32,
    pub viewport_height: f32,
    /// Normalized pointer, `[-1, 1]` on both axes, y up.
    pub pointer: Vec2,
}

impl HostInput {
    /// Copy with every field forced into its documented range.
    ///
    /// Non-finite scroll reads as 0, a non-positive or non-finite viewport as
    /// 0 (no scroll progress).
    pub fn sanitized(self) -> Self {
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            dt: clamp_tick_dt(self.dt),
            scroll_y: finite_or_zero(self.scroll_y).max(0.0),
            viewport_height: finite_or_zero(self.viewport_height).max(0.0),
            pointer: sanitize_pointer(self.pointer),
        }
    }
}

/// Read-only view of one frame's output.
///
/// Borrows the backdrop's buffers, which the next tick overwrites.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    pub positions: &'a [f32],
    pub segments: &'a [f32],
    pub pose: CameraPose,
    pub style: Style,
}

impl FrameSnapshot<'_> {
    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 6
    }
}

/// Consumer of frame output: uploads the buffers and issues the draws.
///
/// Implementations must accept frames with zero points and zero segments.
pub trait RenderBridge {
    type Error;

    fn draw(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), Self::Error>;
}

pub struct Scene {
    backdrop: Box<dyn Backdrop>,
    rig: CameraRig,
    frames: u64,
}

impl Scene {
    pub fn new(backdrop: Box<dyn Backdrop>, rig: CameraRig) -> Self {
        Self {
            backdrop,
            rig,
            frames: 0,
        }
    }

    /// Advance the backdrop, then the camera, and expose the result.
    pub fn tick(&mut self, input: &HostInput) -> FrameSnapshot<'_> {
        let input = input.sanitized();
        self.backdrop.advance(input.dt);
        self.rig
            .update(input.scroll_y, input.viewport_height, input.pointer, input.dt);
        self.frames += 1;
        self.snapshot()
    }

    /// Output of the most recent tick.
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            positions: self.backdrop.positions(),
            segments: self.backdrop.segments(),
            pose: self.rig.pose(),
            style: self.backdrop.style(),
        }
    }

    pub fn render_with<B: RenderBridge>(&self, bridge: &mut B) -> Result<(), B::Error> {
        bridge.draw(&self.snapshot())
    }

    /// Swap the background. The camera keeps its pose.
    pub fn set_backdrop(&mut self, backdrop: Box<dyn Backdrop>) {
        self.backdrop = backdrop;
    }

    pub fn backdrop(&self) -> &dyn Backdrop {
        self.backdrop.as_ref()
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Ticks since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
