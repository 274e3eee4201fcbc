use crate::constants::MAX_TICK_DT;

/// Clamp a host-supplied frame delta into the range the integrators accept.
///
/// Negative or non-finite deltas count as a zero-length tick; anything longer
/// than [`MAX_TICK_DT`] (a resumed background tab, a debugger pause) is cut
/// down to it.
#[inline]
pub fn clamp_tick_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_TICK_DT)
    } else {
        0.0
    }
}

/// Monotonic time since the owning field was created.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by an already clamped delta.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt as f64;
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
