//! Frame timing

/// Largest delta handed to the simulation; longer stalls are truncated
pub const MAX_FRAME_DT: f32 = 0.1;

/// Timing sampled once at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub dt: f32,
    pub now: f64,
}

/// Monotonic game clock fed by the host's elapsed time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    now: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by the host's elapsed seconds and sample this frame.
    ///
    /// Negative or non-finite deltas count as zero so `now` never runs
    /// backwards.
    pub fn advance(&mut self, elapsed: f32) -> Frame {
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.now += dt as f64;
        Frame { dt, now: self.now }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }
}
