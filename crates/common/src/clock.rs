//! Frame timing utilities.
//!
//! Animation updates are driven by per-frame deltas. Renderers hand us raw
//! timestamps; this module turns them into deltas that are always finite,
//! non-negative, and no larger than a configured maximum, so a frame hitch
//! or a backgrounded tab never lands as one huge integration step.

/// Default upper bound for a single frame delta (seconds).
pub const DEFAULT_MAX_DELTA: f64 = 1.0 / 30.0;

/// Clamp a raw delta into `[0, max_delta]`.
///
/// Negative, NaN, and infinite inputs are treated as zero.
pub fn sanitize_delta(delta: f64, max_delta: f64) -> f64 {
    if !delta.is_finite() || delta <= 0.0 {
        return 0.0;
    }
    delta.min(max_delta)
}

/// Converts monotonic frame timestamps into clamped deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_delta: f64,
    last_secs: Option<f64>,
}

impl FrameClock {
    /// Create a clock that never reports more than `max_delta` seconds.
    pub fn new(max_delta: f64) -> Self {
        Self {
            max_delta,
            last_secs: None,
        }
    }

    /// Report the delta since the previous tick.
    /// The first tick (after creation or [`reset`](Self::reset)) yields zero.
    pub fn tick(&mut self, now_secs: f64) -> f64 {
        let delta = match self.last_secs {
            Some(last) => sanitize_delta(now_secs - last, self.max_delta),
            None => 0.0,
        };
        if now_secs.is_finite() {
            self.last_secs = Some(now_secs);
        }
        delta
    }

    /// Forget the previous timestamp, e.g. when a hidden page becomes visible.
    pub fn reset(&mut self) {
        self.last_secs = None;
    }

    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

/// Fixed-rate stepping for headless simulation.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    fps: u32,
}

impl FixedStep {
    /// Create a stepper at the given frame rate. Zero is bumped to one.
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    /// Seconds per frame.
    pub fn delta(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Equal sub-steps needed so none exceeds `max_delta`. At least one.
    pub fn substeps(&self, max_delta: f64) -> u32 {
        if !max_delta.is_finite() || max_delta <= 0.0 {
            return 1;
        }
        // Tolerate rounding when the frame is an exact multiple of max_delta
        ((self.delta() / max_delta - 1e-9).ceil() as u32).max(1)
    }

    /// Simulated time at the start of frame `index`.
    pub fn time_of(&self, index: u64) -> f64 {
        index as f64 / self.fps as f64
    }

    /// Number of whole frames that fit in `duration_secs`.
    pub fn frames_in(&self, duration_secs: f64) -> u64 {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return 0;
        }
        (duration_secs * self.fps as f64).round() as u64
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(0.01, DEFAULT_MAX_DELTA), 0.01);
        assert_eq!(sanitize_delta(0.5, DEFAULT_MAX_DELTA), DEFAULT_MAX_DELTA);
        assert_eq!(sanitize_delta(-0.01, DEFAULT_MAX_DELTA), 0.0);
        assert_eq!(sanitize_delta(f64::NAN, DEFAULT_MAX_DELTA), 0.0);
        assert_eq!(sanitize_delta(f64::INFINITY, DEFAULT_MAX_DELTA), 0.0);
        assert_eq!(sanitize_delta(f64::NEG_INFINITY, DEFAULT_MAX_DELTA), 0.0);
    }

    #[test]
    fn test_frame_clock_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(12.0), 0.0);
        assert!((clock.tick(12.016) - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_frame_clock_clamps_hitches() {
        let mut clock = FrameClock::new(1.0 / 30.0);
        clock.tick(0.0);
        // Tab was hidden for ten seconds
        assert_eq!(clock.tick(10.0), 1.0 / 30.0);
        // Clock went backwards
        assert_eq!(clock.tick(9.0), 0.0);
    }

    #[test]
    fn test_frame_clock_reset() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        clock.tick(0.016);
        clock.reset();
        assert_eq!(clock.tick(42.0), 0.0);
    }

    #[test]
    fn test_frame_clock_ignores_nan_timestamp() {
        let mut clock = FrameClock::default();
        clock.tick(1.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert!((clock.tick(1.02) - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_step() {
        let step = FixedStep::new(60);
        assert!((step.delta() - 1.0 / 60.0).abs() < 1e-15);
        assert_eq!(step.frames_in(1.0), 60);
        assert_eq!(step.frames_in(-1.0), 0);
        assert!((step.time_of(30) - 0.5).abs() < 1e-12);
        assert_eq!(FixedStep::new(0).fps(), 1);
    }

    #[test]
    fn test_fixed_step_substeps() {
        assert_eq!(FixedStep::new(60).substeps(DEFAULT_MAX_DELTA), 1);
        assert_eq!(FixedStep::new(30).substeps(DEFAULT_MAX_DELTA), 1);
        assert_eq!(FixedStep::new(20).substeps(DEFAULT_MAX_DELTA), 2);
        assert_eq!(FixedStep::new(10).substeps(DEFAULT_MAX_DELTA), 3);
        assert_eq!(FixedStep::new(1).substeps(DEFAULT_MAX_DELTA), 30);
        assert_eq!(FixedStep::new(10).substeps(0.0), 1);
        assert_eq!(FixedStep::new(10).substeps(f64::NAN), 1);
    }
}
