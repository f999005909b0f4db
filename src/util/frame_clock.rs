/// Per-frame delta time with a smoothed FPS estimate.
///
/// The clock is fed absolute timestamps (seconds since the scene started)
/// rather than reading a wall clock itself, so the scene loop stays a pure
/// function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Timestamp of the previous tick.
    last: f64,
    /// Seconds between the previous two ticks.
    delta: f32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock whose first tick measures from `start`.
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            last: start,
            delta: 0.0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance to `now` and return the seconds elapsed since the previous
    /// tick. Never negative: a clock that steps backwards yields 0.
    pub fn tick(&mut self, now: f64) -> f32 {
        let elapsed = (now - self.last).max(0.0);
        self.last = now.max(self.last);
        #[allow(clippy::cast_possible_truncation)]
        let delta = elapsed as f32;
        self.delta = delta;

        if delta > 0.0 {
            let instant_fps = 1.0 / delta;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        delta
    }

    /// Seconds between the last two ticks.
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Timestamp of the most recent tick.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_difference_of_samples() {
        let mut clock = FrameClock::new(0.0);
        assert!((clock.tick(0.25) - 0.25).abs() < 1e-6);
        assert!((clock.tick(0.75) - 0.5).abs() < 1e-6);
        assert!((clock.delta() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn equal_samples_give_zero() {
        let mut clock = FrameClock::new(1.0);
        assert_eq!(clock.tick(1.0), 0.0);
        assert_eq!(clock.tick(1.0), 0.0);
    }

    #[test]
    fn delta_never_negative() {
        let mut clock = FrameClock::new(0.0);
        for now in [0.5, 0.2, 0.9, 0.1, 3.0, 2.0] {
            assert!(clock.tick(now) >= 0.0);
        }
        // After stepping back to 2.0 the clock still measures from 3.0.
        assert_eq!(clock.last(), 3.0);
        assert!((clock.tick(3.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fps_converges_toward_frame_rate() {
        let mut clock = FrameClock::new(0.0);
        let mut now = 0.0;
        for _ in 0..500 {
            now += 1.0 / 30.0;
            let _ = clock.tick(now);
        }
        assert!((clock.fps() - 30.0).abs() < 0.5);
    }
}
