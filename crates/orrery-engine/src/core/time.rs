/// Wall-clock accumulator driven by per-frame deltas from the host.
/// The host calls once per display refresh; Rust never sleeps.
pub struct FrameClock {
    /// Largest delta accepted for one frame (seconds).
    max_dt: f32,
    /// Total elapsed time in seconds.
    elapsed: f64,
    /// Delta applied by the latest `advance` (seconds).
    dt: f32,
    /// Number of frames advanced.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            elapsed: 0.0,
            dt: 0.0,
            frames: 0,
        }
    }

    /// Advance by one frame. Negative deltas are ignored and long stalls
    /// (backgrounded tab) are capped at `max_dt`. Returns the applied delta.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = frame_dt.clamp(0.0, self.max_dt);
        self.elapsed += dt as f64;
        self.dt = dt;
        self.frames += 1;
        dt
    }

    /// Delta of the current frame in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Delta of the current frame in milliseconds.
    pub fn dt_ms(&self) -> f64 {
        self.dt as f64 * 1000.0
    }

    /// Elapsed time in milliseconds (same unit as `performance.now()`).
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed * 1000.0
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_frames() {
        let mut clock = FrameClock::default();
        clock.advance(0.016);
        clock.advance(0.016);
        assert_eq!(clock.frames(), 2);
        assert!((clock.elapsed_ms() - 32.0).abs() < 1e-3);
    }

    #[test]
    fn caps_long_stalls() {
        let mut clock = FrameClock::new(0.1);
        let applied = clock.advance(5.0);
        assert_eq!(applied, 0.1);
        assert!((clock.elapsed_secs() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn ignores_negative_delta() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.elapsed_secs(), 0.0);
    }
}
