//! Fixed-rate streaming cadence.
//!
//! Chunk streaming runs far less often than frames are drawn. An accumulator
//! collects frame time and releases one streaming update per fixed interval,
//! so the update rate stays the same whatever the frame rate.

use tracing::warn;

/// Streaming updates per second.
pub const STREAM_RATE_HZ: f64 = 4.0;

/// Longest frame the accumulator accepts. Longer frames are clamped so a
/// stall does not trigger a burst of catch-up updates.
pub const MAX_FRAME_TIME: f64 = 0.5;

/// Accumulator that turns frame times into fixed-interval update ticks.
#[derive(Clone, Debug)]
pub struct UpdateCadence {
    interval: f64,
    accumulator: f64,
    elapsed: f64,
    update_count: u64,
}

impl UpdateCadence {
    /// Cadence firing `rate_hz` times per second. Non-positive rates fall
    /// back to [`STREAM_RATE_HZ`].
    pub fn new(rate_hz: f64) -> Self {
        let rate = if rate_hz > 0.0 { rate_hz } else { STREAM_RATE_HZ };
        Self {
            interval: 1.0 / rate,
            accumulator: 0.0,
            elapsed: 0.0,
            update_count: 0,
        }
    }

    /// Seconds between updates.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Add one frame's duration and return how many updates are now due.
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.accumulator += frame_time;

        let mut due = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            self.elapsed += self.interval;
            self.update_count += 1;
            due += 1;
        }
        due
    }

    /// Simulated time consumed by released updates.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

impl Default for UpdateCadence {
    fn default() -> Self {
        Self::new(STREAM_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn test_sixty_frames_give_four_updates() {
        let mut cadence = UpdateCadence::default();
        let due: u32 = (0..60).map(|_| cadence.advance(FRAME)).sum();
        // Floating drift may leave the fourth tick a hair short.
        assert!((3..=4).contains(&due), "{due} updates in one second");
        let due = due + cadence.advance(FRAME);
        assert_eq!(due, 4);
    }

    #[test]
    fn test_exact_interval_fires_once() {
        let mut cadence = UpdateCadence::new(4.0);
        assert_eq!(cadence.advance(0.25), 1);
        assert_eq!(cadence.advance(0.1), 0);
        assert_eq!(cadence.update_count(), 1);
        assert!((cadence.elapsed() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut cadence = UpdateCadence::new(4.0);
        assert_eq!(cadence.advance(10.0), 2, "a stall releases at most MAX_FRAME_TIME of updates");
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut cadence = UpdateCadence::new(4.0);
        assert_eq!(cadence.advance(-1.0), 0);
        assert_eq!(cadence.advance(0.25), 1);
    }

    #[test]
    fn test_invalid_rate_uses_default() {
        let cadence = UpdateCadence::new(0.0);
        assert!((cadence.interval() - 1.0 / STREAM_RATE_HZ).abs() < 1e-12);
    }
}
