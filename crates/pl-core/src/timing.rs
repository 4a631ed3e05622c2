//! Lightweight timing utilities.
//!
//! `Timer` measures wall-clock spans (headless runs, sweeps). `FrameStats`
//! accumulates per-frame deltas so front ends can report the frame rate and
//! the largest gap the integrators had to absorb.

use std::time::Instant;

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Seconds since the timer started.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer, log the span at debug level and return elapsed seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_s();
        tracing::debug!(label = self.label, elapsed_s = elapsed, "timing");
        elapsed
    }
}

/// Frame delta statistics.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub total_s: f64,
    pub max_dt_s: f64,
    last_dt_s: f64,
}

impl FrameStats {
    pub fn record(&mut self, dt_s: f64) {
        if !dt_s.is_finite() || dt_s < 0.0 {
            return;
        }
        self.frames += 1;
        self.total_s += dt_s;
        self.last_dt_s = dt_s;
        self.max_dt_s = self.max_dt_s.max(dt_s);
    }

    /// Average frames per second over everything recorded.
    pub fn average_fps(&self) -> f64 {
        if self.total_s > 0.0 {
            self.frames as f64 / self.total_s
        } else {
            0.0
        }
    }

    /// Frames per second implied by the most recent delta.
    pub fn instant_fps(&self) -> f64 {
        if self.last_dt_s > 0.0 {
            1.0 / self.last_dt_s
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_elapsed_is_non_negative() {
        let t = Timer::start("test");
        assert_eq!(t.label(), "test");
        assert!(t.stop() >= 0.0);
    }

    #[test]
    fn frame_stats_track_rate_and_gap() {
        let mut stats = FrameStats::default();
        for _ in 0..60 {
            stats.record(1.0 / 60.0);
        }
        stats.record(0.5);
        stats.record(f64::NAN);
        assert_eq!(stats.frames, 61);
        assert_eq!(stats.max_dt_s, 0.5);
        assert!((stats.instant_fps() - 2.0).abs() < 1e-12);
        assert!(stats.average_fps() > 0.0);

        stats.reset();
        assert_eq!(stats.frames, 0);
        assert_eq!(stats.average_fps(), 0.0);
    }
}
