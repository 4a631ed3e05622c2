//! One open experiment: model, play state and sample history.

use crate::model::LabModel;
use crate::sample::{SampleSeries, SeriesCapacity};

/// Frame-driven runner around a single [`LabModel`].
///
/// `tick` is the per-frame callback. It always runs the model's presentation
/// animation and, while playing, advances simulated time by the frame delta
/// and appends one sample. No sub-stepping: a long frame becomes one long step.
#[derive(Debug, Clone)]
pub struct Session<M: LabModel> {
    model: M,
    playing: bool,
    series: SampleSeries,
    frames: u64,
}

impl<M: LabModel> Default for Session<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: LabModel> Session<M> {
    pub fn new() -> Self {
        Self::with_capacity(SeriesCapacity::Unbounded)
    }

    pub fn with_capacity(capacity: SeriesCapacity) -> Self {
        Self {
            model: M::defaults(),
            playing: false,
            series: SampleSeries::new(capacity),
            frames: 0,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whole-model replacement, e.g. from a parameter edit or a drag.
    ///
    /// Accepted at any time, including while playing.
    pub fn set_model(&mut self, model: M) {
        self.model = model;
    }

    pub fn series(&self) -> &SampleSeries {
        &self.series
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Frames advanced while playing since the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start playing. The current state is recorded as the first sample.
    ///
    /// Returns `false` when the experiment has no time evolution.
    pub fn play(&mut self) -> bool {
        if !M::playable() {
            return false;
        }
        if !self.playing {
            self.playing = true;
            self.record();
            tracing::debug!(t = self.model.time(), "session play");
        }
        true
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            tracing::debug!(t = self.model.time(), "session pause");
        }
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Stop, restore the default model and clear the sample history.
    pub fn reset(&mut self) {
        self.playing = false;
        self.model = M::defaults();
        self.series.clear();
        self.frames = 0;
        tracing::debug!("session reset");
    }

    /// Per-frame callback. Returns `true` when simulated time advanced.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "ignoring invalid frame delta");
            return false;
        }

        self.model = self.model.animate(dt);
        if !self.playing {
            return false;
        }

        self.model = self.model.advance(dt);
        self.frames += 1;
        self.record();
        true
    }

    fn record(&mut self) {
        let sample = self.model.sample();
        // Zero-length frames would only duplicate the previous row.
        let duplicate = match (self.series.last(), sample.get("t")) {
            (Some(last), Some(t)) => last.get("t") == Some(t),
            _ => false,
        };
        if !duplicate {
            self.series.push(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{MetricSpec, Sample};

    #[derive(Clone, Debug, PartialEq)]
    struct Clock {
        t: f64,
    }

    impl LabModel for Clock {
        fn defaults() -> Self {
            Self { t: 0.0 }
        }

        fn advance(&self, dt: f64) -> Self {
            Self { t: self.t + dt }
        }

        fn sample(&self) -> Sample {
            Sample::new().with("t", self.t)
        }

        fn metrics() -> &'static [MetricSpec] {
            const METRICS: &[MetricSpec] = &[MetricSpec::new("t", "Time", "s")];
            METRICS
        }

        fn time(&self) -> f64 {
            self.t
        }
    }

    #[test]
    fn paused_session_does_not_advance() {
        let mut session = Session::<Clock>::new();
        assert!(!session.tick(0.1));
        assert_eq!(session.model().t, 0.0);
        assert!(session.series().is_empty());
    }

    #[test]
    fn play_records_initial_sample_then_one_per_frame() {
        let mut session = Session::<Clock>::new();
        assert!(session.play());
        for _ in 0..3 {
            session.tick(0.5);
        }
        assert_eq!(session.series().column("t"), vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(session.frames(), 3);
    }

    #[test]
    fn zero_length_frames_do_not_duplicate_rows() {
        let mut session = Session::<Clock>::new();
        session.play();
        session.tick(0.0);
        session.tick(0.0);
        assert_eq!(session.series().len(), 1);
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut session = Session::<Clock>::new();
        session.play();
        assert!(!session.tick(f64::NAN));
        assert!(!session.tick(-1.0));
        assert_eq!(session.model().t, 0.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = Session::<Clock>::new();
        session.play();
        session.tick(1.0);
        session.reset();
        let once = (session.model().clone(), session.series().len(), session.is_playing());
        session.reset();
        let twice = (session.model().clone(), session.series().len(), session.is_playing());
        assert_eq!(once, twice);
        assert_eq!(once, (Clock::defaults(), 0, false));
    }

    #[test]
    fn toggle_flips_play_state() {
        let mut session = Session::<Clock>::new();
        assert!(session.toggle_play());
        assert!(session.is_playing());
        assert!(!session.toggle_play());
        assert!(!session.is_playing());
    }
}
