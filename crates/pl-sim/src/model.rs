//! LabModel trait for per-experiment state records.

use crate::sample::{MetricSpec, Sample};

/// Contract every experiment state implements.
///
/// A LabModel is a value object: `advance` and `animate` return a new record
/// and never touch `self`. Implementations must be total over finite inputs;
/// there is no error path in the per-frame update.
pub trait LabModel: Clone + std::fmt::Debug {
    /// The fixed record the experiment starts from and resets to.
    fn defaults() -> Self;

    /// One frame of simulated time while playing.
    fn advance(&self, dt: f64) -> Self;

    /// Presentation-only animation (e.g. decomposition phases).
    ///
    /// Runs every frame, playing or not. Must not change simulated time.
    fn animate(&self, _dt: f64) -> Self {
        self.clone()
    }

    /// Flat record of named scalars for charting.
    fn sample(&self) -> Sample;

    /// Metadata for every key `sample` produces, in record order.
    fn metrics() -> &'static [MetricSpec];

    /// Simulated time of this state in seconds.
    fn time(&self) -> f64;

    /// Whether the experiment has a time evolution at all.
    fn playable() -> bool {
        true
    }
}
