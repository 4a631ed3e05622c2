//! Frame-driven simulation framework for physlab experiments.
//!
//! Provides:
//! - `LabModel`: the per-experiment state/update/sample contract
//! - `Session`: play/pause/reset/tick around one model plus its sample history
//! - `Sample` / `SampleSeries`: flat named-scalar records for charting
//! - Semi-implicit Euler integration with zero-crossing clamp and damping
//! - Fixed-step headless driver

pub mod error;
pub mod integrator;
pub mod model;
pub mod sample;
pub mod session;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{Dynamics, Integrator, Kinematic, SemiImplicitEuler, ZERO_SNAP_MPS};
pub use model::LabModel;
pub use sample::{MetricSpec, Sample, SampleSeries, SeriesCapacity};
pub use session::Session;
pub use sim::{RunStats, SimOptions, run_fixed};
