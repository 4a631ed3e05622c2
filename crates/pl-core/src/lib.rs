//! pl-core: stable foundation for physlab.
//!
//! Contains:
//! - units (uom mass/acceleration/force + constructors, physical constants)
//! - numeric (Real + finite checks + float helpers)
//! - kinematics (closed-form motion primitives)
//! - timing (wall-clock timers for runs, frame statistics)
//! - error (shared error types)

pub mod error;
pub mod kinematics;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PlError, PlResult};
pub use kinematics::*;
pub use numeric::*;
pub use units::*;
