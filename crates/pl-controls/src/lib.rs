//! Parameter controller and staged animation primitives for physlab.
//!
//! # Architecture
//!
//! Every experiment exposes a static table of [`ParamSpec`]s describing its
//! editable (and read-only) fields. The [`ParameterController`] turns a
//! single slider edit into a validated whole-model replacement:
//! - unknown and read-only fields are rejected
//! - values are clamped into `[min, max]` and snapped to the step grid
//!
//! [`PhaseSequencer`] drives the fixed-duration, multi-phase decomposition
//! animations that some experiments overlay on the scene.

pub mod controller;
pub mod error;
pub mod param;
pub mod sequence;

pub use controller::{ParamEdit, ParameterController};
pub use error::{ControlError, ControlResult};
pub use param::{ParamSpec, Parameterized};
pub use sequence::{
    DECOMPOSITION_PHASE_S, DECOMPOSITION_PHASES, PhaseSequencer, SequencerState, Staged,
};
