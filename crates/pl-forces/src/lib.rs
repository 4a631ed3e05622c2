//! Force experiments.
//!
//! - `ForceTypes`: static breakdown of the forces on a block on an incline
//! - `ForceAnalysis`: a block pulled along a rough track, with static/kinetic
//!   friction resolved every frame
//! - `Equilibrium`: three concurrent forces (plus optional weight) acting on a
//!   free body, integrated with damping

pub mod equilibrium;
pub mod force_analysis;
pub mod force_types;
pub mod friction;

pub use equilibrium::{EQUILIBRIUM_DAMPING, Equilibrium, NetForce};
pub use force_analysis::ForceAnalysis;
pub use force_types::{ForceBreakdown, ForceKind, ForceTypes};
pub use friction::{FrictionRegime, FrictionResolution, REST_SPEED_MPS, resolve_friction};
