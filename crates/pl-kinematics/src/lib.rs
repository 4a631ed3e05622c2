//! Closed-form kinematics experiments.
//!
//! Every experiment here advances only its clock (reference frame excepted,
//! which moves two bodies at constant velocity) and evaluates positions
//! analytically, so a long frame never loses accuracy.
//!
//! - `UniformMotion`: x = x0 + v t
//! - `UniformAcceleration`: x = x0 + v0 t + a t^2 / 2
//! - `FreeFall`: height above ground, downward positive velocity
//! - `Projectile`: launch from (x0, y0) at angle θ
//! - `VectorDecomposition`: projectile with separated horizontal/vertical motion
//! - `ReferenceFrame`: object A seen from the ground and from a frame moving with B

pub mod ballistic;
pub mod free_fall;
pub mod projectile;
pub mod reference_frame;
pub mod uniform_acceleration;
pub mod uniform_motion;
pub mod vector_decomposition;

mod track;

pub use ballistic::{Ballistic, Launch};
pub use free_fall::FreeFall;
pub use projectile::Projectile;
pub use reference_frame::ReferenceFrame;
pub use uniform_acceleration::UniformAcceleration;
pub use uniform_motion::UniformMotion;
pub use vector_decomposition::VectorDecomposition;
