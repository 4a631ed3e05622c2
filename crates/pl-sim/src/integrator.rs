//! Fixed-step integrators for force-driven experiments.
//!
//! State is a position/velocity pair of `nalgebra` fixed-size vectors, so one
//! integrator serves both the 1D block-on-track and the 2D concurrent-force
//! experiments.

use nalgebra::SVector;
use pl_core::numeric::sign;

/// Velocities that cross zero and land below this magnitude snap to rest.
pub const ZERO_SNAP_MPS: f64 = 1e-2;

/// Position and velocity of a point body in `N` dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematic<const N: usize> {
    pub position: SVector<f64, N>,
    pub velocity: SVector<f64, N>,
}

impl<const N: usize> Kinematic<N> {
    pub fn new(position: SVector<f64, N>, velocity: SVector<f64, N>) -> Self {
        Self { position, velocity }
    }

    pub fn at_rest(position: SVector<f64, N>) -> Self {
        Self {
            position,
            velocity: SVector::zeros(),
        }
    }
}

/// Acceleration field for a point body.
pub trait Dynamics<const N: usize> {
    /// Acceleration at the given state (net force divided by mass).
    fn acceleration(&self, state: &Kinematic<N>) -> SVector<f64, N>;
}

/// Trait for fixed-step integrators.
pub trait Integrator {
    /// Advance state by one time step.
    fn step<const N: usize, D: Dynamics<N>>(
        &self,
        dynamics: &D,
        state: &Kinematic<N>,
        dt: f64,
    ) -> Kinematic<N>;
}

/// Semi-implicit (symplectic) Euler.
///
/// `v' = (v + a dt) * damping`, then `x' = x + v' dt`. With `zero_snap` set,
/// a velocity component that changes sign and lands below the threshold is
/// set to exactly zero, which keeps friction-locked bodies from jittering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SemiImplicitEuler {
    pub damping: f64,
    pub zero_snap: Option<f64>,
}

impl Default for SemiImplicitEuler {
    fn default() -> Self {
        Self::new()
    }
}

impl SemiImplicitEuler {
    pub const fn new() -> Self {
        Self {
            damping: 1.0,
            zero_snap: None,
        }
    }

    pub const fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub const fn with_zero_snap(mut self, threshold: f64) -> Self {
        self.zero_snap = Some(threshold);
        self
    }
}

impl Integrator for SemiImplicitEuler {
    fn step<const N: usize, D: Dynamics<N>>(
        &self,
        dynamics: &D,
        state: &Kinematic<N>,
        dt: f64,
    ) -> Kinematic<N> {
        let a = dynamics.acceleration(state);
        let mut velocity = (state.velocity + a * dt) * self.damping;

        if let Some(threshold) = self.zero_snap {
            for (new, old) in velocity.iter_mut().zip(state.velocity.iter()) {
                if sign(*old) * sign(*new) < 0.0 && new.abs() < threshold {
                    *new = 0.0;
                }
            }
        }

        Kinematic {
            position: state.position + velocity * dt,
            velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Vector1, Vector2};

    struct Constant<const N: usize>(SVector<f64, N>);

    impl<const N: usize> Dynamics<N> for Constant<N> {
        fn acceleration(&self, _state: &Kinematic<N>) -> SVector<f64, N> {
            self.0
        }
    }

    #[test]
    fn semi_implicit_uses_updated_velocity() {
        let s0 = Kinematic::at_rest(Vector1::new(0.0));
        let s1 = SemiImplicitEuler::new().step(&Constant(Vector1::new(2.0)), &s0, 0.5);
        assert_eq!(s1.velocity[0], 1.0);
        assert_eq!(s1.position[0], 0.5);
    }

    #[test]
    fn zero_snap_only_on_sign_flip() {
        let euler = SemiImplicitEuler::new().with_zero_snap(ZERO_SNAP_MPS);

        // 0.004 -> -0.001: flip below threshold snaps
        let s0 = Kinematic::new(Vector1::new(1.0), Vector1::new(0.004));
        let s1 = euler.step(&Constant(Vector1::new(-0.5)), &s0, 0.01);
        assert_eq!(s1.velocity[0], 0.0);
        assert_eq!(s1.position[0], 1.0);

        // starting from rest is not a flip
        let s0 = Kinematic::at_rest(Vector1::new(0.0));
        let s1 = euler.step(&Constant(Vector1::new(0.1)), &s0, 0.01);
        assert!(s1.velocity[0] > 0.0);

        // flip with a large magnitude is kept
        let s0 = Kinematic::new(Vector1::new(0.0), Vector1::new(0.5));
        let s1 = euler.step(&Constant(Vector1::new(-100.0)), &s0, 0.01);
        assert!(s1.velocity[0] < -ZERO_SNAP_MPS);
    }

    #[test]
    fn damping_scales_velocity_before_position() {
        let euler = SemiImplicitEuler::new().with_damping(0.98);
        let s0 = Kinematic::new(Vector2::zeros(), Vector2::new(1.0, 0.0));
        let s1 = euler.step(&Constant(Vector2::zeros()), &s0, 0.1);
        assert!((s1.velocity[0] - 0.98).abs() < 1e-12);
        assert!((s1.position[0] - 0.098).abs() < 1e-12);
        assert_eq!(s1.velocity[1], 0.0);
    }
}
