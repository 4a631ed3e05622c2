//! Closed-form kinematics primitives, called by the experiment models every frame.

/// Displacement under constant velocity: `v * t`.
#[inline]
pub fn uniform_displacement(v: f64, t: f64) -> f64 {
    v * t
}

/// Velocity under constant acceleration: `v0 + a * t`.
#[inline]
pub fn velocity_time(v0: f64, a: f64, t: f64) -> f64 {
    v0 + a * t
}

/// Displacement under constant acceleration: `v0 * t + a * t^2 / 2`.
#[inline]
pub fn displacement_time(v0: f64, a: f64, t: f64) -> f64 {
    v0 * t + 0.5 * a * t * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn uniform_displacement_basic() {
        assert_eq!(uniform_displacement(5.0, 2.0), 10.0);
        assert_eq!(uniform_displacement(-3.0, 0.0), 0.0);
    }

    proptest! {
        #[test]
        fn displacement_matches_formula(
            v0 in -100.0_f64..100.0,
            a in -50.0_f64..50.0,
            t in 0.0_f64..60.0,
        ) {
            let expected = v0 * t + 0.5 * a * t * t;
            prop_assert!((displacement_time(v0, a, t) - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }

        #[test]
        fn velocity_matches_formula(
            v0 in -100.0_f64..100.0,
            a in -50.0_f64..50.0,
            t in 0.0_f64..60.0,
        ) {
            let expected = v0 + a * t;
            prop_assert!((velocity_time(v0, a, t) - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }

        #[test]
        fn zero_acceleration_reduces_to_uniform(v in -100.0_f64..100.0, t in 0.0_f64..60.0) {
            prop_assert!((displacement_time(v, 0.0, t) - uniform_displacement(v, t)).abs() < 1e-9);
        }
    }
}
