//! Integration test: closed-form experiments driven through a session.

use pl_controls::{ParameterController, Parameterized};
use pl_core::kinematics::displacement_time;
use pl_kinematics::{FreeFall, Projectile, ReferenceFrame, UniformAcceleration, UniformMotion};
use pl_sim::{LabModel, Session, SimOptions, run_fixed};
use proptest::prelude::*;

fn run<M: LabModel>(dt: f64, t_end: f64) -> Session<M> {
    let mut session = Session::<M>::new();
    run_fixed(
        &mut session,
        &SimOptions {
            dt,
            t_end,
            max_steps: 100_000,
        },
    )
    .unwrap();
    session
}

#[test]
fn free_fall_lands_and_stays_down() {
    let session = run::<FreeFall>(1.0 / 60.0, 6.0);
    let heights = session.series().column("y");
    assert!(heights.iter().all(|h| *h >= 0.0));
    assert_eq!(*heights.last().unwrap(), 0.0);

    let t_land = (2.0 * 90.0 / 9.8_f64).sqrt();
    assert!((t_land - 4.286).abs() < 1e-3);
    for row in session.series().iter() {
        let (t, y) = (row.get("t").unwrap(), row.get("y").unwrap());
        if t < t_land - 1e-9 {
            assert!(y > 0.0, "still airborne at t={t}");
        } else {
            assert_eq!(y, 0.0);
        }
    }
}

#[test]
fn projectile_one_second() {
    let session = run::<Projectile>(0.25, 1.0);
    let last = session.series().last().unwrap();
    assert!((last.get("t").unwrap() - 1.0).abs() < 1e-12);
    assert!((last.get("x").unwrap() - 14.14).abs() < 1e-2);
    assert!((last.get("y").unwrap() - 19.24).abs() < 1e-2);
}

#[test]
fn edits_mid_run_take_effect() {
    let mut session = Session::<UniformMotion>::new();
    session.play();
    session.tick(1.0);
    let edited = ParameterController::default()
        .apply(session.model(), "v", -3.0)
        .unwrap();
    session.set_model(edited);
    session.tick(1.0);

    let x = session.series().column("x");
    assert_eq!(x, vec![0.0, 5.0, -6.0]);
    assert_eq!(session.model().param("t"), Some(2.0));
}

#[test]
fn reference_frame_tracks_relative_motion() {
    let session = run::<ReferenceFrame>(0.5, 5.0);
    let rel = session.series().column("xRel");
    assert_eq!(rel.first().copied(), Some(-5.0));
    assert!((rel.last().unwrap() - 0.0).abs() < 1e-12);
}

#[test]
fn reset_restores_defaults() {
    let mut session = run::<UniformAcceleration>(0.1, 2.0);
    assert!(!session.series().is_empty());
    session.reset();
    assert_eq!(*session.model(), UniformAcceleration::defaults());
    assert!(session.series().is_empty());
}

proptest! {
    #[test]
    fn uniform_acceleration_matches_primitives(
        v0 in -20.0f64..20.0,
        a in -10.0f64..10.0,
        t in 0.0f64..30.0,
    ) {
        let m = UniformAcceleration { v0, a, x0: 0.0, t };
        prop_assert_eq!(m.position(), displacement_time(v0, a, t));
    }

    #[test]
    fn uniform_motion_is_frame_split_invariant(
        v in -20.0f64..20.0,
        t1 in 0.0f64..10.0,
        t2 in 0.0f64..10.0,
    ) {
        let m = UniformMotion { v, ..UniformMotion::defaults() };
        let split = m.advance(t1).advance(t2);
        let whole = m.advance(t1 + t2);
        prop_assert!((split.position() - whole.position()).abs() < 1e-9);
    }
}
