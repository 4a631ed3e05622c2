//! Integration test: force experiments driven through a session.

use pl_controls::{ParameterController, Parameterized};
use pl_forces::{Equilibrium, ForceAnalysis, ForceTypes, FrictionRegime, resolve_friction};
use pl_sim::{LabModel, Session, SimOptions, run_fixed};
use proptest::prelude::*;

const DT: f64 = 1.0 / 60.0;

fn opts(t_end: f64) -> SimOptions {
    SimOptions {
        dt: DT,
        t_end,
        max_steps: 100_000,
    }
}

fn with_params<M: LabModel + Parameterized>(edits: &[(&str, f64)]) -> Session<M> {
    let controller = ParameterController::default();
    let mut session = Session::<M>::new();
    for (key, value) in edits {
        let next = controller.apply(session.model(), key, *value).unwrap();
        session.set_model(next);
    }
    session
}

#[test]
fn resting_block_stays_put() {
    let mut session = with_params::<ForceAnalysis>(&[("F", 3.0)]);
    run_fixed(&mut session, &opts(2.0)).unwrap();
    for row in session.series().iter() {
        assert_eq!(row.get("x"), Some(0.0));
        assert_eq!(row.get("v"), Some(0.0));
        assert_eq!(row.get("netFx"), Some(0.0));
    }
    assert!((session.model().t - 2.0).abs() < 1e-9);
}

#[test]
fn zero_length_frames_at_rest_do_not_move_the_block() {
    let mut session = with_params::<ForceAnalysis>(&[("F", 0.0), ("mu", 0.5)]);
    assert_eq!(session.model().v, 0.0);
    let x0 = session.model().x;
    assert!(session.play());

    for _ in 0..1000 {
        session.tick(0.0);
    }
    assert_eq!(session.model().v, 0.0);
    assert_eq!(session.model().x, x0);
    assert_eq!(session.model().t, 0.0);

    for _ in 0..1000 {
        session.tick(DT);
        assert_eq!(session.model().v, 0.0);
    }
    assert_eq!(session.model().x, x0);
    assert!(session.series().iter().all(|row| row.get("netFx") == Some(0.0)));
}

#[test]
fn slips_just_past_static_limit() {
    // μ m g = 0.2 * 2 * 9.81 = 3.924 N
    let held = resolve_friction(2.0, 3.9, 0.0, 0.2, 0.0, 9.81);
    assert_eq!(held.regime, FrictionRegime::Static);
    let slipping = resolve_friction(2.0, 4.0, 0.0, 0.2, 0.0, 9.81);
    assert_eq!(slipping.regime, FrictionRegime::Slipping);
    assert!((slipping.net - 0.076).abs() < 1e-9);

    let mut session = with_params::<ForceAnalysis>(&[("F", 4.0)]);
    run_fixed(&mut session, &opts(1.0)).unwrap();
    let end = session.model();
    assert!(end.v > 0.0);
    assert!(end.x > 0.0);
    // a = 0.076 / 2
    assert!((end.v - 0.038).abs() < 1e-3);
}

#[test]
fn released_block_coasts_to_a_stop() {
    let mut session = with_params::<ForceAnalysis>(&[("F", 10.0)]);
    run_fixed(&mut session, &opts(1.0)).unwrap();
    let moving = session.model().v;
    assert!(moving > 0.0);

    let released = ParameterController::default()
        .apply(session.model(), "F", 0.0)
        .unwrap();
    session.set_model(released);
    for _ in 0..300 {
        session.tick(DT);
        assert!(session.model().v >= 0.0);
    }
    let parked = *session.model();
    assert_eq!(parked.v, 0.0);
    session.tick(DT);
    assert_eq!(session.model().x, parked.x);
}

#[test]
fn balanced_forces_hold_the_body_at_the_origin() {
    let mut session = Session::<Equilibrium>::new();
    run_fixed(&mut session, &opts(5.0)).unwrap();
    for row in session.series().iter() {
        assert!(row.get("F").unwrap() < 1e-9);
        assert!(row.get("x").unwrap().abs() < 1e-9);
        assert!(row.get("y").unwrap().abs() < 1e-9);
    }
    let end = session.model();
    assert!(end.vx.abs() < 1e-12);
    assert!(end.vy.abs() < 1e-12);
}

#[test]
fn unbalanced_body_accelerates_along_the_net_force() {
    let mut session = with_params::<Equilibrium>(&[("F1", 20.0)]);
    run_fixed(&mut session, &opts(1.0)).unwrap();
    let end = session.model();
    assert!(end.x > 0.0);
    assert!(end.y.abs() < 1e-9);
}

#[test]
fn reset_restores_defaults_and_clears_samples() {
    let mut session = with_params::<ForceAnalysis>(&[("F", 12.0), ("mu", 0.1)]);
    run_fixed(&mut session, &opts(1.0)).unwrap();
    assert!(!session.series().is_empty());

    session.reset();
    assert_eq!(*session.model(), ForceAnalysis::defaults());
    assert!(session.series().is_empty());
    session.reset();
    assert_eq!(*session.model(), ForceAnalysis::defaults());
}

#[test]
fn force_types_does_not_play() {
    let mut session = Session::<ForceTypes>::new();
    assert!(!session.play());
    assert!(!session.tick(DT));
    assert!(session.series().is_empty());
}

proptest! {
    #[test]
    fn static_friction_never_exceeds_its_limit(
        m in 0.1f64..20.0,
        f in 0.0f64..50.0,
        theta in -89.0f64..89.0,
        mu in 0.0f64..1.0,
    ) {
        let r = resolve_friction(m, f, theta, mu, 0.0, 9.81);
        prop_assert!(r.normal >= 0.0);
        prop_assert!(r.friction.abs() <= r.f_max + 1e-12);
        if r.regime == FrictionRegime::Static {
            prop_assert_eq!(r.net, 0.0);
        } else {
            prop_assert!(r.net * r.fx > 0.0);
        }
    }

    #[test]
    fn kinetic_friction_opposes_motion(v in prop_oneof![-5.0f64..-0.01, 0.01f64..5.0]) {
        let r = resolve_friction(2.0, 0.0, 0.0, 0.3, v, 9.81);
        prop_assert!(r.friction * v < 0.0);
    }
}
