//! Integration test: headless fixed-step runs over an integrated model.
//!
//! A block sliding on a track with linear drag, driven by `run_fixed`:
//! - the run lands exactly on t_end
//! - one sample per frame plus the initial sample
//! - semi-implicit Euler decays velocity monotonically under drag

use nalgebra::{SVector, Vector1};
use pl_sim::{
    Dynamics, Integrator, Kinematic, LabModel, MetricSpec, Sample, SemiImplicitEuler,
    SeriesCapacity, Session, SimError, SimOptions, run_fixed,
};

#[derive(Clone, Debug)]
struct DraggedBlock {
    body: Kinematic<1>,
    drag: f64,
    t: f64,
}

impl Dynamics<1> for DraggedBlock {
    fn acceleration(&self, state: &Kinematic<1>) -> SVector<f64, 1> {
        -state.velocity * self.drag
    }
}

impl LabModel for DraggedBlock {
    fn defaults() -> Self {
        Self {
            body: Kinematic::new(Vector1::new(0.0), Vector1::new(4.0)),
            drag: 0.5,
            t: 0.0,
        }
    }

    fn advance(&self, dt: f64) -> Self {
        let body = SemiImplicitEuler::new().step(self, &self.body, dt);
        Self {
            body,
            t: self.t + dt,
            ..self.clone()
        }
    }

    fn sample(&self) -> Sample {
        Sample::new()
            .with("t", self.t)
            .with("x", self.body.position[0])
            .with("v", self.body.velocity[0])
    }

    fn metrics() -> &'static [MetricSpec] {
        const METRICS: &[MetricSpec] = &[
            MetricSpec::new("t", "Time", "s"),
            MetricSpec::new("x", "Position", "m"),
            MetricSpec::new("v", "Velocity", "m/s"),
        ];
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

#[derive(Clone, Debug)]
struct Still;

impl LabModel for Still {
    fn defaults() -> Self {
        Still
    }

    fn advance(&self, _dt: f64) -> Self {
        Still
    }

    fn sample(&self) -> Sample {
        Sample::new()
    }

    fn metrics() -> &'static [MetricSpec] {
        &[]
    }

    fn time(&self) -> f64 {
        0.0
    }

    fn playable() -> bool {
        false
    }
}

#[test]
fn run_lands_on_t_end() {
    let mut session = Session::<DraggedBlock>::new();
    let opts = SimOptions {
        dt: 0.3,
        t_end: 1.0,
        max_steps: 100,
    };
    let stats = run_fixed(&mut session, &opts).unwrap();

    assert!(stats.completed);
    assert_eq!(stats.steps, 4);
    assert!((session.model().time() - 1.0).abs() < 1e-12);
    assert_eq!(session.series().len(), 5);
}

#[test]
fn drag_decays_velocity_monotonically() {
    let mut session = Session::<DraggedBlock>::new();
    run_fixed(
        &mut session,
        &SimOptions {
            dt: 0.01,
            t_end: 3.0,
            max_steps: 10_000,
        },
    )
    .unwrap();

    let v = session.series().column("v");
    assert!(v.windows(2).all(|w| w[1] < w[0]));
    assert!(v.last().copied().unwrap() > 0.0);

    let x = session.series().column("x");
    assert!(x.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn max_steps_cuts_run_short() {
    let mut session = Session::<DraggedBlock>::new();
    let stats = run_fixed(
        &mut session,
        &SimOptions {
            dt: 0.01,
            t_end: 10.0,
            max_steps: 5,
        },
    )
    .unwrap();
    assert!(!stats.completed);
    assert_eq!(stats.steps, 5);
}

#[test]
fn bounded_history_in_long_runs() {
    let mut session = Session::<DraggedBlock>::with_capacity(SeriesCapacity::Bounded(50));
    run_fixed(
        &mut session,
        &SimOptions {
            dt: 0.01,
            t_end: 2.0,
            max_steps: 1_000,
        },
    )
    .unwrap();
    assert_eq!(session.series().len(), 50);
    assert_eq!(session.series().evicted(), 151);
}

#[test]
fn static_experiment_cannot_run() {
    let mut session = Session::<Still>::new();
    let err = run_fixed(&mut session, &SimOptions::default()).unwrap_err();
    assert!(matches!(err, SimError::NotPlayable { .. }));
}
