//! Fixed-step headless driver.

use crate::error::{SimError, SimResult};
use crate::model::LabModel;
use crate::session::Session;
use pl_core::{ensure_finite, ensure_positive};

/// Options for headless runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed frame delta (seconds)
    pub dt: f64,
    /// Simulated time to stop at (seconds)
    pub t_end: f64,
    /// Maximum number of frames (safety limit)
    pub max_steps: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            t_end: 5.0,
            max_steps: 1_000_000,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.dt, "dt")?;
        if ensure_finite(self.t_end, "t_end")? < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }
}

/// Summary of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    pub steps: usize,
    /// Elapsed simulated time covered by the run (sum of frame deltas).
    pub elapsed: f64,
    /// `false` when `max_steps` cut the run short.
    pub completed: bool,
}

/// Play `session` at a fixed frame delta until `t_end` of simulated time has elapsed.
///
/// The elapsed time is counted from the session's current state, so a run
/// can be resumed. The final frame is shortened to land exactly on `t_end`.
pub fn run_fixed<M: LabModel>(session: &mut Session<M>, opts: &SimOptions) -> SimResult<RunStats> {
    opts.validate()?;
    if !session.play() {
        return Err(SimError::NotPlayable {
            what: "experiment has no time evolution",
        });
    }

    let mut elapsed = 0.0;
    let mut steps = 0;
    // Guard against accumulating 1e-16 leftovers into an extra tiny frame.
    let eps = opts.dt * 1e-9;
    while opts.t_end - elapsed > eps && steps < opts.max_steps {
        let dt = opts.dt.min(opts.t_end - elapsed);
        session.tick(dt);
        elapsed += dt;
        steps += 1;
    }

    let completed = opts.t_end - elapsed <= eps;
    tracing::debug!(steps, elapsed, completed, "fixed-step run finished");
    Ok(RunStats {
        steps,
        elapsed,
        completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert!((opts.dt - 1.0 / 60.0).abs() < 1e-15);
        assert_eq!(opts.t_end, 5.0);
        assert_eq!(opts.max_steps, 1_000_000);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn sim_options_invalid() {
        let bad_dt = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(matches!(bad_dt.validate(), Err(SimError::Core { .. })));
        let negative_dt = SimOptions {
            dt: -0.1,
            ..SimOptions::default()
        };
        assert!(negative_dt.validate().is_err());

        let bad_end = SimOptions {
            t_end: -1.0,
            ..SimOptions::default()
        };
        assert!(matches!(bad_end.validate(), Err(SimError::InvalidArg { .. })));

        let nan_end = SimOptions {
            t_end: f64::NAN,
            ..SimOptions::default()
        };
        assert!(matches!(nan_end.validate(), Err(SimError::Core { .. })));

        let bad_steps = SimOptions {
            max_steps: 0,
            ..SimOptions::default()
        };
        assert!(bad_steps.validate().is_err());
    }
}
