//! Headless run execution and persistence.

use crate::catalog::ExperimentKind;
use crate::error::AppResult;
use pl_controls::{ParamEdit, ParameterController};
use pl_core::timing::Timer;
use pl_results::{RunManifest, RunStore, RunTiming, SampleRecord, compute_run_id};
use pl_sim::{RunStats, SampleSeries, SeriesCapacity, SimOptions};
use std::collections::BTreeMap;
use std::path::Path;

/// Request to execute a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub experiment: ExperimentKind,
    pub dt_s: f64,
    pub t_end_s: f64,
    pub max_steps: usize,
    pub capacity: SeriesCapacity,
    /// Applied in order before the run starts.
    pub edits: Vec<ParamEdit>,
}

impl RunRequest {
    pub fn new(experiment: ExperimentKind) -> Self {
        let opts = SimOptions::default();
        Self {
            experiment,
            dt_s: opts.dt,
            t_end_s: opts.t_end,
            max_steps: opts.max_steps,
            capacity: SeriesCapacity::Unbounded,
            edits: Vec::new(),
        }
    }

    pub fn with_edit(mut self, key: &str, value: f64) -> Self {
        self.edits.push(ParamEdit::new(key, value));
        self
    }

    fn options(&self) -> SimOptions {
        SimOptions {
            dt: self.dt_s,
            t_end: self.t_end_s,
            max_steps: self.max_steps,
        }
    }
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub experiment: ExperimentKind,
    /// Parameter values once the edits were applied, before the first frame.
    pub params: BTreeMap<String, f64>,
    pub series: SampleSeries,
    pub stats: RunStats,
    pub dt_s: f64,
    pub t_end_s: f64,
    pub wall_time_s: f64,
}

/// Open the experiment, apply the edits and play it at a fixed step.
///
/// Edits are clamped to the parameter ranges but not snapped to the slider
/// grid. Experiments without time evolution yield their single current sample.
pub fn run(request: &RunRequest) -> AppResult<RunResponse> {
    let timer = Timer::start("run");
    let mut exp = request.experiment.open_with(request.capacity);

    let controller = ParameterController::exact();
    for edit in &request.edits {
        exp.apply_edit(&controller, &edit.key, edit.value)?;
    }
    let params = exp
        .param_values()
        .into_iter()
        .map(|(spec, value)| (spec.key.to_string(), value))
        .collect();

    let (series, stats) = if exp.playable() {
        let stats = exp.run_fixed(&request.options())?;
        (exp.series().clone(), stats)
    } else {
        request.options().validate()?;
        let mut series = SampleSeries::new(request.capacity);
        series.push(exp.current_sample());
        let stats = RunStats {
            steps: 0,
            elapsed: 0.0,
            completed: true,
        };
        (series, stats)
    };

    let wall_time_s = timer.stop();
    tracing::info!(
        experiment = request.experiment.key(),
        steps = stats.steps,
        samples = series.len(),
        wall_time_s,
        "run finished"
    );

    Ok(RunResponse {
        experiment: request.experiment,
        params,
        series,
        stats,
        dt_s: request.dt_s,
        t_end_s: request.t_end_s,
        wall_time_s,
    })
}

/// Persist a finished run. Identical requests overwrite the same run id.
pub fn save_run(store: &RunStore, response: &RunResponse) -> AppResult<RunManifest> {
    let timing = RunTiming {
        dt_s: response.dt_s,
        t_end_s: response.t_end_s,
        steps: response.stats.steps,
    };
    let experiment = response.experiment.key();
    let run_id = compute_run_id(experiment, &response.params, &timing);
    let columns = response
        .series
        .keys()
        .into_iter()
        .map(str::to_string)
        .collect();
    let manifest = RunManifest::new(run_id, experiment, response.params.clone(), timing, columns);
    let records: Vec<SampleRecord> = response.series.iter().map(SampleRecord::from).collect();

    store.save_run(&manifest, &records)?;
    tracing::info!(run_id = %manifest.run_id, root = %store.root().display(), "saved run");
    Ok(manifest)
}

/// Stored runs under `root`, optionally for one experiment.
pub fn list_runs(root: &Path, experiment: Option<ExperimentKind>) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::new(root)?;
    Ok(store.list_runs(experiment.map(ExperimentKind::key))?)
}

pub fn load_run(root: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<SampleRecord>)> {
    let store = RunStore::new(root)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_samples(run_id)?;
    Ok((manifest, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_apply_before_the_first_frame() {
        let request = RunRequest {
            t_end_s: 1.0,
            ..RunRequest::new(ExperimentKind::UniformMotion).with_edit("v", 3.0)
        };
        let response = run(&request).unwrap();
        assert_eq!(response.params["v"], 3.0);
        assert_eq!(response.params["t"], 0.0);
        let last = response.series.last().unwrap();
        assert!((last.get("x").unwrap() - 3.0).abs() < 1e-9);
        assert!(response.stats.completed);
    }

    #[test]
    fn exact_controller_clamps_without_snapping() {
        let request = RunRequest {
            t_end_s: 0.1,
            ..RunRequest::new(ExperimentKind::UniformMotion)
                .with_edit("v", 3.3)
                .with_edit("x0", 500.0)
        };
        let response = run(&request).unwrap();
        assert_eq!(response.params["v"], 3.3);
        assert_eq!(response.params["x0"], 50.0);
    }

    #[test]
    fn static_experiment_yields_one_sample() {
        let response = run(&RunRequest::new(ExperimentKind::ForceTypes)).unwrap();
        assert_eq!(response.series.len(), 1);
        assert_eq!(response.stats.steps, 0);
    }

    #[test]
    fn bad_edit_fails_the_run() {
        let request = RunRequest::new(ExperimentKind::FreeFall).with_edit("bogus", 1.0);
        assert!(matches!(run(&request), Err(crate::AppError::Control(_))));
    }
}
