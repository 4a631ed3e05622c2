//! Parameter sweeps: one run per parameter value, reduced to one number.
//!
//! Runs are independent sessions and execute on the rayon pool.

use crate::error::{AppError, AppResult};
use crate::run_service::{self, RunRequest};
use pl_controls::ParamEdit;
use pl_core::timing::Timer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a run's metric column becomes one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduce {
    #[default]
    Final,
    Max,
    Min,
}

impl Reduce {
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Reduce::Final => values.last().copied(),
            Reduce::Max => values.iter().copied().reduce(f64::max),
            Reduce::Min => values.iter().copied().reduce(f64::min),
        }
    }
}

impl fmt::Display for Reduce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reduce::Final => "final",
            Reduce::Max => "max",
            Reduce::Min => "min",
        })
    }
}

impl FromStr for Reduce {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "final" => Ok(Reduce::Final),
            "max" => Ok(Reduce::Max),
            "min" => Ok(Reduce::Min),
            other => Err(AppError::InvalidInput(format!(
                "unknown reduction '{other}' (expected final, max or min)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepRequest {
    /// Shared timing and fixed edits for every run.
    pub base: RunRequest,
    pub param: String,
    pub from: f64,
    pub to: f64,
    pub points: usize,
    pub metric: String,
    pub reduce: Reduce,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Parameter value the run actually used, after clamping.
    pub value: f64,
    pub result: f64,
}

/// `points` evenly spaced values from `from` to `to` inclusive.
pub fn linspace(from: f64, to: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![from],
        n => {
            let step = (to - from) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { to } else { from + step * i as f64 })
                .collect()
        }
    }
}

/// Results are in sweep order.
pub fn run_sweep(request: &SweepRequest) -> AppResult<Vec<SweepPoint>> {
    if request.points == 0 {
        return Err(AppError::InvalidInput("sweep needs at least one point".to_string()));
    }
    let opened = request.base.experiment.open();
    if !opened.metrics().iter().any(|m| m.key == request.metric) {
        return Err(pl_results::ResultsError::UnknownMetric {
            key: request.metric.clone(),
        }
        .into());
    }
    if !opened.param_specs().iter().any(|p| p.key == request.param && !p.readonly) {
        return Err(AppError::InvalidInput(format!(
            "'{}' is not an editable parameter of {}",
            request.param, request.base.experiment
        )));
    }

    let timer = Timer::start("sweep");
    let values = linspace(request.from, request.to, request.points);
    let results = values
        .par_iter()
        .map(|&value| sweep_point(request, value))
        .collect::<AppResult<Vec<_>>>()?;
    let wall_time_s = timer.stop();

    tracing::info!(
        experiment = request.base.experiment.key(),
        param = %request.param,
        metric = %request.metric,
        points = results.len(),
        wall_time_s,
        "sweep finished"
    );
    Ok(results)
}

fn sweep_point(request: &SweepRequest, value: f64) -> AppResult<SweepPoint> {
    let mut run = request.base.clone();
    run.edits.push(ParamEdit::new(request.param.clone(), value));
    let response = run_service::run(&run)?;

    let column = response.series.column(&request.metric);
    let result = request.reduce.apply(&column).ok_or_else(|| {
        AppError::Simulation(format!(
            "{} produced no '{}' samples",
            request.base.experiment, request.metric
        ))
    })?;
    Ok(SweepPoint {
        value: response.params[&request.param],
        result,
    })
}
