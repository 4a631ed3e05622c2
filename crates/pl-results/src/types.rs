//! Result data types.

use pl_sim::Sample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    /// Experiment key, e.g. `force-analysis`.
    pub experiment: String,
    /// RFC 3339.
    pub timestamp: String,
    /// Parameter values after the run's overrides were applied.
    pub params: BTreeMap<String, f64>,
    pub timing: RunTiming,
    /// Sample keys in recording order.
    pub columns: Vec<String>,
    pub version: String,
}

impl RunManifest {
    /// Manifest stamped with the current time.
    pub fn new(
        run_id: RunId,
        experiment: impl Into<String>,
        params: BTreeMap<String, f64>,
        timing: RunTiming,
        columns: Vec<String>,
    ) -> Self {
        Self {
            run_id,
            experiment: experiment.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            params,
            timing,
            columns,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunTiming {
    pub dt_s: f64,
    pub t_end_s: f64,
    pub steps: usize,
}

/// One stored sample row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleRecord(pub BTreeMap<String, f64>);

impl SampleRecord {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }
}

impl From<&Sample> for SampleRecord {
    fn from(sample: &Sample) -> Self {
        Self(sample.iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}
