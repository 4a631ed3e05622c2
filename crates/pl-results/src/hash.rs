//! Content-based hashing for run IDs.

use crate::types::RunTiming;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Same experiment, parameters and timing give the same id.
pub fn compute_run_id(experiment: &str, params: &BTreeMap<String, f64>, timing: &RunTiming) -> String {
    let mut hasher = Sha256::new();

    hasher.update(experiment.as_bytes());

    let params_json = serde_json::to_string(params).unwrap_or_default();
    hasher.update(params_json.as_bytes());

    let timing_json = serde_json::to_string(timing).unwrap_or_default();
    hasher.update(timing_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
