//! YAML configuration: user settings, run defaults and headless run files.

use crate::catalog::ExperimentKind;
use crate::error::{AppError, AppResult};
use crate::run_service::RunRequest;
use crate::settings::UserSettings;
use pl_controls::ParamEdit;
use pl_sim::{SeriesCapacity, SimOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub settings: UserSettings,
    pub run: RunDefaults,
}

/// Timing used when a run does not specify its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    pub dt_s: f64,
    pub t_end_s: f64,
    pub max_steps: usize,
    /// Ring-buffer size for sample history; unbounded when absent.
    pub history_capacity: Option<usize>,
}

impl Default for RunDefaults {
    fn default() -> Self {
        let opts = SimOptions::default();
        Self {
            dt_s: opts.dt,
            t_end_s: opts.t_end,
            max_steps: opts.max_steps,
            history_capacity: None,
        }
    }
}

impl RunDefaults {
    pub fn capacity(&self) -> SeriesCapacity {
        self.history_capacity
            .map_or(SeriesCapacity::Unbounded, SeriesCapacity::Bounded)
    }
}

/// One headless run described in a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Key or route.
    pub experiment: String,
    #[serde(default)]
    pub dt_s: Option<f64>,
    #[serde(default)]
    pub t_end_s: Option<f64>,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl RunConfig {
    pub fn to_request(&self, defaults: &RunDefaults) -> AppResult<RunRequest> {
        let experiment: ExperimentKind = self.experiment.parse()?;
        Ok(RunRequest {
            experiment,
            dt_s: self.dt_s.unwrap_or(defaults.dt_s),
            t_end_s: self.t_end_s.unwrap_or(defaults.t_end_s),
            max_steps: defaults.max_steps,
            capacity: defaults.capacity(),
            edits: self
                .params
                .iter()
                .map(|(k, v)| ParamEdit::new(k.clone(), *v))
                .collect(),
        })
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load a lab config from a YAML file.
pub fn load_config(path: &Path) -> AppResult<LabConfig> {
    let config: LabConfig = read_yaml(path)?;
    if !(config.run.dt_s > 0.0 && config.run.t_end_s >= 0.0) {
        return Err(AppError::Config(format!(
            "run timing must have dt_s > 0 and t_end_s >= 0 (got {} / {})",
            config.run.dt_s, config.run.t_end_s
        )));
    }
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load a config when `path` is given, defaults otherwise.
pub fn load_config_or_default(path: Option<&Path>) -> AppResult<LabConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(LabConfig::default()),
    }
}

/// Save a lab config to a YAML file.
pub fn save_config(path: &Path, config: &LabConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "saved config");
    Ok(())
}

/// Load a headless run description.
pub fn load_run_config(path: &Path) -> AppResult<RunConfig> {
    let config = read_yaml(path)?;
    tracing::info!(path = %path.display(), "loaded run config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_config_fills_timing_from_defaults() {
        let yaml = "experiment: free-fall\nt_end_s: 2.0\nparams:\n  y0: 45\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        let defaults = RunDefaults {
            history_capacity: Some(100),
            ..RunDefaults::default()
        };
        let request = config.to_request(&defaults).unwrap();
        assert_eq!(request.experiment, ExperimentKind::FreeFall);
        assert_eq!(request.t_end_s, 2.0);
        assert_eq!(request.dt_s, defaults.dt_s);
        assert_eq!(request.capacity, SeriesCapacity::Bounded(100));
        assert_eq!(request.edits, vec![ParamEdit::new("y0", 45.0)]);
    }

    #[test]
    fn unknown_experiment_in_run_config() {
        let config = RunConfig {
            experiment: "orbit".to_string(),
            dt_s: None,
            t_end_s: None,
            params: BTreeMap::new(),
        };
        assert!(matches!(
            config.to_request(&RunDefaults::default()),
            Err(AppError::UnknownExperiment(_))
        ));
    }

    #[test]
    fn empty_lab_config_is_default() {
        let config: LabConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, LabConfig::default());
    }
}
