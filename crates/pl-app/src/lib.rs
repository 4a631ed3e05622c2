//! Shared application service layer for physlab.
//!
//! This crate gives the CLI and the GUI one interface to the experiments:
//! the catalog and navigation menu, type-erased sessions, user settings and
//! YAML configuration, headless runs with persistence, parameter sweeps and
//! series statistics.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod run_service;
pub mod settings;
pub mod sweep;

// Re-export key types for convenience
pub use catalog::{ExperimentGroup, ExperimentKind, MenuNode, menu_tree};
pub use config::{
    LabConfig, RunConfig, RunDefaults, load_config, load_config_or_default, load_run_config,
    save_config,
};
pub use error::{AppError, AppResult};
pub use handle::{Experiment, LabExperiment};
pub use metrics::{MetricSummary, first_crossing, summarize};
pub use run_service::{RunRequest, RunResponse, list_runs, load_run, save_run};
pub use settings::UserSettings;
pub use sweep::{Reduce, SweepPoint, SweepRequest, linspace, run_sweep};
