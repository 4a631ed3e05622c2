//! pl-results: charts, run storage and export for sample series.

pub mod chart;
pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use chart::{
    AxisMeta, AxisRange, AxisSpec, BASE_METRICS, Chart, ChartSpec, PlotSeries, SeriesKind,
    SeriesSpec, build_chart, resolve_axis_meta,
};
pub use export::{records_to_csv, series_to_csv};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Unknown metric: {key}")]
    UnknownMetric { key: String },
}
