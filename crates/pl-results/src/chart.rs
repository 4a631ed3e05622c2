//! Chart descriptions and their evaluation against a sample series.
//!
//! A [`ChartSpec`] names the axis keys and the series to draw; [`build_chart`]
//! turns it into plot points plus padded axis ranges. Axis labels resolve from
//! the axis itself, then the experiment's metrics, then [`BASE_METRICS`].

use crate::{ResultsError, ResultsResult};
use pl_sim::{MetricSpec, Sample, SampleSeries};
use serde::{Deserialize, Serialize};

/// Metrics every experiment may refer to without declaring them.
pub const BASE_METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Displacement", "m"),
    MetricSpec::new("s", "Displacement", "m"),
    MetricSpec::new("v", "Velocity", "m/s"),
    MetricSpec::new("a", "Acceleration", "m/s^2"),
    MetricSpec::new("F", "Force", "N"),
    MetricSpec::new("m", "Mass", "kg"),
];

/// Fraction of the data span added on each side of an axis.
const RANGE_PADDING: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl AxisSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            unit: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    #[default]
    Measured,
    Theory,
    Fit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: SeriesKind,
    /// Overrides the chart's x key for this series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_key: Option<String>,
}

impl SeriesSpec {
    pub fn measured(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: SeriesKind::Measured,
            x_key: None,
            y_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    /// Single measured series of `y_key` against `x_key`.
    pub fn xy(x_key: &str, y_key: &str, metrics: &[MetricSpec]) -> Self {
        let x = resolve_axis_meta(&AxisSpec::new(x_key), metrics);
        let y = resolve_axis_meta(&AxisSpec::new(y_key), metrics);
        Self {
            id: format!("{x_key}-{y_key}"),
            title: format!("{} vs {}", y.label, x.label),
            x: AxisSpec::new(x_key),
            y: AxisSpec::new(y_key),
            series: vec![SeriesSpec::measured(y_key, y.label)],
        }
    }

    /// Every key used by the chart must be a known metric.
    pub fn validate(&self, metrics: &[MetricSpec]) -> ResultsResult<()> {
        let keys = [Some(&self.x.key), Some(&self.y.key)]
            .into_iter()
            .chain(self.series.iter().flat_map(|s| [s.x_key.as_ref(), s.y_key.as_ref()]))
            .flatten();
        for key in keys {
            if find_metric(key, metrics).is_none() {
                return Err(ResultsError::UnknownMetric { key: key.clone() });
            }
        }
        Ok(())
    }
}

/// Resolved axis metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMeta {
    pub key: String,
    pub label: String,
    /// Empty when dimensionless.
    pub unit: String,
    /// `label (unit)`, or the bare label.
    pub display_name: String,
}

fn find_metric<'a>(key: &str, metrics: &'a [MetricSpec]) -> Option<&'a MetricSpec> {
    metrics
        .iter()
        .chain(BASE_METRICS)
        .find(|m| m.key == key)
}

pub fn resolve_axis_meta(axis: &AxisSpec, metrics: &[MetricSpec]) -> AxisMeta {
    let metric = find_metric(&axis.key, metrics);
    let label = axis
        .label
        .clone()
        .or_else(|| metric.map(|m| m.label.to_string()))
        .unwrap_or_else(|| axis.key.clone());
    let unit = axis
        .unit
        .clone()
        .or_else(|| metric.map(|m| m.unit.to_string()))
        .unwrap_or_default();
    let display_name = if unit.is_empty() {
        label.clone()
    } else {
        format!("{label} ({unit})")
    };
    AxisMeta {
        key: axis.key.clone(),
        label,
        unit,
        display_name,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Data span padded by 5% per side; a single value expands by ±1; no
    /// data gives `default`.
    pub fn fit(values: impl IntoIterator<Item = f64>, default: AxisRange) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            default
        } else if lo == hi {
            Self::new(lo - 1.0, hi + 1.0)
        } else {
            let pad = (hi - lo) * RANGE_PADDING;
            Self::new(lo - pad, hi + pad)
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Empty-data range for an x axis.
    pub fn default_x(key: &str) -> Self {
        match key {
            "t" => Self::new(0.0, 5.0),
            _ => Self::new(0.0, 10.0),
        }
    }

    /// Empty-data range for a y axis.
    pub fn default_y(key: &str) -> Self {
        match key {
            "t" => Self::new(0.0, 5.0),
            "x" => Self::new(0.0, 10.0),
            _ => Self::new(-10.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub id: String,
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<[f64; 2]>,
}

/// A chart ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub x: AxisMeta,
    pub y: AxisMeta,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub series: Vec<PlotSeries>,
}

/// Value for `key`, falling back to the chart-level key.
fn lookup(row: &Sample, key: Option<&String>, fallback: &str) -> Option<f64> {
    key.and_then(|k| row.get(k)).or_else(|| row.get(fallback))
}

pub fn build_chart(spec: &ChartSpec, data: &SampleSeries, metrics: &[MetricSpec]) -> Chart {
    let series: Vec<PlotSeries> = spec
        .series
        .iter()
        .map(|s| PlotSeries {
            id: s.id.clone(),
            name: s.name.clone(),
            kind: s.kind,
            points: data
                .iter()
                .filter_map(|row| {
                    Some([
                        lookup(row, s.x_key.as_ref(), &spec.x.key)?,
                        lookup(row, s.y_key.as_ref(), &spec.y.key)?,
                    ])
                })
                .collect(),
        })
        .collect();

    let points = || series.iter().flat_map(|s| s.points.iter());
    let x_range = AxisRange::fit(points().map(|p| p[0]), AxisRange::default_x(&spec.x.key));
    let y_range = AxisRange::fit(points().map(|p| p[1]), AxisRange::default_y(&spec.y.key));

    Chart {
        id: spec.id.clone(),
        title: spec.title.clone(),
        x: resolve_axis_meta(&spec.x, metrics),
        y: resolve_axis_meta(&spec.y, metrics),
        x_range,
        y_range,
        series,
    }
}
