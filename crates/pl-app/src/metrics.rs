//! Summary statistics over a recorded sample series.

use pl_sim::SampleSeries;
use serde::Serialize;

/// Statistics for one metric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub min: f64,
    pub max: f64,
    /// Last recorded value
    pub final_value: f64,
    pub mean: f64,
    /// Number of rows that carried the metric
    pub count: usize,
}

/// `None` when no row carries `key`.
pub fn summarize(series: &SampleSeries, key: &str) -> Option<MetricSummary> {
    let values = series.column(key);
    let final_value = *values.last()?;
    let (min, max, sum) = values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
    );
    Some(MetricSummary {
        min,
        max,
        final_value,
        mean: sum / values.len() as f64,
        count: values.len(),
    })
}

/// First time `key` reaches `level`, interpolated linearly between the two
/// bracketing rows. Time comes from the `t` column.
///
/// Returns `None` when the metric never reaches the level.
pub fn first_crossing(series: &SampleSeries, key: &str, level: f64) -> Option<f64> {
    let points = series.pairs("t", key);
    let (t0, v0) = (points.first()?[0], points.first()?[1]);
    if v0 == level {
        return Some(t0);
    }

    points.windows(2).find_map(|w| {
        let ([ta, va], [tb, vb]) = (w[0], w[1]);
        let crossed = (va - level) * (vb - level) <= 0.0 && va != vb;
        crossed.then(|| ta + (tb - ta) * (level - va) / (vb - va))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_sim::{Sample, SeriesCapacity};

    fn series(rows: &[(f64, f64)]) -> SampleSeries {
        let mut s = SampleSeries::new(SeriesCapacity::Unbounded);
        for &(t, y) in rows {
            s.push(Sample::new().with("t", t).with("y", y));
        }
        s
    }

    #[test]
    fn summary_statistics() {
        let s = series(&[(0.0, 4.0), (1.0, -2.0), (2.0, 1.0)]);
        let summary = summarize(&s, "y").unwrap();
        assert_eq!(summary.min, -2.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.final_value, 1.0);
        assert_eq!(summary.mean, 1.0);
        assert_eq!(summary.count, 3);
        assert!(summarize(&s, "v").is_none());
    }

    #[test]
    fn crossing_is_interpolated() {
        let s = series(&[(0.0, 10.0), (1.0, 6.0), (2.0, 2.0), (3.0, 0.0)]);
        assert!((first_crossing(&s, "y", 4.0).unwrap() - 1.5).abs() < 1e-12);
        assert_eq!(first_crossing(&s, "y", 0.0), Some(3.0));
        assert_eq!(first_crossing(&s, "y", 10.0), Some(0.0));
        assert_eq!(first_crossing(&s, "y", 20.0), None);
    }

    #[test]
    fn flat_segments_do_not_cross() {
        let s = series(&[(0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(first_crossing(&s, "y", 0.0), None);
    }
}
