//! Flat named-scalar samples and the per-session sample history.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::VecDeque;

/// Display metadata for one sample key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

impl MetricSpec {
    pub const fn new(key: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self { key, label, unit }
    }

    /// `label (unit)`, or just the label when the metric is dimensionless.
    pub fn display_name(&self) -> String {
        if self.unit.is_empty() {
            self.label.to_string()
        } else {
            format!("{} ({})", self.label, self.unit)
        }
    }
}

/// One charting record: ordered `(key, value)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    entries: Vec<(&'static str, f64)>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Sample::set`].
    pub fn with(mut self, key: &'static str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite a value, keeping first-insertion order.
    pub fn set(&mut self, key: &'static str, value: f64) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// How much history a series keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesCapacity {
    /// Grow for the whole session.
    #[default]
    Unbounded,
    /// Ring buffer: the oldest row is evicted once `n` rows are held.
    Bounded(usize),
}

/// Ordered sample history for one session.
#[derive(Debug, Clone, Default)]
pub struct SampleSeries {
    rows: VecDeque<Sample>,
    capacity: SeriesCapacity,
    evicted: usize,
}

impl SampleSeries {
    pub fn new(capacity: SeriesCapacity) -> Self {
        let rows = match capacity {
            SeriesCapacity::Bounded(n) => VecDeque::with_capacity(n),
            SeriesCapacity::Unbounded => VecDeque::new(),
        };
        Self {
            rows,
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        if let SeriesCapacity::Bounded(n) = self.capacity {
            if n == 0 {
                self.evicted += 1;
                return;
            }
            while self.rows.len() >= n {
                self.rows.pop_front();
                self.evicted += 1;
            }
        }
        self.rows.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.evicted = 0;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn capacity(&self) -> SeriesCapacity {
        self.capacity
    }

    /// Rows dropped by the ring buffer since the last clear.
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn last(&self) -> Option<&Sample> {
        self.rows.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.rows.iter()
    }

    /// All values for `key`, skipping rows that lack it.
    pub fn column(&self, key: &str) -> Vec<f64> {
        self.rows.iter().filter_map(|s| s.get(key)).collect()
    }

    /// `(x, y)` pairs for two keys, skipping rows that lack either.
    pub fn pairs(&self, x_key: &str, y_key: &str) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .filter_map(|s| Some([s.get(x_key)?, s.get(y_key)?]))
            .collect()
    }

    /// Keys of the most recent row, in record order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.rows
            .back()
            .map(|s| s.keys().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(t: f64) -> Sample {
        Sample::new().with("t", t).with("x", 2.0 * t)
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut s = Sample::new().with("t", 0.0).with("v", 1.0);
        s.set("t", 3.0);
        assert_eq!(s.keys().collect::<Vec<_>>(), vec!["t", "v"]);
        assert_eq!(s.get("t"), Some(3.0));
        assert_eq!(s.get("missing"), None);
    }

    #[test]
    fn sample_serializes_as_ordered_map() {
        let s = Sample::new().with("t", 1.5).with("x", 3.0);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"t":1.5,"x":3.0}"#);
    }

    #[test]
    fn unbounded_series_keeps_everything() {
        let mut series = SampleSeries::default();
        for i in 0..1000 {
            series.push(row(i as f64));
        }
        assert_eq!(series.len(), 1000);
        assert_eq!(series.evicted(), 0);
    }

    #[test]
    fn bounded_series_evicts_oldest() {
        let mut series = SampleSeries::new(SeriesCapacity::Bounded(3));
        for i in 0..5 {
            series.push(row(i as f64));
        }
        assert_eq!(series.len(), 3);
        assert_eq!(series.evicted(), 2);
        assert_eq!(series.column("t"), vec![2.0, 3.0, 4.0]);

        series.clear();
        assert!(series.is_empty());
        assert_eq!(series.evicted(), 0);
    }

    #[test]
    fn pairs_skip_missing_keys() {
        let mut series = SampleSeries::default();
        series.push(row(1.0));
        series.push(Sample::new().with("t", 2.0));
        assert_eq!(series.pairs("t", "x"), vec![[1.0, 2.0]]);
        assert_eq!(series.keys(), vec!["t"]);
    }

    #[test]
    fn display_name_includes_unit() {
        assert_eq!(MetricSpec::new("v", "Velocity", "m/s").display_name(), "Velocity (m/s)");
        assert_eq!(MetricSpec::new("mu", "Friction coeff.", "").display_name(), "Friction coeff.");
    }

    proptest! {
        #[test]
        fn bounded_series_keeps_the_newest_rows_in_order(cap in 0usize..16, pushed in 0usize..64) {
            let mut series = SampleSeries::new(SeriesCapacity::Bounded(cap));
            for i in 0..pushed {
                series.push(row(i as f64));
            }
            let kept = pushed.min(cap);
            prop_assert_eq!(series.len(), kept);
            prop_assert_eq!(series.evicted(), pushed - kept);
            let expected: Vec<f64> = ((pushed - kept)..pushed).map(|i| i as f64).collect();
            prop_assert_eq!(series.column("t"), expected);
        }
    }
}
