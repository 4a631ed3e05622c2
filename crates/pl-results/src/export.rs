//! CSV export.

use crate::types::SampleRecord;
use pl_sim::SampleSeries;

/// Header from the series' column order, one line per row. Missing values
/// are left empty.
pub fn series_to_csv(series: &SampleSeries) -> String {
    let columns = series.keys();
    let mut csv = columns.join(",");
    csv.push('\n');
    for row in series.iter() {
        push_row(&mut csv, columns.iter().map(|k| row.get(k)));
    }
    csv
}

/// Same layout for stored rows.
pub fn records_to_csv(columns: &[String], records: &[SampleRecord]) -> String {
    let mut csv = columns.join(",");
    csv.push('\n');
    for record in records {
        push_row(&mut csv, columns.iter().map(|k| record.get(k)));
    }
    csv
}

fn push_row(csv: &mut String, values: impl Iterator<Item = Option<f64>>) {
    let cells: Vec<String> = values
        .map(|v| v.map(|v| v.to_string()).unwrap_or_default())
        .collect();
    csv.push_str(&cells.join(","));
    csv.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_sim::{Sample, SeriesCapacity};

    #[test]
    fn header_then_rows() {
        let mut series = SampleSeries::new(SeriesCapacity::Unbounded);
        series.push(Sample::new().with("t", 0.0).with("x", 1.5));
        series.push(Sample::new().with("t", 0.5).with("x", 4.0));
        assert_eq!(series_to_csv(&series), "t,x\n0,1.5\n0.5,4\n");
    }

    #[test]
    fn missing_values_are_blank() {
        let columns = vec!["t".to_string(), "v".to_string()];
        let record = SampleRecord([("t".to_string(), 1.0)].into_iter().collect());
        assert_eq!(records_to_csv(&columns, &[record]), "t,v\n1,\n");
    }

    #[test]
    fn stored_rows_keep_column_order() {
        let columns = vec!["t".to_string(), "x".to_string()];
        let rows = [(0.0, 0.0), (0.5, 2.5), (1.0, 5.0)].map(|(t, x)| {
            SampleRecord([("x".to_string(), x), ("t".to_string(), t)].into_iter().collect())
        });
        assert_eq!(records_to_csv(&columns, &rows), "t,x\n0,0\n0.5,2.5\n1,5\n");
    }
}
