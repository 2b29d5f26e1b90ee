use std::fmt::Write as _;
use std::path::Path;

use crate::error::{ModelError, ModelResult};

/// Largest number of rows [`Storage::resample`] will produce.
pub const MAX_RESAMPLED_ROWS: usize = 1_000_000;

/// One recorded sample: a time stamp and a value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRow {
    /// Simulation time of the sample.
    pub time: f64,
    /// One value per storage column.
    pub values: Vec<f64>,
}

/// Time-indexed table of values recorded by an analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    labels: Vec<String>,
    rows: Vec<StateRow>,
}

impl Storage {
    /// Create an empty storage with the given column labels.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            rows: Vec::new(),
        }
    }

    /// Column labels, excluding the time column.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Recorded rows in insertion order.
    pub fn rows(&self) -> &[StateRow] {
        &self.rows
    }

    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a sample.
    pub fn push(&mut self, time: f64, values: Vec<f64>) {
        self.rows.push(StateRow { time, values });
    }

    /// Resample at a fixed interval using linear interpolation between
    /// recorded rows. Non-positive intervals return an unchanged copy.
    ///
    /// Recorded times must be finite and non-decreasing, and the result may
    /// hold at most [`MAX_RESAMPLED_ROWS`] rows.
    pub fn resample(&self, interval: f64) -> ModelResult<Storage> {
        if interval.is_nan() || interval <= 0.0 || self.rows.len() < 2 {
            return Ok(self.clone());
        }
        if let Some(row) = self.rows.iter().position(|r| !r.time.is_finite()) {
            return Err(ModelError::Resample(format!(
                "row {row} has non-finite time {}",
                self.rows[row].time
            )));
        }
        if let Some(row) = self.rows.windows(2).position(|w| w[1].time < w[0].time) {
            return Err(ModelError::Resample(format!(
                "time {} of row {} is before time {} of row {row}",
                self.rows[row + 1].time,
                row + 1,
                self.rows[row].time
            )));
        }

        let start = self.rows[0].time;
        let end = self.rows[self.rows.len() - 1].time;
        let steps = ((end - start) / interval + 1.0e-9).floor();
        if !steps.is_finite() || steps >= MAX_RESAMPLED_ROWS as f64 {
            return Err(ModelError::Resample(format!(
                "interval {interval} over [{start}, {end}] exceeds {MAX_RESAMPLED_ROWS} rows"
            )));
        }

        let count = steps as usize + 1;
        let mut out = Storage::new(self.labels.clone());
        out.rows.reserve(count);
        for k in 0..count {
            let t = (start + interval * k as f64).min(end);
            out.push(t, self.interpolate(t));
        }
        Ok(out)
    }

    fn interpolate(&self, t: f64) -> Vec<f64> {
        let upper = self
            .rows
            .partition_point(|r| r.time < t)
            .clamp(1, self.rows.len() - 1);
        let (a, b) = (&self.rows[upper - 1], &self.rows[upper]);
        let span = b.time - a.time;
        let w = if span > 0.0 { (t - a.time) / span } else { 0.0 };
        a.values
            .iter()
            .zip(&b.values)
            .map(|(va, vb)| va + (vb - va) * w)
            .collect()
    }

    /// Render as tab-separated text with a `time` header column.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("time");
        for label in &self.labels {
            out.push('\t');
            out.push_str(label);
        }
        out.push('\n');
        for row in &self.rows {
            let _ = write!(out, "{}", row.time);
            for value in &row.values {
                let _ = write!(out, "\t{value}");
            }
            out.push('\n');
        }
        out
    }

    /// Write [`to_tsv`](Self::to_tsv) output to `path`.
    pub fn write_tsv(&self, path: &Path) -> ModelResult<()> {
        std::fs::write(path, self.to_tsv()).map_err(|source| ModelError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Storage {
        let mut s = Storage::new(vec!["q".into()]);
        s.push(0.0, vec![0.0]);
        s.push(0.3, vec![3.0]);
        s.push(1.0, vec![10.0]);
        s
    }

    #[test]
    fn resample_interpolates_linearly() {
        let out = ramp().resample(0.25).unwrap();
        let times: Vec<f64> = out.rows().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        for row in out.rows() {
            assert!((row.values[0] - row.time * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn negative_interval_keeps_every_row() {
        let s = ramp();
        assert_eq!(s.resample(-1.0).unwrap(), s);
        assert_eq!(s.resample(0.0).unwrap(), s);
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let mut s = Storage::new(vec!["q".into()]);
        s.push(f64::NAN, vec![0.0]);
        s.push(1.0, vec![1.0]);
        assert!(matches!(s.resample(0.5), Err(ModelError::Resample(_))));

        let mut s = Storage::new(vec!["q".into()]);
        s.push(0.0, vec![0.0]);
        s.push(f64::INFINITY, vec![1.0]);
        assert!(matches!(s.resample(0.5), Err(ModelError::Resample(_))));
    }

    #[test]
    fn decreasing_times_are_rejected() {
        let mut s = Storage::new(vec!["q".into()]);
        s.push(1.0, vec![1.0]);
        s.push(0.0, vec![0.0]);
        let err = s.resample(0.25).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn oversized_resample_is_rejected() {
        let mut s = Storage::new(vec!["q".into()]);
        s.push(0.0, vec![0.0]);
        s.push(1.0e12, vec![1.0]);
        assert!(matches!(s.resample(1.0e-3), Err(ModelError::Resample(_))));
    }

    #[test]
    fn repeated_times_resample_without_division() {
        let mut s = Storage::new(vec!["q".into()]);
        s.push(0.0, vec![0.0]);
        s.push(0.0, vec![5.0]);
        s.push(1.0, vec![10.0]);
        let out = s.resample(0.5).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.rows().iter().all(|r| r.values[0].is_finite()));
    }

    proptest::proptest! {
        #[test]
        fn resampled_values_stay_within_recorded_range(
            values in proptest::collection::vec(-100.0f64..100.0, 2..8),
            interval in 0.01f64..0.5,
        ) {
            let mut s = Storage::new(vec!["q".into()]);
            for (i, v) in values.iter().enumerate() {
                s.push(i as f64 * 0.1, vec![*v]);
            }
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            let out = s.resample(interval).unwrap();
            proptest::prop_assert!(!out.is_empty());
            proptest::prop_assert!((out.rows()[0].time - 0.0).abs() < 1e-12);
            for row in out.rows() {
                proptest::prop_assert!(row.values[0] >= lo - 1e-9 && row.values[0] <= hi + 1e-9);
            }
        }
    }

    #[test]
    fn tsv_has_header_and_rows() {
        let text = ramp().to_tsv();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time\tq");
        assert_eq!(lines[2], "0.3\t3");
        assert_eq!(lines.len(), 4);
    }
}
