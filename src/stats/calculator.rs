//! Statistics Calculator Module
//! Descriptive statistics and pairwise Pearson correlation.

use crate::data::{ColumnClassifier, Table};
use crate::error::{EdaError, Result};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;

/// A non-fatal statistical condition hit while summarizing a column.
///
/// Advisories never change a computed value; the affected statistic is
/// simply left undefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub column: String,
    pub kind: AdvisoryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// Statistic requested on a column with no values.
    EmptySlice,
    /// Sample standard deviation of a single value.
    SingleValue,
    /// Correlation involving a column whose values are all equal.
    ZeroVariance,
}

impl Advisory {
    pub fn new(column: impl Into<String>, kind: AdvisoryKind) -> Self {
        Self {
            column: column.into(),
            kind,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            AdvisoryKind::EmptySlice => "has no values; statistics are undefined",
            AdvisoryKind::SingleValue => "has a single value; standard deviation is undefined",
            AdvisoryKind::ZeroVariance => "has zero variance; correlation is undefined",
        };
        write!(f, "column '{}' {}", self.column, what)
    }
}

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); undefined below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Returns `None` when there are no values.
    pub fn describe(values: &[f64]) -> Option<Descriptive> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let sorted = Self::sorted(values);
        let std = if n > 1 {
            Some(values.iter().std_dev())
        } else {
            None
        };

        Some(Descriptive {
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        })
    }

    pub fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Pearson correlation over rows where both values are present.
    ///
    /// `NaN` when fewer than two complete rows remain or either side has
    /// zero variance.
    pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();
        if xs.len() < 2 {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }
        let r = xs.iter().covariance(ys.iter()) / (sx * sy);
        r.clamp(-1.0, 1.0)
    }
}

/// Pairwise Pearson correlation between the numeric columns of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
    #[serde(skip)]
    advisories: Vec<Advisory>,
}

impl CorrelationMatrix {
    /// Correlate every numeric column of `table` with every other.
    pub fn from_table(table: &Table) -> Result<Self> {
        let numeric = ColumnClassifier::numeric(table);
        if numeric.column_count() == 0 {
            return Err(EdaError::InsufficientData(
                "correlation needs at least one numeric column".to_string(),
            ));
        }

        let columns = numeric.column_names();
        let series = numeric
            .columns()
            .iter()
            .map(Table::numeric_values)
            .collect::<Result<Vec<_>>>()?;

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        let mut advisories = Vec::new();
        for i in 0..n {
            values[i][i] = Self::self_correlation(&columns[i], &series[i], &mut advisories);
            for j in (i + 1)..n {
                let r = StatsCalculator::pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            columns,
            values,
            advisories,
        })
    }

    fn self_correlation(name: &str, values: &[Option<f64>], advisories: &mut Vec<Advisory>) -> f64 {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            advisories.push(Advisory::new(name, AdvisoryKind::EmptySlice));
            return f64::NAN;
        }
        let first = present[0];
        if present.len() < 2 || present.iter().all(|v| *v == first) {
            advisories.push(Advisory::new(name, AdvisoryKind::ZeroVariance));
            return f64::NAN;
        }
        1.0
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Coefficient for a pair of column names.
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}
