//! Statistics report: counts, kinds, nulls and descriptive statistics per column.

use super::calculator::{Advisory, AdvisoryKind, StatsCalculator};
use crate::config::LoadOptions;
use crate::data::{DataLoader, Table, ValueKind};
use crate::error::Result;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// One report row, keyed by the source column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub entry_count: usize,
    pub data_type: ValueKind,
    pub null_count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    fn numeric_fields(&self) -> [Option<f64>; 7] {
        [
            self.mean, self.std, self.min, self.p25, self.p50, self.p75, self.max,
        ]
    }
}

/// Column summaries in source column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    rows: Vec<ColumnSummary>,
    #[serde(skip)]
    advisories: Vec<Advisory>,
}

pub const REPORT_FIELDS: [&str; 11] = [
    "column",
    "entry_count",
    "data_type",
    "null_count",
    "mean",
    "std",
    "min",
    "25%",
    "50%",
    "75%",
    "max",
];

impl StatsReport {
    /// Summarize every column of a table.
    ///
    /// Count, kind and null fields exist for all columns; the descriptive
    /// fields are filled only for numeric columns that hold values.
    pub fn from_table(table: &Table) -> Result<Self> {
        let entry_count = table.row_count();
        let mut rows = Vec::with_capacity(table.column_count());
        let mut advisories = Vec::new();

        for column in table.columns() {
            let name = column.name().to_string();
            let kind = ValueKind::of(column);
            let mut row = ColumnSummary {
                column: name.clone(),
                entry_count,
                data_type: kind,
                null_count: column.null_count(),
                mean: None,
                std: None,
                min: None,
                p25: None,
                p50: None,
                p75: None,
                max: None,
            };

            if kind.is_numeric() {
                let values = Table::present_values(column)?;
                match StatsCalculator::describe(&values) {
                    Some(d) => {
                        if d.std.is_none() {
                            advisories.push(Advisory::new(&name, AdvisoryKind::SingleValue));
                        }
                        row.mean = Some(d.mean);
                        row.std = d.std;
                        row.min = Some(d.min);
                        row.p25 = Some(d.p25);
                        row.p50 = Some(d.p50);
                        row.p75 = Some(d.p75);
                        row.max = Some(d.max);
                    }
                    None => advisories.push(Advisory::new(&name, AdvisoryKind::EmptySlice)),
                }
            }

            rows.push(row);
        }

        Ok(Self { rows, advisories })
    }

    pub fn rows(&self) -> &[ColumnSummary] {
        &self.rows
    }

    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.rows.iter().find(|row| row.column == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// The report as a Polars frame with one row per source column.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.rows.iter().map(|r| r.column.as_str()).collect();
        let entry_counts: Vec<u64> = self.rows.iter().map(|r| r.entry_count as u64).collect();
        let kinds: Vec<&str> = self.rows.iter().map(|r| r.data_type.as_str()).collect();
        let null_counts: Vec<u64> = self.rows.iter().map(|r| r.null_count as u64).collect();

        let mut columns = vec![
            Column::new(REPORT_FIELDS[0].into(), names),
            Column::new(REPORT_FIELDS[1].into(), entry_counts),
            Column::new(REPORT_FIELDS[2].into(), kinds),
            Column::new(REPORT_FIELDS[3].into(), null_counts),
        ];
        for (idx, field) in REPORT_FIELDS[4..].iter().enumerate() {
            let values: Vec<Option<f64>> =
                self.rows.iter().map(|r| r.numeric_fields()[idx]).collect();
            columns.push(Column::new((*field).into(), values));
        }

        DataFrame::new(columns)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                let mut line = vec![
                    r.column.clone(),
                    r.entry_count.to_string(),
                    r.data_type.to_string(),
                    r.null_count.to_string(),
                ];
                line.extend(r.numeric_fields().into_iter().map(format_stat));
                line
            })
            .collect();

        let widths: Vec<usize> = REPORT_FIELDS
            .iter()
            .enumerate()
            .map(|(i, header)| {
                cells
                    .iter()
                    .map(|line| line[i].len())
                    .fold(header.len(), usize::max)
            })
            .collect();

        for (i, header) in REPORT_FIELDS.iter().enumerate() {
            if i == 0 {
                write!(f, "{:<w$}", header, w = widths[i])?;
            } else {
                write!(f, "  {:>w$}", header, w = widths[i])?;
            }
        }
        writeln!(f)?;
        for line in &cells {
            for (i, cell) in line.iter().enumerate() {
                if i == 0 {
                    write!(f, "{:<w$}", cell, w = widths[i])?;
                } else {
                    write!(f, "  {:>w$}", cell, w = widths[i])?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Load a CSV file and summarize it.
pub fn stats_report(path: impl AsRef<Path>, options: &LoadOptions) -> Result<StatsReport> {
    let table = DataLoader::load_csv(path, options)?;
    StatsReport::from_table(&table)
}
