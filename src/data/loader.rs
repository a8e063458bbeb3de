//! CSV Data Loader Module
//! Reads CSV files into a [`Table`] using Polars and pins down each column's value kind.

use crate::config::LoadOptions;
use crate::error::{EdaError, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// The closed set of value kinds a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Integer,
    Float,
    Text,
    Boolean,
    /// Every cell in the column is missing.
    Missing,
}

impl ValueKind {
    /// Infer the kind of a loaded column.
    pub fn of(column: &Column) -> Self {
        if column.len() > 0 && column.null_count() == column.len() {
            return ValueKind::Missing;
        }
        match column.dtype() {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ValueKind::Integer,
            DataType::Float32 | DataType::Float64 => ValueKind::Float,
            DataType::Boolean => ValueKind::Boolean,
            DataType::Null => ValueKind::Missing,
            _ => ValueKind::Text,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::Missing => "missing",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows x named columns.
///
/// The row count is stored next to the frame so that a table holding no
/// columns still remembers how many rows it spans.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    row_count: usize,
}

impl Table {
    pub fn new(frame: DataFrame) -> Self {
        let row_count = frame.height();
        Self { frame, row_count }
    }

    /// A copy of this table without the named columns. The row count is kept
    /// even when no columns remain.
    pub(crate) fn without_columns(&self, names: Vec<PlSmallStr>) -> Self {
        Self {
            frame: self.frame.drop_many(names),
            row_count: self.row_count,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.frame.width()
    }

    pub fn columns(&self) -> &[Column] {
        self.frame.get_columns()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.frame.column(name).ok()
    }

    pub fn kind_of(&self, name: &str) -> Option<ValueKind> {
        self.column(name).map(ValueKind::of)
    }

    /// Names of integer and float columns, in table order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns()
            .iter()
            .filter(|col| ValueKind::of(col).is_numeric())
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Column values cast to `f64`, with missing cells kept as `None`.
    pub fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>> {
        let as_f64 = column.cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;
        Ok(ca.into_iter().collect())
    }

    /// Present values of a column cast to `f64`.
    pub fn present_values(column: &Column) -> Result<Vec<f64>> {
        Ok(Self::numeric_values(column)?
            .into_iter()
            .flatten()
            .collect())
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into a table.
    pub fn load_csv(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Table> {
        let path = path.as_ref();

        // Fail early on unreadable input so it is not reported as a parse error.
        let access_err = |source: io::Error| EdaError::DataAccess {
            path: path.to_path_buf(),
            source,
        };
        if !fs::metadata(path).map_err(access_err)?.is_file() {
            return Err(access_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        File::open(path).map_err(access_err)?;

        let parse_err = |source: PolarsError| EdaError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()
            .map_err(parse_err)?
            .collect()
            .map_err(parse_err)?;

        let df = Self::normalize_floats(df, options).map_err(parse_err)?;
        log::debug!(
            "Loaded {} ({} rows x {} columns)",
            path.display(),
            df.height(),
            df.width()
        );

        Ok(Table::new(df))
    }

    /// Turn NaN cells (and infinities, when asked) in float columns into nulls.
    fn normalize_floats(df: DataFrame, options: &LoadOptions) -> PolarsResult<DataFrame> {
        let inf_as_missing = options.inf_as_missing;
        let needs_pass = df
            .get_columns()
            .iter()
            .any(|col| matches!(col.dtype(), DataType::Float32 | DataType::Float64));
        if !needs_pass {
            return Ok(df);
        }

        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                if !matches!(col.dtype(), DataType::Float32 | DataType::Float64) {
                    return Ok(col.clone());
                }
                let as_f64 = col.cast(&DataType::Float64)?;
                let cleaned: Vec<Option<f64>> = as_f64
                    .f64()?
                    .into_iter()
                    .map(|v| v.filter(|x| !(x.is_nan() || (inf_as_missing && x.is_infinite()))))
                    .collect();
                Ok(Column::new(col.name().clone(), cleaned))
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        DataFrame::new(columns)
    }
}
